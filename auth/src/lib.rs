//! Authentication utilities library
//!
//! Provides the credential and session primitives used by the web application:
//! - Password hashing (Argon2id)
//! - Signed session tokens (HS256) carrying the authenticated user's id
//! - A session codec that issues and opens those tokens with a fixed lifetime
//!
//! The library knows nothing about HTTP or storage. Services adapt these
//! implementations behind their own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::SessionCodec;
//!
//! let codec = SessionCodec::new(b"secret_key_at_least_32_bytes_long!", 24);
//! let token = codec.issue(42).unwrap();
//! let claims = codec.open(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```

pub mod codec;
pub mod password;
pub mod token;

pub use codec::SessionCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SessionClaims;
pub use token::TokenError;
pub use token::TokenSigner;
