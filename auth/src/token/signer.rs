use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Signs and verifies session tokens with HMAC-SHA256.
///
/// The token is a compact JWT. Integrity comes entirely from the server-held
/// secret: a client can read its `user_id` but cannot change it without
/// invalidating the signature.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Create a signer from the deployment secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - It must come from deployment configuration, never from source
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign claims into a token string.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be serialized or signed
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `Expired` - `exp` is in the past
    /// * `BadSignature` - Token was signed with another secret or tampered with
    /// * `Malformed` - Not a token this signer could have produced
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let signer = TokenSigner::new(b"my_secret_key_at_least_32_bytes_long!");
        let claims = SessionClaims::for_user(3, 1);

        let token = signer.sign(&claims).expect("Failed to sign token");
        let verified = signer.verify(&token).expect("Failed to verify token");

        assert_eq!(verified, claims);
    }

    #[test]
    fn test_verify_garbage() {
        let signer = TokenSigner::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = signer.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let signer1 = TokenSigner::new(b"secret1_at_least_32_bytes_long_key!");
        let signer2 = TokenSigner::new(b"secret2_at_least_32_bytes_long_key!");

        let token = signer1
            .sign(&SessionClaims::for_user(3, 1))
            .expect("Failed to sign token");

        assert_eq!(signer2.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let signer = TokenSigner::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = signer
            .sign(&SessionClaims::for_user(3, 1))
            .expect("Failed to sign token");
        let forged = signer
            .sign(&SessionClaims::for_user(4, 1))
            .expect("Failed to sign token");

        // Graft the payload of one token onto the signature of another.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(signer.verify(&spliced), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_expired() {
        let signer = TokenSigner::new(b"my_secret_key_at_least_32_bytes_long!");
        let claims = SessionClaims {
            user_id: 3,
            iat: 1_000,
            exp: 2_000,
        };

        let token = signer.sign(&claims).expect("Failed to sign token");
        assert_eq!(signer.verify(&token), Err(TokenError::Expired));
    }
}
