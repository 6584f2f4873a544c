use crate::token::SessionClaims;
use crate::token::TokenError;
use crate::token::TokenSigner;

/// Issues and opens session tokens for authenticated users.
///
/// Combines a [`TokenSigner`] with the deployment's session lifetime so that
/// callers only deal in user ids.
pub struct SessionCodec {
    signer: TokenSigner,
    lifetime_hours: i64,
}

impl SessionCodec {
    /// Create a codec.
    ///
    /// # Arguments
    /// * `secret` - Deployment signing secret
    /// * `lifetime_hours` - Validity of each issued token
    pub fn new(secret: &[u8], lifetime_hours: i64) -> Self {
        Self {
            signer: TokenSigner::new(secret),
            lifetime_hours,
        }
    }

    /// Issue a fresh token naming `user_id`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token signing failed
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.signer
            .sign(&SessionClaims::for_user(user_id, self.lifetime_hours))
    }

    /// Open a token presented by a client.
    ///
    /// # Errors
    /// Any [`TokenError`] other than `SigningFailed`
    pub fn open(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.signer.verify(token)
    }
}
