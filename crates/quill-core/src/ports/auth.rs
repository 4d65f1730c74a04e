//! Ports for the authentication services.

use uuid::Uuid;

/// Identity carried inside an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: i64,
}

/// Issues and checks access tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for the given account.
    fn generate_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError>;

    /// Check a presented token and recover its claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// How long freshly issued tokens live, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Hashes and checks passwords.
pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(false)` is a wrong password; `Err` means the stored hash could
    /// not be processed at all.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Failures from the auth services.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("missing authorization header")]
    MissingAuth,

    #[error("hashing failed: {0}")]
    HashingError(String),
}
