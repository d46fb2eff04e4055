//! Admin identity port.
//!
//! Tokens are issued elsewhere; the backend only needs to turn a bearer
//! token back into the acting admin.

use uuid::Uuid;

/// Role required for every write operation.
pub const ADMIN_ROLE: &str = "admin";

/// Claims carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub admin_id: Uuid,
    pub roles: Vec<String>,
    pub exp: i64,
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Issue an access token for an admin.
    ///
    /// The server itself only validates. Issuing stays on the port so admin
    /// tooling and tests can mint tokens the configured validator accepts.
    fn generate_token(&self, admin_id: Uuid, roles: Vec<String>) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
