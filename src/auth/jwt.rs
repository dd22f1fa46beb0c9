use crate::types::{AppError, AuthError, Claims, Identity, Result};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;

/// Validity window of an issued token, in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
/// Longest accepted validity window (30 days).
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;

/// Issues and verifies HS256-signed identity tokens.
///
/// Verification is fully offline: a token is trusted for as long as its
/// signature holds and `exp` has not passed, regardless of what happened
/// to the user record since it was issued.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    /// Creates a new TokenService.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing tokens, must not be empty
    /// * `ttl_secs` - Token validity in seconds
    pub fn new(jwt_secret: &str, ttl_secs: i64) -> Result<Self> {
        if jwt_secret.is_empty() {
            return Err(AppError::Config("JWT secret must not be empty".to_string()));
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&ttl_secs) {
            return Err(AppError::Config(format!(
                "token ttl must be between 1 and {} seconds, got {}",
                MAX_TOKEN_TTL_SECS, ttl_secs
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            ttl_secs,
        })
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issues a token for `identity`, valid from now for the configured ttl.
    pub fn issue(&self, identity: &Identity) -> Result<String> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `now` (unix seconds).
    pub fn issue_at(&self, identity: &Identity, now: i64) -> Result<String> {
        let exp = now
            .checked_add(self.ttl_secs)
            .ok_or_else(|| AppError::Internal(format!("token expiry overflows at {}", now)))?;
        let claims = Claims {
            identity: identity.clone(),
            iat: now,
            exp,
        };

        debug!(user_id = %identity.id, role = identity.role.as_str(), "issuing token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token and returns the identity it carries.
    pub fn verify(&self, token: &str) -> std::result::Result<Identity, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies a token against the given current time (unix seconds).
    ///
    /// Expiry is checked here rather than by `jsonwebtoken` so that the
    /// clock can be supplied and no leeway is applied.
    pub fn verify_at(&self, token: &str, now: i64) -> std::result::Result<Identity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::TokenSignatureInvalid,
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenMalformed,
            })?;

        if now > claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims.identity)
    }
}
