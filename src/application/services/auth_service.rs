//! Authentication service for API token validation.

use std::collections::HashSet;

use crate::error::AppError;
use serde_json::json;

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are checked against the set configured through
/// `ALLOWED_API_TOKENS`. There is no per-token identity: any allowed token
/// grants access to every company's operations.
#[derive(Debug, Clone)]
pub struct AuthService {
    allowed_tokens: HashSet<String>,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// Blank entries are ignored.
    pub fn new<I, S>(allowed_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed_tokens = allowed_tokens
            .into_iter()
            .map(Into::into)
            .filter(|token: &String| !token.trim().is_empty())
            .collect();

        Self { allowed_tokens }
    }

    /// Number of tokens that will be accepted.
    pub fn token_count(&self) -> usize {
        self.allowed_tokens.len()
    }

    /// Authenticates a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is not allowed.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if !self.allowed_tokens.contains(token) {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid token"}),
            ));
        }

        Ok(())
    }
}
