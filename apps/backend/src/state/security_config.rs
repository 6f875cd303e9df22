use std::env;
use std::fmt;

use crate::error::AppError;

/// Shared bearer secret accepted from collaborators (game client, relay).
///
/// No rotation: the value is fixed for the life of the process.
#[derive(Clone)]
pub struct SecurityConfig {
    shared_token: String,
}

impl SecurityConfig {
    pub fn new(shared_token: impl Into<String>) -> Self {
        Self {
            shared_token: shared_token.into(),
        }
    }

    /// Read `BACKEND_SHARED_TOKEN`; an empty value is rejected so a blank
    /// token can never authenticate.
    pub fn from_env() -> Result<Self, AppError> {
        let token = env::var("BACKEND_SHARED_TOKEN")
            .map_err(|_| AppError::config("BACKEND_SHARED_TOKEN must be set"))?;
        if token.is_empty() {
            return Err(AppError::config("BACKEND_SHARED_TOKEN must not be empty"));
        }
        Ok(Self::new(token))
    }

    /// Exact string equality against the configured secret.
    pub fn accepts(&self, presented: Option<&str>) -> bool {
        matches!(presented, Some(token) if !token.is_empty() && token == self.shared_token)
    }
}

// Keep the secret out of Debug output (AppState derives Debug).
impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("shared_token", &"<redacted>")
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new("default_token_for_tests_only")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_exact_token() {
        let cfg = SecurityConfig::new("s3cret");
        assert!(cfg.accepts(Some("s3cret")));
        assert!(!cfg.accepts(Some("s3cret ")));
        assert!(!cfg.accepts(Some("S3CRET")));
        assert!(!cfg.accepts(Some("")));
        assert!(!cfg.accepts(None));
    }

    #[test]
    fn debug_redacts_secret() {
        let cfg = SecurityConfig::new("s3cret");
        assert!(!format!("{cfg:?}").contains("s3cret"));
    }
}
