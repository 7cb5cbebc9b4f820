//! Twelve Labs API key loading.

use crate::error::{Result, SnipError};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TWELVE_LABS_API_KEY";

const API_KEY_PREFIX: &str = "tlk_";

/// A validated Twelve Labs API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a raw key string.
    pub fn parse(raw: &str) -> Result<Self> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(SnipError::Config(format!("{} is empty", API_KEY_ENV)));
        }
        if !key.starts_with(API_KEY_PREFIX) || key.len() == API_KEY_PREFIX.len() {
            return Err(SnipError::Config(format!(
                "{} is malformed: expected a key starting with '{}'",
                API_KEY_ENV, API_KEY_PREFIX
            )));
        }
        Ok(Self(key.to_string()))
    }

    /// Load the key from the environment, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        match std::env::var(API_KEY_ENV) {
            Ok(value) => Self::parse(&value),
            Err(_) => Err(SnipError::Config(format!(
                "{} not found. Add it to .env or export it as an environment variable.",
                API_KEY_ENV
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({}***)", API_KEY_PREFIX)
    }
}
