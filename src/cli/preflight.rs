//! Pre-flight checks before talking to the service.
//!
//! Validates the credential and configuration up front so a command fails
//! before any request is sent.

use crate::client::VideoClient;
use crate::config::{ApiKey, Prompts, Settings};
use crate::error::Result;
use crate::service::TwelveLabsService;
use std::sync::Arc;
use tracing::debug;

/// Load the API key and build a client for the configured service.
pub fn connect(settings: &Settings) -> Result<VideoClient> {
    let api_key = ApiKey::from_env()?;
    connect_with_key(api_key, settings)
}

/// Build a client from an already validated key.
pub fn connect_with_key(api_key: ApiKey, settings: &Settings) -> Result<VideoClient> {
    let prompts = Prompts::load(settings.prompts_dir().as_deref())?;
    let service = TwelveLabsService::new(api_key, &settings.api)?;
    debug!(
        base_url = %settings.api.base_url,
        version = %settings.api.version,
        "Service client ready"
    );
    Ok(VideoClient::with_prompts(Arc::new(service), settings, prompts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_connect_with_valid_key() {
        let key = ApiKey::parse("tlk_test").unwrap();
        assert!(connect_with_key(key, &Settings::default()).is_ok());
    }

    #[test]
    fn test_bad_prompt_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chat.toml"), "turn = [").unwrap();

        let mut settings = Settings::default();
        settings.prompts.custom_dir = Some(dir.path().display().to_string());

        let key = ApiKey::parse("tlk_test").unwrap();
        let err = connect_with_key(key, &settings).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
