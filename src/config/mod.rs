//! Configuration module for Snippetropolis.
//!
//! Handles loading application settings, prompt templates and the API key.

mod credentials;
mod prompts;
mod settings;

pub use credentials::{ApiKey, API_KEY_ENV};
pub use prompts::{ChatPrompts, Prompts, SummaryPrompts};
pub use settings::{
    ApiSettings, ChatSettings, GeneralSettings, IndexSettings, PromptSettings, SearchSettings,
    Settings, UploadSettings, BASE_URL_ENV,
};
