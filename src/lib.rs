//! Snippetropolis - search, summarize and chat over video
//!
//! A command-line front end for the Twelve Labs video-understanding API.
//!
//! # Overview
//!
//! Snippetropolis allows you to:
//! - Create indexes and upload videos into them
//! - Search an index by text, by image, or both
//! - Summarize a video in several styles
//! - Ask questions about a video, with conversation history
//!
//! All understanding happens on the remote service. This crate validates
//! input, assembles requests and normalizes responses.
//!
//! # Architecture
//!
//! - `config` - Settings, prompt templates and the API key
//! - `models` - Indexes, videos, search results, summaries and chat turns
//! - `service` - Remote service trait with HTTP and in-memory implementations
//! - `client` - Validating wrapper over a service
//! - `session` - Interactive session state
//! - `cli` - Command-line surface
//!
//! # Example
//!
//! ```rust,no_run
//! use snippetropolis::client::VideoClient;
//! use snippetropolis::config::{ApiKey, Settings};
//! use snippetropolis::models::SearchQuery;
//! use snippetropolis::service::TwelveLabsService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = TwelveLabsService::new(ApiKey::from_env()?, &settings.api)?;
//!     let client = VideoClient::new(Arc::new(service), &settings);
//!
//!     let results = client
//!         .search("my-index-id", &SearchQuery::text("a dog catching a frisbee"), None)
//!         .await?;
//!     println!("Found {} segments", results.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod session;

pub use error::{ErrorKind, Result, SnipError};
