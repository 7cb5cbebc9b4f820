//! Remote video service abstraction.
//!
//! Provides a trait-based interface to the video-understanding service so the
//! client wrapper can run against the real HTTP API or an in-memory double.

mod memory;
mod twelvelabs;

pub use memory::MemoryService;
pub use twelvelabs::TwelveLabsService;

use crate::error::Result;
use crate::models::{Engine, Index, SearchQuery, SearchResult, UploadTask, Video};
use async_trait::async_trait;
use std::path::PathBuf;

/// Request to create an index.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexRequest {
    pub name: String,
    pub engines: Vec<Engine>,
    pub addons: Vec<String>,
}

/// A video file to upload into an index.
///
/// The file is read while the request is sent, never buffered whole.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpload {
    pub index_id: String,
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
    pub language: String,
}

/// Tuning sent with every search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub page_limit: u32,
    pub threshold: String,
    pub modalities: Vec<String>,
}

/// Trait for the remote video-understanding service.
#[async_trait]
pub trait VideoService: Send + Sync {
    /// Create an index.
    async fn create_index(&self, request: &CreateIndexRequest) -> Result<Index>;

    /// Fetch a single index.
    async fn get_index(&self, index_id: &str) -> Result<Index>;

    /// List every index in the account, in service order.
    async fn list_indexes(&self) -> Result<Vec<Index>>;

    /// List the videos of an index.
    async fn list_videos(&self, index_id: &str) -> Result<Vec<Video>>;

    /// Start an upload task for a video file.
    async fn create_upload_task(&self, upload: &VideoUpload) -> Result<UploadTask>;

    /// Fetch the current state of an upload task.
    async fn get_upload_task(&self, task_id: &str) -> Result<UploadTask>;

    /// Search an index. Results come back in service order.
    async fn search(
        &self,
        index_id: &str,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>>;

    /// Generate a summary of a video, steered by an optional prompt.
    async fn summarize(&self, video_id: &str, prompt: Option<&str>) -> Result<String>;

    /// Answer an open-ended prompt about a video.
    async fn generate(&self, video_id: &str, prompt: &str) -> Result<String>;
}
