//! In-memory video service implementation.
//!
//! Useful for testing and offline demos. Every call is recorded so callers can
//! assert which requests reached the service.

use super::{CreateIndexRequest, SearchOptions, VideoService, VideoUpload};
use crate::error::{Result, SnipError};
use crate::models::{Index, SearchQuery, SearchResult, UploadTask, Video, VideoStatus};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct State {
    indexes: Vec<Index>,
    videos: HashMap<String, Vec<Video>>,
    tasks: HashMap<String, PendingTask>,
    search_results: HashMap<String, Vec<SearchResult>>,
    calls: Vec<String>,
    prompts: Vec<String>,
}

struct PendingTask {
    task: UploadTask,
    language: String,
    polls_remaining: u32,
}

/// In-memory video service.
pub struct MemoryService {
    state: RwLock<State>,
    polls_until_ready: u32,
    fail_processing: bool,
}

impl MemoryService {
    /// Create an empty service whose uploads become ready on the first poll.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            polls_until_ready: 0,
            fail_processing: false,
        }
    }

    /// Keep upload tasks processing for `polls` status checks.
    pub fn with_polls_until_ready(mut self, polls: u32) -> Self {
        self.polls_until_ready = polls;
        self
    }

    /// Make every upload task end in the failed state.
    pub fn with_failed_processing(mut self) -> Self {
        self.fail_processing = true;
        self
    }

    fn state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed an index without recording a call.
    pub fn add_index(&self, name: &str, engines: Vec<crate::models::Engine>) -> Index {
        let index = Index {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            engines,
            created_at: Some(Utc::now()),
            video_count: Some(0),
        };
        let mut state = self.state();
        state.videos.insert(index.id.clone(), Vec::new());
        state.indexes.push(index.clone());
        index
    }

    /// Seed a ready video in an existing index.
    pub fn add_video(&self, index_id: &str, filename: &str, duration: Option<f64>) -> Video {
        let video = Video {
            id: Uuid::new_v4().to_string(),
            index_id: index_id.to_string(),
            filename: filename.to_string(),
            duration,
            status: VideoStatus::Ready,
            language: Some("en".to_string()),
            task_id: None,
        };
        self.state()
            .videos
            .entry(index_id.to_string())
            .or_default()
            .push(video.clone());
        video
    }

    /// Results returned, in this order, by searches against `index_id`.
    pub fn set_search_results(&self, index_id: &str, results: Vec<SearchResult>) {
        self.state()
            .search_results
            .insert(index_id.to_string(), results);
    }

    /// Names of the operations invoked so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Prompts sent to `summarize` and `generate`, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    fn record(state: &mut State, operation: &str) {
        state.calls.push(operation.to_string());
    }

    fn ensure_index(state: &State, index_id: &str) -> Result<()> {
        if state.indexes.iter().any(|i| i.id == index_id) {
            Ok(())
        } else {
            Err(SnipError::NotFound(format!("Index {} does not exist", index_id)))
        }
    }

    fn ensure_video(state: &State, video_id: &str) -> Result<()> {
        if state.videos.values().flatten().any(|v| v.id == video_id) {
            Ok(())
        } else {
            Err(SnipError::NotFound(format!("Video {} does not exist", video_id)))
        }
    }
}

impl Default for MemoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoService for MemoryService {
    async fn create_index(&self, request: &CreateIndexRequest) -> Result<Index> {
        Self::record(&mut self.state(), "create_index");
        Ok(self.add_index(&request.name, request.engines.clone()))
    }

    async fn get_index(&self, index_id: &str) -> Result<Index> {
        let mut state = self.state();
        Self::record(&mut state, "get_index");
        let mut index = state
            .indexes
            .iter()
            .find(|i| i.id == index_id)
            .cloned()
            .ok_or_else(|| SnipError::NotFound(format!("Index {} does not exist", index_id)))?;
        index.video_count = state.videos.get(index_id).map(|v| v.len() as u32);
        Ok(index)
    }

    async fn list_indexes(&self) -> Result<Vec<Index>> {
        let mut state = self.state();
        Self::record(&mut state, "list_indexes");
        Ok(state.indexes.clone())
    }

    async fn list_videos(&self, index_id: &str) -> Result<Vec<Video>> {
        let mut state = self.state();
        Self::record(&mut state, "list_videos");
        Self::ensure_index(&state, index_id)?;
        Ok(state.videos.get(index_id).cloned().unwrap_or_default())
    }

    async fn create_upload_task(&self, upload: &VideoUpload) -> Result<UploadTask> {
        let mut state = self.state();
        Self::record(&mut state, "create_upload_task");
        Self::ensure_index(&state, &upload.index_id)?;

        let task = UploadTask {
            id: Uuid::new_v4().to_string(),
            index_id: upload.index_id.clone(),
            video_id: None,
            status: VideoStatus::Uploading,
            filename: upload.filename.clone(),
            duration: None,
        };
        state.tasks.insert(
            task.id.clone(),
            PendingTask {
                task: task.clone(),
                language: upload.language.clone(),
                polls_remaining: self.polls_until_ready,
            },
        );
        Ok(task)
    }

    async fn get_upload_task(&self, task_id: &str) -> Result<UploadTask> {
        let mut state = self.state();
        Self::record(&mut state, "get_upload_task");

        let pending = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| SnipError::NotFound(format!("Task {} does not exist", task_id)))?;

        if pending.task.status.is_terminal() {
            return Ok(pending.task.clone());
        }
        if pending.polls_remaining > 0 {
            pending.polls_remaining -= 1;
            pending.task.status = VideoStatus::Processing;
            return Ok(pending.task.clone());
        }
        if self.fail_processing {
            pending.task.status = VideoStatus::Failed;
            return Ok(pending.task.clone());
        }

        pending.task.status = VideoStatus::Ready;
        pending.task.video_id = Some(Uuid::new_v4().to_string());
        let task = pending.task.clone();
        let mut video = task.to_video(Some(&pending.language));
        video.status = VideoStatus::Ready;
        state
            .videos
            .entry(task.index_id.clone())
            .or_default()
            .push(video);
        Ok(task)
    }

    async fn search(
        &self,
        index_id: &str,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let mut state = self.state();
        Self::record(&mut state, "search");
        Self::ensure_index(&state, index_id)?;

        let modality = query
            .modality()
            .ok_or_else(|| SnipError::validation("query", "text or image is required"))?;
        Ok(state
            .search_results
            .get(index_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(options.page_limit as usize)
            .map(|mut r| {
                r.modality = modality;
                r
            })
            .collect())
    }

    async fn summarize(&self, video_id: &str, prompt: Option<&str>) -> Result<String> {
        let mut state = self.state();
        Self::record(&mut state, "summarize");
        Self::ensure_video(&state, video_id)?;
        state.prompts.push(prompt.unwrap_or_default().to_string());
        Ok(format!("Summary of video {}.", video_id))
    }

    async fn generate(&self, video_id: &str, prompt: &str) -> Result<String> {
        let mut state = self.state();
        Self::record(&mut state, "generate");
        Self::ensure_video(&state, video_id)?;
        state.prompts.push(prompt.to_string());
        Ok(format!("Answer #{} about video {}.", state.prompts.len(), video_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Engine;

    #[tokio::test]
    async fn test_upload_task_becomes_ready_and_lists_video() {
        let service = MemoryService::new().with_polls_until_ready(1);
        let index = service.add_index("Demo", vec![Engine::Marengo26]);

        let task = service
            .create_upload_task(&VideoUpload {
                index_id: index.id.clone(),
                filename: "clip.mp4".into(),
                path: "clip.mp4".into(),
                size: 3,
                language: "en".into(),
            })
            .await
            .unwrap();
        assert_eq!(task.status, VideoStatus::Uploading);

        let polled = service.get_upload_task(&task.id).await.unwrap();
        assert_eq!(polled.status, VideoStatus::Processing);

        let polled = service.get_upload_task(&task.id).await.unwrap();
        assert_eq!(polled.status, VideoStatus::Ready);

        let videos = service.list_videos(&index.id).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(Some(videos[0].id.clone()), polled.video_id);
    }

    #[tokio::test]
    async fn test_records_calls() {
        let service = MemoryService::new();
        service.list_indexes().await.unwrap();
        assert!(service.list_videos("nope").await.is_err());
        assert_eq!(service.calls(), vec!["list_indexes", "list_videos"]);
    }
}
