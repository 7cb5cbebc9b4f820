//! Video client: validation and normalization over a [`VideoService`].
//!
//! Every operation validates its input locally before any request is made, so
//! bad input never reaches the service. Each operation makes a single attempt;
//! service errors are returned as-is.

use crate::config::{Prompts, Settings};
use crate::error::{Result, SnipError};
use crate::models::{
    ChatTurn, Engine, Index, SearchQuery, SearchResult, Summary, SummaryType, Video, VideoStatus,
};
use crate::service::{CreateIndexRequest, SearchOptions, VideoService, VideoUpload};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "webm", "flv", "wmv", "m4v", "mpeg", "mpg", "3gp",
];

/// Language used when none is given.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Single point of access to the remote video service.
pub struct VideoClient {
    service: Arc<dyn VideoService>,
    prompts: Prompts,
    addons: Vec<String>,
    search: SearchOptions,
    history_turns: usize,
    poll_interval: Duration,
    max_wait: Duration,
    language_tag: Regex,
}

impl VideoClient {
    /// Create a client with default prompts.
    pub fn new(service: Arc<dyn VideoService>, settings: &Settings) -> Self {
        Self::with_prompts(service, settings, Prompts::default())
    }

    /// Create a client with custom prompt templates.
    pub fn with_prompts(
        service: Arc<dyn VideoService>,
        settings: &Settings,
        prompts: Prompts,
    ) -> Self {
        Self {
            service,
            prompts,
            addons: settings.index.addons.clone(),
            search: SearchOptions {
                page_limit: settings.search.page_limit.max(1),
                threshold: settings.search.threshold.clone(),
                modalities: settings.search.options.clone(),
            },
            history_turns: settings.chat.history_turns,
            poll_interval: Duration::from_secs(settings.upload.poll_interval_secs),
            max_wait: Duration::from_secs(settings.upload.max_wait_secs),
            language_tag: Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$")
                .expect("Invalid regex"),
        }
    }

    /// Override the upload polling cadence.
    pub fn with_polling(mut self, interval: Duration, max_wait: Duration) -> Self {
        self.poll_interval = interval;
        self.max_wait = max_wait;
        self
    }

    /// Create an index with the given name and engines.
    #[instrument(skip(self, engines), fields(engines = engines.len()))]
    pub async fn create_index<S: AsRef<str>>(&self, name: &str, engines: &[S]) -> Result<Index> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SnipError::validation("name", "index name must not be empty"));
        }
        let engines = Engine::parse_list(engines)?;

        let request = CreateIndexRequest {
            name: name.to_string(),
            engines,
            addons: self.addons.clone(),
        };
        let index = self.service.create_index(&request).await?;
        info!(index_id = %index.id, "Created index");
        Ok(index)
    }

    /// Upload a video file into an index.
    ///
    /// Returns as soon as the service accepts the upload; the video is still
    /// uploading or processing at that point.
    #[instrument(skip(self), fields(path = %file_path.display()))]
    pub async fn upload_video(
        &self,
        index_id: &str,
        file_path: &Path,
        language: Option<&str>,
    ) -> Result<Video> {
        let index_id = index_id.trim();
        if index_id.is_empty() {
            return Err(SnipError::validation("index_id", "index id must not be empty"));
        }
        let language = self.validate_language(language.unwrap_or(DEFAULT_LANGUAGE))?;
        validate_video_file(file_path)?;

        let size = tokio::fs::metadata(file_path).await?.len();
        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video.mp4")
            .to_string();
        debug!("Uploading {} ({} bytes)", filename, size);

        let upload = VideoUpload {
            index_id: index_id.to_string(),
            filename,
            path: file_path.to_path_buf(),
            size,
            language: language.clone(),
        };
        let task = self.service.create_upload_task(&upload).await?;
        info!(task_id = %task.id, "Upload task created");

        Ok(task.to_video(Some(&language)))
    }

    /// Poll an upload task until it is ready, failed, or the wait limit passes.
    ///
    /// `on_status` is called after every poll.
    #[instrument(skip(self, on_status))]
    pub async fn wait_for_video<F>(&self, task_id: &str, mut on_status: F) -> Result<Video>
    where
        F: FnMut(VideoStatus),
    {
        let started = Instant::now();
        loop {
            let task = self.service.get_upload_task(task_id).await?;
            on_status(task.status);

            match task.status {
                VideoStatus::Ready => return Ok(task.to_video(None)),
                VideoStatus::Failed => {
                    return Err(SnipError::Service(format!(
                        "Processing of {} failed (task {})",
                        task.filename, task.id
                    )))
                }
                _ => {}
            }

            if started.elapsed() + self.poll_interval > self.max_wait {
                return Err(SnipError::Service(format!(
                    "Task {} still {} after {}s",
                    task.id,
                    task.status,
                    self.max_wait.as_secs()
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fetch a single index.
    pub async fn get_index(&self, index_id: &str) -> Result<Index> {
        let index_id = require_id("index_id", index_id)?;
        self.service.get_index(index_id).await
    }

    /// List every index, in the order the service returns them.
    pub async fn list_indexes(&self) -> Result<Vec<Index>> {
        self.service.list_indexes().await
    }

    /// List the videos of an index.
    pub async fn list_videos(&self, index_id: &str) -> Result<Vec<Video>> {
        let index_id = require_id("index_id", index_id)?;
        self.service.list_videos(index_id).await
    }

    /// Search an index by text, image, or both.
    ///
    /// Results are ordered by non-increasing score.
    #[instrument(skip(self, query))]
    pub async fn search(
        &self,
        index_id: &str,
        query: &SearchQuery,
        limit: Option<u32>,
    ) -> Result<Vec<SearchResult>> {
        let index_id = require_id("index_id", index_id)?;
        if query.modality().is_none() {
            return Err(SnipError::validation(
                "query",
                "provide search text, an image, or both",
            ));
        }

        let mut options = self.search.clone();
        if let Some(limit) = limit {
            options.page_limit = limit.max(1);
        }

        let mut results = self.service.search(index_id, query, &options).await?;
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!("Search returned {} results", results.len());
        Ok(results)
    }

    /// Summarize a video.
    #[instrument(skip(self, instruction))]
    pub async fn summarize(
        &self,
        video_id: &str,
        summary_type: SummaryType,
        instruction: Option<&str>,
        language: Option<&str>,
    ) -> Result<Summary> {
        let video_id = require_id("video_id", video_id)?;
        let instruction = instruction
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let language = match language {
            Some(lang) => Some(self.validate_language(lang)?),
            None => None,
        };

        let prompt = self.summary_prompt(summary_type, instruction.as_deref(), language.as_deref());
        let text = self.service.summarize(video_id, Some(&prompt)).await?;

        Ok(Summary {
            video_id: video_id.to_string(),
            summary_type,
            instruction,
            language,
            text,
        })
    }

    /// Ask a question about a video, with earlier turns as context.
    ///
    /// The history is caller-owned; nothing is stored by the client.
    #[instrument(skip(self, question, history), fields(history = history.len()))]
    pub async fn chat(
        &self,
        video_id: &str,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<ChatTurn> {
        let video_id = require_id("video_id", video_id)?;
        let question = question.trim();
        if question.is_empty() {
            return Err(SnipError::validation("question", "question must not be empty"));
        }

        let prompt = self.chat_prompt(question, history);
        let started = Instant::now();
        let answer = self.service.generate(video_id, &prompt).await?;
        let latency = started.elapsed();
        debug!("Answer received in {:.1}s", latency.as_secs_f64());

        Ok(ChatTurn {
            video_id: video_id.to_string(),
            question: question.to_string(),
            answer,
            latency,
        })
    }

    fn validate_language(&self, language: &str) -> Result<String> {
        let language = language.trim();
        if self.language_tag.is_match(language) {
            Ok(language.to_string())
        } else {
            Err(SnipError::validation(
                "language",
                format!("'{}' is not a valid language tag (e.g. en, pt-BR)", language),
            ))
        }
    }

    fn summary_prompt(
        &self,
        summary_type: SummaryType,
        instruction: Option<&str>,
        language: Option<&str>,
    ) -> String {
        let templates = &self.prompts.summary;
        let directive = match summary_type {
            SummaryType::Comprehensive => &templates.comprehensive,
            SummaryType::Brief => &templates.brief,
            SummaryType::Detailed => &templates.detailed,
            SummaryType::KeyPoints => &templates.key_points,
        };

        let mut parts = vec![directive.clone()];
        if let Some(instruction) = instruction {
            parts.push(instruction.to_string());
        }
        if let Some(lang) = language.filter(|l| !l.eq_ignore_ascii_case(DEFAULT_LANGUAGE)) {
            let vars = HashMap::from([("language", lang)]);
            parts.push(Prompts::render(&templates.language, &vars));
        }
        parts.join("\n\n")
    }

    fn chat_prompt(&self, question: &str, history: &[ChatTurn]) -> String {
        let recent = &history[history.len().saturating_sub(self.history_turns)..];
        if recent.is_empty() {
            return question.to_string();
        }

        let context = recent
            .iter()
            .map(|turn| {
                let vars = HashMap::from([
                    ("question", turn.question.as_str()),
                    ("answer", turn.answer.as_str()),
                ]);
                Prompts::render(&self.prompts.chat.turn, &vars)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let vars = HashMap::from([("context", context.as_str()), ("question", question)]);
        Prompts::render(&self.prompts.chat.with_history, &vars)
    }
}

fn require_id<'a>(field: &str, id: &'a str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        Err(SnipError::validation(field, format!("{} must not be empty", field)))
    } else {
        Ok(id)
    }
}

/// Check that a path is an existing file with a supported video extension.
fn validate_video_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(SnipError::validation(
            "path",
            format!("video file not found: {}", path.display()),
        ));
    }

    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);
    if !supported {
        return Err(SnipError::validation(
            "path",
            format!(
                "unsupported video format: {} (supported: {})",
                path.display(),
                VIDEO_EXTENSIONS.join(", ")
            ),
        ));
    }

    Ok(())
}
