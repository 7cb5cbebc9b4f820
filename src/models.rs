//! Domain types for indexes, videos, search results, summaries and chat turns.
//!
//! These are the normalized, in-memory shapes returned by [`crate::client::VideoClient`].
//! The wire schema of the remote service lives with the HTTP transport.

use crate::error::{Result, SnipError};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A processing engine selected when an index is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Engine {
    #[default]
    #[serde(rename = "marengo2.6")]
    Marengo26,
    #[serde(rename = "marengo2.5")]
    Marengo25,
    #[serde(rename = "pegasus1.1")]
    Pegasus11,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Marengo26, Engine::Marengo25, Engine::Pegasus11];

    /// Engine name as understood by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Marengo26 => "marengo2.6",
            Engine::Marengo25 => "marengo2.5",
            Engine::Pegasus11 => "pegasus1.1",
        }
    }

    /// Human-readable capability of the engine.
    pub fn capability(&self) -> &'static str {
        match self {
            Engine::Marengo26 | Engine::Marengo25 => "visual-multimodal",
            Engine::Pegasus11 => "conversational-text",
        }
    }

    /// Engine options requested at index creation.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Engine::Marengo26 => &["visual", "audio"],
            Engine::Marengo25 => &["visual", "conversation", "text_in_video", "logo"],
            Engine::Pegasus11 => &["visual", "conversation"],
        }
    }

    /// Parse a list of engine names, collapsing duplicates and keeping order.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Engine>> {
        if names.is_empty() {
            return Err(SnipError::validation("engines", "at least one engine is required"));
        }
        let mut engines = Vec::with_capacity(names.len());
        for name in names {
            let engine: Engine = name.as_ref().parse()?;
            if !engines.contains(&engine) {
                engines.push(engine);
            }
        }
        Ok(engines)
    }
}

impl std::str::FromStr for Engine {
    type Err = SnipError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Engine::ALL
            .into_iter()
            .find(|e| e.as_str() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Engine::ALL.iter().map(|e| e.as_str()).collect();
                SnipError::validation(
                    "engines",
                    format!(
                        "unknown engine '{}' (expected one of: {})",
                        s.trim(),
                        known.join(", ")
                    ),
                )
            })
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named collection of videos on the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub id: String,
    pub name: String,
    pub engines: Vec<Engine>,
    pub created_at: Option<DateTime<Utc>>,
    pub video_count: Option<u32>,
}

/// Processing state of an uploaded video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Uploading,
    Processing,
    Ready,
    Failed,
}

impl VideoStatus {
    /// Map a remote task status onto the local lifecycle.
    ///
    /// The service reports several intermediate states (validating, pending,
    /// queued, indexing); all of them count as processing.
    pub fn from_remote(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "uploading" => VideoStatus::Uploading,
            "ready" => VideoStatus::Ready,
            "failed" => VideoStatus::Failed,
            _ => VideoStatus::Processing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Ready | VideoStatus::Failed)
    }
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoStatus::Uploading => write!(f, "uploading"),
            VideoStatus::Processing => write!(f, "processing"),
            VideoStatus::Ready => write!(f, "ready"),
            VideoStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A video stored in an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub index_id: String,
    pub filename: String,
    /// Duration in seconds (if known).
    pub duration: Option<f64>,
    pub status: VideoStatus,
    pub language: Option<String>,
    /// Upload task that produced this video, when it came from an upload.
    pub task_id: Option<String>,
}

/// An upload task tracked by the service while a video is ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadTask {
    pub id: String,
    pub index_id: String,
    /// Assigned by the service, possibly only once indexing starts.
    pub video_id: Option<String>,
    pub status: VideoStatus,
    pub filename: String,
    pub duration: Option<f64>,
}

impl UploadTask {
    /// View this task as a video, using the task id until the service assigns a video id.
    pub fn to_video(&self, language: Option<&str>) -> Video {
        Video {
            id: self.video_id.clone().unwrap_or_else(|| self.id.clone()),
            index_id: self.index_id.clone(),
            filename: self.filename.clone(),
            duration: self.duration,
            status: self.status,
            language: language.map(|l| l.to_string()),
            task_id: Some(self.id.clone()),
        }
    }
}

/// An image used as a search query.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageQuery {
    pub filename: String,
    pub bytes: Bytes,
}

/// A text and/or image search query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub image: Option<ImageQuery>,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    pub fn image(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            text: None,
            image: Some(ImageQuery {
                filename: filename.into(),
                bytes: bytes.into(),
            }),
        }
    }

    /// Which modality this query searches with, or None if it is empty.
    pub fn modality(&self) -> Option<Modality> {
        let has_text = self.text.as_deref().is_some_and(|t| !t.trim().is_empty());
        match (has_text, self.image.is_some()) {
            (true, true) => Some(Modality::Combined),
            (true, false) => Some(Modality::Text),
            (false, true) => Some(Modality::Image),
            (false, false) => None,
        }
    }
}

/// The query modality a search result was matched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Combined,
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modality::Text => write!(f, "text"),
            Modality::Image => write!(f, "image"),
            Modality::Combined => write!(f, "combined"),
        }
    }
}

/// A matching segment of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub video_id: String,
    /// Segment start in seconds.
    pub start: f64,
    /// Segment end in seconds.
    pub end: f64,
    /// Relevance score in 0..=1.
    pub score: f32,
    pub modality: Modality,
    /// Confidence class reported by the service (high, medium, low).
    pub confidence: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Style of summary to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SummaryType {
    #[default]
    Comprehensive,
    Brief,
    Detailed,
    KeyPoints,
}

impl std::str::FromStr for SummaryType {
    type Err = SnipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "comprehensive" => Ok(SummaryType::Comprehensive),
            "brief" => Ok(SummaryType::Brief),
            "detailed" => Ok(SummaryType::Detailed),
            "key_points" => Ok(SummaryType::KeyPoints),
            _ => Err(SnipError::validation(
                "type",
                format!(
                    "unknown summary type '{}' (expected comprehensive, brief, detailed or key_points)",
                    s.trim()
                ),
            )),
        }
    }
}

impl std::fmt::Display for SummaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryType::Comprehensive => write!(f, "comprehensive"),
            SummaryType::Brief => write!(f, "brief"),
            SummaryType::Detailed => write!(f, "detailed"),
            SummaryType::KeyPoints => write!(f, "key_points"),
        }
    }
}

/// A generated summary of one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub video_id: String,
    pub summary_type: SummaryType,
    pub instruction: Option<String>,
    pub language: Option<String>,
    pub text: String,
}

/// One question/answer exchange about a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub video_id: String,
    pub question: String,
    pub answer: String,
    pub latency: Duration,
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_engine_parse_case_insensitive() {
        assert_eq!("Marengo2.6".parse::<Engine>().unwrap(), Engine::Marengo26);
        assert_eq!(" pegasus1.1 ".parse::<Engine>().unwrap(), Engine::Pegasus11);
        assert_eq!(Engine::default(), Engine::Marengo26);
    }

    #[test]
    fn test_engine_parse_unknown() {
        let err = "marengo3".parse::<Engine>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("engines"));
        assert!(err.to_string().contains("marengo3"));
    }

    #[test]
    fn test_engine_parse_list_dedupes() {
        let engines = Engine::parse_list(&["pegasus1.1", "marengo2.6", "PEGASUS1.1"]).unwrap();
        assert_eq!(engines, vec![Engine::Pegasus11, Engine::Marengo26]);

        let empty: [&str; 0] = [];
        assert!(Engine::parse_list(&empty).is_err());
    }

    #[test]
    fn test_engine_capabilities() {
        assert_eq!(Engine::Marengo25.capability(), "visual-multimodal");
        assert_eq!(Engine::Pegasus11.capability(), "conversational-text");
    }

    #[test]
    fn test_engine_options_differ_per_engine() {
        assert_eq!(Engine::Marengo26.options(), &["visual", "audio"]);
        assert!(Engine::Marengo25.options().contains(&"text_in_video"));
        assert!(!Engine::Pegasus11.options().contains(&"audio"));
    }

    #[test]
    fn test_remote_status_mapping() {
        assert_eq!(VideoStatus::from_remote("indexing"), VideoStatus::Processing);
        assert_eq!(VideoStatus::from_remote("validating"), VideoStatus::Processing);
        assert_eq!(VideoStatus::from_remote("READY"), VideoStatus::Ready);
        assert_eq!(VideoStatus::from_remote("failed"), VideoStatus::Failed);
        assert!(!VideoStatus::Uploading.is_terminal());
    }

    #[test]
    fn test_query_modality() {
        assert_eq!(SearchQuery::default().modality(), None);
        assert_eq!(SearchQuery::text("   ").modality(), None);
        assert_eq!(SearchQuery::text("dog").modality(), Some(Modality::Text));
        assert_eq!(SearchQuery::image("a.png", vec![1]).modality(), Some(Modality::Image));

        let mut both = SearchQuery::image("a.png", vec![1]);
        both.text = Some("dog".into());
        assert_eq!(both.modality(), Some(Modality::Combined));
    }

    #[test]
    fn test_summary_type_parse() {
        assert_eq!("key-points".parse::<SummaryType>().unwrap(), SummaryType::KeyPoints);
        assert_eq!("Brief".parse::<SummaryType>().unwrap(), SummaryType::Brief);
        assert!("haiku".parse::<SummaryType>().is_err());
    }

    #[test]
    fn test_task_to_video_uses_task_id_until_assigned() {
        let mut task = UploadTask {
            id: "task-1".into(),
            index_id: "idx".into(),
            video_id: None,
            status: VideoStatus::Processing,
            filename: "clip.mp4".into(),
            duration: None,
        };
        assert_eq!(task.to_video(Some("en")).id, "task-1");

        task.video_id = Some("vid-9".into());
        let video = task.to_video(None);
        assert_eq!(video.id, "vid-9");
        assert_eq!(video.task_id.as_deref(), Some("task-1"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(75.4), "01:15");
        assert_eq!(format_timestamp(3725.0), "01:02:05");
    }
}
