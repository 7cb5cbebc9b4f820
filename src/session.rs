//! Interactive session state.
//!
//! Holds what the user has selected and what they have asked so far. The
//! session is passed explicitly to whatever drives the interaction; it is
//! never persisted.

use crate::models::{ChatTurn, Summary};
use std::collections::HashMap;

/// Selection, chat history and cached summaries for one interactive run.
#[derive(Debug, Default)]
pub struct Session {
    index_id: Option<String>,
    video_id: Option<String>,
    histories: HashMap<String, Vec<ChatTurn>>,
    summaries: HashMap<String, Summary>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session focused on one video.
    pub fn for_video(index_id: Option<String>, video_id: &str) -> Self {
        let mut session = Self::new();
        session.index_id = index_id;
        session.video_id = Some(video_id.to_string());
        session
    }

    pub fn index_id(&self) -> Option<&str> {
        self.index_id.as_deref()
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// Select an index. Switching to a different index clears the video selection.
    pub fn select_index(&mut self, index_id: &str) {
        if self.index_id.as_deref() != Some(index_id) {
            self.video_id = None;
        }
        self.index_id = Some(index_id.to_string());
    }

    pub fn select_video(&mut self, video_id: &str) {
        self.video_id = Some(video_id.to_string());
    }

    /// Chat history of a video, oldest first.
    pub fn history(&self, video_id: &str) -> &[ChatTurn] {
        self.histories
            .get(video_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn record_turn(&mut self, turn: ChatTurn) {
        self.histories
            .entry(turn.video_id.clone())
            .or_default()
            .push(turn);
    }

    pub fn clear_history(&mut self, video_id: &str) {
        self.histories.remove(video_id);
    }

    pub fn cached_summary(&self, video_id: &str) -> Option<&Summary> {
        self.summaries.get(video_id)
    }

    pub fn cache_summary(&mut self, summary: Summary) {
        self.summaries.insert(summary.video_id.clone(), summary);
    }
}
