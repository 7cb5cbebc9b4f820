//! List commands implementation.

use crate::cli::output::format_duration;
use crate::cli::Output;
use crate::client::VideoClient;
use crate::models::{Index, Video};
use anyhow::Result;

pub const INDEX_HEADERS: [&str; 4] = ["ID", "NAME", "ENGINES", "CREATED"];
pub const VIDEO_HEADERS: [&str; 4] = ["ID", "FILENAME", "DURATION", "STATUS"];

/// Run the list-indexes command.
///
/// An empty account prints the header row only.
pub async fn run_list_indexes(client: &VideoClient) -> Result<()> {
    let indexes = client.list_indexes().await?;
    Output::table(&INDEX_HEADERS, &index_rows(&indexes));
    Ok(())
}

/// Run the list-videos command.
pub async fn run_list_videos(client: &VideoClient, index_id: &str) -> Result<()> {
    let index = client.get_index(index_id).await?;
    let videos = client.list_videos(&index.id).await?;

    Output::info(&format!(
        "Videos in index: {} ({}), {} found",
        index.name,
        index.id,
        videos.len()
    ));
    Output::table(&VIDEO_HEADERS, &video_rows(&videos));
    Ok(())
}

pub fn index_rows(indexes: &[Index]) -> Vec<Vec<String>> {
    indexes
        .iter()
        .map(|index| {
            vec![
                index.id.clone(),
                index.name.clone(),
                index
                    .engines
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                index
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

pub fn video_rows(videos: &[Video]) -> Vec<Vec<String>> {
    videos
        .iter()
        .map(|video| {
            vec![
                video.id.clone(),
                video.filename.clone(),
                video
                    .duration
                    .map(format_duration)
                    .unwrap_or_else(|| "-".to_string()),
                video.status.to_string(),
            ]
        })
        .collect()
}
