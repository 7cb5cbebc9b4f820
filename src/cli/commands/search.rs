//! Search command implementation.

use crate::cli::Output;
use crate::client::VideoClient;
use crate::error::SnipError;
use crate::models::SearchQuery;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Run the search command.
pub async fn run_search(
    client: &VideoClient,
    index_id: &str,
    text: Option<&str>,
    image: Option<&str>,
    limit: Option<u32>,
) -> Result<()> {
    let query = build_query(text, image).await?;

    let spinner = Output::spinner("Searching...");
    let results = client.search(index_id, &query, limit).await;
    spinner.finish_and_clear();
    let results = results?;

    if results.is_empty() {
        Output::warning("No results found for your search.");
        return Ok(());
    }

    // Filenames are a nicety; fall back to video ids if the listing fails.
    let filenames: HashMap<String, String> = match client.list_videos(index_id).await {
        Ok(videos) => videos.into_iter().map(|v| (v.id, v.filename)).collect(),
        Err(e) => {
            debug!("Could not resolve filenames: {}", e);
            HashMap::new()
        }
    };

    Output::success(&format!("Found {} results", results.len()));
    for (i, result) in results.iter().enumerate() {
        let label = filenames
            .get(&result.video_id)
            .map(String::as_str)
            .unwrap_or(&result.video_id);
        Output::search_result(i + 1, result, label);
    }

    Ok(())
}

async fn build_query(text: Option<&str>, image: Option<&str>) -> crate::error::Result<SearchQuery> {
    let mut query = SearchQuery {
        text: text.map(str::to_string),
        image: None,
    };

    if let Some(path) = image {
        let path = Path::new(path);
        if !path.is_file() {
            return Err(SnipError::validation(
                "image",
                format!("image file not found: {}", path.display()),
            ));
        }
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("query.png")
            .to_string();
        query.image = Some(crate::models::ImageQuery {
            filename,
            bytes: bytes.into(),
        });
    }

    Ok(query)
}
