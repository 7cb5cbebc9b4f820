//! Upload-video command implementation.

use crate::cli::Output;
use crate::client::VideoClient;
use crate::config::Settings;
use crate::error::SnipError;
use anyhow::Result;
use std::path::Path;

/// Run the upload-video command.
pub async fn run_upload_video(
    client: &VideoClient,
    index_id: &str,
    path: &str,
    language: Option<&str>,
    wait: bool,
    settings: &Settings,
) -> Result<()> {
    let path = Path::new(path);
    let language = language.unwrap_or(&settings.upload.default_language);

    let spinner = Output::spinner(&format!("Uploading {}...", path.display()));
    let uploaded = client.upload_video(index_id, path, Some(language)).await;
    spinner.finish_and_clear();
    let video = uploaded?;

    Output::success("Upload task created!");
    if let Some(task_id) = &video.task_id {
        Output::kv("Task ID", task_id);
    }
    Output::kv("File", &video.filename);
    Output::kv("Index", &video.index_id);
    Output::kv("Status", &video.status.to_string());

    if !wait {
        Output::info(&format!(
            "Processing continues remotely. Check progress with 'snippetropolis list-videos {}'.",
            video.index_id
        ));
        return Ok(());
    }

    let task_id = video
        .task_id
        .clone()
        .ok_or_else(|| SnipError::Service("Upload did not return a task id".to_string()))?;

    let spinner = Output::spinner("Processing video...");
    let result = client
        .wait_for_video(&task_id, |status| {
            spinner.set_message(format!("Processing video... ({})", status));
        })
        .await;
    spinner.finish_and_clear();
    let ready = result?;

    Output::success("Video processing completed successfully!");
    Output::kv("Video ID", &ready.id);
    if let Some(duration) = ready.duration {
        Output::kv("Duration", &crate::cli::output::format_duration(duration));
    }

    Ok(())
}
