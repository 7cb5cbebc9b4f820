//! Summarize command implementation.

use crate::cli::Output;
use crate::client::VideoClient;
use crate::models::SummaryType;
use anyhow::Result;
use std::time::Instant;

/// Run the summarize command.
pub async fn run_summarize(
    client: &VideoClient,
    video_id: &str,
    summary_type: &str,
    instruction: Option<&str>,
    language: Option<&str>,
) -> Result<()> {
    let summary_type: SummaryType = summary_type.parse()?;

    let spinner = Output::spinner("Analyzing video and generating summary...");
    let started = Instant::now();
    let summary = client
        .summarize(video_id, summary_type, instruction, language)
        .await;
    spinner.finish_and_clear();
    let summary = summary?;

    Output::success(&format!(
        "Summary generated in {:.1} seconds",
        started.elapsed().as_secs_f64()
    ));
    Output::header(&format!("Summary ({})", summary.summary_type));
    println!("\n{}\n", summary.text);

    Ok(())
}
