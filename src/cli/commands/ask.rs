//! Ask command implementation.

use crate::cli::Output;
use crate::client::VideoClient;
use anyhow::Result;

/// Run the ask command: one question, no history.
pub async fn run_ask(client: &VideoClient, video_id: &str, question: &str) -> Result<()> {
    let spinner = Output::spinner("Analyzing video and generating answer...");
    let turn = client.chat(video_id, question, &[]).await;
    spinner.finish_and_clear();
    let turn = turn?;

    println!("\n{}\n", turn.answer);
    Output::kv("Response time", &format!("{:.1}s", turn.latency.as_secs_f64()));

    Ok(())
}
