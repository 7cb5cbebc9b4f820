//! Interactive chat command.

use crate::cli::Output;
use crate::client::VideoClient;
use crate::error::SnipError;
use crate::models::SummaryType;
use crate::session::Session;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Run the interactive chat command.
pub async fn run_chat(client: &VideoClient, video_id: &str, index_id: Option<&str>) -> Result<()> {
    let (mut session, label) = open_session(client, video_id, index_id).await?;

    println!("\n{}", style("Snippetropolis Chat").bold().cyan());
    if let Some(label) = label {
        Output::kv("Video", &label);
    }
    println!(
        "{}\n",
        style("Ask questions about the video. Type 'summary' for a quick summary, 'clear' to reset, 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    chat_loop(client, &mut session, stdin.lock(), &mut stdout).await
}

/// Select the video to chat about.
///
/// With an index, the video must belong to it; the returned label names the
/// video file and its index.
pub async fn open_session(
    client: &VideoClient,
    video_id: &str,
    index_id: Option<&str>,
) -> crate::error::Result<(Session, Option<String>)> {
    let Some(index_id) = index_id else {
        return Ok((Session::for_video(None, video_id), None));
    };

    let index = client.get_index(index_id).await?;
    let video = client
        .list_videos(&index.id)
        .await?
        .into_iter()
        .find(|v| v.id == video_id)
        .ok_or_else(|| {
            SnipError::NotFound(format!("Video {} is not in index {}", video_id, index.name))
        })?;

    let mut session = Session::new();
    session.select_index(&index.id);
    session.select_video(&video.id);
    Ok((session, Some(format!("{} ({})", video.filename, index.name))))
}

/// Read questions line by line and answer them until input ends or the user exits.
///
/// Failed questions are reported and the loop continues.
pub async fn chat_loop<R: BufRead, W: Write>(
    client: &VideoClient,
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    let video_id = match session.video_id() {
        Some(id) => id.to_string(),
        None => anyhow::bail!("No video selected"),
    };

    loop {
        write!(out, "{} ", style("You:").green().bold())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            writeln!(out, "Goodbye!")?;
            break;
        }

        if line.eq_ignore_ascii_case("clear") {
            session.clear_history(&video_id);
            writeln!(out, "Conversation history cleared.")?;
            continue;
        }

        if line.eq_ignore_ascii_case("summary") {
            if session.cached_summary(&video_id).is_none() {
                match client.summarize(&video_id, SummaryType::Brief, None, None).await {
                    Ok(summary) => session.cache_summary(summary),
                    Err(e) => {
                        Output::error(&format!("Failed to generate summary: {}", e));
                        continue;
                    }
                }
            }
            if let Some(summary) = session.cached_summary(&video_id) {
                writeln!(out, "\n{}\n", summary.text)?;
            }
            continue;
        }

        match client.chat(&video_id, line, session.history(&video_id)).await {
            Ok(turn) => {
                writeln!(
                    out,
                    "\n{} {}\n{}\n",
                    style("Answer:").cyan().bold(),
                    turn.answer,
                    style(format!("({:.1}s)", turn.latency.as_secs_f64())).dim()
                )?;
                info!(turns = session.history(&video_id).len() + 1, "Answered question");
                session.record_turn(turn);
            }
            Err(e) => {
                Output::error(&format!("Failed to get answer: {}", e));
            }
        }
    }

    Ok(())
}
