//! CLI output formatting utilities.

use crate::models::{format_timestamp, SearchResult};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message on a single line.
    pub fn error(msg: &str) {
        let line = msg.split_whitespace().collect::<Vec<_>>().join(" ");
        eprintln!("{} {}", style(">>").red().bold(), line);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table with aligned columns.
    pub fn table(headers: &[&str], rows: &[Vec<String>]) {
        print!("{}", render_table(headers, rows));
    }

    /// Print search result.
    pub fn search_result(rank: usize, result: &SearchResult, label: &str) {
        let confidence = result
            .confidence
            .as_deref()
            .map(|c| format!(", {}", c))
            .unwrap_or_default();
        println!(
            "\n{} {} {} @ {} - {} (score: {:.3}{})",
            style(format!("#{}", rank)).green(),
            style(label).bold(),
            style(format!("[{}]", result.modality)).dim(),
            style(format_timestamp(result.start)).cyan(),
            style(format_timestamp(result.end)).cyan(),
            result.score,
            confidence
        );
        if let Some(url) = &result.thumbnail_url {
            println!("   {}", style(url).dim());
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Render rows under a header line, padding every column to its widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut out = render_row(headers.to_vec());
    for row in rows {
        out.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Format duration in seconds to a human-readable string.
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0).round() as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_header_only() {
        let out = render_table(&["ID", "NAME", "ENGINES", "CREATED"], &[]);
        assert_eq!(out, "ID  NAME  ENGINES  CREATED\n");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            vec!["abc123".to_string(), "Demo".to_string()],
            vec!["x".to_string(), "Longer name".to_string()],
        ];
        let out = render_table(&["ID", "NAME"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID      NAME");
        assert_eq!(lines[1], "abc123  Demo");
        assert_eq!(lines[2], "x       Longer name");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42.4), "42s");
        assert_eq!(format_duration(125.0), "2m 5s");
        assert_eq!(format_duration(3725.0), "1h 2m 5s");
    }
}
