//! Create-index command implementation.

use crate::cli::Output;
use crate::client::VideoClient;
use crate::config::Settings;
use anyhow::Result;

/// Run the create-index command.
///
/// Falls back to the configured default engines when none are given.
pub async fn run_create_index(
    client: &VideoClient,
    name: &str,
    engines: &[String],
    settings: &Settings,
) -> Result<()> {
    let engines = if engines.is_empty() {
        settings.index.default_engines.as_slice()
    } else {
        engines
    };

    Output::info(&format!(
        "Creating index '{}' with engines: {}",
        name.trim(),
        engines.join(", ")
    ));

    let index = client.create_index(name, engines).await?;

    Output::success("Index created successfully!");
    Output::kv("ID", &index.id);
    Output::kv("Name", &index.name);
    Output::kv(
        "Engines",
        &index
            .engines
            .iter()
            .map(|e| format!("{} ({})", e, e.capability()))
            .collect::<Vec<_>>()
            .join(", "),
    );

    Ok(())
}
