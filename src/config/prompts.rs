//! Prompt templates for Snippetropolis.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"))
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub chat: ChatPrompts,
}

/// Directives sent with summary requests, one per summary type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub comprehensive: String,
    pub brief: String,
    pub detailed: String,
    pub key_points: String,
    /// Appended when the requested output language is not English.
    pub language: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            comprehensive: "Provide a comprehensive summary of the video covering every main topic in order.".to_string(),
            brief: "Provide a very concise summary. Focus on the main points without unnecessary details.".to_string(),
            detailed: "Provide a detailed summary of the video, including specific facts, names and figures that are mentioned.".to_string(),
            key_points: "List the key points of the video as short bullet points.".to_string(),
            language: "Write the summary in the language with code {{language}}.".to_string(),
        }
    }
}

/// Templates used to fold chat history into a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    /// One rendered line pair per previous turn.
    pub turn: String,
    /// Wraps the rendered history and the new question.
    pub with_history: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            turn: "Q: {{question}}\nA: {{answer}}".to_string(),
            with_history: "Previous conversation context:\n{{context}}\n\nCurrent question: {{question}}".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, overriding defaults with `summary.toml` / `chat.toml` from `custom_dir`.
    pub fn load(custom_dir: Option<&Path>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let summary_path = dir.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let chat_path = dir.join("chat.toml");
            if chat_path.exists() {
                let content = std::fs::read_to_string(&chat_path)?;
                prompts.chat = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution is a single pass over the template: inserted values are
    /// never scanned for placeholders, and unknown placeholders are kept.
    pub fn render(template: &str, vars: &HashMap<&str, &str>) -> String {
        placeholder()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => (*value).to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.summary.brief.is_empty());
        assert!(prompts.chat.with_history.contains("{{context}}"));
    }

    #[test]
    fn test_render_template() {
        let vars = HashMap::from([("question", "Who?"), ("answer", "Alice")]);
        let result = Prompts::render("Q: {{question}}\nA: {{answer}}", &vars);
        assert_eq!(result, "Q: Who?\nA: Alice");
    }

    #[test]
    fn test_render_does_not_expand_inserted_values() {
        let vars = HashMap::from([
            ("question", "q1"),
            ("answer", "The template uses {{question}} and {{answer}} here"),
        ]);
        for _ in 0..20 {
            let result = Prompts::render("Q: {{question}}\nA: {{answer}}", &vars);
            assert_eq!(
                result,
                "Q: q1\nA: The template uses {{question}} and {{answer}} here"
            );
        }
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let vars = HashMap::from([("question", "Who?")]);
        assert_eq!(
            Prompts::render("{{question}} {{missing}}", &vars),
            "Who? {{missing}}"
        );
    }

    #[test]
    fn test_custom_dir_overrides_only_present_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("summary.toml"), "brief = \"One sentence only.\"\n").unwrap();

        let prompts = Prompts::load(Some(dir.path())).unwrap();
        assert_eq!(prompts.summary.brief, "One sentence only.");
        assert_eq!(prompts.summary.detailed, SummaryPrompts::default().detailed);
        assert_eq!(prompts.chat.turn, ChatPrompts::default().turn);
    }
}
