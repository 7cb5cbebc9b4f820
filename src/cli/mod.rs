//! CLI module for Snippetropolis.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{render_table, Output};

use clap::{Parser, Subcommand};

/// Snippetropolis - search, summarize and chat over video
///
/// Manages Twelve Labs indexes and videos, and runs searches, summaries and
/// questions against them.
#[derive(Parser, Debug)]
#[command(name = "snippetropolis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new index
    CreateIndex {
        /// Index name
        name: String,

        /// Engines to enable (marengo2.6, marengo2.5, pegasus1.1)
        #[arg(long, num_args = 1..)]
        engines: Vec<String>,
    },

    /// Upload a video file to an index
    UploadVideo {
        /// Target index ID
        index_id: String,

        /// Path to the video file
        path: String,

        /// Language of the video (IETF tag)
        #[arg(long)]
        language: Option<String>,

        /// Wait until the service has finished processing the video
        #[arg(long)]
        wait: bool,
    },

    /// List all indexes
    ListIndexes,

    /// List the videos in an index
    ListVideos {
        /// Index ID to query
        index_id: String,
    },

    /// Search an index by text and/or image
    Search {
        /// Index ID to search
        index_id: String,

        /// Text query
        #[arg(short, long)]
        text: Option<String>,

        /// Image file to search for similar visual content
        #[arg(short, long)]
        image: Option<String>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Summarize a video
    Summarize {
        /// Video ID
        video_id: String,

        /// Summary type (comprehensive, brief, detailed, key_points)
        #[arg(short = 't', long = "type", default_value = "comprehensive")]
        summary_type: String,

        /// Extra instructions, e.g. "Focus on technical details"
        #[arg(short, long)]
        instruction: Option<String>,

        /// Output language (IETF tag)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Ask a single question about a video
    Ask {
        /// Video ID
        video_id: String,

        /// The question to ask
        question: String,
    },

    /// Start an interactive Q&A session about a video
    Chat {
        /// Video ID
        video_id: String,

        /// Index the video belongs to; the video is checked against it before chatting
        #[arg(long)]
        index: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file if none exists
    Init,

    /// Show configuration file path
    Path,
}
