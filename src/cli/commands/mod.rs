//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod create_index;
mod list;
mod search;
mod summarize;
mod upload;

pub use ask::run_ask;
pub use chat::{chat_loop, open_session, run_chat};
pub use config::run_config;
pub use create_index::run_create_index;
pub use list::{run_list_indexes, run_list_videos};
pub use search::run_search;
pub use summarize::run_summarize;
pub use upload::run_upload_video;
