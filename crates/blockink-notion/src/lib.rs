//! Notion REST API client, reduced to the one call the proxy needs:
//! retrieve a code block and extract its diagram source text.

mod client;
mod error;
mod types;

pub use client::{NOTION_API_URL, NotionClient};
pub use error::NotionError;
pub use types::extract_code_text;
