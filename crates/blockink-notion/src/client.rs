//! Notion REST API client.

use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::error::NotionError;
use crate::types::extract_code_text;

/// Default retrieve-a-block endpoint.
pub const NOTION_API_URL: &str = "https://api.notion.com/v1/blocks";

/// API version sent with every request.
const NOTION_VERSION: &str = "2022-02-22";

/// Notion REST API client.
pub struct NotionClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl NotionClient {
    /// Create a client for the given block endpoint and integration token.
    ///
    /// The token is injected here rather than read from the environment so
    /// tests can substitute a fake credential.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        }
    }

    /// Fetch a code block and return its diagram source text.
    pub fn fetch_block_text(&self, block_id: &str) -> Result<String, NotionError> {
        let url = format!("{}/{}", self.base_url, block_id);

        debug!("fetching block {block_id}");

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status != 200 {
            return Err(NotionError::HttpResponse { status });
        }

        let text = body.read_to_string().map_err(NotionError::HttpRequest)?;
        extract_code_text(&text)
    }
}
