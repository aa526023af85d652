//! HTTP client for the rendering server.

use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::encode::{TokenEncoding, encode_diagram};
use crate::error::RenderError;
use crate::format::OutputFormat;

/// Client for a Kroki or PlantUML rendering server.
///
/// The token encoding is fixed at construction: it is a property of the
/// targeted server, not of an individual request.
pub struct KrokiClient {
    agent: Agent,
    base_url: String,
    encoding: TokenEncoding,
}

impl KrokiClient {
    /// Create a client for the given server base URL.
    ///
    /// `base_url` should already name the diagram language endpoint
    /// (e.g. `https://kroki.io/plantuml`); the format and token are
    /// appended per request.
    pub fn new(base_url: &str, encoding: TokenEncoding, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            encoding,
        }
    }

    /// Encode the diagram source and fetch the rendered image bytes.
    ///
    /// An error status from the server maps to [`RenderError::HttpResponse`]
    /// rather than being passed through as image bytes.
    pub fn render(&self, source: &str, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
        let token = encode_diagram(source, self.encoding)?;
        let url = format!("{}/{}/{}", self.base_url, format.as_str(), token);

        debug!("fetching rendered diagram: {} bytes of source", source.len());

        let response = self.agent.get(&url).call()?;
        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(RenderError::HttpResponse {
                status,
                body: error_body,
            });
        }

        body.read_to_vec().map_err(RenderError::BodyRead)
    }
}
