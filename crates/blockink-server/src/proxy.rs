//! Request orchestration: validate, fetch, render, respond.
//!
//! The pipeline is stateless across requests and strictly sequential; the
//! first failing stage short-circuits the rest. Collaborators sit behind
//! traits so tests can substitute mocks and assert that rejected requests
//! never reach the network.

use std::collections::HashMap;

use blockink_kroki::{KrokiClient, OutputFormat, RenderError};
use blockink_notion::{NotionClient, NotionError};
use tracing::error;

use crate::response;

/// Body for every validation rejection.
const BAD_REQUEST: &str = "Bad Request";

/// Caller-facing body when the block text cannot be fetched.
const FETCH_FAILED: &str = "Failed to load diagram source";

/// Caller-facing body when encoding or rendering fails.
const RENDER_FAILED: &str = "Failed to render diagram";

/// Inbound request, reduced to what the proxy inspects.
#[derive(Debug)]
pub(crate) struct ProxyRequest {
    /// HTTP method name, uppercase.
    pub(crate) method: String,
    /// Query parameters.
    pub(crate) query: HashMap<String, String>,
}

/// Outbound response envelope.
///
/// Mirrors an API-gateway proxy response: the body is a string, carrying
/// base64 of the payload bytes when `is_base64` is set.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ProxyResponse {
    pub(crate) status: u16,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: String,
    /// Whether `body` is base64 transport-encoded.
    pub(crate) is_base64: bool,
}

impl ProxyResponse {
    /// Plain-text response with no extra headers.
    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.to_owned(),
            is_base64: false,
        }
    }
}

/// Source of diagram text, keyed by block id.
pub(crate) trait BlockSource {
    fn fetch_block_text(&self, block_id: &str) -> Result<String, NotionError>;
}

impl BlockSource for NotionClient {
    fn fetch_block_text(&self, block_id: &str) -> Result<String, NotionError> {
        NotionClient::fetch_block_text(self, block_id)
    }
}

impl<B: BlockSource + ?Sized> BlockSource for &B {
    fn fetch_block_text(&self, block_id: &str) -> Result<String, NotionError> {
        (**self).fetch_block_text(block_id)
    }
}

/// Renders diagram source text to image bytes.
pub(crate) trait DiagramRenderer {
    fn render(&self, source: &str, format: OutputFormat) -> Result<Vec<u8>, RenderError>;
}

impl DiagramRenderer for KrokiClient {
    fn render(&self, source: &str, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
        KrokiClient::render(self, source, format)
    }
}

impl<R: DiagramRenderer + ?Sized> DiagramRenderer for &R {
    fn render(&self, source: &str, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
        (**self).render(source, format)
    }
}

/// The validate → fetch → render → respond pipeline.
pub(crate) struct Pipeline<B, R> {
    blocks: B,
    renderer: R,
}

impl<B: BlockSource, R: DiagramRenderer> Pipeline<B, R> {
    pub(crate) fn new(blocks: B, renderer: R) -> Self {
        Self { blocks, renderer }
    }

    /// Handle one request.
    ///
    /// Every failure maps to a 400 or 500 with a generic body; full error
    /// detail stays in the server-side log.
    pub(crate) fn handle(&self, request: &ProxyRequest) -> ProxyResponse {
        if request.method != "GET" {
            return ProxyResponse::text(400, BAD_REQUEST);
        }
        let Some(format) = request
            .query
            .get("filetype")
            .and_then(|value| value.parse::<OutputFormat>().ok())
        else {
            return ProxyResponse::text(400, BAD_REQUEST);
        };
        let Some(block_id) = request.query.get("blockId").filter(|id| !id.is_empty()) else {
            return ProxyResponse::text(400, BAD_REQUEST);
        };

        let source = match self.blocks.fetch_block_text(block_id) {
            Ok(source) => source,
            Err(err) => {
                error!("block text fetch failed: {err:?}");
                return ProxyResponse::text(500, FETCH_FAILED);
            }
        };

        let image = match self.renderer.render(&source, format) {
            Ok(image) => image,
            Err(err) => {
                error!("diagram rendering failed: {err:?}");
                return ProxyResponse::text(500, RENDER_FAILED);
            }
        };

        match response::assemble(image, format) {
            Ok(assembled) => assembled,
            Err(err) => {
                error!("rendered SVG is not valid UTF-8: {err}");
                ProxyResponse::text(500, RENDER_FAILED)
            }
        }
    }
}
