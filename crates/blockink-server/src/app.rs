//! Router construction and envelope translation.
//!
//! The hosting adapter stays thin: it captures the method and query into a
//! [`ProxyRequest`], runs the blocking pipeline off the async runtime, and
//! translates the resulting envelope into an HTTP response.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Method, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::any;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use blockink_kroki::KrokiClient;
use blockink_notion::NotionClient;
use tracing::error;

use crate::proxy::{Pipeline, ProxyRequest, ProxyResponse};

/// The pipeline wired to the real collaborators.
pub(crate) type AppPipeline = Pipeline<NotionClient, KrokiClient>;

/// Create the application router.
pub(crate) fn create_router(pipeline: Arc<AppPipeline>) -> Router {
    // `any` so that non-GET methods reach the pipeline's own validation
    // instead of axum's 405.
    Router::new()
        .route("/render", any(render))
        .with_state(pipeline)
}

/// Handle /render.
async fn render(
    State(pipeline): State<Arc<AppPipeline>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
) -> Response<Body> {
    let request = ProxyRequest {
        method: method.as_str().to_owned(),
        query,
    };

    match tokio::task::spawn_blocking(move || pipeline.handle(&request)).await {
        Ok(envelope) => into_http(envelope),
        Err(err) => {
            error!("pipeline task failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Translate the envelope into an HTTP response.
///
/// Base64 transport bodies are decoded back to raw bytes here, the same
/// translation an API gateway applies before the client sees them.
fn into_http(envelope: ProxyResponse) -> Response<Body> {
    let bytes = if envelope.is_base64 {
        match BASE64_STANDARD.decode(&envelope.body) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("invalid base64 transport body: {err}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    } else {
        envelope.body.into_bytes()
    };

    let mut builder = Response::builder().status(envelope.status);
    for (name, value) in &envelope.headers {
        builder = builder.header(name, value);
    }
    match builder.body(Body::from(bytes)) {
        Ok(response) => response,
        Err(err) => {
            error!("failed to build response: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
