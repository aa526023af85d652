//! Diagram encoding and rendering via URL-based diagram servers.
//!
//! Diagram servers in the Kroki/PlantUML family accept the diagram source
//! compressed and encoded into a URL path segment:
//!
//! ```text
//! GET <server>/<format>/<token>
//! ```
//!
//! where `<token>` is the zlib-compressed source re-encoded with either the
//! PlantUML 64-symbol alphabet or URL-safe base64, depending on the server.
//!
//! The crate is organized into modules:
//! - [`encode`]: pure token encoding (no HTTP), selected by [`TokenEncoding`]
//! - [`format`]: the supported output formats and their content types
//! - [`client`]: [`KrokiClient`] for fetching rendered images

mod client;
mod encode;
mod error;
mod format;

pub use client::KrokiClient;
pub use encode::{TokenEncoding, decode_plantuml, encode_diagram, encode_plantuml};
pub use error::{DecodeError, RenderError};
pub use format::{OutputFormat, UnknownFormat};
