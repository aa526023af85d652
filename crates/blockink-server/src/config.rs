//! Environment-sourced configuration.
//!
//! The integration token is the one process-wide secret; startup fails fast
//! when it is absent rather than sending an empty credential upstream.

use blockink_kroki::TokenEncoding;
use blockink_notion::NOTION_API_URL;

/// Default rendering endpoint (Kroki's PlantUML route).
const RENDER_SERVER_URL: &str = "https://kroki.io/plantuml";

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    /// Required credential variable is unset or empty.
    #[error("{0} must be set to a Notion integration token")]
    MissingToken(&'static str),

    /// Unknown token-encoding name.
    #[error("invalid {var}: {value:?} (expected \"base64\" or \"plantuml\")")]
    InvalidEncoding {
        var: &'static str,
        value: String,
    },
}

/// Proxy configuration, read from the environment at startup.
#[derive(Debug)]
pub(crate) struct Config {
    /// Notion integration token, sent as a bearer credential.
    pub(crate) notion_token: String,
    /// Notion retrieve-a-block endpoint.
    pub(crate) notion_api_url: String,
    /// Rendering server endpoint; format and token are appended per request.
    pub(crate) render_url: String,
    /// Token encoding expected by the rendering server.
    pub(crate) encoding: TokenEncoding,
}

impl Config {
    /// Load configuration from the process environment.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let notion_token =
            read("NOTION_ACCESS_KEY").ok_or(ConfigError::MissingToken("NOTION_ACCESS_KEY"))?;
        let notion_api_url =
            read("NOTION_API_URL").unwrap_or_else(|| NOTION_API_URL.to_owned());
        let render_url =
            read("RENDER_SERVER_URL").unwrap_or_else(|| RENDER_SERVER_URL.to_owned());
        let encoding = match read("RENDER_ENCODING").as_deref() {
            None | Some("base64") => TokenEncoding::Base64Url,
            Some("plantuml") => TokenEncoding::Plantuml,
            Some(other) => {
                return Err(ConfigError::InvalidEncoding {
                    var: "RENDER_ENCODING",
                    value: other.to_owned(),
                });
            }
        };

        Ok(Self {
            notion_token,
            notion_api_url,
            render_url,
            encoding,
        })
    }
}
