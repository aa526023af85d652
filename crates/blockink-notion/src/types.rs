//! Notion block response types.
//!
//! Only the fields the proxy reads are modeled. Every level is optional so
//! that a response of an unexpected shape maps to
//! [`NotionError::MalformedResponse`] instead of a parse failure deep in a
//! field the proxy never looks at.

use serde::Deserialize;

use crate::error::NotionError;

/// Retrieve-a-block response.
#[derive(Debug, Deserialize)]
struct BlockResponse {
    /// Code block payload; absent when the block is not a code block.
    #[serde(default)]
    code: Option<CodeBlock>,
}

/// The `code` object of a code block.
#[derive(Debug, Deserialize)]
struct CodeBlock {
    #[serde(default)]
    rich_text: Vec<RichText>,
}

/// One rich-text run.
#[derive(Debug, Deserialize)]
struct RichText {
    /// Text payload; absent for mention or equation runs.
    #[serde(default)]
    text: Option<TextRun>,
}

/// Plain-text content of a rich-text run.
#[derive(Debug, Deserialize)]
struct TextRun {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the diagram source from a retrieve-a-block response body.
///
/// The source is the first rich-text run at `code.rich_text[0].text.content`.
/// Any structural deviation, including a non-JSON body, yields
/// [`NotionError::MalformedResponse`].
pub fn extract_code_text(body: &str) -> Result<String, NotionError> {
    let block: BlockResponse = serde_json::from_str(body)
        .map_err(|_| NotionError::MalformedResponse("body is not a JSON block object"))?;

    block
        .code
        .and_then(|code| code.rich_text.into_iter().next())
        .and_then(|run| run.text)
        .and_then(|text| text.content)
        .ok_or(NotionError::MalformedResponse(
            "missing code.rich_text[0].text.content",
        ))
}
