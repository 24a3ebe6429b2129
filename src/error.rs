//! Error types surfaced by the formatting pipeline.

use thiserror::Error;

/// Failure of the markdown rendering step.
///
/// Rendering never aborts the process. Callers receive this error and
/// decide on a fallback, typically [`crate::escape_plain_text`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// A fenced code block could not be run through the highlighter.
    #[error("failed to highlight `{language}` code block")]
    Highlight {
        language: String,
        #[source]
        source: syntect::Error,
    },
}

/// Errors returned by [`crate::CommentFormatter`] operations.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to render comment markdown")]
    Render(#[from] RenderError),

    /// Raised only by explicit validation; formatting itself falls back
    /// to the default theme for unknown names.
    #[error("unknown highlighting style: {0:?}")]
    UnknownStyle(String),

    #[error("failed to build stylesheet for style {style:?}")]
    Stylesheet {
        style: String,
        #[source]
        source: syntect::Error,
    },
}
