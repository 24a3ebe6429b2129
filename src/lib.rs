//! Comment content formatter.
//!
//! Turns raw, user-submitted markdown into a bounded, display safe HTML
//! fragment: markdown is rendered with GFM extensions and class based
//! syntax highlighting, known entity artifacts are repaired, caller
//! supplied converters run in order, and auto links get shortened labels.

mod config;
pub mod convert;
mod error;
mod formatter;
pub mod highlight;
mod markdown;
pub mod notify;

pub use config::Config;
pub use convert::{Converter, ConverterChain, ImageProxy};
pub use error::{FormatError, RenderError};
pub use formatter::{
    Comment, CommentFormatter, CommentFormatterBuilder, DEFAULT_MAX_LINK_LEN, escape_plain_text,
};
pub use highlight::{DEFAULT_STYLE, Style};
pub use markdown::{MarkdownRenderer, shorten_auto_links, unescape};
