//! Comment formatting pipeline.

use std::fmt;
use std::sync::Arc;

use crate::convert::{Converter, ConverterChain};
use crate::error::FormatError;
use crate::highlight::{self, Style};
use crate::markdown::{self, MarkdownRenderer};

/// Default maximum visible length of a shortened auto link.
pub const DEFAULT_MAX_LINK_LEN: usize = 48;

/// Comment record passed through the formatter.
///
/// Only `text` is touched: raw markdown goes in, an HTML fragment comes
/// out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub text: String,
}

impl Comment {
    /// Creates comment with the given id and raw markdown text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Turns raw comment markdown into a bounded, display safe HTML fragment.
///
/// Every call runs the same fixed sequence:
///
/// 1. render markdown ([`MarkdownRenderer`])
/// 2. repair entity artifacts ([`crate::unescape`])
/// 3. apply converters in registration order ([`ConverterChain`])
/// 4. shorten auto links ([`crate::shorten_auto_links`])
///
/// The formatter is immutable once built and can be shared between
/// threads. Use [`CommentFormatter::with_style`] to derive a formatter
/// with another highlighting style.
///
/// ```
/// use commentfmt::CommentFormatter;
///
/// let formatter = CommentFormatter::builder().max_link_len(20).build();
/// let html = formatter.format_text("see http://example.com/a/b/c/d/e/f/g")?;
/// assert!(html.contains(">http://example.com...</a>"));
/// # Ok::<(), commentfmt::FormatError>(())
/// ```
#[derive(Clone)]
pub struct CommentFormatter {
    renderer: MarkdownRenderer,
    converters: ConverterChain,
    max_link_len: usize,
}

impl CommentFormatter {
    /// Creates formatter with default style, no converters and the
    /// default link length.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a formatter.
    pub fn builder() -> CommentFormatterBuilder {
        CommentFormatterBuilder::default()
    }

    /// Returns a copy of this formatter using another highlighting style.
    ///
    /// Converters and link length are shared with the original.
    pub fn with_style(&self, style: impl Into<String>) -> Self {
        Self {
            renderer: MarkdownRenderer::with_style(Style::new(style)),
            converters: self.converters.clone(),
            max_link_len: self.max_link_len,
        }
    }

    /// Returns the highlighting style.
    pub fn style(&self) -> &Style {
        self.renderer.style()
    }

    /// Returns the maximum visible length of shortened auto links.
    pub fn max_link_len(&self) -> usize {
        self.max_link_len
    }

    /// Returns the CSS for the highlight classes of the current style.
    ///
    /// # Errors
    ///
    /// Returns error if the theme cannot be serialized
    pub fn stylesheet(&self) -> Result<String, FormatError> {
        highlight::stylesheet(self.style())
    }

    /// Formats the text of a comment, leaving the other fields as is.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Render`] if markdown rendering fails
    pub fn format(&self, mut comment: Comment) -> Result<Comment, FormatError> {
        comment.text = self.format_text(&comment.text)?;
        Ok(comment)
    }

    /// Converts markdown to HTML, applies converters and shortens links.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Render`] if markdown rendering fails
    pub fn format_text(&self, text: &str) -> Result<String, FormatError> {
        let html = self.renderer.render(text)?;
        let html = markdown::unescape(&html);
        let html = self.converters.apply(&html);
        Ok(markdown::shorten_auto_links(&html, self.max_link_len))
    }

    /// Formats text, falling back to escaped plain text on render errors.
    pub fn format_or_escape(&self, text: &str) -> String {
        match self.format_text(text) {
            Ok(html) => html,
            Err(e) => {
                log::warn!("comment rendering failed, showing plain text: {}", e);
                escape_plain_text(text)
            }
        }
    }
}

impl Default for CommentFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommentFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentFormatter")
            .field("style", &self.style().name())
            .field("converters", &self.converters.len())
            .field("max_link_len", &self.max_link_len)
            .finish()
    }
}

/// Builder for [`CommentFormatter`].
///
/// Converters are kept in the order they are added.
#[derive(Debug)]
pub struct CommentFormatterBuilder {
    style: Style,
    converters: ConverterChain,
    max_link_len: usize,
}

impl Default for CommentFormatterBuilder {
    fn default() -> Self {
        Self {
            style: Style::default(),
            converters: ConverterChain::new(),
            max_link_len: DEFAULT_MAX_LINK_LEN,
        }
    }
}

impl CommentFormatterBuilder {
    /// Sets the highlighting style name. Unknown names fall back to the
    /// default theme.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Style::new(style);
        self
    }

    /// Appends a converter after the ones already registered.
    pub fn converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    /// Appends an already shared converter.
    pub fn shared_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Sets the maximum visible length of shortened auto links.
    ///
    /// Values below 3 disable shortening.
    pub fn max_link_len(mut self, max: usize) -> Self {
        self.max_link_len = max;
        self
    }

    /// Finishes the formatter; its configuration is fixed from here on.
    pub fn build(self) -> CommentFormatter {
        CommentFormatter {
            renderer: MarkdownRenderer::with_style(self.style),
            converters: self.converters,
            max_link_len: self.max_link_len,
        }
    }
}

/// Escapes raw comment text for display when rendering failed.
///
/// Line breaks become `<br>` so the text keeps its shape.
pub fn escape_plain_text(text: &str) -> String {
    highlight::escape_html(text).replace('\n', "<br>\n")
}
