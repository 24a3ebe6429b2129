//! Markdown rendering with GitHub Flavored Markdown support.

use comrak::Options;

use crate::error::RenderError;
use crate::highlight::{self, Style};

/// Renders comment markdown to an HTML fragment.
///
/// Provides GFM extensions (tables, strikethrough, autolinks, task lists),
/// heading anchors, smart punctuation and hard line breaks. Fenced code
/// blocks with a language are highlighted with CSS classes through
/// syntect.
///
/// The markup does not depend on the [`Style`]: class names are the same
/// for every theme. The style only selects which theme
/// [`crate::highlight::stylesheet`] serializes for the embedding page.
///
/// Raw HTML in comment text is not passed through.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    style: Style,
}

impl MarkdownRenderer {
    /// Creates renderer using the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates renderer for the given highlighting style.
    pub fn with_style(style: Style) -> Self {
        Self { style }
    }

    /// Returns the style whose stylesheet matches this renderer's markup.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Builds comrak options for comment rendering.
    ///
    /// Configures:
    /// - Tables, strikethrough, autolinks, task lists
    /// - Generated heading IDs
    /// - Smart punctuation for quotes and dashes
    /// - Soft breaks rendered as `<br />`
    /// - Safe rendering (raw HTML and unsafe link schemes dropped)
    fn options() -> Options<'static> {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.header_ids = Some(String::new());

        // Parse options (smart punctuation)
        options.parse.smart = true;

        // Render options: comment text is untrusted, keep unsafe_ off
        options.render.hardbreaks = true;
        options.render.unsafe_ = false;

        options
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML fragment with syntax highlighted code blocks
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a code block cannot be highlighted
    pub fn render(&self, content: &str) -> Result<String, RenderError> {
        let html = comrak::markdown_to_html(content, &Self::options());

        self.highlight_code_blocks(&html)
    }

    /// Post-processes HTML to apply syntax highlighting with CSS classes.
    ///
    /// Finds code blocks with language-* classes from comrak's output and
    /// replaces the plain text content with syntect highlighted HTML.
    ///
    /// # Arguments
    ///
    /// * `html`: Raw HTML from comrak with <code class="language-X"> blocks
    ///
    /// # Errors
    ///
    /// Returns error if highlighting fails
    fn highlight_code_blocks(&self, html: &str) -> Result<String, RenderError> {
        const OPEN: &str = "<code class=\"language-";
        const CLOSE: &str = "</code>";

        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;
        let mut search_pos = 0;

        while let Some(code_start) = html[search_pos..].find(OPEN) {
            let code_start = search_pos + code_start;

            let lang_start = code_start + OPEN.len();
            let Some(lang_len) = html[lang_start..].find('"') else {
                search_pos = code_start + 1;
                continue;
            };
            let lang_end = lang_start + lang_len;
            let language = &html[lang_start..lang_end];

            let Some(tag_len) = html[lang_end..].find('>') else {
                search_pos = code_start + 1;
                continue;
            };
            let content_start = lang_end + tag_len + 1;

            let Some(content_len) = html[content_start..].find(CLOSE) else {
                search_pos = code_start + 1;
                continue;
            };
            let content_end = content_start + content_len;

            // comrak escapes &, <, >, " inside code blocks
            let code = html_decode(&html[content_start..content_end]);
            let highlighted = highlight::highlight_code(&code, language)?;

            result.push_str(&html[last_end..code_start]);
            result.push_str(OPEN);
            result.push_str(language);
            result.push_str("\">");
            result.push_str(&highlighted);
            result.push_str(CLOSE);

            last_end = content_end + CLOSE.len();
            search_pos = last_end;
        }

        result.push_str(&html[last_end..]);

        log::trace!(
            "rendered {} bytes of html with style {:?}",
            result.len(),
            self.style.name()
        );

        Ok(result)
    }
}

/// Decodes the entities comrak writes into code block content.
fn html_decode(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
