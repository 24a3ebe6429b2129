//! Syntax highlighting with syntect using CSS classes.
//!
//! Highlighted markup carries class names only. The embedding page is
//! expected to ship the stylesheet produced by [`stylesheet`] for the
//! configured [`Style`].

use std::sync::LazyLock;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::error::{FormatError, RenderError};

/// Style name used when none is configured.
pub const DEFAULT_STYLE: &str = "monokailight";

/// Theme used for style names the theme set does not know.
///
/// A light theme, so that the default `monokailight` style name keeps a
/// light palette.
pub const FALLBACK_THEME: &str = "InspiredGitHub";

/// Prefix added to every generated highlight class.
pub const CLASS_PREFIX: &str = "hl-";

/// Fixed tab width for highlighted code blocks.
pub const TAB_WIDTH: usize = 2;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Named highlighting theme.
///
/// Lookup is forgiving: an exact theme name matches first, then a
/// normalized comparison that ignores case and punctuation
/// (`solarized-light` finds `Solarized (light)`). Anything else resolves
/// to [`FALLBACK_THEME`]. Use [`Style::validate`] to reject unknown
/// names up front instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    name: String,
}

impl Style {
    /// Creates style from a theme name. Empty names select [`DEFAULT_STYLE`].
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            DEFAULT_STYLE.to_string()
        } else {
            name
        };
        Self { name }
    }

    /// Returns the configured name, as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true when the name maps to a bundled theme.
    pub fn is_known(&self) -> bool {
        lookup_theme(&self.name).is_some()
    }

    /// Rejects names that would otherwise fall back to [`FALLBACK_THEME`].
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownStyle`] for unrecognized names.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.is_known() {
            Ok(())
        } else {
            Err(FormatError::UnknownStyle(self.name.clone()))
        }
    }

    /// Resolves the theme for this style, falling back when unknown.
    pub fn theme(&self) -> &'static Theme {
        lookup_theme(&self.name).unwrap_or_else(|| {
            log::debug!(
                "unknown style {:?}, using {} theme",
                self.name,
                FALLBACK_THEME
            );
            &THEME_SET.themes[FALLBACK_THEME]
        })
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE)
    }
}

fn lookup_theme(name: &str) -> Option<&'static Theme> {
    if let Some(theme) = THEME_SET.themes.get(name) {
        return Some(theme);
    }

    let wanted = normalize(name);
    THEME_SET
        .themes
        .iter()
        .find(|(key, _)| normalize(key) == wanted)
        .map(|(_, theme)| theme)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Lists the bundled theme names, sorted.
pub fn available_styles() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = THEME_SET.themes.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// Generates CSS matching the class-based highlight markup for a style.
///
/// # Errors
///
/// Returns [`FormatError::Stylesheet`] if syntect cannot serialize the theme.
pub fn stylesheet(style: &Style) -> Result<String, FormatError> {
    css_for_theme_with_class_style(style.theme(), CLASS_STYLE).map_err(|source| {
        FormatError::Stylesheet {
            style: style.name().to_string(),
            source,
        }
    })
}

/// Highlights a code block with CSS classes.
///
/// Tabs are expanded to [`TAB_WIDTH`] spaces first. Unknown languages
/// return escaped plain text.
///
/// # Arguments
///
/// * `code`: Decoded source code of the block
/// * `language`: Info string token (rust, py, etc)
///
/// # Errors
///
/// Returns [`RenderError::Highlight`] if syntect fails on a line.
pub fn highlight_code(code: &str, language: &str) -> Result<String, RenderError> {
    if code.is_empty() {
        return Ok(String::new());
    }

    let code = code.replace('\t', &" ".repeat(TAB_WIDTH));

    let syntax = SYNTAX_SET
        .find_syntax_by_token(language)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(language));

    let Some(syntax) = syntax else {
        return Ok(escape_html(&code));
    };

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);

    for line in LinesWithEndings::from(&code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|source| RenderError::Highlight {
                language: language.to_string(),
                source,
            })?;
    }

    Ok(generator.finalize())
}

/// Escapes HTML special characters.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
