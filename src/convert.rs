//! Pluggable post-render transforms.
//!
//! A [`Converter`] rewrites the rendered HTML of a comment, for example to
//! route images through a proxy. Converters run as an ordered
//! [`ConverterChain`] between rendering and link shortening.

mod image_proxy;

pub use image_proxy::ImageProxy;

use std::fmt;
use std::sync::Arc;

/// Text-to-text transform applied to rendered comment HTML.
///
/// Converters receive the whole HTML fragment as a string, not a parsed
/// tree. A converter must keep its output well formed: a naive substring
/// replacement that crosses a tag boundary corrupts the markup and
/// nothing downstream repairs it.
///
/// Order matters. Each converter sees the cumulative output of the ones
/// registered before it, including any markup they introduced.
///
/// Converters are shared across threads and must not rely on hidden
/// mutable state. Plain closures implement the trait:
///
/// ```
/// use commentfmt::Converter;
///
/// let upper = |html: &str| html.replace("<em>", "<strong>").replace("</em>", "</strong>");
/// assert_eq!(upper.convert("<em>x</em>"), "<strong>x</strong>");
/// ```
pub trait Converter: Send + Sync {
    /// Returns the converted HTML.
    fn convert(&self, html: &str) -> String;
}

impl<F> Converter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn convert(&self, html: &str) -> String {
        self(html)
    }
}

/// Ordered sequence of converters.
///
/// Converters run strictly in registration order; the chain is a
/// sequence, not a set, and registering the same converter twice runs it
/// twice.
#[derive(Clone, Default)]
pub struct ConverterChain {
    converters: Vec<Arc<dyn Converter>>,
}

impl ConverterChain {
    /// Creates empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends converter at the end of the chain.
    pub fn push(&mut self, converter: Arc<dyn Converter>) {
        self.converters.push(converter);
    }

    /// Returns number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns true when no converter is registered.
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Runs every converter in order over `html`.
    pub fn apply(&self, html: &str) -> String {
        self.converters
            .iter()
            .fold(html.to_string(), |text, converter| converter.convert(&text))
    }
}

impl FromIterator<Arc<dyn Converter>> for ConverterChain {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Converter>>>(iter: I) -> Self {
        Self {
            converters: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for ConverterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterChain")
            .field("len", &self.converters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(tag: &'static str) -> Arc<dyn Converter> {
        Arc::new(move |html: &str| format!("{}[{}]", html, tag))
    }

    #[test]
    fn test_empty_chain_is_noop() {
        // Arrange
        let chain = ConverterChain::new();

        // Act
        let result = chain.apply("<p>hi</p>");

        // Assert
        assert!(chain.is_empty());
        assert_eq!(result, "<p>hi</p>");
    }

    #[test]
    fn test_chain_runs_in_registration_order() {
        // Arrange
        let chain: ConverterChain = [marker("A"), marker("B"), marker("C")]
            .into_iter()
            .collect();

        // Act & Assert
        for _ in 0..10 {
            assert_eq!(chain.apply("x"), "x[A][B][C]");
        }
    }

    #[test]
    fn test_chain_feeds_cumulative_output() {
        // Arrange
        let mut chain = ConverterChain::new();
        chain.push(Arc::new(|html: &str| html.replace("cat", "<b>dog</b>")));
        chain.push(Arc::new(|html: &str| html.replace("<b>", "<i>").replace("</b>", "</i>")));

        // Act
        let result = chain.apply("a cat");

        // Assert
        assert_eq!(result, "a <i>dog</i>");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_duplicate_converter_runs_twice() {
        // Arrange
        let twice = marker("X");
        let chain: ConverterChain = [twice.clone(), twice].into_iter().collect();

        // Act
        let result = chain.apply("");

        // Assert
        assert_eq!(result, "[X][X]");
    }

    #[test]
    fn test_stateful_converter() {
        // Arrange
        struct Suffix(String);
        impl Converter for Suffix {
            fn convert(&self, html: &str) -> String {
                format!("{}{}", html, self.0)
            }
        }
        let mut chain = ConverterChain::new();
        chain.push(Arc::new(Suffix("<hr>".to_string())));

        // Act
        let result = chain.apply("<p>x</p>");

        // Assert
        assert_eq!(result, "<p>x</p><hr>");
    }
}
