//! Repairs entity artifacts in rendered HTML.

/// Literal `(from, to)` replacements applied in table order.
///
/// The renderer escapes the ampersand of an already written entity, so a
/// dash typed as `&mdash;` in some inputs reaches the output double
/// encoded.
const REPLACEMENTS: &[(&str, &str)] = &[("&amp;mdash;", "\u{2014}")];

/// Applies every entry of the replacement table to rendered HTML.
///
/// Each entry replaces all of its occurrences before the next entry runs.
pub fn unescape(html: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(html.to_string(), |text, (from, to)| text.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_double_encoded_mdash() {
        // Act
        let html = unescape("<p>a &amp;mdash; b &amp;mdash; c</p>");

        // Assert
        assert_eq!(html, "<p>a \u{2014} b \u{2014} c</p>");
    }

    #[test]
    fn test_unescape_leaves_other_entities() {
        // Arrange
        let input = "<p>&amp; &lt;tag&gt; &amp;ndash;</p>";

        // Act
        let html = unescape(input);

        // Assert
        assert_eq!(html, input);
    }

    #[test]
    fn test_unescape_empty() {
        assert_eq!(unescape(""), "");
    }
}
