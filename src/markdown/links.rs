//! Shortening of auto links in rendered HTML.

use kuchikiki::NodeRef;
use kuchikiki::traits::TendrilSink;
use url::Url;

const ELLIPSIS: &str = "...";

/// Shortens the visible text of auto links.
///
/// An auto link is an anchor whose text equals its `href`, which is what
/// the renderer produces for a bare URL. Its text becomes a prefix of the
/// URL followed by `...`, bounded by `max` bytes. The prefix never gets
/// shorter than the scheme and authority of the URL, so the domain stays
/// visible. The `href` attribute is never modified, and neither are
/// anchors with hand written text.
///
/// Anchors whose `href` is not an absolute URL are skipped one by one.
/// If the HTML cannot be processed at all the input is returned as is.
///
/// # Arguments
///
/// * `html`: Rendered HTML fragment
/// * `max`: Maximum visible length of a shortened link, ellipsis included
///
/// # Returns
///
/// The body contents of the re-serialized fragment
pub fn shorten_auto_links(html: &str, max: usize) -> String {
    let document = kuchikiki::parse_html().one(html);

    let Ok(anchors) = document.select("a") else {
        log::debug!("anchor selector rejected, leaving links untouched");
        return html.to_string();
    };

    // Collect first: rewriting text nodes while the selector walks the
    // tree would disturb the traversal.
    let anchors: Vec<_> = anchors.collect();

    for anchor in anchors {
        let Some(href) = anchor
            .attributes
            .borrow()
            .get("href")
            .map(ToString::to_string)
        else {
            continue;
        };

        let node = anchor.as_node();
        if node.text_contents() != href {
            continue;
        }

        if let Some(label) = shortened_label(&href, max) {
            set_text(node, &label);
        }
    }

    match serialize_body(&document) {
        Some(out) => out,
        None => {
            log::debug!("failed to serialize shortened links, keeping original html");
            html.to_string()
        }
    }
}

/// Computes the shortened label for an auto link, if it needs one.
fn shortened_label(href: &str, max: usize) -> Option<String> {
    if max < ELLIPSIS.len() || href.len() < max.saturating_add(ELLIPSIS.len()) {
        return None;
    }

    let Some(host) = host_of(href) else {
        log::trace!("skipping auto link without parsable host: {}", href);
        return None;
    };

    let short = prefix(href, max - ELLIPSIS.len());
    let base = if short.len() < host.len() { host } else { short };

    Some(format!("{}{}", base, ELLIPSIS))
}

/// Returns the scheme and authority of `href`, as written.
///
/// The URL parser only decides whether `href` is an absolute URL with a
/// host; the returned slice keeps the original bytes (host case, explicit
/// default port, non-ASCII host). Relative references and opaque URLs
/// such as `mailto:` have no host and yield None.
fn host_of(href: &str) -> Option<&str> {
    let url = Url::parse(href).ok()?;
    url.host_str()?;

    let authority_start = href.find("://")? + "://".len();
    let authority_len = href[authority_start..]
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(href.len() - authority_start);

    if authority_len == 0 {
        return None;
    }
    Some(&href[..authority_start + authority_len])
}

/// Byte prefix of `text`, moved back to the nearest char boundary.
fn prefix(text: &str, len: usize) -> &str {
    let mut end = len.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Replaces all children of `node` with a single text node.
fn set_text(node: &NodeRef, text: &str) {
    let children: Vec<_> = node.children().collect();
    for child in children {
        child.detach();
    }
    node.append(NodeRef::new_text(text));
}

/// Serializes the children of `<body>`, without the body tag itself.
fn serialize_body(document: &NodeRef) -> Option<String> {
    let body = document.select_first("body").ok()?;

    let mut out = Vec::new();
    for child in body.as_node().children() {
        child.serialize(&mut out).ok()?;
    }

    String::from_utf8(out).ok()
}
