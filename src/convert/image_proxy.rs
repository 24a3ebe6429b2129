//! Image proxy rewriting for rendered comments.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use super::Converter;

/// Routes comment images through the host's image proxy endpoint.
///
/// Transforms `<img src="http://...">` into
/// `<img src="{base_url}/api/v1/img?src={base64url(original)}">` so that
/// insecure images are served over the host's own origin. Secure
/// (`https://`) images are proxied only when [`ImageProxy::proxy_all`]
/// is enabled. Relative, `data:` and already proxied sources stay
/// unchanged.
#[derive(Debug, Clone)]
pub struct ImageProxy {
    base_url: String,
    proxy_all: bool,
}

impl ImageProxy {
    /// Proxy endpoint path appended to the base URL.
    pub const ROUTE: &'static str = "/api/v1/img";

    /// Creates proxy converter for the given site base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url`: Public URL of the comment host, trailing slash optional
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            proxy_all: false,
        }
    }

    /// Also proxies `https://` images, e.g. to cache external content.
    pub fn proxy_all(mut self, enabled: bool) -> Self {
        self.proxy_all = enabled;
        self
    }

    /// Resolves an image source to its proxied URL.
    ///
    /// # Arguments
    ///
    /// * `src`: Attribute value as written in the HTML, entities included
    ///
    /// # Returns
    ///
    /// Proxied URL, or None when the source must stay unchanged
    pub fn resolve(&self, src: &str) -> Option<String> {
        if self.is_own(src) {
            return None;
        }

        let proxied = src.starts_with("http://") || (self.proxy_all && src.starts_with("https://"));
        if !proxied {
            return None;
        }

        // The proxy fetches the real URL, not its HTML-escaped form
        let original = src.replace("&amp;", "&");
        let encoded = URL_SAFE.encode(original.as_bytes());

        Some(format!("{}{}?src={}", self.base_url, Self::ROUTE, encoded))
    }

    /// Returns true when `src` points at the base URL itself, not at a
    /// host that merely starts with the same characters.
    fn is_own(&self, src: &str) -> bool {
        src.strip_prefix(self.base_url.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
    }
}

impl Converter for ImageProxy {
    /// Rewrites the `src` attribute of every `<img>` tag.
    fn convert(&self, html: &str) -> String {
        const TAG: &str = "<img ";
        const ATTR: &str = "src=\"";

        let mut result = String::with_capacity(html.len());
        let mut pos = 0;

        while let Some(offset) = html[pos..].find(TAG) {
            let tag_start = pos + offset;
            let Some(tag_len) = html[tag_start..].find('>') else {
                break;
            };
            let tag_end = tag_start + tag_len;

            // Copy everything before this tag
            result.push_str(&html[pos..tag_start]);

            let attr_start = match html[tag_start..tag_end].find(ATTR) {
                Some(p) => tag_start + p + ATTR.len(),
                None => {
                    result.push_str(&html[tag_start..tag_end]);
                    pos = tag_end;
                    continue;
                }
            };

            let attr_end = match html[attr_start..tag_end].find('"') {
                Some(p) => attr_start + p,
                None => {
                    result.push_str(&html[tag_start..tag_end]);
                    pos = tag_end;
                    continue;
                }
            };

            let src = &html[attr_start..attr_end];

            result.push_str(&html[tag_start..attr_start]);
            match self.resolve(src) {
                Some(proxied) => result.push_str(&proxied),
                None => result.push_str(src),
            }

            pos = attr_end;
        }

        result.push_str(&html[pos..]);
        result
    }
}
