//! Shared test utilities for integration tests.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Renders the anchor markup produced for an auto link.
pub fn auto_link(url: &str) -> String {
    anchor(url, url)
}

/// Renders anchor markup with explicit text.
pub fn anchor(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", href, text)
}

/// Writes markdown content into `dir` and returns the file path.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_markdown(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}
