//! Markdown rendering for comment text.
//!
//! This module renders comments with comrak using GFM extensions (tables,
//! strikethrough, autolinks, task lists), repairs known entity artifacts
//! left by the renderer, and shortens the visible text of auto links.

mod entities;
mod links;
mod renderer;

pub use entities::unescape;
pub use links::shorten_auto_links;
pub use renderer::MarkdownRenderer;
