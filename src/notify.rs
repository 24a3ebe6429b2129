//! Reply notifications carrying formatted comment HTML.
//!
//! Delivery transports (Mailgun, SendGrid, SMTP) live outside this crate;
//! they plug in through the [`Sender`] trait.

use thiserror::Error;

use crate::formatter::{Comment, CommentFormatter};

/// Errors reported by notification delivery.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("invalid destination address: {0:?}")]
    InvalidAddress(String),

    #[error("{sender} failed to deliver notification: {reason}")]
    Delivery { sender: String, reason: String },
}

/// Transport that delivers an HTML body to a destination address.
pub trait Sender: Send + Sync {
    /// Short transport name used in logs.
    fn name(&self) -> &str;

    /// Delivers `html` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] describing why delivery failed
    fn send(&self, to: &str, html: &str) -> Result<(), SendError>;
}

/// Formats reply comments and hands them to a [`Sender`].
#[derive(Debug)]
pub struct ReplyNotifier<S> {
    formatter: CommentFormatter,
    sender: S,
}

impl<S: Sender> ReplyNotifier<S> {
    /// Creates notifier formatting replies with `formatter` and delivering
    /// them through `sender`.
    pub fn new(formatter: CommentFormatter, sender: S) -> Self {
        Self { formatter, sender }
    }

    /// Sends the formatted reply to `to`.
    ///
    /// A reply that cannot be rendered is still delivered, as escaped
    /// plain text.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::InvalidAddress`] for addresses without a local
    /// part and a domain, or the sender's own error
    pub fn notify(&self, to: &str, reply: &Comment) -> Result<(), SendError> {
        if !is_plausible_address(to) {
            return Err(SendError::InvalidAddress(to.to_string()));
        }

        let html = self.formatter.format_or_escape(&reply.text);
        log::debug!(
            "sending reply {} via {} to {}",
            reply.id,
            self.sender.name(),
            to
        );
        self.sender.send(to, &html)
    }
}

fn is_plausible_address(to: &str) -> bool {
    match to.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
