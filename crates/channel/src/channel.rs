use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ChannelError;

/// A single email to deliver.
#[derive(Debug, Clone)]
pub struct EmailRequest {
    /// Recipient email address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Optional plain-text body; combined with `html_body` into a multipart
    /// message when both are present.
    pub text_body: Option<String>,
    /// Optional HTML body.
    pub html_body: Option<String>,
    /// Ordered list of local file paths to attach. Unreadable paths are
    /// skipped and noted in the delivery detail, never fatal.
    pub attachments: Vec<PathBuf>,
}

/// Result of an accepted send.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Transport-assigned message identifier, when one exists (e.g. the
    /// carrier SID for SMS).
    pub message_id: Option<String>,
    /// Human-readable status detail, rendered directly to the caller.
    pub detail: String,
}

/// An email delivery channel.
///
/// Implementations own their transport and scope any network session to a
/// single `send` call. A failed send must surface as a [`ChannelError`],
/// never a panic.
#[async_trait]
pub trait EmailChannel: Send + Sync {
    /// Unique channel name, used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one email.
    async fn send(&self, request: &EmailRequest) -> Result<Delivery, ChannelError>;
}

/// A short-text (SMS) delivery channel.
#[async_trait]
pub trait SmsChannel: Send + Sync {
    /// Unique channel name, used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one text message to an E.164 phone number. Implementations
    /// validate the number before any network I/O.
    async fn send(&self, to: &str, body: &str) -> Result<Delivery, ChannelError>;
}
