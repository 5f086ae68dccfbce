use thiserror::Error;

/// Errors that can occur while delivering over a channel.
///
/// Every variant is caught at the dispatcher boundary and converted into a
/// per-channel failure message; none of them propagate further up.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The channel is missing required credentials or settings.
    #[error("channel not configured: {0}")]
    NotConfigured(String),

    /// The recipient address is malformed; no I/O was attempted.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    /// A network or connection-level failure during the send.
    #[error("connection error: {0}")]
    Transport(String),

    /// The remote service rejected the send (authentication, quota,
    /// invalid destination).
    #[error("API error: {0}")]
    Api(String),

    /// The transport did not respond within the configured deadline.
    #[error("timeout")]
    Timeout,
}

impl ChannelError {
    /// Returns `true` if a later attempt may succeed without any change to
    /// configuration or recipient data. The dispatcher performs no retries;
    /// this informs the caller's decision to offer one.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}
