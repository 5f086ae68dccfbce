use serde::{Deserialize, Serialize};

/// Outcome of a single channel within one dispatch.
///
/// `Skipped` distinguishes "nothing to do" (no recipient address, channel
/// not configured) from an attempted send that failed. Callers render the
/// contained message directly; there is no further error to unwrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChannelStatus {
    /// The send was attempted and accepted by the transport.
    Sent { message: String },
    /// The send was attempted and failed; `message` carries the reason.
    Failed { message: String },
    /// The channel was not attempted; `reason` says why.
    Skipped { reason: String },
}

impl ChannelStatus {
    /// Build a skipped status from a reason string.
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    /// `true` only for a successful send.
    pub fn ok(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    /// `true` when a send was actually attempted (sent or failed).
    pub fn attempted(&self) -> bool {
        !matches!(self, Self::Skipped { .. })
    }

    /// The human-readable message or skip reason.
    pub fn message(&self) -> &str {
        match self {
            Self::Sent { message } | Self::Failed { message } => message,
            Self::Skipped { reason } => reason,
        }
    }
}

/// Aggregated outcome of one dispatch across both channels.
///
/// There is deliberately no collapsed overall flag: the two channels have
/// independent failure modes and the caller reports them separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    pub email: ChannelStatus,
    pub sms: ChannelStatus,
}

impl DispatchResult {
    /// `true` if at least one channel delivered.
    pub fn any_sent(&self) -> bool {
        self.email.ok() || self.sms.ok()
    }

    /// `true` if no send was attempted on either channel.
    pub fn nothing_attempted(&self) -> bool {
        !self.email.attempted() && !self.sms.attempted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_predicates() {
        let sent = ChannelStatus::Sent {
            message: "ok".to_owned(),
        };
        let failed = ChannelStatus::Failed {
            message: "smtp down".to_owned(),
        };
        let skipped = ChannelStatus::skipped("no recipient");

        assert!(sent.ok() && sent.attempted());
        assert!(!failed.ok() && failed.attempted());
        assert!(!skipped.ok() && !skipped.attempted());
        assert_eq!(skipped.message(), "no recipient");
    }

    #[test]
    fn result_aggregates_without_collapsing() {
        let result = DispatchResult {
            email: ChannelStatus::Failed {
                message: "timeout".to_owned(),
            },
            sms: ChannelStatus::Sent {
                message: "SID SM123".to_owned(),
            },
        };
        assert!(result.any_sent());
        assert!(!result.nothing_attempted());
        assert!(!result.email.ok());
        assert!(result.sms.ok());
    }

    #[test]
    fn result_serializes_with_state_tags() {
        let result = DispatchResult {
            email: ChannelStatus::skipped("email channel not configured"),
            sms: ChannelStatus::Sent {
                message: "accepted".to_owned(),
            },
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"state\":\"skipped\""));
        assert!(json.contains("\"state\":\"sent\""));
    }
}
