use std::path::PathBuf;

use agrivision_channel::{EmailChannel, EmailRequest, SmsChannel};
use agrivision_core::{Alert, AlertPayload, ChannelStatus, DispatchResult, Recipient, render};
use agrivision_email::{EmailConfig, SmtpChannel};
use agrivision_sms::{SmsConfig, TwilioChannel};
use tracing::{info, instrument, warn};

/// Fans one alert out over the configured channels.
///
/// Each channel slot is optional: a channel missing its configuration is
/// simply absent, and dispatches report it as skipped rather than failing.
/// Dispatch is stateless; concurrent calls share nothing mutable.
pub struct AlertDispatcher {
    email: Option<Box<dyn EmailChannel>>,
    sms: Option<Box<dyn SmsChannel>>,
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDispatcher")
            .field("email", &self.email.as_ref().map(|c| c.name()))
            .field("sms", &self.sms.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Default for AlertDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertDispatcher {
    /// A dispatcher with no channels; every dispatch reports both slots as
    /// skipped.
    pub fn new() -> Self {
        Self {
            email: None,
            sms: None,
        }
    }

    /// Attach an email channel.
    #[must_use]
    pub fn with_email(mut self, channel: impl EmailChannel + 'static) -> Self {
        self.email = Some(Box::new(channel));
        self
    }

    /// Attach an SMS channel.
    #[must_use]
    pub fn with_sms(mut self, channel: impl SmsChannel + 'static) -> Self {
        self.sms = Some(Box::new(channel));
        self
    }

    /// Wire both channels from the process environment.
    ///
    /// A channel whose environment variables are absent, or whose transport
    /// cannot be built, is left unconfigured with a log line; this is never
    /// fatal.
    pub fn from_env() -> Self {
        let mut dispatcher = Self::new();

        match EmailConfig::from_env() {
            Some(config) => match SmtpChannel::new(config) {
                Ok(channel) => dispatcher.email = Some(Box::new(channel)),
                Err(e) => warn!(error = %e, "email channel disabled: transport build failed"),
            },
            None => info!("email channel not configured (EMAIL_SENDER/EMAIL_PASSWORD unset)"),
        }

        match SmsConfig::from_env() {
            Some(config) => match TwilioChannel::new(config) {
                Ok(channel) => dispatcher.sms = Some(Box::new(channel)),
                Err(e) => warn!(error = %e, "sms channel disabled: client build failed"),
            },
            None => info!("sms channel not configured (TWILIO_* unset)"),
        }

        dispatcher
    }

    /// Dispatch one alert to the recipient over all applicable channels.
    pub async fn dispatch(&self, alert: &Alert, recipient: &Recipient) -> DispatchResult {
        self.dispatch_with_attachments(alert, &[], recipient).await
    }

    /// Dispatch one alert, attaching the given files to the email channel.
    ///
    /// The payload is rendered once and shared by both channels, so they
    /// always describe the same event. Channels are attempted sequentially
    /// (email, then SMS) and independently: a failure in one never alters
    /// the other's attempt.
    #[instrument(skip_all, fields(category = %alert.category()))]
    pub async fn dispatch_with_attachments(
        &self,
        alert: &Alert,
        attachments: &[PathBuf],
        recipient: &Recipient,
    ) -> DispatchResult {
        let payload = render(alert);

        let email = self.email_slot(&payload, attachments, recipient).await;
        let sms = self.sms_slot(&payload, recipient).await;

        info!(
            email_ok = email.ok(),
            sms_ok = sms.ok(),
            "alert dispatch complete"
        );

        DispatchResult { email, sms }
    }

    async fn email_slot(
        &self,
        payload: &AlertPayload,
        attachments: &[PathBuf],
        recipient: &Recipient,
    ) -> ChannelStatus {
        let Some(to) = recipient.email.as_deref() else {
            return ChannelStatus::skipped("no recipient email address");
        };
        let Some(channel) = self.email.as_deref() else {
            return ChannelStatus::skipped("email channel not configured");
        };

        let request = EmailRequest {
            to: to.to_owned(),
            subject: payload.subject.clone(),
            text_body: Some(payload.text_body.clone()),
            html_body: Some(payload.html_body.clone()),
            attachments: attachments.to_vec(),
        };

        match channel.send(&request).await {
            Ok(delivery) => ChannelStatus::Sent {
                message: delivery.detail,
            },
            Err(e) => {
                warn!(error = %e, "email channel failed");
                ChannelStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn sms_slot(&self, payload: &AlertPayload, recipient: &Recipient) -> ChannelStatus {
        let Some(to) = recipient.phone.as_deref() else {
            return ChannelStatus::skipped("no recipient phone number");
        };
        let Some(channel) = self.sms.as_deref() else {
            return ChannelStatus::skipped("sms channel not configured");
        };

        match channel.send(to, &payload.text_body).await {
            Ok(delivery) => ChannelStatus::Sent {
                message: delivery.detail,
            },
            Err(e) => {
                warn!(error = %e, "sms channel failed");
                ChannelStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
