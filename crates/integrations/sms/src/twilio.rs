use agrivision_channel::{ChannelError, Delivery, SmsChannel};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use crate::config::SmsConfig;
use crate::types::{TwilioApiResponse, TwilioSendMessageRequest};

/// SMS channel that delivers through the Twilio REST API.
///
/// One HTTP client is built at construction with the configured deadline;
/// each send is a single authenticated POST to the Messages endpoint.
pub struct TwilioChannel {
    config: SmsConfig,
    client: Client,
}

impl std::fmt::Debug for TwilioChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioChannel")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TwilioChannel {
    /// Create a new Twilio channel with the given configuration.
    pub fn new(config: SmsConfig) -> Result<Self, ChannelError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChannelError::NotConfigured(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Create a Twilio channel with a custom HTTP client (for testing or
    /// connection-pool sharing).
    pub fn with_client(config: SmsConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// The Messages API URL for this account.
    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url, self.config.account_sid
        )
    }

    async fn post_message(
        &self,
        request: &TwilioSendMessageRequest,
    ) -> Result<TwilioApiResponse, ChannelError> {
        let url = self.messages_url();

        debug!(to = %request.to, "sending SMS via Twilio");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Twilio API rate limit hit");
            return Err(ChannelError::Api("rate limited by carrier".to_owned()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Api(format!("HTTP {status}: {body}")));
        }

        let api_response: TwilioApiResponse =
            response.json().await.map_err(map_reqwest_error)?;

        if let Some(code) = api_response.error_code {
            let msg = api_response
                .error_message
                .unwrap_or_else(|| format!("error code {code}"));
            return Err(ChannelError::Api(msg));
        }

        Ok(api_response)
    }
}

#[async_trait]
impl SmsChannel for TwilioChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    #[instrument(skip(self, body), fields(channel = "sms"))]
    async fn send(&self, to: &str, body: &str) -> Result<Delivery, ChannelError> {
        // E.164 prefix check before any network I/O.
        if !to.starts_with('+') {
            return Err(ChannelError::InvalidRecipient(
                "phone number must start with '+' (E.164 format)".to_owned(),
            ));
        }

        let request = TwilioSendMessageRequest {
            to: to.to_owned(),
            from: self.config.from_number.clone(),
            body: body.to_owned(),
        };

        let api_response = self.post_message(&request).await.inspect_err(|e| {
            error!(error = %e, "SMS send failed");
        })?;

        info!(sid = api_response.sid.as_deref().unwrap_or("unknown"), "SMS sent via Twilio");

        let detail = match (&api_response.sid, &api_response.status) {
            (Some(sid), Some(status)) => format!("SMS {status} (SID {sid})"),
            (Some(sid), None) => format!("SMS sent (SID {sid})"),
            _ => "SMS sent".to_owned(),
        };

        Ok(Delivery {
            message_id: api_response.sid,
            detail,
        })
    }
}

/// Map a reqwest error to the channel error taxonomy.
fn map_reqwest_error(error: reqwest::Error) -> ChannelError {
    if error.is_timeout() {
        ChannelError::Timeout
    } else {
        ChannelError::Transport(error.to_string())
    }
}
