use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Twilio SMS channel.
///
/// Built once at startup and passed into
/// [`TwilioChannel::new`](crate::TwilioChannel::new).
#[derive(Clone)]
pub struct SmsConfig {
    /// Twilio Account SID used to authenticate API requests.
    pub account_sid: String,

    /// Twilio Auth Token used for HTTP Basic authentication.
    pub auth_token: String,

    /// Sender phone number in E.164 format.
    pub from_number: String,

    /// Base URL for the Twilio REST API. Override this for testing against
    /// a mock server.
    pub api_base_url: String,

    /// Per-request deadline. Defaults to 30 seconds.
    pub timeout: Duration,
}

impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("from_number", &self.from_number)
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SmsConfig {
    /// Create a new configuration with the given credentials and sender
    /// number, pointed at the default Twilio API base URL.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API base URL (useful for testing).
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the per-request deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a config from the process environment.
    ///
    /// Reads `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, and
    /// `TWILIO_PHONE_NUMBER`, all required. Returns `None` when any is
    /// absent, which disables the SMS channel without being fatal.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the injectable core of
    /// [`from_env`](Self::from_env), used by tests).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let account_sid = get("TWILIO_ACCOUNT_SID")?;
        let auth_token = get("TWILIO_AUTH_TOKEN")?;
        let from_number = get("TWILIO_PHONE_NUMBER")?;
        Some(Self::new(account_sid, auth_token, from_number))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_api_base_url() {
        let config = SmsConfig::new("AC123", "token", "+15551234567");
        assert_eq!(config.api_base_url, "https://api.twilio.com");
        assert_eq!(config.from_number, "+15551234567");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn with_custom_api_base_url() {
        let config = SmsConfig::new("AC123", "token", "+15551234567")
            .with_api_base_url("http://localhost:9999");
        assert_eq!(config.api_base_url, "http://localhost:9999");
    }

    #[test]
    fn from_lookup_requires_all_three_variables() {
        assert!(SmsConfig::from_lookup(lookup(&[])).is_none());
        assert!(
            SmsConfig::from_lookup(lookup(&[
                ("TWILIO_ACCOUNT_SID", "AC123"),
                ("TWILIO_AUTH_TOKEN", "token"),
            ]))
            .is_none(),
            "phone number missing"
        );

        let config = SmsConfig::from_lookup(lookup(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "token"),
            ("TWILIO_PHONE_NUMBER", "+15551234567"),
        ]))
        .unwrap();
        assert_eq!(config.account_sid, "AC123");
        assert_eq!(config.from_number, "+15551234567");
    }

    #[test]
    fn debug_redacts_auth_token() {
        let config = SmsConfig::new("AC123", "secret-token-value", "+15551234567");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"), "auth_token must be redacted");
        assert!(!debug.contains("secret-token-value"));
        assert!(debug.contains("AC123"));
    }
}
