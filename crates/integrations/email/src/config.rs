use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP email channel configuration.
///
/// Built once at startup and passed into
/// [`SmtpChannel::new`](crate::SmtpChannel::new); the channel never reads
/// the environment mid-send.
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// The `From` address used in outgoing emails.
    pub from_address: String,

    /// SMTP server hostname.
    pub smtp_host: String,

    /// SMTP server port. Defaults to 587 (STARTTLS submission port).
    pub smtp_port: u16,

    /// Optional SMTP username for authentication.
    pub username: Option<String>,

    /// Optional SMTP password for authentication.
    pub password: Option<String>,

    /// Whether to use STARTTLS. Defaults to `true`.
    pub tls: bool,

    /// Per-send transport deadline. Defaults to 30 seconds.
    pub timeout: Duration,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("from_address", &self.from_address)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EmailConfig {
    /// Create a new config with the given SMTP host and sender address.
    pub fn new(smtp_host: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            smtp_host: smtp_host.into(),
            smtp_port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            tls: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set SMTP authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Override the default SMTP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.smtp_port = port;
        self
    }

    /// Set whether STARTTLS should be used.
    #[must_use]
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Override the per-send transport deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a config from the process environment.
    ///
    /// Reads `EMAIL_SENDER`, `EMAIL_PASSWORD`, `SMTP_SERVER` (default
    /// `smtp.gmail.com`), and `SMTP_PORT` (default 587). Returns `None` when
    /// either credential variable is absent, which disables the email
    /// channel without being fatal. An unparseable `SMTP_PORT` degrades to
    /// the default port with a warning.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the injectable core of
    /// [`from_env`](Self::from_env), used by tests).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let sender = get("EMAIL_SENDER")?;
        let password = get("EMAIL_PASSWORD")?;
        let host = get("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_owned());
        let port = match get("SMTP_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "unparseable SMTP_PORT, using default");
                DEFAULT_SMTP_PORT
            }),
            None => DEFAULT_SMTP_PORT,
        };

        Some(
            Self::new(host, sender.clone())
                .with_credentials(sender, password)
                .with_port(port),
        )
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SMTP_HOST, "noreply@localhost")
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
    fn default_config_has_sensible_values() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 587);
        assert!(config.tls);
        assert!(config.username.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn from_lookup_requires_both_credentials() {
        assert!(EmailConfig::from_lookup(lookup(&[])).is_none());
        assert!(
            EmailConfig::from_lookup(lookup(&[("EMAIL_SENDER", "a@b.com")])).is_none(),
            "password missing"
        );
        assert!(
            EmailConfig::from_lookup(lookup(&[("EMAIL_PASSWORD", "pw")])).is_none(),
            "sender missing"
        );
    }

    #[test]
    fn from_lookup_full_environment() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("EMAIL_SENDER", "alerts@farm.example"),
            ("EMAIL_PASSWORD", "pw"),
            ("SMTP_SERVER", "mail.farm.example"),
            ("SMTP_PORT", "2525"),
        ]))
        .unwrap();
        assert_eq!(config.from_address, "alerts@farm.example");
        assert_eq!(config.username.as_deref(), Some("alerts@farm.example"));
        assert_eq!(config.password.as_deref(), Some("pw"));
        assert_eq!(config.smtp_host, "mail.farm.example");
        assert_eq!(config.smtp_port, 2525);
    }

    #[test]
    fn from_lookup_defaults_host_and_port() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("EMAIL_SENDER", "a@b.com"),
            ("EMAIL_PASSWORD", "pw"),
        ]))
        .unwrap();
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 587);
    }

    #[test]
    fn from_lookup_bad_port_falls_back() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("EMAIL_SENDER", "a@b.com"),
            ("EMAIL_PASSWORD", "pw"),
            ("SMTP_PORT", "not-a-port"),
        ]))
        .unwrap();
        assert_eq!(config.smtp_port, 587);
    }

    #[test]
    fn debug_redacts_password() {
        let config =
            EmailConfig::new("smtp.example.com", "a@b.com").with_credentials("a@b.com", "s3cret");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"), "password must be redacted");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("smtp.example.com"));
    }
}
