use std::path::{Path, PathBuf};

use agrivision_channel::{ChannelError, Delivery, EmailChannel, EmailRequest};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error, info, instrument, warn};

use crate::config::EmailConfig;

/// SMTP email channel using `lettre`.
///
/// The transport is built once from the config; each send opens, uses, and
/// closes its own SMTP session, so nothing is shared or leaked across calls.
pub struct SmtpChannel {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpChannel")
            .field("config", &self.config)
            .field("transport", &"<AsyncSmtpTransport>")
            .finish()
    }
}

/// An attachment read into memory, ready to be mounted on the message.
struct LoadedAttachment {
    filename: String,
    content_type: ContentType,
    data: Vec<u8>,
}

impl SmtpChannel {
    /// Create a new `SmtpChannel` from the given configuration.
    pub fn new(config: EmailConfig) -> Result<Self, ChannelError> {
        let transport = build_transport(&config)?;
        Ok(Self { config, transport })
    }

    /// Create a `SmtpChannel` with a pre-built transport (for testing).
    pub fn with_transport(
        config: EmailConfig,
        transport: AsyncSmtpTransport<Tokio1Executor>,
    ) -> Self {
        Self { config, transport }
    }
}

#[async_trait]
impl EmailChannel for SmtpChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    #[instrument(skip(self, request), fields(to = %request.to, channel = "email"))]
    async fn send(&self, request: &EmailRequest) -> Result<Delivery, ChannelError> {
        let (attachments, skipped) = load_attachments(&request.attachments).await;

        debug!(subject = %request.subject, attachments = attachments.len(), "building SMTP message");
        let message = build_message(&self.config.from_address, request, attachments)?;

        info!(subject = %request.subject, "sending email via SMTP");
        self.transport.send(message).await.map_err(|e| {
            error!(error = %e, "SMTP send failed");
            map_smtp_error(&e)
        })?;

        info!("email sent successfully via SMTP");
        let detail = if skipped.is_empty() {
            "email sent".to_owned()
        } else {
            format!(
                "email sent ({} attachment(s) skipped: {})",
                skipped.len(),
                skipped.join(", ")
            )
        };
        Ok(Delivery {
            message_id: None,
            detail,
        })
    }
}

/// Read each attachment path, skipping (and naming) any that cannot be read.
async fn load_attachments(paths: &[PathBuf]) -> (Vec<LoadedAttachment>, Vec<String>) {
    let mut loaded = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let filename = display_name(path);
        match tokio::fs::read(path).await {
            Ok(data) => match ContentType::parse(mime_for(path)) {
                Ok(content_type) => loaded.push(LoadedAttachment {
                    filename,
                    content_type,
                    data,
                }),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping attachment with bad content type");
                    skipped.push(filename);
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable attachment");
                skipped.push(filename);
            }
        }
    }

    (loaded, skipped)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// MIME type guessed from the file extension.
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Assemble the `lettre::Message` for one request.
fn build_message(
    from_address: &str,
    request: &EmailRequest,
    attachments: Vec<LoadedAttachment>,
) -> Result<Message, ChannelError> {
    let from: Mailbox = from_address
        .parse()
        .map_err(|e| ChannelError::NotConfigured(format!("invalid sender address: {e}")))?;

    let to: Mailbox = request
        .to
        .parse()
        .map_err(|e| ChannelError::InvalidRecipient(format!("invalid email address: {e}")))?;

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(&request.subject);

    let body = match (&request.text_body, &request.html_body) {
        (Some(text), Some(html)) => MultiPart::alternative_plain_html(text.clone(), html.clone()),
        (Some(text), None) => MultiPart::alternative().singlepart(SinglePart::plain(text.clone())),
        (None, Some(html)) => MultiPart::alternative().singlepart(SinglePart::html(html.clone())),
        (None, None) => MultiPart::alternative().singlepart(SinglePart::plain(String::new())),
    };

    let content = if attachments.is_empty() {
        body
    } else {
        let mut mixed = MultiPart::mixed().multipart(body);
        for attachment in attachments {
            mixed = mixed.singlepart(
                Attachment::new(attachment.filename).body(attachment.data, attachment.content_type),
            );
        }
        mixed
    };

    builder
        .multipart(content)
        .map_err(|e| ChannelError::Api(format!("failed to build email: {e}")))
}

/// Build the async SMTP transport from the configuration.
fn build_transport(
    config: &EmailConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, ChannelError> {
    let builder = if config.tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| ChannelError::NotConfigured(format!("SMTP TLS relay error: {e}")))?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
    };

    let builder = builder
        .port(config.smtp_port)
        .timeout(Some(config.timeout));

    let builder = if let (Some(user), Some(pass)) = (&config.username, &config.password) {
        builder.credentials(Credentials::new(user.clone(), pass.clone()))
    } else {
        builder
    };

    Ok(builder.build())
}

/// Map a lettre SMTP error to the channel error taxonomy.
fn map_smtp_error(error: &lettre::transport::smtp::Error) -> ChannelError {
    let message = error.to_string();

    if error.is_transient() {
        ChannelError::Transport(format!("transient SMTP error: {message}"))
    } else if error.is_permanent() {
        ChannelError::Api(format!("permanent SMTP error: {message}"))
    } else {
        ChannelError::Transport(format!("SMTP error: {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig::new("localhost", "sender@example.com")
            .with_port(2525)
            .with_tls(false)
    }

    fn test_request() -> EmailRequest {
        EmailRequest {
            to: "recipient@example.com".to_owned(),
            subject: "Crop Health Alert: Leaf Rust".to_owned(),
            text_body: Some("CROP HEALTH ALERT: High Leaf Rust in North Field.".to_owned()),
            html_body: Some("<h2>AgriVision Crop Health Alert</h2>".to_owned()),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn build_message_multipart() {
        assert!(build_message("sender@example.com", &test_request(), Vec::new()).is_ok());
    }

    #[test]
    fn build_message_text_only() {
        let mut request = test_request();
        request.html_body = None;
        assert!(build_message("sender@example.com", &request, Vec::new()).is_ok());
    }

    #[test]
    fn build_message_html_only() {
        let mut request = test_request();
        request.text_body = None;
        assert!(build_message("sender@example.com", &request, Vec::new()).is_ok());
    }

    #[test]
    fn build_message_empty_bodies() {
        let mut request = test_request();
        request.text_body = None;
        request.html_body = None;
        assert!(build_message("sender@example.com", &request, Vec::new()).is_ok());
    }

    #[test]
    fn build_message_with_attachment() {
        let attachment = LoadedAttachment {
            filename: "ndvi.png".to_owned(),
            content_type: ContentType::parse("image/png").unwrap(),
            data: vec![0x89, 0x50, 0x4e, 0x47],
        };
        let result = build_message("sender@example.com", &test_request(), vec![attachment]);
        assert!(result.is_ok());
    }

    #[test]
    fn build_message_invalid_sender_is_configuration() {
        let err = build_message("not-valid", &test_request(), Vec::new()).unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured(_)));
    }

    #[test]
    fn build_message_invalid_recipient_is_validation() {
        let mut request = test_request();
        request.to = "not-valid".to_owned();
        let err = build_message("sender@example.com", &request, Vec::new()).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidRecipient(_)));
    }

    #[test]
    fn mime_guesses_by_extension() {
        assert_eq!(mime_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("report.pdf")), "application/pdf");
        assert_eq!(mime_for(Path::new("data.csv")), "text/csv");
        assert_eq!(mime_for(Path::new("weird.bin")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("no_extension")), "application/octet-stream");
    }

    #[tokio::test]
    async fn load_attachments_skips_missing_files() {
        let dir = std::env::temp_dir().join(format!("agrivision-email-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let readable = dir.join("usage.csv");
        std::fs::write(&readable, b"field,usage\nNorth,1200\n").unwrap();
        let missing = dir.join("missing.png");

        let (loaded, skipped) = load_attachments(&[readable, missing]).await;

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].filename, "usage.csv");
        assert_eq!(skipped, vec!["missing.png".to_owned()]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn transport_builds_without_tls() {
        assert!(build_transport(&test_config()).is_ok());
    }

    #[tokio::test]
    async fn transport_builds_with_credentials() {
        let config = test_config().with_credentials("user", "pass");
        assert!(build_transport(&config).is_ok());
    }

    #[tokio::test]
    async fn channel_name_and_debug() {
        let channel = SmtpChannel::new(test_config()).unwrap();
        assert_eq!(channel.name(), "email");
        assert!(format!("{channel:?}").contains("SmtpChannel"));
    }
}
