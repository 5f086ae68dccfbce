//! SMTP email channel for the AgriVision alert gateway.
//!
//! Implements [`EmailChannel`](agrivision_channel::EmailChannel) on top of
//! `lettre`, sending multipart messages (plain text + HTML) with optional
//! filesystem attachments over an authenticated STARTTLS session.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use agrivision_email::{EmailConfig, SmtpChannel};
//!
//! let config = EmailConfig::new("smtp.example.com", "alerts@example.com")
//!     .with_credentials("alerts@example.com", "app-password");
//! let channel = SmtpChannel::new(config).unwrap();
//! ```

pub mod config;
pub mod smtp;

pub use config::EmailConfig;
pub use smtp::SmtpChannel;
