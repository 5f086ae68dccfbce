//! Carrier SMS channel for the AgriVision alert gateway.
//!
//! Implements [`SmsChannel`](agrivision_channel::SmsChannel) on top of the
//! [Twilio REST API](https://www.twilio.com/docs/sms/api/message-resource).
//! Recipient numbers are prefix-validated against E.164 before any network
//! I/O is attempted.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use agrivision_sms::{SmsConfig, TwilioChannel};
//!
//! let config = SmsConfig::new("ACXXXXXXXX", "auth_token", "+15551234567");
//! let channel = TwilioChannel::new(config).unwrap();
//! ```

pub mod config;
pub mod twilio;
pub mod types;

pub use config::SmsConfig;
pub use twilio::TwilioChannel;
pub use types::{TwilioApiResponse, TwilioSendMessageRequest};
