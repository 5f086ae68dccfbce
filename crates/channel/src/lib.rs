//! Channel seam for the AgriVision alert gateway.
//!
//! Defines the error taxonomy shared by every delivery channel, the
//! [`Delivery`] result type, and the object-safe [`EmailChannel`] and
//! [`SmsChannel`] traits implemented by the integration crates and stubbed
//! in dispatcher tests.

pub mod channel;
pub mod error;

pub use channel::{Delivery, EmailChannel, EmailRequest, SmsChannel};
pub use error::ChannelError;
