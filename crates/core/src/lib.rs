//! Core types for the AgriVision alert gateway.
//!
//! This crate defines the alert domain model (one typed record per alert
//! category), the recipient and per-channel outcome types, and the payload
//! renderer that turns an [`Alert`] into a subject line, an SMS-sized text
//! body, and an HTML email body.
//!
//! Everything here is pure data: no I/O, no channel logic. Delivery lives in
//! the integration crates and is orchestrated by `agrivision-dispatch`.

pub mod alert;
pub mod payload;
pub mod recipient;
pub mod result;

pub use alert::{
    Alert, AlertCategory, CropHealthAlert, ResourceAlert, WeatherAlert, YieldAlert,
};
pub use payload::{AlertPayload, PLACEHOLDER, SMS_MAX_CHARS, render};
pub use recipient::Recipient;
pub use result::{ChannelStatus, DispatchResult};
