//! Alert fan-out for the AgriVision alert gateway.
//!
//! [`AlertDispatcher`] is the single boundary the rest of the application
//! calls into: it renders one payload per alert, delivers it over whichever
//! channels have recipient data present, and aggregates per-channel
//! outcomes into a [`DispatchResult`]. It never returns an error — every
//! failure mode is folded into the result so callers can render it
//! directly.
//!
//! ```rust,no_run
//! use agrivision_dispatch::AlertDispatcher;
//! use agrivision_core::{Alert, CropHealthAlert, Recipient};
//!
//! # async fn example() {
//! let dispatcher = AlertDispatcher::from_env();
//! let alert = Alert::CropHealth(CropHealthAlert {
//!     issue_type: Some("Leaf Rust".to_owned()),
//!     ..CropHealthAlert::default()
//! });
//! let result = dispatcher
//!     .dispatch(&alert, &Recipient::new("grower@example.com", "+923001234567"))
//!     .await;
//! println!("email: {:?}, sms: {:?}", result.email, result.sms);
//! # }
//! ```

pub mod dispatcher;

pub use dispatcher::AlertDispatcher;

// Re-exported so callers can depend on this crate alone.
pub use agrivision_core::{Alert, AlertPayload, ChannelStatus, DispatchResult, Recipient};
