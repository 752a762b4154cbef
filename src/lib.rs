#![deny(warnings)]
#![deny(clippy::dbg_macro)]

//! Delivery of alert notifications to team chat services.
//!
//! A [`Notifier`] takes a batch of alerts, logs in to the configured backend
//! for a short-lived session credential, renders the batch into a chat
//! message and posts it to the destination channel. Supported backends live
//! in [`backends`].

mod alert;
pub mod backends;
mod error;
mod notifier;
mod render;

pub use alert::{Alert, AlertBuilder, AlertStatus};
pub use backends::ChatBackend;
pub use error::{AuthError, DispatchError, NotifyError};
pub use notifier::{Notifier, Outcome};
pub use render::render_message;
