// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Catalog, engine and configuration failures are reported as short-lived
//! toasts in the bottom-right corner instead of blocking dialogs.
//!
//! - [`Notification`] carries a severity and an i18n key (plus arguments).
//! - [`Manager`] keeps at most three visible and queues the rest.
//! - [`Toast`] renders the visible ones.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
