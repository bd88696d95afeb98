// SPDX-License-Identifier: MPL-2.0
//! Domain layer - catalog entities and view value objects.
//!
//! These types carry no UI toolkit dependency. Catalog entities derive
//! `serde` traits because they are decoded straight from catalog payloads.
//!
//! # Modules
//!
//! - [`ids`]: Identifier newtypes ([`LayerId`](ids::LayerId), [`SphereId`](ids::SphereId),
//!   [`MarkerId`](ids::MarkerId))
//! - [`entities`]: Catalog records ([`LayerData`](entities::LayerData),
//!   [`SphereData`](entities::SphereData), [`MarkerData`](entities::MarkerData))
//! - [`orientation`]: Camera [`Orientation`](orientation::Orientation) in degrees
//! - [`view`]: Page state enumerations ([`ActiveModal`](view::ActiveModal),
//!   [`ViewMode`](view::ViewMode))

pub mod entities;
pub mod ids;
pub mod orientation;
pub mod view;

pub use entities::{LayerData, MapPoint, MarkerData, SphereData};
pub use ids::{LayerId, MarkerId, SphereId};
pub use orientation::{Orientation, Position};
pub use view::{ActiveModal, ViewMode};
