// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! one exposes a `view` over borrowed state and, when it has local state, an
//! `update` that turns its messages into events for the application.
//!
//! # Page parts
//!
//! - [`header`] - Title bar, compact layer drawer, settings menu
//! - [`sidebar`] - Layer / sphere / marker tree
//! - [`layer_grid`] - Layer tiles shown while browsing
//! - [`panorama`] - The 360° viewer and its overlays
//! - [`controls`] - Buttons injected into the viewer's overlay slot
//! - [`modal`] - Modal host, with [`layer_viewer`] and [`marker_viewer`] bodies
//! - [`notifications`] - Toasts
//!
//! # Shared
//!
//! - [`design_tokens`] - Colors, spacing, sizes
//! - [`styles`] - Widget style functions
//! - [`theming`] - Light / dark / system theme mode

pub mod controls;
pub mod design_tokens;
pub mod header;
pub mod layer_grid;
pub mod layer_viewer;
pub mod marker_viewer;
pub mod modal;
pub mod notifications;
pub mod panorama;
pub mod sidebar;
pub mod styles;
pub mod theming;
