// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::{LayerData, MarkerData, SphereData};
use crate::error::Error;
use crate::ui::notifications;
use crate::ui::{header, layer_grid, layer_viewer, marker_viewer, panorama, sidebar};
use iced::Size;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. Component messages are
/// forwarded as-is; page-level callbacks have their own variants.
#[derive(Debug, Clone)]
pub enum Message {
    LayersFetched(Result<Vec<LayerData>, Error>),
    SpheresFetched(Result<Vec<SphereData>, Error>),
    MarkersFetched(Result<Vec<MarkerData>, Error>),
    Header(header::Message),
    Sidebar(sidebar::Message),
    LayerGrid(layer_grid::Message),
    Panorama(panorama::Message),
    LayerEditor(layer_viewer::Message),
    MarkerEditor(marker_viewer::Message),
    Notification(notifications::NotificationMessage),
    ToggleSidebar,
    ClearSelection,
    CloseModal,
    WindowResized(Size),
    /// Periodic tick for notification expiry.
    Tick(Instant),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `ja`, `en-US`).
    pub lang: Option<String>,
    /// Catalog directory or base URL; overrides `[catalog] source`.
    pub catalog: Option<String>,
    /// Force the compact layout regardless of window width.
    pub compact: bool,
    /// Optional data directory override.
    /// Takes precedence over `PANOLENS_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PANOLENS_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
