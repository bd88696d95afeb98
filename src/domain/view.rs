// SPDX-License-Identifier: MPL-2.0
//! Page-level state enumerations.

/// The single dialog presented over the main content, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveModal {
    #[default]
    None,
    Layer,
    Marker,
}

impl ActiveModal {
    /// All values, used to check exclusivity exhaustively.
    pub const ALL: [ActiveModal; 3] = [ActiveModal::None, ActiveModal::Layer, ActiveModal::Marker];

    #[must_use]
    pub fn is_open(self) -> bool {
        self != ActiveModal::None
    }
}

/// Whether the page is browsing layers or viewing a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Layer tile grid (no sphere selected).
    #[default]
    Grid,
    /// Immersive panorama viewer.
    Viewer,
}

impl ViewMode {
    /// Derives the mode from the sphere selection. This is the only input.
    #[must_use]
    pub fn from_selection<T>(selected_sphere: Option<&T>) -> Self {
        if selected_sphere.is_some() {
            ViewMode::Viewer
        } else {
            ViewMode::Grid
        }
    }
}
