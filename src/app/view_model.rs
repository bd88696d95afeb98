// SPDX-License-Identifier: MPL-2.0
//! Page view-model.
//!
//! Derives everything the page template branches on from the store and
//! the window width. [`PageLayout`] is the resulting composition plan; the
//! view renders it without further decisions.

use crate::domain::{ActiveModal, SphereId, ViewMode};
use crate::store::Store;
use crate::ui::controls::{overlay_controls_for, OverlayControl};
use crate::ui::header::HeaderVariant;

/// Whether the window is wide enough for the desktop layout.
#[must_use]
pub fn is_desktop(window_width: f32, desktop_min_width: f32, force_compact: bool) -> bool {
    !force_compact && window_width >= desktop_min_width
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageViewModel<'a> {
    pub is_desktop: bool,
    pub is_sidebar_open: bool,
    pub active_modal: ActiveModal,
    pub selected_sphere_id: Option<&'a SphereId>,
    pub view_mode: ViewMode,
}

impl<'a> PageViewModel<'a> {
    #[must_use]
    pub fn derive(store: &'a Store, is_desktop: bool) -> Self {
        Self {
            is_desktop,
            is_sidebar_open: store.is_sidebar_open(),
            active_modal: store.active_modal(),
            selected_sphere_id: store.selected_sphere_id(),
            view_mode: store.view_mode(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> PageLayout {
        PageLayout {
            header: HeaderVariant::from_is_desktop(self.is_desktop),
            sidebar: self.is_desktop && self.is_sidebar_open,
            main: match self.view_mode {
                ViewMode::Grid => MainContent::LayerGrid,
                ViewMode::Viewer => MainContent::Panorama,
            },
            overlay_controls: overlay_controls_for(self.is_desktop),
            modal: ModalContent::for_modal(self.active_modal),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainContent {
    LayerGrid,
    /// The viewer, with the overlay controls in its slot.
    Panorama,
}

/// Body of the single visible modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalContent {
    LayerViewer,
    MarkerViewer,
}

impl ModalContent {
    #[must_use]
    pub fn for_modal(modal: ActiveModal) -> Option<Self> {
        match modal {
            ActiveModal::None => None,
            ActiveModal::Layer => Some(ModalContent::LayerViewer),
            ActiveModal::Marker => Some(ModalContent::MarkerViewer),
        }
    }
}

/// Composition plan for one frame of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub header: HeaderVariant,
    pub sidebar: bool,
    pub main: MainContent,
    pub overlay_controls: &'static [OverlayControl],
    pub modal: Option<ModalContent>,
}
