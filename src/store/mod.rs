// SPDX-License-Identifier: MPL-2.0
//! Viewer state store.
//!
//! Holds the catalog lists, the current selection and the page flags.
//! Components read through the selectors; every mutation goes through
//! [`Store::dispatch`] with an [`Action`], which keeps the selection
//! consistent:
//!
//! - selecting a sphere selects its layer
//! - selecting a marker selects its sphere and layer
//! - switching to another sphere drops a marker that belongs elsewhere
//! - replacing the lists drops selections that no longer resolve
//!
//! The layer list is shared behind an `Arc` and tagged with a
//! [`LayersRevision`] that changes whenever the list is replaced or edited.
//! The panorama viewer rebuilds its engine when the revision changes.

use crate::domain::{
    ActiveModal, LayerData, LayerId, MarkerData, MarkerId, SphereData, SphereId, ViewMode,
};
use std::sync::Arc;

/// Identity of the current layer collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayersRevision(u64);

impl LayersRevision {
    fn bump(&mut self) {
        self.0 += 1;
    }
}

/// Mutations accepted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLayers(Vec<LayerData>),
    SetSpheres(Vec<SphereData>),
    SetMarkers(Vec<MarkerData>),
    /// Selects a layer and its first sphere.
    SelectLayer(LayerId),
    SelectSphere(SphereId),
    SelectMarker(MarkerId),
    HoverMarker(Option<MarkerId>),
    ClearSelection,
    ToggleSidebar,
    SetSidebarOpen(bool),
    OpenModal(ActiveModal),
    CloseModal,
    UpdateLayer {
        id: LayerId,
        name: String,
        description: String,
    },
    UpdateMarker {
        id: MarkerId,
        name: String,
        description: String,
        image_url: Option<String>,
    },
}

/// Which lists have been delivered at least once.
#[derive(Debug, Clone, Copy, Default)]
struct Loaded {
    layers: bool,
    spheres: bool,
    markers: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    layers: Arc<Vec<LayerData>>,
    layers_revision: LayersRevision,
    spheres: Vec<SphereData>,
    markers: Vec<MarkerData>,
    loaded: Loaded,
    selected_layer_id: Option<LayerId>,
    selected_sphere_id: Option<SphereId>,
    selected_marker_id: Option<MarkerId>,
    hovered_marker_id: Option<MarkerId>,
    is_sidebar_open: bool,
    active_modal: ActiveModal,
}

impl Store {
    #[must_use]
    pub fn new(is_sidebar_open: bool) -> Self {
        Self {
            is_sidebar_open,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetLayers(layers) => {
                self.layers = Arc::new(layers);
                self.layers_revision.bump();
                self.loaded.layers = true;
                self.prune_selection();
            }
            Action::SetSpheres(spheres) => {
                self.spheres = spheres;
                self.loaded.spheres = true;
                self.prune_selection();
            }
            Action::SetMarkers(markers) => {
                self.markers = markers;
                self.loaded.markers = true;
                self.prune_selection();
            }
            Action::SelectLayer(id) => {
                if self.layer(&id).is_none() {
                    return;
                }
                self.selected_sphere_id = self
                    .spheres
                    .iter()
                    .find(|sphere| sphere.layer_id == id)
                    .map(|sphere| sphere.id.clone());
                self.selected_layer_id = Some(id);
                self.selected_marker_id = None;
                self.hovered_marker_id = None;
            }
            Action::SelectSphere(id) => {
                let Some(layer_id) = self.sphere(&id).map(|sphere| sphere.layer_id.clone()) else {
                    return;
                };
                let marker_elsewhere = self
                    .selected_marker()
                    .is_some_and(|marker| marker.sphere_id != id);
                if marker_elsewhere {
                    self.selected_marker_id = None;
                }
                if self.selected_sphere_id.as_ref() != Some(&id) {
                    self.hovered_marker_id = None;
                }
                self.selected_layer_id = Some(layer_id);
                self.selected_sphere_id = Some(id);
            }
            Action::SelectMarker(id) => {
                let Some(sphere_id) = self.marker(&id).map(|marker| marker.sphere_id.clone())
                else {
                    return;
                };
                self.selected_layer_id = self
                    .sphere(&sphere_id)
                    .map(|sphere| sphere.layer_id.clone())
                    .or_else(|| self.selected_layer_id.clone());
                self.selected_sphere_id = Some(sphere_id);
                self.selected_marker_id = Some(id);
            }
            Action::HoverMarker(id) => {
                self.hovered_marker_id = id;
            }
            Action::ClearSelection => {
                self.selected_layer_id = None;
                self.selected_sphere_id = None;
                self.selected_marker_id = None;
                self.hovered_marker_id = None;
            }
            Action::ToggleSidebar => {
                self.is_sidebar_open = !self.is_sidebar_open;
            }
            Action::SetSidebarOpen(open) => {
                self.is_sidebar_open = open;
            }
            Action::OpenModal(modal) => {
                self.active_modal = modal;
            }
            Action::CloseModal => {
                self.active_modal = ActiveModal::None;
            }
            Action::UpdateLayer {
                id,
                name,
                description,
            } => {
                let mut layers = (*self.layers).clone();
                if let Some(layer) = layers.iter_mut().find(|layer| layer.id == id) {
                    layer.name = name;
                    layer.description = description;
                    self.layers = Arc::new(layers);
                    self.layers_revision.bump();
                }
            }
            Action::UpdateMarker {
                id,
                name,
                description,
                image_url,
            } => {
                if let Some(marker) = self.markers.iter_mut().find(|marker| marker.id == id) {
                    marker.name = name;
                    marker.description = description;
                    marker.image_url = image_url;
                }
            }
        }
    }

    /// Drops selections whose entity disappeared from the lists.
    fn prune_selection(&mut self) {
        // Lists arrive in any order; only prune against lists already loaded.
        if self.loaded.layers
            && self
                .selected_layer_id
                .as_ref()
                .is_some_and(|id| self.layer(id).is_none())
        {
            self.selected_layer_id = None;
        }
        if self.loaded.spheres
            && self
                .selected_sphere_id
                .as_ref()
                .is_some_and(|id| self.sphere(id).is_none())
        {
            self.selected_sphere_id = None;
            self.selected_marker_id = None;
        }
        if self.loaded.markers {
            if self
                .selected_marker_id
                .as_ref()
                .is_some_and(|id| self.marker(id).is_none())
            {
                self.selected_marker_id = None;
            }
            if self
                .hovered_marker_id
                .as_ref()
                .is_some_and(|id| self.marker(id).is_none())
            {
                self.hovered_marker_id = None;
            }
        }
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    #[must_use]
    pub fn layers(&self) -> &Arc<Vec<LayerData>> {
        &self.layers
    }

    #[must_use]
    pub fn layers_revision(&self) -> LayersRevision {
        self.layers_revision
    }

    #[must_use]
    pub fn spheres(&self) -> &[SphereData] {
        &self.spheres
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerData] {
        &self.markers
    }

    pub fn layer(&self, id: &LayerId) -> Option<&LayerData> {
        self.layers.iter().find(|layer| &layer.id == id)
    }

    pub fn sphere(&self, id: &SphereId) -> Option<&SphereData> {
        self.spheres.iter().find(|sphere| &sphere.id == id)
    }

    pub fn marker(&self, id: &MarkerId) -> Option<&MarkerData> {
        self.markers.iter().find(|marker| &marker.id == id)
    }

    pub fn spheres_of<'a>(&'a self, layer: &'a LayerId) -> impl Iterator<Item = &'a SphereData> {
        self.spheres
            .iter()
            .filter(move |sphere| &sphere.layer_id == layer)
    }

    pub fn markers_of<'a>(&'a self, sphere: &'a SphereId) -> impl Iterator<Item = &'a MarkerData> {
        self.markers
            .iter()
            .filter(move |marker| &marker.sphere_id == sphere)
    }

    #[must_use]
    pub fn selected_layer_id(&self) -> Option<&LayerId> {
        self.selected_layer_id.as_ref()
    }

    #[must_use]
    pub fn selected_sphere_id(&self) -> Option<&SphereId> {
        self.selected_sphere_id.as_ref()
    }

    #[must_use]
    pub fn selected_marker_id(&self) -> Option<&MarkerId> {
        self.selected_marker_id.as_ref()
    }

    #[must_use]
    pub fn hovered_marker_id(&self) -> Option<&MarkerId> {
        self.hovered_marker_id.as_ref()
    }

    pub fn selected_layer(&self) -> Option<&LayerData> {
        self.selected_layer_id.as_ref().and_then(|id| self.layer(id))
    }

    pub fn selected_sphere(&self) -> Option<&SphereData> {
        self.selected_sphere_id
            .as_ref()
            .and_then(|id| self.sphere(id))
    }

    pub fn selected_marker(&self) -> Option<&MarkerData> {
        self.selected_marker_id
            .as_ref()
            .and_then(|id| self.marker(id))
    }

    /// The marker under the pointer, found by a linear scan of the list.
    pub fn hovered_marker(&self) -> Option<&MarkerData> {
        let id = self.hovered_marker_id.as_ref()?;
        self.markers.iter().find(|marker| &marker.id == id)
    }

    #[must_use]
    pub fn is_sidebar_open(&self) -> bool {
        self.is_sidebar_open
    }

    #[must_use]
    pub fn active_modal(&self) -> ActiveModal {
        self.active_modal
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_selection(self.selected_sphere_id.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_layers, sample_markers, sample_spheres};

    fn loaded_store() -> Store {
        let mut store = Store::new(true);
        store.dispatch(Action::SetLayers(sample_layers()));
        store.dispatch(Action::SetSpheres(sample_spheres()));
        store.dispatch(Action::SetMarkers(sample_markers()));
        store
    }

    #[test]
    fn new_store_starts_in_grid_mode() {
        let store = Store::new(false);
        assert_eq!(store.view_mode(), ViewMode::Grid);
        assert!(!store.is_sidebar_open());
        assert_eq!(store.active_modal(), ActiveModal::None);
    }

    #[test]
    fn select_layer_selects_first_sphere() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectLayer(LayerId::new("l2")));

        assert_eq!(store.selected_sphere_id().map(SphereId::as_str), Some("s3"));
        assert_eq!(store.view_mode(), ViewMode::Viewer);
    }

    #[test]
    fn select_unknown_layer_is_ignored() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectLayer(LayerId::new("nope")));
        assert!(store.selected_layer_id().is_none());
    }

    #[test]
    fn select_sphere_selects_its_layer() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectSphere(SphereId::new("s3")));
        assert_eq!(store.selected_layer_id().map(LayerId::as_str), Some("l2"));
    }

    #[test]
    fn select_marker_selects_sphere_and_layer() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectMarker(MarkerId::new("m3")));

        assert_eq!(store.selected_sphere_id().map(SphereId::as_str), Some("s3"));
        assert_eq!(store.selected_layer_id().map(LayerId::as_str), Some("l2"));
        assert_eq!(store.selected_marker().map(|m| m.name.as_str()), Some("Antenna"));
    }

    #[test]
    fn switching_sphere_drops_marker_from_other_sphere() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectMarker(MarkerId::new("m1")));
        store.dispatch(Action::SelectSphere(SphereId::new("s2")));
        assert!(store.selected_marker_id().is_none());
    }

    #[test]
    fn reselecting_same_sphere_keeps_marker() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectMarker(MarkerId::new("m1")));
        store.dispatch(Action::SelectSphere(SphereId::new("s1")));
        assert_eq!(store.selected_marker_id().map(MarkerId::as_str), Some("m1"));
    }

    #[test]
    fn clear_selection_resets_all_ids() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectMarker(MarkerId::new("m2")));
        store.dispatch(Action::HoverMarker(Some(MarkerId::new("m1"))));
        store.dispatch(Action::ClearSelection);

        assert!(store.selected_layer_id().is_none());
        assert!(store.selected_sphere_id().is_none());
        assert!(store.selected_marker_id().is_none());
        assert!(store.hovered_marker_id().is_none());
        assert_eq!(store.view_mode(), ViewMode::Grid);
    }

    #[test]
    fn hovered_marker_lookup_matches_exactly_one_entry() {
        let mut store = loaded_store();
        store.dispatch(Action::HoverMarker(Some(MarkerId::new("m2"))));
        let hovered = store.hovered_marker().expect("m2 is in the list");
        assert_eq!(hovered.id.as_str(), "m2");
        assert_eq!(hovered.description, "Alarm control");
    }

    #[test]
    fn hovered_marker_lookup_without_match_is_none() {
        let mut store = loaded_store();
        store.dispatch(Action::HoverMarker(Some(MarkerId::new("ghost"))));
        assert!(store.hovered_marker().is_none());

        store.dispatch(Action::HoverMarker(None));
        assert!(store.hovered_marker().is_none());
    }

    #[test]
    fn set_layers_bumps_revision() {
        let mut store = Store::default();
        let before = store.layers_revision();
        store.dispatch(Action::SetLayers(sample_layers()));
        assert_ne!(store.layers_revision(), before);
    }

    #[test]
    fn update_layer_bumps_revision_and_edits() {
        let mut store = loaded_store();
        let before = store.layers_revision();
        store.dispatch(Action::UpdateLayer {
            id: LayerId::new("l1"),
            name: "Lobby level".into(),
            description: "Renamed".into(),
        });
        assert_ne!(store.layers_revision(), before);
        assert_eq!(store.layer(&LayerId::new("l1")).unwrap().name, "Lobby level");
    }

    #[test]
    fn update_unknown_layer_keeps_revision() {
        let mut store = loaded_store();
        let before = store.layers_revision();
        store.dispatch(Action::UpdateLayer {
            id: LayerId::new("missing"),
            name: String::new(),
            description: String::new(),
        });
        assert_eq!(store.layers_revision(), before);
    }

    #[test]
    fn update_marker_edits_fields() {
        let mut store = loaded_store();
        store.dispatch(Action::UpdateMarker {
            id: MarkerId::new("m1"),
            name: "Desk".into(),
            description: String::new(),
            image_url: None,
        });
        let marker = store.marker(&MarkerId::new("m1")).unwrap();
        assert_eq!(marker.name, "Desk");
        assert!(marker.image_url.is_none());
    }

    #[test]
    fn replacing_spheres_prunes_missing_selection() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectMarker(MarkerId::new("m3")));
        let remaining: Vec<_> = sample_spheres()
            .into_iter()
            .filter(|sphere| sphere.id.as_str() != "s3")
            .collect();
        store.dispatch(Action::SetSpheres(remaining));

        assert!(store.selected_sphere_id().is_none());
        assert!(store.selected_marker_id().is_none());
    }

    #[test]
    fn empty_sphere_reload_returns_to_grid() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectSphere(SphereId::new("s1")));
        store.dispatch(Action::SetSpheres(Vec::new()));

        assert!(store.selected_sphere_id().is_none());
        assert!(store.selected_sphere().is_none());
        assert_eq!(store.view_mode(), ViewMode::Grid);
    }

    #[test]
    fn empty_lists_drop_layer_and_marker_selection() {
        let mut store = loaded_store();
        store.dispatch(Action::SelectMarker(MarkerId::new("m1")));
        store.dispatch(Action::HoverMarker(Some(MarkerId::new("m2"))));
        store.dispatch(Action::SetMarkers(Vec::new()));
        assert!(store.selected_marker_id().is_none());
        assert!(store.hovered_marker_id().is_none());
        assert_eq!(store.selected_sphere_id().map(SphereId::as_str), Some("s1"));

        store.dispatch(Action::SetLayers(Vec::new()));
        assert!(store.selected_layer_id().is_none());
    }

    #[test]
    fn selection_survives_lists_not_yet_loaded() {
        let mut store = Store::default();
        store.dispatch(Action::SetSpheres(sample_spheres()));
        store.dispatch(Action::SelectSphere(SphereId::new("s1")));
        store.dispatch(Action::SetLayers(sample_layers()));

        assert_eq!(store.selected_sphere_id().map(SphereId::as_str), Some("s1"));
        assert_eq!(store.selected_layer_id().map(LayerId::as_str), Some("l1"));
    }

    #[test]
    fn modal_open_and_close() {
        let mut store = loaded_store();
        store.dispatch(Action::OpenModal(ActiveModal::Marker));
        assert_eq!(store.active_modal(), ActiveModal::Marker);
        store.dispatch(Action::CloseModal);
        assert_eq!(store.active_modal(), ActiveModal::None);
    }

    #[test]
    fn toggle_sidebar_flips_flag() {
        let mut store = Store::new(true);
        store.dispatch(Action::ToggleSidebar);
        assert!(!store.is_sidebar_open());
        store.dispatch(Action::SetSidebarOpen(true));
        assert!(store.is_sidebar_open());
    }

    #[test]
    fn spheres_of_layer_filters() {
        let store = loaded_store();
        let l1 = LayerId::new("l1");
        let ids: Vec<_> = store
            .spheres_of(&l1)
            .map(|sphere| sphere.id.as_str())
            .collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        let s1 = SphereId::new("s1");
        assert_eq!(store.markers_of(&s1).count(), 2);
    }
}
