// SPDX-License-Identifier: MPL-2.0
//! Panorama viewer component encapsulating the engine lifecycle.
//!
//! The viewer owns the only [`EngineHandle`]. After every application
//! update, [`State::reconcile`] compares the store with what the engine was
//! last told:
//!
//! - no sphere selected: the viewer is unmounted and the engine destroyed
//! - first mount or a new [`LayersRevision`]: the old engine is destroyed,
//!   then a new one is constructed under a fresh [`Generation`]
//! - otherwise each selection tracker forwards its own change
//!
//! Orientation is sampled once per frame while an engine is alive.

use super::canvas::MarkerLayer;
use super::overlay::{self, MarkerInfo};
use super::sync::Watched;
use super::{CanvasMessage, Message};
use crate::catalog::{self, CatalogSource};
use crate::domain::{LayerId, MarkerData, MarkerId, Orientation, Position, SphereData, SphereId};
use crate::engine::{EngineFactory, EngineHandle, Generation, Panorama, ViewerContainer};
use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::store::{LayersRevision, Store};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::image::Handle;
use iced::widget::{canvas, center, column, image, row, text, Space, Stack};
use iced::{window, Alignment, ContentFit, Element, Length, Subscription, Task};
use std::collections::HashMap;

/// Side effects the application must apply on behalf of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The pointer entered or left a marker.
    HoverMarker(Option<MarkerId>),
    /// A marker pin was clicked.
    SelectMarker(MarkerId),
    /// Show an error notification with the given i18n key.
    ShowError(&'static str),
}

/// Collaborators the viewer needs to follow the store.
pub struct SyncContext<'a> {
    pub store: &'a Store,
    pub factory: &'a dyn EngineFactory,
    pub container: &'a ViewerContainer,
    pub catalog: &'a CatalogSource,
}

/// Inputs for rendering.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub store: &'a Store,
    pub show_orientation: bool,
}

#[derive(Debug, Clone)]
enum Picture {
    Loading,
    Ready(Handle),
    Failed,
}

#[derive(Debug)]
pub struct State {
    handle: Option<EngineHandle>,
    next_generation: Generation,
    mounted: bool,
    revision: Option<LayersRevision>,
    drag_sensitivity: f32,
    layer: Watched<Option<LayerId>>,
    sphere: Watched<Option<SphereId>>,
    placements: Watched<Vec<MarkerData>>,
    marker: Watched<Option<MarkerId>>,
    orientation: Orientation,
    loading: Option<SphereId>,
    pictures: HashMap<String, Picture>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            handle: None,
            next_generation: Generation::first(),
            mounted: false,
            revision: None,
            drag_sensitivity: crate::config::DEFAULT_DRAG_SENSITIVITY,
            layer: Watched::default(),
            sphere: Watched::default(),
            placements: Watched::default(),
            marker: Watched::default(),
            orientation: Orientation::default(),
            loading: None,
            pictures: HashMap::new(),
        }
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn has_engine(&self) -> bool {
        self.handle.is_some()
    }

    /// Generation of the live engine, if any.
    #[must_use]
    pub fn generation(&self) -> Option<Generation> {
        self.handle.as_ref().map(EngineHandle::generation)
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether a panorama image is being fetched or decoded.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Brings the engine in line with the store.
    pub fn reconcile(&mut self, ctx: &SyncContext<'_>) -> (Effect, Task<Message>) {
        if ctx.store.selected_sphere_id().is_none() {
            self.unmount();
            return (Effect::None, Task::none());
        }

        let mut effect = Effect::None;
        let revision = ctx.store.layers_revision();
        if !self.mounted || self.revision != Some(revision) {
            self.mounted = true;
            self.revision = Some(revision);
            if let Err(err) = self.initialize(ctx.factory, ctx.container) {
                log::error!("failed to construct sphere engine: {err}");
                effect = Effect::ShowError(err.notification_key());
            }
        }

        let load = self.forward_selection(ctx);
        let picture = self.request_picture(ctx);
        (effect, Task::batch([load, picture]))
    }

    /// Destroys the previous engine, then constructs a new one.
    fn initialize(&mut self, factory: &dyn EngineFactory, container: &ViewerContainer) -> Result<()> {
        if let Some(previous) = self.handle.take() {
            previous.close();
        }
        self.reset_trackers();

        let generation = self.next_generation;
        self.next_generation = generation.next();
        self.drag_sensitivity = container.drag_sensitivity;
        self.handle = Some(EngineHandle::open(factory, container, generation)?);
        Ok(())
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.revision = None;
        if let Some(handle) = self.handle.take() {
            handle.close();
        }
        self.reset_trackers();
        self.orientation = Orientation::default();
        self.pictures.clear();
    }

    fn reset_trackers(&mut self) {
        self.layer.reset();
        self.sphere.reset();
        self.placements.reset();
        self.marker.reset();
        self.loading = None;
    }

    fn forward_selection(&mut self, ctx: &SyncContext<'_>) -> Task<Message> {
        let Some(handle) = self.handle.as_mut() else {
            return Task::none();
        };
        let store = ctx.store;
        let mut task = Task::none();

        if self.layer.changed(&store.selected_layer_id().cloned()) {
            handle.engine_mut().change_layer(store.selected_layer());
        }

        if self.sphere.changed(&store.selected_sphere_id().cloned()) {
            let sphere = store.selected_sphere();
            handle.engine_mut().change_sphere(sphere);
            self.loading = sphere.map(|sphere| sphere.id.clone());
            if let Some(sphere) = sphere {
                task = load_panorama(ctx.catalog.clone(), sphere, handle.generation());
            }
        }

        let selected = store.selected_sphere_id();
        let placed = || selected.into_iter().flat_map(|id| store.markers_of(id));
        if self.placements.changed_seq(placed) {
            let placements = self.placements.last().map(Vec::as_slice).unwrap_or_default();
            handle.engine_mut().set_markers(placements);
        }

        if self.marker.changed(&store.selected_marker_id().cloned()) {
            handle.engine_mut().focus_marker(store.selected_marker());
        }

        task
    }

    /// Starts fetching the hovered marker's picture if it is not cached.
    fn request_picture(&mut self, ctx: &SyncContext<'_>) -> Task<Message> {
        let Some(reference) = ctx
            .store
            .hovered_marker()
            .and_then(|marker| marker.image_url.clone())
        else {
            return Task::none();
        };
        if self.pictures.contains_key(&reference) {
            return Task::none();
        }
        self.pictures.insert(reference.clone(), Picture::Loading);

        let source = ctx.catalog.clone();
        let key = reference.clone();
        Task::perform(
            async move { catalog::read_asset(source, reference).await.map(Handle::from_bytes) },
            move |result| Message::PictureLoaded {
                reference: key,
                result,
            },
        )
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Frame(generation) => {
                self.sample(generation);
                (Effect::None, Task::none())
            }
            Message::PanoramaLoaded {
                generation,
                sphere,
                result,
            } => (self.attach(generation, sphere, result), Task::none()),
            Message::PictureLoaded { reference, result } => {
                let picture = match result {
                    Ok(handle) => Picture::Ready(handle),
                    Err(err) => {
                        log::warn!("failed to load marker picture {reference}: {err}");
                        Picture::Failed
                    }
                };
                // Loads finishing after the cache was dropped are discarded.
                if let Some(slot) = self.pictures.get_mut(&reference) {
                    *slot = picture;
                }
                (Effect::None, Task::none())
            }
            Message::Canvas(CanvasMessage::Rotate { dx, dy }) => {
                if let Some(handle) = self.handle.as_mut() {
                    let scale = self.drag_sensitivity;
                    // Dragging right pulls the scene right, so the camera turns left.
                    handle
                        .engine_mut()
                        .rotate(Position::new(-dx * scale, dy * scale));
                }
                (Effect::None, Task::none())
            }
            Message::Canvas(CanvasMessage::MarkerHovered(id)) => {
                (Effect::HoverMarker(id), Task::none())
            }
            Message::Canvas(CanvasMessage::MarkerClicked(id)) => {
                (Effect::SelectMarker(id), Task::none())
            }
        }
    }

    /// Copies the engine's camera into the orientation readout.
    ///
    /// Frames scheduled for another engine instance and frames without a
    /// camera position are skipped.
    fn sample(&mut self, generation: Generation) {
        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        if handle.generation() != generation {
            return;
        }
        if let Some(position) = handle.current_position() {
            self.orientation = Orientation::from_radians(position);
        }
    }

    fn attach(
        &mut self,
        generation: Generation,
        sphere: SphereId,
        result: Result<Panorama>,
    ) -> Effect {
        let Some(handle) = self
            .handle
            .as_mut()
            .filter(|handle| handle.generation() == generation)
        else {
            return Effect::None;
        };
        if self.loading.as_ref() != Some(&sphere) {
            log::debug!("dropping panorama for {sphere}, no longer displayed");
            return Effect::None;
        }
        self.loading = None;

        match result {
            Ok(panorama) => {
                handle.engine_mut().attach_panorama(&sphere, panorama);
                Effect::None
            }
            Err(err) => {
                log::warn!("failed to load panorama for {sphere}: {err}");
                Effect::ShowError(err.notification_key())
            }
        }
    }

    /// Per-frame orientation sampling, alive only while an engine exists.
    pub fn subscription(&self) -> Subscription<Message> {
        match self.generation() {
            Some(generation) => window::frames()
                .with(generation)
                .map(|(generation, _at)| Message::Frame(generation)),
            None => Subscription::none(),
        }
    }

    /// Renders the viewer with `controls` in the top-left corner.
    pub fn view<'a, M: 'a>(
        &'a self,
        ctx: ViewContext<'a>,
        on_message: fn(Message) -> M,
        controls: Element<'a, M>,
    ) -> Element<'a, M> {
        let snapshot = self.handle.as_ref().and_then(|handle| handle.engine().snapshot());

        let scene: Element<'a, Message> = match snapshot {
            Some(snapshot) => {
                let layer = MarkerLayer {
                    markers: snapshot.markers,
                    hovered: ctx.store.hovered_marker_id(),
                };
                Stack::new()
                    .push(
                        image(snapshot.image)
                            .width(Length::Fill)
                            .height(Length::Fill)
                            .content_fit(ContentFit::Fill),
                    )
                    .push(canvas(layer).width(Length::Fill).height(Length::Fill))
                    .into()
            }
            None => {
                let key = if self.handle.is_some() {
                    "panorama-loading"
                } else {
                    "panorama-unavailable"
                };
                center(text(ctx.i18n.tr(key)).size(typography::BODY_LG))
                    .style(styles::container::viewer_backdrop)
                    .into()
            }
        };

        let info: Element<'a, M> =
            match MarkerInfo::lookup(ctx.store.markers(), ctx.store.hovered_marker_id()) {
                Some(info) => {
                    let picture = info.image_url.and_then(|url| match self.pictures.get(url) {
                        Some(Picture::Ready(handle)) => Some(handle.clone()),
                        _ => None,
                    });
                    overlay::marker_info(info, picture)
                }
                None => Space::new().into(),
            };

        let readout: Element<'a, M> = if ctx.show_orientation {
            overlay::yaw_pitch(self.orientation, ctx.i18n)
        } else {
            Space::new().into()
        };

        let chrome = column![
            row![controls, Space::new().width(Length::Fill), info].align_y(Alignment::Start),
            Space::new().height(Length::Fill),
            row![Space::new().width(Length::Fill), readout],
        ]
        .padding(spacing::SM)
        .width(Length::Fill)
        .height(Length::Fill);

        Stack::new()
            .push(scene.map(on_message))
            .push(chrome)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn load_panorama(source: CatalogSource, sphere: &SphereData, generation: Generation) -> Task<Message> {
    let sphere_id = sphere.id.clone();
    let reference = sphere.image.clone();
    Task::perform(
        async move {
            let bytes = catalog::read_asset(source, reference).await?;
            tokio::task::spawn_blocking(move || Panorama::decode(&bytes))
                .await
                .map_err(|err| Error::Image(err.to_string()))?
        },
        move |result| Message::PanoramaLoaded {
            generation,
            sphere: sphere_id,
            result,
        },
    )
}
