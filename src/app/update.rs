// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Component messages are turned into events by the components themselves;
//! the handlers here apply those events to the store, the configuration and
//! the notification queue.

use super::{persistence, Editor, Message};
use crate::catalog::{self, CatalogSource};
use crate::config::Config;
use crate::domain::ActiveModal;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::store::{Action, Store};
use crate::ui::header::{self, Event as HeaderEvent};
use crate::ui::layer_grid;
use crate::ui::layer_viewer::{self, Event as LayerEditorEvent, LayerDraft};
use crate::ui::marker_viewer::{self, Event as MarkerEditorEvent, MarkerDraft};
use crate::ui::notifications::{self, Notification};
use crate::ui::panorama::Effect as PanoramaEffect;
use crate::ui::sidebar::{self, Event as SidebarEvent};
use crate::ui::theming::ThemeMode;
use iced::Task;

/// Prefix shared by every catalog failure notification.
const CATALOG_NOTIFICATION_PREFIX: &str = "notification-catalog-";

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub config: &'a mut Config,
    pub store: &'a mut Store,
    pub catalog: &'a CatalogSource,
    pub layer_grid: &'a mut layer_grid::State,
    pub header: &'a mut header::State,
    pub tree: &'a mut sidebar::TreeState,
    pub editor: &'a mut Option<Editor>,
    pub theme_mode: &'a mut ThemeMode,
    pub window_width: &'a mut f32,
    pub notifications: &'a mut notifications::Manager,
}

impl UpdateContext<'_> {
    /// Dispatches `action` and expands the tree down to the new selection.
    fn select(&mut self, action: Action) {
        self.store.dispatch(action);
        self.tree.reveal(self.store);
    }

    fn report(&mut self, what: &str, err: &Error) {
        log::warn!("failed to fetch {what}: {err}");
        self.notifications
            .push(Notification::error(err.notification_key()));
    }
}

/// Routes every message except the panorama's, which `App` handles itself.
pub fn update(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::LayersFetched(result) => handle_layers_fetched(ctx, result),
        Message::SpheresFetched(result) => {
            match result {
                Ok(spheres) => ctx.store.dispatch(Action::SetSpheres(spheres)),
                Err(err) => ctx.report("spheres", &err),
            }
            Task::none()
        }
        Message::MarkersFetched(result) => {
            match result {
                Ok(markers) => ctx.store.dispatch(Action::SetMarkers(markers)),
                Err(err) => ctx.report("markers", &err),
            }
            Task::none()
        }
        Message::Header(header_message) => handle_header_message(ctx, header_message),
        Message::Sidebar(sidebar_message) => handle_sidebar_message(ctx, sidebar_message),
        Message::LayerGrid(grid_message) => {
            if let Some(id) = ctx.layer_grid.update(grid_message) {
                ctx.select(Action::SelectLayer(id));
            }
            Task::none()
        }
        Message::LayerEditor(editor_message) => handle_layer_editor_message(ctx, editor_message),
        Message::MarkerEditor(editor_message) => {
            handle_marker_editor_message(ctx, editor_message)
        }
        Message::Notification(notification_message) => {
            ctx.notifications.handle_message(&notification_message);
            Task::none()
        }
        Message::ToggleSidebar => {
            ctx.store.dispatch(Action::ToggleSidebar);
            ctx.config.layout.sidebar_open = ctx.store.is_sidebar_open();
            persistence::persist(ctx.config)
        }
        Message::ClearSelection => {
            ctx.store.dispatch(Action::ClearSelection);
            Task::none()
        }
        Message::CloseModal => close_modal(ctx),
        Message::WindowResized(size) => {
            *ctx.window_width = size.width;
            Task::none()
        }
        Message::Tick(now) => {
            ctx.notifications.tick(now);
            Task::none()
        }
        // Routed by `App::update` so the viewer can be borrowed alongside the context.
        Message::Panorama(_) => Task::none(),
    }
}

fn handle_layers_fetched(
    ctx: &mut UpdateContext<'_>,
    result: Result<Vec<crate::domain::LayerData>, Error>,
) -> Task<Message> {
    match result {
        Ok(layers) => {
            log::debug!("fetched {} layers", layers.len());
            let thumbnails = ctx.layer_grid.load_thumbnails(ctx.catalog, &layers);
            ctx.store.dispatch(Action::SetLayers(layers));
            thumbnails.map(Message::LayerGrid)
        }
        Err(err) => {
            ctx.report("layers", &err);
            Task::none()
        }
    }
}

fn handle_header_message(ctx: &mut UpdateContext<'_>, message: header::Message) -> Task<Message> {
    match header::update(ctx.header, message) {
        HeaderEvent::None => Task::none(),
        HeaderEvent::SelectLayer(id) => {
            ctx.select(Action::SelectLayer(id));
            Task::none()
        }
        HeaderEvent::CycleTheme => {
            *ctx.theme_mode = ctx.theme_mode.next();
            ctx.config.general.theme_mode = *ctx.theme_mode;
            persistence::persist(ctx.config)
        }
        HeaderEvent::CycleLanguage => {
            let locale = ctx.i18n.next_locale();
            ctx.i18n.set_locale(locale);
            ctx.config.general.language = Some(ctx.i18n.current_locale().to_string());
            persistence::persist(ctx.config)
        }
        HeaderEvent::Reload => reload_catalog(ctx),
    }
}

/// Drops stale catalog errors and cached thumbnails, then refetches everything.
fn reload_catalog(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    log::info!("reloading catalog from {}", ctx.catalog);
    ctx.notifications.clear_prefixed(CATALOG_NOTIFICATION_PREFIX);
    ctx.layer_grid.clear();
    fetch_catalog(ctx.catalog)
}

/// Fires the three catalog fetches concurrently.
pub fn fetch_catalog(source: &CatalogSource) -> Task<Message> {
    let source = source.clone();
    Task::batch([
        Task::perform(catalog::fetch_layers(source.clone()), Message::LayersFetched),
        Task::perform(
            catalog::fetch_spheres(source.clone()),
            Message::SpheresFetched,
        ),
        Task::perform(catalog::fetch_markers(source), Message::MarkersFetched),
    ])
}

fn handle_sidebar_message(ctx: &mut UpdateContext<'_>, message: sidebar::Message) -> Task<Message> {
    match sidebar::update(ctx.tree, message) {
        SidebarEvent::None => {}
        SidebarEvent::SelectLayer(id) => ctx.select(Action::SelectLayer(id)),
        SidebarEvent::SelectSphere(id) => ctx.select(Action::SelectSphere(id)),
        SidebarEvent::SelectMarker(id) => ctx.select(Action::SelectMarker(id)),
        SidebarEvent::EditLayer(id) => {
            if let Some(layer) = ctx.store.layer(&id) {
                *ctx.editor = Some(Editor::Layer(LayerDraft::from_layer(layer)));
                ctx.store.dispatch(Action::OpenModal(ActiveModal::Layer));
            }
        }
        SidebarEvent::EditMarker(id) => {
            if let Some(marker) = ctx.store.marker(&id) {
                *ctx.editor = Some(Editor::Marker(MarkerDraft::from_marker(marker)));
                ctx.store.dispatch(Action::OpenModal(ActiveModal::Marker));
            }
        }
    }
    Task::none()
}

fn handle_layer_editor_message(
    ctx: &mut UpdateContext<'_>,
    message: layer_viewer::Message,
) -> Task<Message> {
    let Some(Editor::Layer(draft)) = ctx.editor.as_mut() else {
        return Task::none();
    };
    match layer_viewer::update(draft, message) {
        LayerEditorEvent::None => Task::none(),
        LayerEditorEvent::Save(action) => {
            ctx.store.dispatch(action);
            close_modal(ctx)
        }
        LayerEditorEvent::Close => close_modal(ctx),
    }
}

fn handle_marker_editor_message(
    ctx: &mut UpdateContext<'_>,
    message: marker_viewer::Message,
) -> Task<Message> {
    let Some(Editor::Marker(draft)) = ctx.editor.as_mut() else {
        return Task::none();
    };
    match marker_viewer::update(draft, message) {
        MarkerEditorEvent::None => Task::none(),
        MarkerEditorEvent::Save(action) => {
            ctx.store.dispatch(action);
            close_modal(ctx)
        }
        MarkerEditorEvent::Close => close_modal(ctx),
    }
}

fn close_modal(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.store.dispatch(Action::CloseModal);
    *ctx.editor = None;
    Task::none()
}

/// Applies a side effect requested by the panorama viewer.
pub fn apply_panorama_effect(ctx: &mut UpdateContext<'_>, effect: PanoramaEffect) -> Task<Message> {
    match effect {
        PanoramaEffect::None => {}
        PanoramaEffect::HoverMarker(id) => ctx.store.dispatch(Action::HoverMarker(id)),
        PanoramaEffect::SelectMarker(id) => ctx.select(Action::SelectMarker(id)),
        PanoramaEffect::ShowError(key) => ctx.notifications.push(Notification::error(key)),
    }
    Task::none()
}
