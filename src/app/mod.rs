// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the View page.
//!
//! The `App` struct owns the store, the localization bundle, the persisted
//! configuration and the state of every page component. Messages are routed
//! to the handlers in `update`; after each update the panorama viewer is
//! reconciled with the store so the engine always follows the selection.

mod message;
pub mod paths;
mod persistence;
mod subscription;
mod update;
mod view;
pub mod view_model;

pub use message::{Flags, Message};

use crate::catalog::CatalogSource;
use crate::config::{self, Config};
use crate::engine::equirect::EquirectFactory;
use crate::engine::{EngineFactory, ViewerContainer};
use crate::i18n::fluent::I18n;
use crate::store::Store;
use crate::ui::layer_viewer::LayerDraft;
use crate::ui::marker_viewer::MarkerDraft;
use crate::ui::notifications::{self, Notification};
use crate::ui::panorama::{self, SyncContext};
use crate::ui::theming::ThemeMode;
use crate::ui::{header, layer_grid, sidebar};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use view_model::PageViewModel;

/// Draft being edited in the open modal.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor {
    Layer(LayerDraft),
    Marker(MarkerDraft),
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    store: Store,
    catalog: CatalogSource,
    factory: Box<dyn EngineFactory>,
    container: ViewerContainer,
    viewer: panorama::State,
    layer_grid: layer_grid::State,
    header: header::State,
    tree: sidebar::TreeState,
    editor: Option<Editor>,
    theme_mode: ThemeMode,
    window_width: f32,
    force_compact: bool,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("catalog", &self.catalog)
            .field("view_mode", &self.store.view_mode())
            .field("viewer_has_engine", &self.viewer.has_engine())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(config::DEFAULT_WINDOW_WIDTH, config::DEFAULT_WINDOW_HEIGHT),
        min_size: Some(iced::Size::new(
            config::MIN_WINDOW_WIDTH,
            config::MIN_WINDOW_HEIGHT,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the configuration, resolves the catalog and starts fetching it.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let catalog = CatalogSource::resolve(
            flags.catalog.as_deref(),
            &config.catalog,
            paths::get_app_data_dir(),
        );
        log::info!("Using catalog at {}", catalog);

        let mut app = Self::from_parts(i18n, config, catalog, Box::new(EquirectFactory));
        app.force_compact = flags.compact;

        if let Some(warning) = config_warning {
            log::warn!("{}", warning);
            app.notifications
                .push(Notification::warning("notification-config-load-error"));
        }

        let task = update::fetch_catalog(&app.catalog);
        (app, task)
    }

    /// Assembles an application without touching the disk or the network.
    pub(crate) fn from_parts(
        i18n: I18n,
        config: Config,
        catalog: CatalogSource,
        factory: Box<dyn EngineFactory>,
    ) -> Self {
        let store = Store::new(config.layout.sidebar_open);
        let container = config.viewer.container();
        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            store,
            catalog,
            factory,
            container,
            viewer: panorama::State::new(),
            layer_grid: layer_grid::State::default(),
            header: header::State::default(),
            tree: sidebar::TreeState::default(),
            editor: None,
            window_width: config::DEFAULT_WINDOW_WIDTH,
            force_compact: false,
            notifications: notifications::Manager::new(),
            config,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn is_desktop(&self) -> bool {
        view_model::is_desktop(
            self.window_width,
            self.config.layout.desktop_min_width,
            self.force_compact,
        )
    }

    /// Current page view-model.
    pub fn view_model(&self) -> PageViewModel<'_> {
        PageViewModel::derive(&self.store, self.is_desktop())
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
            self.viewer.subscription().map(Message::Panorama),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        // Frames only sample the camera and cannot change the store.
        let reconcile = !matches!(message, Message::Panorama(panorama::Message::Frame(_)));
        let task = match message {
            Message::Panorama(panorama_message) => {
                let (effect, task) = self.viewer.handle_message(panorama_message);
                let effect_task = update::apply_panorama_effect(&mut self.update_context(), effect);
                Task::batch([task.map(Message::Panorama), effect_task])
            }
            other => update::update(&mut self.update_context(), other),
        };

        if reconcile {
            Task::batch([task, self.reconcile_viewer()])
        } else {
            task
        }
    }

    /// Brings the panorama viewer in line with the store.
    fn reconcile_viewer(&mut self) -> Task<Message> {
        let (effect, task) = self.viewer.reconcile(&SyncContext {
            store: &self.store,
            factory: self.factory.as_ref(),
            container: &self.container,
            catalog: &self.catalog,
        });
        let effect_task = update::apply_panorama_effect(&mut self.update_context(), effect);
        Task::batch([task.map(Message::Panorama), effect_task])
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            i18n: &mut self.i18n,
            config: &mut self.config,
            store: &mut self.store,
            catalog: &self.catalog,
            layer_grid: &mut self.layer_grid,
            header: &mut self.header,
            tree: &mut self.tree,
            editor: &mut self.editor,
            theme_mode: &mut self.theme_mode,
            window_width: &mut self.window_width,
            notifications: &mut self.notifications,
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            config: &self.config,
            store: &self.store,
            layout: self.view_model().layout(),
            viewer: &self.viewer,
            layer_grid: &self.layer_grid,
            header: self.header,
            tree: &self.tree,
            editor: self.editor.as_ref(),
            theme_mode: self.theme_mode,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActiveModal, LayerId, MarkerId, SphereId, ViewMode};
    use crate::error::{CatalogError, Error};
    use crate::test_utils::{sample_layers, sample_markers, sample_spheres, RecordingFactory};
    use crate::ui::{layer_viewer, marker_viewer};
    use std::path::PathBuf;

    fn test_app(factory: RecordingFactory) -> App {
        App::from_parts(
            I18n::default(),
            Config::default(),
            CatalogSource::File(PathBuf::from("/nonexistent/catalog")),
            Box::new(factory),
        )
    }

    fn loaded_app(factory: RecordingFactory) -> App {
        let mut app = test_app(factory);
        let _ = app.update(Message::LayersFetched(Ok(sample_layers())));
        let _ = app.update(Message::SpheresFetched(Ok(sample_spheres())));
        let _ = app.update(Message::MarkersFetched(Ok(sample_markers())));
        app
    }

    #[test]
    fn starts_in_grid_with_configured_sidebar() {
        let app = test_app(RecordingFactory::new());
        assert_eq!(app.store.view_mode(), ViewMode::Grid);
        assert!(app.store.is_sidebar_open());
        assert!(!app.viewer.is_mounted());
    }

    #[test]
    fn fetched_lists_populate_store() {
        let app = loaded_app(RecordingFactory::new());
        assert_eq!(app.store.layers().len(), 2);
        assert_eq!(app.store.spheres().len(), 3);
        assert_eq!(app.store.markers().len(), 3);
    }

    #[test]
    fn fetch_failure_shows_catalog_notification() {
        let mut app = test_app(RecordingFactory::new());
        let _ = app.update(Message::LayersFetched(Err(Error::Catalog(
            CatalogError::Status(503),
        ))));

        let keys: Vec<_> = app
            .notifications
            .visible()
            .map(|n| n.message_key().to_string())
            .collect();
        assert_eq!(keys, vec!["notification-catalog-status"]);
        assert!(app.store.layers().is_empty());
    }

    #[test]
    fn selecting_layer_mounts_viewer() {
        let mut app = loaded_app(RecordingFactory::new());
        let _ = app.update(Message::Header(header::Message::DrawerLayerPressed(
            LayerId::new("l1"),
        )));

        assert_eq!(app.store.view_mode(), ViewMode::Viewer);
        assert!(app.viewer.is_mounted());
        assert!(app.viewer.has_engine());
        assert!(app.tree.is_layer_expanded(&LayerId::new("l1")));
    }

    #[test]
    fn clear_selection_returns_to_grid_and_drops_engine() {
        let mut app = loaded_app(RecordingFactory::new());
        let _ = app.update(Message::LayerGrid(layer_grid::Message::TilePressed(
            LayerId::new("l1"),
        )));
        assert!(app.viewer.has_engine());

        let _ = app.update(Message::ClearSelection);
        assert_eq!(app.store.view_mode(), ViewMode::Grid);
        assert!(!app.viewer.has_engine());
    }

    #[test]
    fn reload_without_spheres_returns_to_grid() {
        let mut app = loaded_app(RecordingFactory::new());
        let _ = app.update(Message::LayerGrid(layer_grid::Message::TilePressed(
            LayerId::new("l1"),
        )));
        assert!(app.viewer.has_engine());

        let _ = app.update(Message::Header(header::Message::Reload));
        let _ = app.update(Message::SpheresFetched(Ok(Vec::new())));

        assert!(app.store.selected_sphere_id().is_none());
        assert_eq!(app.store.view_mode(), ViewMode::Grid);
        assert!(!app.viewer.is_mounted());
        assert!(!app.viewer.has_engine());
    }

    #[test]
    fn engine_failure_shows_notification_once() {
        let mut app = loaded_app(RecordingFactory::failing());
        let _ = app.update(Message::Sidebar(sidebar::Message::Select(
            sidebar::NodeId::Sphere(SphereId::new("s1")),
        )));
        let _ = app.update(Message::WindowResized(iced::Size::new(1000.0, 700.0)));

        assert!(!app.viewer.has_engine());
        let errors = app
            .notifications
            .visible()
            .filter(|n| n.message_key() == "notification-engine-error")
            .count();
        assert_eq!(errors, 1);
    }

    #[test]
    fn toggle_sidebar_flips_store_flag() {
        let mut app = loaded_app(RecordingFactory::new());
        let _ = app.update(Message::ToggleSidebar);
        assert!(!app.store.is_sidebar_open());
        assert!(!app.config.layout.sidebar_open);
    }

    #[test]
    fn narrow_window_switches_to_compact_layout() {
        let mut app = loaded_app(RecordingFactory::new());
        assert!(app.view_model().is_desktop);

        let _ = app.update(Message::WindowResized(iced::Size::new(600.0, 700.0)));
        assert!(!app.view_model().is_desktop);
        assert!(!app.view_model().layout().sidebar);
    }

    #[test]
    fn editing_layer_opens_modal_and_save_updates_store() {
        let mut app = loaded_app(RecordingFactory::new());
        let _ = app.update(Message::Sidebar(sidebar::Message::EditLayer(LayerId::new(
            "l1",
        ))));
        assert_eq!(app.store.active_modal(), ActiveModal::Layer);
        assert!(matches!(app.editor, Some(Editor::Layer(_))));

        let _ = app.update(Message::LayerEditor(layer_viewer::Message::NameChanged(
            "Lobby level".into(),
        )));
        let _ = app.update(Message::LayerEditor(layer_viewer::Message::Save));

        assert_eq!(app.store.active_modal(), ActiveModal::None);
        assert!(app.editor.is_none());
        let layer = app.store.layer(&LayerId::new("l1")).map(|l| l.name.clone());
        assert_eq!(layer.as_deref(), Some("Lobby level"));
    }

    #[test]
    fn cancel_marker_edit_keeps_store() {
        let mut app = loaded_app(RecordingFactory::new());
        let _ = app.update(Message::Sidebar(sidebar::Message::EditMarker(
            MarkerId::new("m1"),
        )));
        assert_eq!(app.store.active_modal(), ActiveModal::Marker);

        let _ = app.update(Message::MarkerEditor(marker_viewer::Message::NameChanged(
            "Front desk".into(),
        )));
        let _ = app.update(Message::MarkerEditor(marker_viewer::Message::Cancel));

        assert_eq!(app.store.active_modal(), ActiveModal::None);
        let name = app.store.marker(&MarkerId::new("m1")).map(|m| m.name.clone());
        assert_eq!(name.as_deref(), Some("Reception"));
    }

    #[test]
    fn close_modal_clears_draft() {
        let mut app = loaded_app(RecordingFactory::new());
        let _ = app.update(Message::Sidebar(sidebar::Message::EditLayer(LayerId::new(
            "l2",
        ))));
        let _ = app.update(Message::CloseModal);
        assert_eq!(app.store.active_modal(), ActiveModal::None);
        assert!(app.editor.is_none());
    }

    #[test]
    fn cycle_theme_updates_config() {
        let mut app = test_app(RecordingFactory::new());
        let before = app.theme_mode;
        let _ = app.update(Message::Header(header::Message::CycleTheme));
        assert_eq!(app.theme_mode, before.next());
        assert_eq!(app.config.general.theme_mode, app.theme_mode);
    }

    #[test]
    fn cycle_language_records_locale() {
        let mut app = test_app(RecordingFactory::new());
        let expected = app.i18n.next_locale();
        let _ = app.update(Message::Header(header::Message::CycleLanguage));
        assert_eq!(app.i18n.current_locale(), &expected);
        assert_eq!(
            app.config.general.language.as_deref(),
            Some(expected.to_string().as_str())
        );
    }

    #[test]
    fn reload_drops_catalog_notifications() {
        let mut app = test_app(RecordingFactory::new());
        let _ = app.update(Message::SpheresFetched(Err(Error::Catalog(
            CatalogError::Network("reset".into()),
        ))));
        assert!(app.notifications.has_notifications());

        let _ = app.update(Message::Header(header::Message::Reload));
        assert!(!app.notifications.has_notifications());
    }
}
