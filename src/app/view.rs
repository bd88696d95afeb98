// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the page template from a [`PageLayout`]: header on top, the
//! optional sidebar next to the main content, then the modal and the toasts
//! stacked above everything.

use super::view_model::{MainContent, ModalContent, PageLayout};
use super::{Editor, Message};
use crate::config::Config;
use crate::i18n::fluent::I18n;
use crate::store::Store;
use crate::ui::modal::{self, ModalNode};
use crate::ui::notifications::{self, Toast};
use crate::ui::panorama::{self, ViewContext as PanoramaViewContext};
use crate::ui::theming::ThemeMode;
use crate::ui::{controls, header, layer_grid, layer_viewer, marker_viewer, sidebar};
use iced::widget::{text, Column, Container, Row, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub config: &'a Config,
    pub store: &'a Store,
    pub layout: PageLayout,
    pub viewer: &'a panorama::State,
    pub layer_grid: &'a layer_grid::State,
    pub header: header::State,
    pub tree: &'a sidebar::TreeState,
    pub editor: Option<&'a Editor>,
    pub theme_mode: ThemeMode,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = header::view(header::ViewContext {
        i18n: ctx.i18n,
        variant: ctx.layout.header,
        state: ctx.header,
        layers: ctx.store.layers().as_slice(),
        selected_layer: ctx.store.selected_layer_id(),
        theme_mode: ctx.theme_mode,
    })
    .map(Message::Header);

    let main: Element<'_, Message> = match ctx.layout.main {
        MainContent::LayerGrid => {
            layer_grid::view(ctx.layer_grid, ctx.store, ctx.i18n).map(Message::LayerGrid)
        }
        MainContent::Panorama => {
            let slot = controls::overlay_controls(
                ctx.layout.overlay_controls,
                ctx.store.is_sidebar_open(),
                ctx.i18n,
                Message::ToggleSidebar,
                Message::ClearSelection,
            );
            ctx.viewer.view(
                PanoramaViewContext {
                    i18n: ctx.i18n,
                    store: ctx.store,
                    show_orientation: ctx.config.viewer.show_orientation,
                },
                Message::Panorama,
                slot,
            )
        }
    };

    let mut body = Row::new().width(Length::Fill).height(Length::Fill);
    if ctx.layout.sidebar {
        body = body.push(sidebar::view(ctx.store, ctx.tree, ctx.i18n).map(Message::Sidebar));
    }
    body = body.push(
        Container::new(main)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    let page: Element<'_, Message> = Column::new()
        .push(header)
        .push(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

    let node = ctx
        .layout
        .modal
        .map(|content| modal_node(content, ctx.editor, ctx.store, ctx.i18n));
    let page = modal::host(page, node, Message::CloseModal);

    if ctx.notifications.has_notifications() {
        Stack::new()
            .push(page)
            .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    } else {
        page
    }
}

/// Builds the body of the visible modal. A modal opened without a matching
/// draft shows a placeholder instead of an editor.
fn modal_node<'a>(
    content: ModalContent,
    editor: Option<&'a Editor>,
    store: &'a Store,
    i18n: &'a I18n,
) -> ModalNode<'a, Message> {
    match (content, editor) {
        (ModalContent::LayerViewer, Some(Editor::Layer(draft))) => ModalNode {
            title: i18n.tr("modal-layer-title"),
            body: layer_viewer::view(draft, store, i18n).map(Message::LayerEditor),
        },
        (ModalContent::MarkerViewer, Some(Editor::Marker(draft))) => ModalNode {
            title: i18n.tr("modal-marker-title"),
            body: marker_viewer::view(draft, store, i18n).map(Message::MarkerEditor),
        },
        (ModalContent::LayerViewer, _) => ModalNode {
            title: i18n.tr("modal-layer-title"),
            body: text(i18n.tr("editor-missing")).into(),
        },
        (ModalContent::MarkerViewer, _) => ModalNode {
            title: i18n.tr("modal-marker-title"),
            body: text(i18n.tr("editor-missing")).into(),
        },
    }
}
