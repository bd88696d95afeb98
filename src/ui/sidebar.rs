// SPDX-License-Identifier: MPL-2.0
//! Sidebar with the catalog tree.
//!
//! The tree is flattened into [`TreeRow`]s first, which keeps the
//! expand/collapse and selection logic testable without rendering.

use crate::domain::{LayerId, MarkerId, SphereId};
use crate::i18n::fluent::I18n;
use crate::store::Store;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::{button, scrollable, text, Column, Container, Row, Space};
use iced::{Element, Length};
use std::collections::HashSet;

/// Which nodes of the tree are expanded.
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    layers: HashSet<LayerId>,
    spheres: HashSet<SphereId>,
}

impl TreeState {
    pub fn toggle_layer(&mut self, id: &LayerId) {
        if !self.layers.remove(id) {
            self.layers.insert(id.clone());
        }
    }

    pub fn toggle_sphere(&mut self, id: &SphereId) {
        if !self.spheres.remove(id) {
            self.spheres.insert(id.clone());
        }
    }

    /// Expands the path down to the current selection.
    pub fn reveal(&mut self, store: &Store) {
        if let Some(layer) = store.selected_layer_id() {
            self.layers.insert(layer.clone());
        }
        if let Some(sphere) = store.selected_sphere_id() {
            self.spheres.insert(sphere.clone());
        }
    }

    #[must_use]
    pub fn is_layer_expanded(&self, id: &LayerId) -> bool {
        self.layers.contains(id)
    }

    #[must_use]
    pub fn is_sphere_expanded(&self, id: &SphereId) -> bool {
        self.spheres.contains(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeId {
    Layer(LayerId),
    Sphere(SphereId),
    Marker(MarkerId),
}

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub node: NodeId,
    pub label: &'a str,
    pub depth: u8,
    /// `None` for leaves.
    pub expanded: Option<bool>,
    pub selected: bool,
}

/// Flattens the visible part of the tree, layers first, in catalog order.
#[must_use]
pub fn tree_rows<'a>(store: &'a Store, tree: &TreeState) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();

    for layer in store.layers().iter() {
        let expanded = tree.is_layer_expanded(&layer.id);
        rows.push(TreeRow {
            node: NodeId::Layer(layer.id.clone()),
            label: &layer.name,
            depth: 0,
            expanded: Some(expanded),
            selected: store.selected_layer_id() == Some(&layer.id),
        });
        if !expanded {
            continue;
        }

        for sphere in store.spheres_of(&layer.id) {
            let expanded = tree.is_sphere_expanded(&sphere.id);
            let has_markers = store.markers_of(&sphere.id).next().is_some();
            rows.push(TreeRow {
                node: NodeId::Sphere(sphere.id.clone()),
                label: &sphere.name,
                depth: 1,
                expanded: has_markers.then_some(expanded),
                selected: store.selected_sphere_id() == Some(&sphere.id),
            });
            if !(expanded && has_markers) {
                continue;
            }

            rows.extend(store.markers_of(&sphere.id).map(|marker| TreeRow {
                node: NodeId::Marker(marker.id.clone()),
                label: &marker.name,
                depth: 2,
                expanded: None,
                selected: store.selected_marker_id() == Some(&marker.id),
            }));
        }
    }

    rows
}

#[derive(Debug, Clone)]
pub enum Message {
    Toggle(NodeId),
    Select(NodeId),
    EditLayer(LayerId),
    EditMarker(MarkerId),
}

/// Events propagated to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    SelectLayer(LayerId),
    SelectSphere(SphereId),
    SelectMarker(MarkerId),
    EditLayer(LayerId),
    EditMarker(MarkerId),
}

pub fn update(tree: &mut TreeState, message: Message) -> Event {
    match message {
        Message::Toggle(NodeId::Layer(id)) => {
            tree.toggle_layer(&id);
            Event::None
        }
        Message::Toggle(NodeId::Sphere(id)) => {
            tree.toggle_sphere(&id);
            Event::None
        }
        Message::Toggle(NodeId::Marker(_)) => Event::None,
        Message::Select(NodeId::Layer(id)) => {
            tree.layers.insert(id.clone());
            Event::SelectLayer(id)
        }
        Message::Select(NodeId::Sphere(id)) => Event::SelectSphere(id),
        Message::Select(NodeId::Marker(id)) => Event::SelectMarker(id),
        Message::EditLayer(id) => Event::EditLayer(id),
        Message::EditMarker(id) => Event::EditMarker(id),
    }
}

/// The sidebar panel hosting the tree.
pub fn view<'a>(store: &'a Store, tree: &TreeState, i18n: &I18n) -> Element<'a, Message> {
    let rows = tree_rows(store, tree);

    let body: Element<'a, Message> = if rows.is_empty() {
        text(i18n.tr("sidebar-empty")).size(typography::BODY).into()
    } else {
        scrollable(
            rows.into_iter()
                .fold(Column::new().spacing(spacing::XXS), |column, row| {
                    column.push(tree_row(row, i18n))
                }),
        )
        .height(Length::Fill)
        .into()
    };

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(text(i18n.tr("sidebar-title")).size(typography::TITLE_SM))
            .push(body),
    )
    .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
    .height(Length::Fill)
    .padding(spacing::SM)
    .style(styles::container::panel)
    .into()
}

fn tree_row<'a>(row: TreeRow<'a>, i18n: &I18n) -> Element<'a, Message> {
    let indent = Space::new().width(Length::Fixed(f32::from(row.depth) * sizing::TREE_INDENT));

    let expander: Element<'a, Message> = match row.expanded {
        Some(expanded) => button(text(if expanded { "▾" } else { "▸" }).size(typography::BODY))
            .on_press(Message::Toggle(row.node.clone()))
            .padding([0.0, spacing::XXS])
            .style(styles::button::ghost)
            .into(),
        None => Space::new()
            .width(Length::Fixed(sizing::ICON_SM + spacing::XS))
            .into(),
    };

    let label = button(text(row.label).size(typography::BODY))
        .width(Length::Fill)
        .on_press(Message::Select(row.node.clone()))
        .style(styles::button::tree_item(row.selected));

    let edit = match &row.node {
        NodeId::Layer(id) => Some(Message::EditLayer(id.clone())),
        NodeId::Marker(id) => Some(Message::EditMarker(id.clone())),
        NodeId::Sphere(_) => None,
    }
    .map(|message| {
        button(text(i18n.tr("sidebar-edit")).size(typography::CAPTION))
            .on_press(message)
            .style(styles::button::ghost)
    });

    let mut line = Row::new()
        .spacing(spacing::XXS)
        .align_y(Vertical::Center)
        .push(indent)
        .push(expander)
        .push(label);
    if let Some(edit) = edit {
        line = line.push(edit);
    }
    line.into()
}
