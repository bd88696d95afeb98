// SPDX-License-Identifier: MPL-2.0
//! Grid of layer tiles shown while no sphere is selected.

use crate::catalog::{self, CatalogSource};
use crate::domain::{LayerData, LayerId};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::store::Store;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::Horizontal;
use iced::widget::image::Handle;
use iced::widget::{button, center, image, responsive, scrollable, text, Column, Container, Row};
use iced::{ContentFit, Element, Length, Size, Task};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum Message {
    TilePressed(LayerId),
    ThumbnailLoaded {
        reference: String,
        result: Result<Handle, Error>,
    },
}

#[derive(Debug, Clone)]
enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}

/// Thumbnail cache keyed by catalog reference.
#[derive(Debug, Default)]
pub struct State {
    thumbnails: HashMap<String, Thumbnail>,
}

impl State {
    /// Starts loading the thumbnails of `layers` that are not cached yet.
    pub fn load_thumbnails(&mut self, source: &CatalogSource, layers: &[LayerData]) -> Task<Message> {
        let mut tasks = Vec::new();
        for reference in layers.iter().filter_map(|layer| layer.thumbnail.clone()) {
            if self.thumbnails.contains_key(&reference) {
                continue;
            }
            self.thumbnails.insert(reference.clone(), Thumbnail::Loading);

            let source = source.clone();
            let key = reference.clone();
            tasks.push(Task::perform(
                async move {
                    catalog::read_asset(source, reference)
                        .await
                        .map(Handle::from_bytes)
                },
                move |result| Message::ThumbnailLoaded {
                    reference: key,
                    result,
                },
            ));
        }
        Task::batch(tasks)
    }

    /// Forgets cached thumbnails so the next load refetches them.
    pub fn clear(&mut self) {
        self.thumbnails.clear();
    }

    /// Stores a loaded thumbnail and returns the pressed layer, if any.
    pub fn update(&mut self, message: Message) -> Option<LayerId> {
        match message {
            Message::TilePressed(id) => Some(id),
            Message::ThumbnailLoaded { reference, result } => {
                let thumbnail = match result {
                    Ok(handle) => Thumbnail::Ready(handle),
                    Err(err) => {
                        log::warn!("failed to load thumbnail {reference}: {err}");
                        Thumbnail::Failed
                    }
                };
                self.thumbnails.insert(reference, thumbnail);
                None
            }
        }
    }

    fn handle(&self, reference: Option<&str>) -> Option<&Handle> {
        match self.thumbnails.get(reference?) {
            Some(Thumbnail::Ready(handle)) => Some(handle),
            Some(Thumbnail::Loading | Thumbnail::Failed) | None => None,
        }
    }
}

/// Number of tile columns that fit in `width`, at least one.
#[must_use]
pub fn columns_for(width: f32) -> usize {
    let slot = sizing::TILE_WIDTH + spacing::MD;
    // Leading padding plus one gap per tile.
    let usable = (width - spacing::MD).max(0.0);
    ((usable / slot).floor() as usize).max(1)
}

pub fn view<'a>(state: &'a State, store: &'a Store, i18n: &'a I18n) -> Element<'a, Message> {
    if store.layers().is_empty() {
        return center(text(i18n.tr("layer-grid-empty")).size(typography::BODY_LG)).into();
    }

    responsive(move |available: Size| grid(state, store, i18n, columns_for(available.width)))
        .into()
}

fn grid<'a>(
    state: &'a State,
    store: &'a Store,
    i18n: &'a I18n,
    columns: usize,
) -> Element<'a, Message> {
    let rows = store.layers().chunks(columns).fold(
        Column::new().spacing(spacing::MD),
        |column, chunk| {
            let row = chunk.iter().fold(Row::new().spacing(spacing::MD), |row, layer| {
                row.push(tile(state, store, i18n, layer))
            });
            column.push(row)
        },
    );

    scrollable(
        Container::new(rows)
            .width(Length::Fill)
            .padding(spacing::MD)
            .align_x(Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn tile<'a>(
    state: &'a State,
    store: &'a Store,
    i18n: &'a I18n,
    layer: &'a LayerData,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match state.handle(layer.thumbnail.as_deref()) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::TILE_IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => Container::new(center(
            text(layer.name.chars().next().map(String::from).unwrap_or_default())
                .size(typography::TITLE_MD),
        ))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::TILE_IMAGE_HEIGHT))
        .style(styles::container::tile_placeholder)
        .into(),
    };

    let count = store.spheres_of(&layer.id).count().to_string();
    let mut body = Column::new()
        .spacing(spacing::XXS)
        .push(preview)
        .push(text(layer.name.as_str()).size(typography::BODY_LG))
        .push(
            text(i18n.tr_with_args("layer-tile-spheres", &[("count", &count)]))
                .size(typography::CAPTION),
        );
    if !layer.description.is_empty() {
        body = body.push(text(layer.description.as_str()).size(typography::CAPTION));
    }

    button(body)
        .width(Length::Fixed(sizing::TILE_WIDTH))
        .padding(spacing::XS)
        .on_press(Message::TilePressed(layer.id.clone()))
        .style(styles::button::tile)
        .into()
}
