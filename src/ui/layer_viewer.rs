// SPDX-License-Identifier: MPL-2.0
//! Layer editor shown in the layer modal.
//!
//! Edits happen on a [`LayerDraft`]; the store is only touched when the
//! draft is saved.

use crate::domain::{LayerData, LayerId};
use crate::i18n::fluent::I18n;
use crate::store::{Action, Store};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::{button, text, text_input, Column, Row, Space};
use iced::{Element, Length};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Fields {
    name: String,
    description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDraft {
    id: LayerId,
    edited: Fields,
    original: Fields,
}

impl LayerDraft {
    #[must_use]
    pub fn from_layer(layer: &LayerData) -> Self {
        let fields = Fields {
            name: layer.name.clone(),
            description: layer.description.clone(),
        };
        Self {
            id: layer.id.clone(),
            edited: fields.clone(),
            original: fields,
        }
    }

    #[must_use]
    pub fn id(&self) -> &LayerId {
        &self.id
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.edited != self.original
    }

    /// i18n key of the validation error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.edited
            .name
            .trim()
            .is_empty()
            .then_some("editor-error-name-required")
    }

    fn to_action(&self) -> Action {
        Action::UpdateLayer {
            id: self.id.clone(),
            name: self.edited.name.trim().to_string(),
            description: self.edited.description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    DescriptionChanged(String),
    Save,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Apply the action, then close the modal.
    Save(Action),
    Close,
}

pub fn update(draft: &mut LayerDraft, message: Message) -> Event {
    match message {
        Message::NameChanged(name) => {
            draft.edited.name = name;
            Event::None
        }
        Message::DescriptionChanged(description) => {
            draft.edited.description = description;
            Event::None
        }
        Message::Save => {
            if draft.error().is_some() {
                return Event::None;
            }
            if !draft.has_changes() {
                return Event::Close;
            }
            Event::Save(draft.to_action())
        }
        Message::Cancel => Event::Close,
    }
}

pub fn view<'a>(draft: &'a LayerDraft, store: &'a Store, i18n: &I18n) -> Element<'a, Message> {
    let spheres = store.spheres_of(&draft.id).count().to_string();

    let mut form = Column::new()
        .spacing(spacing::SM)
        .push(
            text(i18n.tr_with_args("layer-tile-spheres", &[("count", &spheres)]))
                .size(typography::CAPTION),
        )
        .push(text(i18n.tr("editor-name")).size(typography::BODY))
        .push(
            text_input(&i18n.tr("editor-name"), &draft.edited.name)
                .on_input(Message::NameChanged)
                .padding(spacing::XS),
        )
        .push(text(i18n.tr("editor-description")).size(typography::BODY))
        .push(
            text_input(&i18n.tr("editor-description"), &draft.edited.description)
                .on_input(Message::DescriptionChanged)
                .padding(spacing::XS),
        );

    if let Some(key) = draft.error() {
        form = form.push(
            text(i18n.tr(key))
                .size(typography::CAPTION)
                .style(iced::widget::text::danger),
        );
    }

    let save = button(text(i18n.tr("editor-save")))
        .on_press_maybe(draft.error().is_none().then_some(Message::Save))
        .style(styles::button::primary);
    let cancel = button(text(i18n.tr("editor-cancel")))
        .on_press(Message::Cancel)
        .style(styles::button::secondary);

    form.push(
        Row::new()
            .spacing(spacing::XS)
            .align_y(Vertical::Center)
            .push(Space::new().width(Length::Fill))
            .push(cancel)
            .push(save),
    )
    .into()
}
