// SPDX-License-Identifier: MPL-2.0
//! Marker editor shown in the marker modal.

use crate::domain::{MarkerData, MarkerId};
use crate::i18n::fluent::I18n;
use crate::store::{Action, Store};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::panorama::overlay::format_angle;
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::{button, text, text_input, Column, Row, Space};
use iced::{Element, Length};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Fields {
    name: String,
    description: String,
    image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDraft {
    id: MarkerId,
    yaw: f32,
    pitch: f32,
    edited: Fields,
    original: Fields,
}

impl MarkerDraft {
    #[must_use]
    pub fn from_marker(marker: &MarkerData) -> Self {
        let fields = Fields {
            name: marker.name.clone(),
            description: marker.description.clone(),
            image_url: marker.image_url.clone().unwrap_or_default(),
        };
        Self {
            id: marker.id.clone(),
            yaw: marker.yaw,
            pitch: marker.pitch,
            edited: fields.clone(),
            original: fields,
        }
    }

    #[must_use]
    pub fn id(&self) -> &MarkerId {
        &self.id
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.edited != self.original
    }

    /// i18n key of the first validation error.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        if self.edited.name.trim().is_empty() {
            return Some("editor-error-name-required");
        }
        if self.edited.image_url.trim().contains(char::is_whitespace) {
            return Some("editor-error-image-url");
        }
        None
    }

    fn to_action(&self) -> Action {
        let image_url = self.edited.image_url.trim();
        Action::UpdateMarker {
            id: self.id.clone(),
            name: self.edited.name.trim().to_string(),
            description: self.edited.description.trim().to_string(),
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    DescriptionChanged(String),
    ImageUrlChanged(String),
    Save,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    Save(Action),
    Close,
}

pub fn update(draft: &mut MarkerDraft, message: Message) -> Event {
    match message {
        Message::NameChanged(value) => {
            draft.edited.name = value;
            Event::None
        }
        Message::DescriptionChanged(value) => {
            draft.edited.description = value;
            Event::None
        }
        Message::ImageUrlChanged(value) => {
            draft.edited.image_url = value;
            Event::None
        }
        Message::Save => match (draft.error(), draft.has_changes()) {
            (Some(_), _) => Event::None,
            (None, false) => Event::Close,
            (None, true) => Event::Save(draft.to_action()),
        },
        Message::Cancel => Event::Close,
    }
}

pub fn view<'a>(draft: &'a MarkerDraft, store: &'a Store, i18n: &I18n) -> Element<'a, Message> {
    let sphere = store
        .marker(&draft.id)
        .and_then(|marker| store.sphere(&marker.sphere_id))
        .map(|sphere| sphere.name.as_str())
        .unwrap_or_default();
    let placement = i18n.tr_with_args(
        "marker-placement",
        &[
            ("sphere", sphere),
            ("yaw", &format_angle(draft.yaw)),
            ("pitch", &format_angle(draft.pitch)),
        ],
    );

    let field = |label: String,
                 value: &'a str,
                 on_input: fn(String) -> Message|
     -> Column<'a, Message> {
        Column::new()
            .spacing(spacing::XXS)
            .push(text(label.clone()).size(typography::BODY))
            .push(
                text_input(&label, value)
                    .on_input(on_input)
                    .padding(spacing::XS),
            )
    };

    let mut form = Column::new()
        .spacing(spacing::SM)
        .push(text(placement).size(typography::CAPTION))
        .push(field(
            i18n.tr("editor-name"),
            &draft.edited.name,
            Message::NameChanged,
        ))
        .push(field(
            i18n.tr("editor-description"),
            &draft.edited.description,
            Message::DescriptionChanged,
        ))
        .push(field(
            i18n.tr("editor-image-url"),
            &draft.edited.image_url,
            Message::ImageUrlChanged,
        ));

    if let Some(key) = draft.error() {
        form = form.push(
            text(i18n.tr(key))
                .size(typography::CAPTION)
                .style(iced::widget::text::danger),
        );
    }

    form.push(
        Row::new()
            .spacing(spacing::XS)
            .align_y(Vertical::Center)
            .push(Space::new().width(Length::Fill))
            .push(
                button(text(i18n.tr("editor-cancel")))
                    .on_press(Message::Cancel)
                    .style(styles::button::secondary),
            )
            .push(
                button(text(i18n.tr("editor-save")))
                    .on_press_maybe(draft.error().is_none().then_some(Message::Save))
                    .style(styles::button::primary),
            ),
    )
    .into()
}
