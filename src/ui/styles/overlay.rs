// SPDX-License-Identifier: MPL-2.0
//! Styles for the cards and readouts drawn over the panorama.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{BLACK, WHITE},
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Dark translucent card with light text, readable over any image.
pub fn indicator(rad: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..BLACK
        })),
        text_color: Some(WHITE),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..WHITE
            },
            width: border::WIDTH_SM,
            radius: rad.into(),
        },
        ..Default::default()
    }
}
