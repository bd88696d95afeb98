// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Main action of a form (modal "Save").
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, shadow) = match status {
        button::Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        button::Status::Disabled => (palette::GRAY_400, palette::GRAY_400, shadow::NONE),
        button::Status::Active | button::Status::Pressed => {
            (palette::PRIMARY_500, palette::PRIMARY_600, shadow::NONE)
        }
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Secondary action (modal "Cancel", header menu entries).
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let is_light = matches!(theme, Theme::Light);
    let (background, text_color) = match (status, is_light) {
        (button::Status::Hovered, true) => (palette::GRAY_200, palette::GRAY_900),
        (button::Status::Hovered, false) => (Color::from_rgb(0.35, 0.35, 0.35), WHITE),
        (_, true) => (palette::GRAY_100, palette::GRAY_900),
        (_, false) => (palette::GRAY_700, WHITE),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: palette::GRAY_400,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Buttons floating on top of the panorama.
pub fn overlay(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_HOVER,
        button::Status::Pressed => opacity::SURFACE,
        _ => opacity::OVERLAY_STRONG,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..WHITE
            },
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        snap: true,
    }
}

/// Row of the sidebar tree; `selected` highlights the active node.
pub fn tree_item(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let text_color = theme.extended_palette().background.base.text;
        let background = match (selected, status) {
            (true, _) => Some(Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::PRIMARY_500
            })),
            (false, button::Status::Hovered) => Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            })),
            (false, _) => None,
        };

        button::Style {
            background,
            text_color,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Borderless icon-like button (tree expanders, edit pencils, close crosses).
pub fn ghost(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.extended_palette().background.base.text;
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        _ => None,
    };

    button::Style {
        background,
        text_color,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Layer tile in the grid view.
pub fn tile(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.weak;
    let border_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::PRIMARY_500,
        _ => Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        },
    };

    button::Style {
        background: Some(Background::Color(base.color)),
        text_color: base.text,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: if matches!(status, button::Status::Hovered) {
            shadow::MD
        } else {
            shadow::NONE
        },
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_uses_brand_colors() {
        let style = primary(&Theme::Dark, button::Status::Active);
        assert_eq!(
            style.background,
            Some(Background::Color(palette::PRIMARY_500))
        );
    }

    #[test]
    fn overlay_button_brightens_on_hover() {
        let normal = overlay(&Theme::Dark, button::Status::Active);
        let hover = overlay(&Theme::Dark, button::Status::Hovered);
        assert_ne!(normal.background, hover.background);
    }

    #[test]
    fn selected_tree_item_is_highlighted() {
        let selected = tree_item(true)(&Theme::Light, button::Status::Active);
        let plain = tree_item(false)(&Theme::Light, button::Status::Active);
        assert!(selected.background.is_some());
        assert!(plain.background.is_none());
    }
}
