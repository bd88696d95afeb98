// SPDX-License-Identifier: MPL-2.0
//! Informational overlays shown on top of the panorama.

use crate::domain::{MarkerData, MarkerId, Orientation};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::image::Handle;
use iced::widget::{column, container, image, text, Column};
use iced::{Element, Length};

/// Content of the marker info card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerInfo<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
}

impl<'a> MarkerInfo<'a> {
    /// Looks the hovered marker up in `markers`. No match means no card.
    pub fn lookup(markers: &'a [MarkerData], hovered: Option<&MarkerId>) -> Option<Self> {
        let hovered = hovered?;
        markers
            .iter()
            .find(|marker| &marker.id == hovered)
            .map(|marker| Self {
                name: &marker.name,
                description: &marker.description,
                image_url: marker.image_url.as_deref(),
            })
    }
}

/// Card with the hovered marker's name, description and picture.
pub fn marker_info<'a, M: 'a>(info: MarkerInfo<'a>, picture: Option<Handle>) -> Element<'a, M> {
    let mut content: Column<'a, M> = column![text(info.name).size(typography::TITLE_SM)]
        .spacing(spacing::XXS)
        .width(Length::Fixed(sizing::MARKER_INFO_WIDTH));

    if !info.description.is_empty() {
        content = content.push(text(info.description).size(typography::BODY));
    }
    if let Some(picture) = picture {
        content = content.push(
            image(picture)
                .width(Length::Fill)
                .height(Length::Fixed(sizing::MARKER_INFO_IMAGE_HEIGHT)),
        );
    }

    container(content)
        .padding(spacing::SM)
        .style(styles::overlay::indicator(radius::MD))
        .into()
}

/// Formats an angle in degrees with one decimal.
#[must_use]
pub fn format_angle(degrees: f32) -> String {
    format!("{degrees:.1}")
}

/// Yaw / pitch readout.
pub fn yaw_pitch<'a, M: 'a>(orientation: Orientation, i18n: &I18n) -> Element<'a, M> {
    let yaw = i18n.tr_with_args("orientation-yaw", &[("value", &format_angle(orientation.yaw))]);
    let pitch = i18n.tr_with_args(
        "orientation-pitch",
        &[("value", &format_angle(orientation.pitch))],
    );

    container(
        column![
            text(yaw).size(typography::CAPTION),
            text(pitch).size(typography::CAPTION),
        ]
        .spacing(spacing::XXS),
    )
    .padding([spacing::XXS, spacing::XS])
    .style(styles::overlay::indicator(radius::SM))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_markers;

    #[test]
    fn lookup_uses_exactly_the_matching_entry() {
        let markers = sample_markers();
        let hovered = MarkerId::new("m2");

        let info = MarkerInfo::lookup(&markers, Some(&hovered)).expect("m2 exists");
        assert_eq!(
            info,
            MarkerInfo {
                name: "Fire panel",
                description: "Alarm control",
                image_url: Some("markers/m2.jpg"),
            }
        );
    }

    #[test]
    fn lookup_without_match_renders_nothing() {
        let markers = sample_markers();
        let hovered = MarkerId::new("m9");
        assert!(MarkerInfo::lookup(&markers, Some(&hovered)).is_none());
        assert!(MarkerInfo::lookup(&markers, None).is_none());
    }

    #[test]
    fn angles_use_one_decimal() {
        assert_eq!(format_angle(90.0), "90.0");
        assert_eq!(format_angle(-12.345), "-12.3");
    }
}
