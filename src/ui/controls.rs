// SPDX-License-Identifier: MPL-2.0
//! Buttons injected into the panorama's top-left overlay slot.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Row};
use iced::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayControl {
    ToggleSidebar,
    /// Back to the layer tile grid.
    LayerTileGrid,
}

/// Controls for the current layout. Compact windows have no sidebar, so
/// only the way back to the grid remains.
#[must_use]
pub fn overlay_controls_for(is_desktop: bool) -> &'static [OverlayControl] {
    if is_desktop {
        &[OverlayControl::ToggleSidebar, OverlayControl::LayerTileGrid]
    } else {
        &[OverlayControl::LayerTileGrid]
    }
}

pub fn toggle_sidebar_button<'a, M: Clone + 'a>(
    is_sidebar_open: bool,
    i18n: &I18n,
    on_toggle: M,
) -> Element<'a, M> {
    let key = if is_sidebar_open {
        "controls-hide-sidebar"
    } else {
        "controls-show-sidebar"
    };
    button(text(i18n.tr(key)).size(typography::BODY))
        .on_press(on_toggle)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::overlay)
        .into()
}

pub fn layer_tile_grid_button<'a, M: Clone + 'a>(i18n: &I18n, on_press: M) -> Element<'a, M> {
    button(text(i18n.tr("controls-layer-grid")).size(typography::BODY))
        .on_press(on_press)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::overlay)
        .into()
}

/// Renders `controls`, usually the list picked by [`overlay_controls_for`].
pub fn overlay_controls<'a, M: Clone + 'a>(
    controls: &[OverlayControl],
    is_sidebar_open: bool,
    i18n: &I18n,
    on_toggle_sidebar: M,
    on_clear_selection: M,
) -> Element<'a, M> {
    controls
        .iter()
        .fold(Row::new().spacing(spacing::XS), |row, control| match control {
            OverlayControl::ToggleSidebar => row.push(toggle_sidebar_button(
                is_sidebar_open,
                i18n,
                on_toggle_sidebar.clone(),
            )),
            OverlayControl::LayerTileGrid => {
                row.push(layer_tile_grid_button(i18n, on_clear_selection.clone()))
            }
        })
        .into()
}
