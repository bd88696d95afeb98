// SPDX-License-Identifier: MPL-2.0
//! Application header.
//!
//! One implementation renders both variants: the title on the left, the
//! layer drawer (compact only) and the settings menu on the right. The
//! dropdowns open below the bar.

use crate::domain::{LayerData, LayerId};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::alignment::Vertical;
use iced::widget::{button, container, text, Column, Container, Row, Space};
use iced::{Element, Length};

/// Which header layout to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    /// Desktop: title and settings menu.
    Full,
    /// Narrow windows: adds the inline layer drawer.
    Compact,
}

impl HeaderVariant {
    #[must_use]
    pub fn from_is_desktop(is_desktop: bool) -> Self {
        if is_desktop {
            HeaderVariant::Full
        } else {
            HeaderVariant::Compact
        }
    }
}

/// Building blocks of the header bar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPart {
    Title,
    LayerDrawer,
    SettingsMenu,
}

/// The parts rendered for `variant`.
#[must_use]
pub fn layout(variant: HeaderVariant) -> &'static [HeaderPart] {
    match variant {
        HeaderVariant::Full => &[HeaderPart::Title, HeaderPart::SettingsMenu],
        HeaderVariant::Compact => &[
            HeaderPart::Title,
            HeaderPart::LayerDrawer,
            HeaderPart::SettingsMenu,
        ],
    }
}

/// Dropdown state local to the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct State {
    pub menu_open: bool,
    pub drawer_open: bool,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub variant: HeaderVariant,
    pub state: State,
    pub layers: &'a [LayerData],
    pub selected_layer: Option<&'a LayerId>,
    pub theme_mode: ThemeMode,
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleMenu,
    ToggleDrawer,
    DrawerLayerPressed(LayerId),
    CycleTheme,
    CycleLanguage,
    Reload,
}

/// Events propagated to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    SelectLayer(LayerId),
    CycleTheme,
    CycleLanguage,
    Reload,
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::ToggleMenu => {
            state.menu_open = !state.menu_open;
            state.drawer_open = false;
            Event::None
        }
        Message::ToggleDrawer => {
            state.drawer_open = !state.drawer_open;
            state.menu_open = false;
            Event::None
        }
        Message::DrawerLayerPressed(id) => {
            state.drawer_open = false;
            Event::SelectLayer(id)
        }
        // Theme and language stay open so the user can keep cycling.
        Message::CycleTheme => Event::CycleTheme,
        Message::CycleLanguage => Event::CycleLanguage,
        Message::Reload => {
            state.menu_open = false;
            Event::Reload
        }
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut bar = Row::new()
        .spacing(spacing::SM)
        .padding([spacing::XS, spacing::MD])
        .height(Length::Fixed(sizing::HEADER_HEIGHT))
        .align_y(Vertical::Center);

    for part in layout(ctx.variant) {
        bar = match part {
            HeaderPart::Title => bar.push(
                Container::new(text(ctx.i18n.tr("window-title")).size(typography::TITLE_MD))
                    .width(Length::Fill),
            ),
            HeaderPart::LayerDrawer => bar.push(
                button(text(ctx.i18n.tr("header-layers")).size(typography::BODY))
                    .on_press(Message::ToggleDrawer)
                    .style(styles::button::secondary),
            ),
            HeaderPart::SettingsMenu => bar.push(
                button(text("⋮").size(typography::TITLE_SM))
                    .on_press(Message::ToggleMenu)
                    .padding([spacing::XXS, spacing::SM])
                    .style(styles::button::ghost),
            ),
        };
    }

    let mut content = Column::new()
        .width(Length::Fill)
        .push(container(bar).style(styles::container::header));

    if ctx.state.drawer_open && layout(ctx.variant).contains(&HeaderPart::LayerDrawer) {
        content = content.push(drawer(&ctx));
    }
    if ctx.state.menu_open {
        content = content.push(settings_menu(&ctx));
    }

    content.into()
}

fn drawer<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let items: Column<'a, Message> = if ctx.layers.is_empty() {
        Column::new().push(text(ctx.i18n.tr("layer-grid-empty")).size(typography::BODY))
    } else {
        ctx.layers.iter().fold(Column::new(), |column, layer| {
            let selected = ctx.selected_layer == Some(&layer.id);
            column.push(
                button(text(layer.name.as_str()).size(typography::BODY))
                    .width(Length::Fill)
                    .on_press(Message::DrawerLayerPressed(layer.id.clone()))
                    .style(styles::button::tree_item(selected)),
            )
        })
    };

    Container::new(items.spacing(spacing::XXS))
        .width(Length::Fill)
        .padding(spacing::XS)
        .style(styles::container::menu)
        .into()
}

fn settings_menu<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let theme_label = ctx.i18n.tr_with_args(
        "menu-theme",
        &[("mode", &ctx.i18n.tr(ctx.theme_mode.i18n_key()))],
    );
    let language_label = ctx.i18n.tr_with_args(
        "menu-language",
        &[("language", &ctx.i18n.current_locale().to_string())],
    );

    let column = Column::new()
        .spacing(spacing::XXS)
        .push(menu_item(theme_label, Message::CycleTheme))
        .push(menu_item(language_label, Message::CycleLanguage))
        .push(menu_item(ctx.i18n.tr("menu-reload"), Message::Reload));

    Row::new()
        .push(Space::new().width(Length::Fill))
        .push(
            Container::new(column)
                .padding(spacing::XS)
                .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
                .style(styles::container::menu),
        )
        .padding([0.0, spacing::MD])
        .into()
}

fn menu_item<'a>(label: String, message: Message) -> Element<'a, Message> {
    button(text(label).size(typography::BODY))
        .width(Length::Fill)
        .on_press(message)
        .style(styles::button::ghost)
        .into()
}
