// SPDX-License-Identifier: MPL-2.0
//! Generic modal host.
//!
//! Draws a dimmed backdrop over `base` and a centered card with a title
//! bar. Clicking the backdrop or the close button publishes `on_close`.

use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::{button, center, container, mouse_area, opaque, stack, text, Column, Row};
use iced::{Element, Length};

/// Modal content: title and body.
pub struct ModalNode<'a, M> {
    pub title: String,
    pub body: Element<'a, M>,
}

/// Stacks `node` above `base`, or returns `base` unchanged when `None`.
pub fn host<'a, M: Clone + 'a>(
    base: Element<'a, M>,
    node: Option<ModalNode<'a, M>>,
    on_close: M,
) -> Element<'a, M> {
    let Some(node) = node else {
        return base;
    };

    let title_bar = Row::new()
        .align_y(Vertical::Center)
        .push(
            container(text(node.title).size(typography::TITLE_SM)).width(Length::Fill),
        )
        .push(
            button(text("×").size(typography::TITLE_SM))
                .on_press(on_close.clone())
                .padding([0.0, spacing::XS])
                .style(styles::button::ghost),
        );

    let card = container(
        Column::new()
            .spacing(spacing::MD)
            .push(title_bar)
            .push(node.body),
    )
    .width(Length::Fixed(sizing::MODAL_WIDTH))
    .padding(spacing::LG)
    .style(styles::container::modal_card);

    // The inner `opaque` keeps clicks on the card from reaching the backdrop.
    let backdrop = mouse_area(center(opaque(card)).style(styles::container::modal_backdrop))
        .on_press(on_close);

    stack![base, opaque(backdrop)].into()
}
