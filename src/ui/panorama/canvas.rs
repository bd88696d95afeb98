// SPDX-License-Identifier: MPL-2.0
//! Interaction layer drawn above the rendered viewport.
//!
//! Turns pointer input into rotation deltas and marker hover/click events,
//! and draws the projected marker pins.

use super::drag::DragState;
use super::{CanvasMessage, Message};
use crate::domain::MarkerId;
use crate::engine::ProjectedMarker;
use crate::ui::design_tokens::{border, palette};
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::widget::Action;
use iced::{mouse, Color, Point, Rectangle, Renderer, Size, Theme};

/// Radius of a marker pin, in logical pixels.
pub const MARKER_RADIUS: f32 = 9.0;

/// Extra slack around a pin that still counts as a hit.
const HIT_SLOP: f32 = 4.0;

pub struct MarkerLayer<'a> {
    pub markers: Vec<ProjectedMarker>,
    pub hovered: Option<&'a MarkerId>,
}

/// Returns the marker under `point`, the closest one when pins overlap.
pub fn hit_test<'a>(
    markers: &'a [ProjectedMarker],
    size: Size,
    point: Point,
) -> Option<&'a MarkerId> {
    let reach = MARKER_RADIUS + HIT_SLOP;
    markers
        .iter()
        .map(|marker| {
            let center = Point::new(marker.x * size.width, marker.y * size.height);
            (marker, center.distance(point))
        })
        .filter(|(_, distance)| *distance <= reach)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(marker, _)| &marker.id)
}

impl canvas::Program<Message> for MarkerLayer<'_> {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                if let Some(id) = hit_test(&self.markers, bounds.size(), position) {
                    return Some(
                        Action::publish(Message::Canvas(CanvasMessage::MarkerClicked(
                            id.clone(),
                        )))
                        .and_capture(),
                    );
                }
                state.start(position);
                Some(Action::capture())
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.is_dragging() {
                    state.stop();
                    return Some(Action::capture());
                }
                None
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let Some(position) = cursor.position_in(bounds) else {
                    state.stop();
                    return self.hover_changed(None);
                };
                if state.is_dragging() {
                    let delta = state.advance(position)?;
                    return Some(
                        Action::publish(Message::Canvas(CanvasMessage::Rotate {
                            dx: delta.x,
                            dy: delta.y,
                        }))
                        .and_capture(),
                    );
                }
                self.hover_changed(hit_test(&self.markers, bounds.size(), position))
            }
            iced::Event::Mouse(mouse::Event::CursorLeft) => {
                state.stop();
                self.hover_changed(None)
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        for marker in &self.markers {
            let center = Point::new(marker.x * bounds.width, marker.y * bounds.height);
            let hovered = self.hovered == Some(&marker.id);
            let radius = if hovered {
                MARKER_RADIUS + 2.0
            } else {
                MARKER_RADIUS
            };
            let fill = if marker.focused {
                palette::WARNING_500
            } else if hovered {
                palette::PRIMARY_400
            } else {
                palette::PRIMARY_500
            };

            let pin = Path::circle(center, radius);
            frame.fill(&pin, fill);
            frame.stroke(
                &pin,
                Stroke::default()
                    .with_color(Color::WHITE)
                    .with_width(border::WIDTH_MD),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.is_dragging() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if hit_test(&self.markers, bounds.size(), position).is_some() => {
                mouse::Interaction::Pointer
            }
            Some(_) => mouse::Interaction::Grab,
            None => mouse::Interaction::default(),
        }
    }
}

impl MarkerLayer<'_> {
    fn hover_changed(&self, hit: Option<&MarkerId>) -> Option<Action<Message>> {
        if hit == self.hovered {
            return None;
        }
        Some(Action::publish(Message::Canvas(
            CanvasMessage::MarkerHovered(hit.cloned()),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projected(id: &str, x: f32, y: f32) -> ProjectedMarker {
        ProjectedMarker {
            id: MarkerId::new(id),
            x,
            y,
            focused: false,
        }
    }

    #[test]
    fn hit_test_finds_marker_under_pointer() {
        let markers = vec![projected("a", 0.25, 0.5), projected("b", 0.75, 0.5)];
        let size = Size::new(400.0, 200.0);

        let hit = hit_test(&markers, size, Point::new(302.0, 101.0));
        assert_eq!(hit.map(MarkerId::as_str), Some("b"));
    }

    #[test]
    fn hit_test_misses_empty_space() {
        let markers = vec![projected("a", 0.25, 0.5)];
        let hit = hit_test(&markers, Size::new(400.0, 200.0), Point::new(200.0, 100.0));
        assert!(hit.is_none());
    }

    #[test]
    fn hit_test_prefers_closest_of_overlapping_pins() {
        let markers = vec![projected("far", 0.5, 0.5), projected("near", 0.52, 0.5)];
        let hit = hit_test(&markers, Size::new(400.0, 200.0), Point::new(209.0, 100.0));
        assert_eq!(hit.map(MarkerId::as_str), Some("near"));
    }
}
