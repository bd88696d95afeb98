// SPDX-License-Identifier: MPL-2.0
//! 360° panorama viewer.
//!
//! Wraps a sphere engine behind [`component::State`], which owns the engine
//! handle, forwards selection changes to it and samples the camera
//! orientation every frame.

pub mod canvas;
pub mod component;
pub mod drag;
pub mod overlay;
pub mod sync;

pub use component::{Effect, State, SyncContext, ViewContext};

use crate::domain::{MarkerId, SphereId};
use crate::engine::{Generation, Panorama};
use crate::error::Error;
use iced::widget::image::Handle;

/// Pointer interaction on the marker layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMessage {
    /// Drag movement in logical pixels.
    Rotate { dx: f32, dy: f32 },
    MarkerHovered(Option<MarkerId>),
    MarkerClicked(MarkerId),
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Animation frame scheduled for the engine of this generation.
    Frame(Generation),
    PanoramaLoaded {
        generation: Generation,
        sphere: SphereId,
        result: Result<Panorama, Error>,
    },
    PictureLoaded {
        reference: String,
        result: Result<Handle, Error>,
    },
    Canvas(CanvasMessage),
}
