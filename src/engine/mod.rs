// SPDX-License-Identifier: MPL-2.0
//! Sphere engine port.
//!
//! The panorama viewer drives a rendering engine through these traits and
//! never depends on a concrete implementation. [`equirect`] provides the
//! built-in software engine; tests plug in recording doubles.
//!
//! # Lifecycle
//!
//! 1. [`EngineFactory::construct`] binds a new engine to a viewer container
//! 2. The viewer wraps it in an [`EngineHandle`] tagged with a [`Generation`]
//! 3. Commands (`change_layer`, `change_sphere`, `focus_marker`,
//!    `set_markers`) are issued as the selection changes
//! 4. Dropping the handle calls [`SphereEngine::destroy`] exactly once
//!
//! # Design Notes
//!
//! - Methods are not `async`; image decoding happens in an Iced `Task`
//!   and is handed over with [`SphereEngine::attach_panorama`]
//! - `position()` returns `None` until the engine has something to show

pub mod equirect;

use crate::domain::{LayerData, MarkerData, MarkerId, Position, SphereData, SphereId};
use crate::error::Result;
use iced::widget::image::Handle;
use std::fmt;
use std::sync::Arc;

pub use equirect::{EquirectEngine, EquirectFactory};

/// Description of the area an engine renders into.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerContainer {
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,
    /// Radians of camera rotation per dragged pixel.
    pub drag_sensitivity: f32,
    /// Largest width of a rendered viewport, in pixels.
    pub max_render_width: u32,
}

impl Default for ViewerContainer {
    fn default() -> Self {
        Self {
            fov_degrees: crate::config::DEFAULT_FOV_DEGREES,
            drag_sensitivity: crate::config::DEFAULT_DRAG_SENSITIVITY,
            max_render_width: crate::config::DEFAULT_MAX_RENDER_WIDTH,
        }
    }
}

/// Decoded equirectangular panorama (RGBA8).
#[derive(Clone, PartialEq)]
pub struct Panorama {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<Vec<u8>>,
}

impl fmt::Debug for Panorama {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panorama")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Panorama {
    /// Decodes an encoded image (JPEG, PNG, WebP) into RGBA pixels.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image_rs::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            pixels: Arc::new(image.into_raw()),
        })
    }
}

/// A marker placed in the current viewport, in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMarker {
    pub id: MarkerId,
    /// 0.0 = left edge, 1.0 = right edge.
    pub x: f32,
    /// 0.0 = top edge, 1.0 = bottom edge.
    pub y: f32,
    pub focused: bool,
}

/// What the engine currently shows.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub image: Handle,
    pub markers: Vec<ProjectedMarker>,
}

/// Port implemented by sphere rendering engines.
pub trait SphereEngine: fmt::Debug {
    /// Releases every resource held by the engine. Called once, by
    /// [`EngineHandle`]'s `Drop`.
    fn destroy(&mut self);

    /// Current camera position in radians, or `None` when not ready.
    fn position(&self) -> Option<Position>;

    /// Switches the map overlay to the given layer.
    fn change_layer(&mut self, layer: Option<&LayerData>);

    /// Switches the active sphere. The panorama image arrives later
    /// through [`attach_panorama`](Self::attach_panorama).
    fn change_sphere(&mut self, sphere: Option<&SphereData>);

    /// Replaces the markers placed on the active sphere.
    fn set_markers(&mut self, markers: &[MarkerData]);

    /// Turns the camera towards a marker and highlights it.
    fn focus_marker(&mut self, marker: Option<&MarkerData>);

    /// Hands over a decoded panorama. Returns `false` when the engine has
    /// moved on to another sphere and the image was discarded.
    fn attach_panorama(&mut self, sphere: &SphereId, panorama: Panorama) -> bool;

    /// Rotates the camera by a delta in radians.
    fn rotate(&mut self, delta: Position);

    /// Rendered viewport and projected markers, if ready.
    fn snapshot(&self) -> Option<Snapshot>;
}

/// Creates engines bound to a container.
pub trait EngineFactory {
    /// # Errors
    ///
    /// Returns [`Error::Engine`](crate::error::Error::Engine) when the
    /// engine cannot be created.
    fn construct(&self, container: &ViewerContainer) -> Result<Box<dyn SphereEngine>>;
}

/// Token identifying one engine instance for the lifetime of the viewer.
///
/// Frame callbacks carry the generation they were scheduled for, so a
/// callback that outlives its instance can be recognized and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn first() -> Self {
        Self(1)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Owned engine instance. Dropping it destroys the engine.
#[derive(Debug)]
pub struct EngineHandle {
    engine: Box<dyn SphereEngine>,
    generation: Generation,
}

impl EngineHandle {
    /// Constructs a new engine through `factory`.
    pub fn open(
        factory: &dyn EngineFactory,
        container: &ViewerContainer,
        generation: Generation,
    ) -> Result<Self> {
        let engine = factory.construct(container)?;
        log::debug!("sphere engine {} constructed", generation.value());
        Ok(Self { engine, generation })
    }

    /// Destroys the engine now. Equivalent to dropping the handle.
    pub fn close(self) {
        drop(self);
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Camera position in radians, if the engine is ready.
    #[must_use]
    pub fn current_position(&self) -> Option<Position> {
        self.engine.position()
    }

    pub fn engine(&self) -> &dyn SphereEngine {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn SphereEngine {
        self.engine.as_mut()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.engine.destroy();
        log::debug!("sphere engine {} destroyed", self.generation.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EngineCall, RecordingFactory};

    #[test]
    fn generations_increase() {
        let first = Generation::first();
        assert!(first.next() > first);
        assert_eq!(first.next().value(), 2);
    }

    #[test]
    fn dropping_handle_destroys_engine_once() {
        let factory = RecordingFactory::new();
        let handle =
            EngineHandle::open(&factory, &ViewerContainer::default(), Generation::first())
                .unwrap();
        handle.close();

        assert_eq!(
            factory.journal.calls(),
            vec![EngineCall::Construct(1), EngineCall::Destroy(1)]
        );
    }

    #[test]
    fn failed_construction_yields_error_and_no_instance() {
        let factory = RecordingFactory::failing();
        let result = EngineHandle::open(&factory, &ViewerContainer::default(), Generation::first());
        assert!(result.is_err());
        assert!(factory.journal.calls().is_empty());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Panorama::decode(b"not an image").is_err());
    }

    #[test]
    fn decode_reads_png_dimensions() {
        let image = image_rs::RgbaImage::from_pixel(4, 2, image_rs::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image_rs::DynamicImage::ImageRgba8(image)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image_rs::ImageFormat::Png,
            )
            .unwrap();

        let panorama = Panorama::decode(&bytes).unwrap();
        assert_eq!((panorama.width, panorama.height), (4, 2));
        assert_eq!(panorama.pixels.len(), 4 * 2 * 4);
    }
}
