// SPDX-License-Identifier: MPL-2.0
//! Software equirectangular engine.
//!
//! The viewport is a crop of the equirectangular panorama centred on the
//! camera direction, sampled modulo the panorama width so it wraps around
//! the seam. Marker projection uses the same mapping, so hit testing in the
//! overlay lines up with what is drawn.

use super::{EngineFactory, Panorama, ProjectedMarker, Snapshot, SphereEngine, ViewerContainer};
use crate::domain::{LayerData, LayerId, MarkerData, MarkerId, Position, SphereData, SphereId};
use crate::error::{Error, Result};
use iced::widget::image::Handle;
use image_rs::imageops::{self, FilterType};
use image_rs::RgbaImage;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Height / width ratio of the rendered viewport.
const VIEWPORT_ASPECT: f32 = 9.0 / 16.0;

/// Creates [`EquirectEngine`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct EquirectFactory;

impl EngineFactory for EquirectFactory {
    fn construct(&self, container: &ViewerContainer) -> Result<Box<dyn SphereEngine>> {
        if !(container.fov_degrees > 0.0 && container.fov_degrees <= 360.0) {
            return Err(Error::Engine(format!(
                "field of view out of range: {}",
                container.fov_degrees
            )));
        }
        if container.max_render_width == 0 {
            return Err(Error::Engine("render width must be positive".into()));
        }
        Ok(Box::new(EquirectEngine::new(container.clone())))
    }
}

#[derive(Debug)]
pub struct EquirectEngine {
    container: ViewerContainer,
    camera: Position,
    layer: Option<LayerId>,
    sphere: Option<SphereId>,
    markers: Vec<MarkerData>,
    focused: Option<MarkerId>,
    panorama: Option<Panorama>,
    rendered: Option<Handle>,
    destroyed: bool,
}

impl EquirectEngine {
    #[must_use]
    pub fn new(container: ViewerContainer) -> Self {
        Self {
            container,
            camera: Position::default(),
            layer: None,
            sphere: None,
            markers: Vec::new(),
            focused: None,
            panorama: None,
            rendered: None,
            destroyed: false,
        }
    }

    /// Layer whose map is shown alongside the sphere.
    #[must_use]
    pub fn layer(&self) -> Option<&LayerId> {
        self.layer.as_ref()
    }

    #[must_use]
    pub fn sphere(&self) -> Option<&SphereId> {
        self.sphere.as_ref()
    }

    #[must_use]
    pub fn focused_marker(&self) -> Option<&MarkerId> {
        self.focused.as_ref()
    }

    fn set_camera(&mut self, camera: Position) {
        self.camera = Position::new(
            wrap_angle(camera.yaw),
            camera.pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
        );
        self.render();
    }

    fn render(&mut self) {
        self.rendered = self.panorama.as_ref().map(|panorama| {
            let viewport = render_viewport(panorama, self.camera, &self.container);
            let (width, height) = viewport.dimensions();
            Handle::from_rgba(width, height, viewport.into_raw())
        });
    }

    fn project_markers(&self) -> Vec<ProjectedMarker> {
        let hfov = self.container.fov_degrees.to_radians();
        let vfov = vertical_fov(hfov);
        let center_pitch = view_center_pitch(self.camera.pitch, vfov);

        self.markers
            .iter()
            .filter_map(|marker| {
                let dyaw = wrap_angle(marker.yaw.to_radians() - self.camera.yaw);
                let x = 0.5 + dyaw / hfov;
                let y = 0.5 - (marker.pitch.to_radians() - center_pitch) / vfov;
                let visible = (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y);
                visible.then(|| ProjectedMarker {
                    id: marker.id.clone(),
                    x,
                    y,
                    focused: self.focused.as_ref() == Some(&marker.id),
                })
            })
            .collect()
    }
}

impl SphereEngine for EquirectEngine {
    fn destroy(&mut self) {
        self.destroyed = true;
        self.panorama = None;
        self.rendered = None;
        self.markers.clear();
    }

    fn position(&self) -> Option<Position> {
        if self.destroyed || self.panorama.is_none() {
            return None;
        }
        Some(self.camera)
    }

    fn change_layer(&mut self, layer: Option<&LayerData>) {
        self.layer = layer.map(|layer| layer.id.clone());
    }

    fn change_sphere(&mut self, sphere: Option<&SphereData>) {
        self.sphere = sphere.map(|sphere| sphere.id.clone());
        self.markers.clear();
        self.focused = None;
        self.panorama = None;
        self.camera = Position::default();
        self.rendered = None;
    }

    fn set_markers(&mut self, markers: &[MarkerData]) {
        self.markers = match &self.sphere {
            Some(id) => markers
                .iter()
                .filter(|marker| &marker.sphere_id == id)
                .cloned()
                .collect(),
            None => Vec::new(),
        };
    }

    fn focus_marker(&mut self, marker: Option<&MarkerData>) {
        self.focused = marker.map(|marker| marker.id.clone());
        match marker {
            Some(marker) if self.sphere.as_ref() == Some(&marker.sphere_id) => {
                self.set_camera(Position::new(
                    marker.yaw.to_radians(),
                    marker.pitch.to_radians(),
                ));
            }
            _ => {}
        }
    }

    fn attach_panorama(&mut self, sphere: &SphereId, panorama: Panorama) -> bool {
        if self.destroyed || self.sphere.as_ref() != Some(sphere) {
            return false;
        }
        let expected = panorama.width as usize * panorama.height as usize * 4;
        if panorama.width == 0 || panorama.height == 0 || panorama.pixels.len() != expected {
            log::warn!("discarding panorama for {sphere} with inconsistent dimensions");
            return false;
        }
        self.panorama = Some(panorama);
        self.render();
        true
    }

    fn rotate(&mut self, delta: Position) {
        self.set_camera(Position::new(
            self.camera.yaw + delta.yaw,
            self.camera.pitch + delta.pitch,
        ));
    }

    fn snapshot(&self) -> Option<Snapshot> {
        self.rendered.clone().map(|image| Snapshot {
            image,
            markers: self.project_markers(),
        })
    }
}

/// Wraps an angle into `[-π, π)`.
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

fn vertical_fov(hfov: f32) -> f32 {
    (hfov * VIEWPORT_ASPECT).min(PI)
}

/// Pitch actually at the centre of the viewport, once the crop is kept
/// inside the panorama.
fn view_center_pitch(pitch: f32, vfov: f32) -> f32 {
    let limit = (PI - vfov) / 2.0;
    pitch.clamp(-limit, limit)
}

/// Crops the viewport seen from `camera` out of `panorama`.
///
/// The result is at most `container.max_render_width` pixels wide.
pub fn render_viewport(
    panorama: &Panorama,
    camera: Position,
    container: &ViewerContainer,
) -> RgbaImage {
    let (width, height) = (panorama.width, panorama.height);
    let hfov = container.fov_degrees.to_radians();
    let vfov = vertical_fov(hfov);

    let crop_w = ((width as f32 * hfov / TAU).round() as u32).clamp(1, width);
    let crop_h = ((height as f32 * vfov / PI).round() as u32).clamp(1, height);

    let center_x = (camera.yaw / TAU + 0.5) * width as f32;
    let center_y = (0.5 - view_center_pitch(camera.pitch, vfov) / PI) * height as f32;
    let left = (center_x - crop_w as f32 / 2.0).floor() as i64;
    let top = ((center_y - crop_h as f32 / 2.0).round() as i64).clamp(0, (height - crop_h) as i64)
        as usize;

    let start = left.rem_euclid(i64::from(width)) as usize;
    let first_run = (crop_w as usize).min(width as usize - start);
    let second_run = crop_w as usize - first_run;
    let src_stride = width as usize * 4;
    let dst_stride = crop_w as usize * 4;

    let mut crop = RgbaImage::new(crop_w, crop_h);
    let dst: &mut [u8] = &mut crop;
    for row in 0..crop_h as usize {
        let src_row = (top + row) * src_stride;
        let dst_row = row * dst_stride;
        dst[dst_row..dst_row + first_run * 4].copy_from_slice(
            &panorama.pixels[src_row + start * 4..src_row + (start + first_run) * 4],
        );
        if second_run > 0 {
            dst[dst_row + first_run * 4..dst_row + dst_stride]
                .copy_from_slice(&panorama.pixels[src_row..src_row + second_run * 4]);
        }
    }

    let max_width = container.max_render_width;
    if crop_w <= max_width {
        return crop;
    }
    let scaled_h = ((u64::from(crop_h) * u64::from(max_width)) / u64::from(crop_w)).max(1) as u32;
    imageops::resize(&crop, max_width, scaled_h, FilterType::Triangle)
}
