// SPDX-License-Identifier: MPL-2.0
//! Catalog records as served by the backend.
//!
//! Field names follow the camelCase JSON used by catalog endpoints.

use super::ids::{LayerId, MarkerId, SphereId};
use serde::{Deserialize, Serialize};

/// A selectable image layer grouping one or more spheres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerData {
    pub id: LayerId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Tile image shown in the layer grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Floor plan used by the viewer's map overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_image: Option<String>,
}

/// Normalized position of a sphere on its layer's map (0.0..=1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

/// A single 360° equirectangular panorama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereData {
    pub id: SphereId,
    pub layer_id: LayerId,
    pub name: String,
    /// Equirectangular image reference (path relative to the catalog, or URL).
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_position: Option<MapPoint>,
}

/// A point of interest anchored to a sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerData {
    pub id: MarkerId,
    pub sphere_id: SphereId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Horizontal placement in degrees, 0 at the panorama center.
    #[serde(default)]
    pub yaw: f32,
    /// Vertical placement in degrees, positive upwards.
    #[serde(default)]
    pub pitch: f32,
}
