// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Layout**: Responsive breakpoint and window geometry
//! - **Viewer**: Field of view, drag sensitivity and render size
//! - **Catalog**: Default catalog location

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Window width (logical pixels) from which the desktop layout is used.
pub const DEFAULT_DESKTOP_MIN_WIDTH: f32 = 900.0;

/// Whether the sidebar starts open in desktop mode.
pub const DEFAULT_SIDEBAR_OPEN: bool = true;

/// Initial window size.
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Smallest window size accepted by the window manager.
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

// ==========================================================================
// Viewer Defaults
// ==========================================================================

/// Horizontal field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 90.0;

/// Narrowest allowed field of view in degrees.
pub const MIN_FOV_DEGREES: f32 = 30.0;

/// Widest allowed field of view in degrees.
pub const MAX_FOV_DEGREES: f32 = 150.0;

/// Radians of camera rotation per dragged pixel.
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 0.005;

/// Bounds for drag sensitivity.
pub const MIN_DRAG_SENSITIVITY: f32 = 0.0005;
pub const MAX_DRAG_SENSITIVITY: f32 = 0.05;

/// Widest rendered viewport, in pixels. Larger crops are downscaled.
pub const DEFAULT_MAX_RENDER_WIDTH: u32 = 1600;

/// Whether the yaw/pitch readout is shown.
pub const DEFAULT_SHOW_ORIENTATION: bool = true;

// ==========================================================================
// Catalog Defaults
// ==========================================================================

/// Directory (under the data dir) read when no catalog source is configured.
pub const DEFAULT_CATALOG_DIR_NAME: &str = "catalog";
