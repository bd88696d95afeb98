// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[layout]` - Responsive breakpoint and sidebar state
//! - `[viewer]` - Panorama viewer settings (field of view, drag sensitivity)
//! - `[catalog]` - Where layers, spheres and markers are read from
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PANOLENS_CONFIG_DIR` environment variable (or `--config-dir`)
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use panolens::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("ja".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::engine::ViewerContainer;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "ja").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Page layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Window width from which the desktop layout applies.
    #[serde(default = "default_desktop_min_width")]
    pub desktop_min_width: f32,

    /// Whether the sidebar is open at startup.
    #[serde(default = "default_sidebar_open")]
    pub sidebar_open: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            desktop_min_width: DEFAULT_DESKTOP_MIN_WIDTH,
            sidebar_open: DEFAULT_SIDEBAR_OPEN,
        }
    }
}

/// Panorama viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Horizontal field of view in degrees.
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,

    /// Radians of rotation per dragged pixel.
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f32,

    /// Show the yaw/pitch readout.
    #[serde(default = "default_show_orientation")]
    pub show_orientation: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            show_orientation: DEFAULT_SHOW_ORIENTATION,
        }
    }
}

impl ViewerConfig {
    /// Engine container for these settings, with values clamped to their bounds.
    #[must_use]
    pub fn container(&self) -> ViewerContainer {
        ViewerContainer {
            fov_degrees: self.fov_degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES),
            drag_sensitivity: self
                .drag_sensitivity
                .clamp(MIN_DRAG_SENSITIVITY, MAX_DRAG_SENSITIVITY),
            max_render_width: DEFAULT_MAX_RENDER_WIDTH,
        }
    }
}

/// Catalog location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogConfig {
    /// Directory path or `http(s)://` base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_desktop_min_width() -> f32 {
    DEFAULT_DESKTOP_MIN_WIDTH
}

fn default_sidebar_open() -> bool {
    DEFAULT_SIDEBAR_OPEN
}

fn default_fov_degrees() -> f32 {
    DEFAULT_FOV_DEGREES
}

fn default_drag_sensitivity() -> f32 {
    DEFAULT_DRAG_SENSITIVITY
}

fn default_show_orientation() -> bool {
    DEFAULT_SHOW_ORIENTATION
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning notification.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|err| Error::Io(err.to_string()))?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
