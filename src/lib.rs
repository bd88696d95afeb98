// SPDX-License-Identifier: MPL-2.0
//! `panolens` is a 360° panorama viewer built with the Iced GUI framework.
//!
//! A catalog of layers (floors, areas), spheres (panorama photos) and
//! markers (points of interest) is browsed through a tile grid, a sidebar
//! tree and the panorama viewer itself. Layers and markers can be edited in
//! place through modal editors.
//!
//! # Modules
//!
//! - [`domain`] - Catalog entities and page enums
//! - [`store`] - Selection state and the actions that mutate it
//! - [`catalog`] - Fetching the catalog from a directory or a server
//! - [`engine`] - Sphere engine abstraction and its equirectangular renderer
//! - [`ui`] - Page components
//! - [`app`] - Application root wiring everything together

pub mod app;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod store;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
