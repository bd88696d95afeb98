// SPDX-License-Identifier: MPL-2.0
//! Configuration persistence logic.
//!
//! Theme, language and sidebar state are written back to `settings.toml`
//! whenever the user changes them.

use super::Message;
use crate::config::{self, Config};
use iced::Task;

/// Persists the current preferences to disk.
///
/// Guarded during tests to keep isolation: unit tests inspect the in-memory
/// `Config` instead of the file.
pub fn persist(cfg: &Config) -> Task<Message> {
    if cfg!(test) {
        return Task::none();
    }

    if let Err(error) = config::save(cfg) {
        log::warn!("Failed to save config: {}", error);
    }

    Task::none()
}
