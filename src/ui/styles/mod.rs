// SPDX-License-Identifier: MPL-2.0
//! Widget style functions built on the design tokens.

pub mod button;
pub mod container;
pub mod overlay;
