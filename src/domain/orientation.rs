// SPDX-License-Identifier: MPL-2.0
//! Camera orientation value objects.

/// Raw camera position as reported by a sphere engine, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub yaw: f32,
    pub pitch: f32,
}

impl Position {
    #[must_use]
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }
}

/// Where the viewer is looking, in degrees. Rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    /// Converts an engine position (radians) to degrees; π maps to 180.
    #[must_use]
    pub fn from_radians(position: Position) -> Self {
        Self {
            yaw: position.yaw.to_degrees(),
            pitch: position.pitch.to_degrees(),
        }
    }

    /// Converts back to an engine position.
    #[must_use]
    pub fn to_radians(self) -> Position {
        Position {
            yaw: self.yaw.to_radians(),
            pitch: self.pitch.to_radians(),
        }
    }
}
