//! Math types and glam re-exports.
//!
//! Vectors come straight from [glam](https://docs.rs/glam). [`Color`] is the
//! RGBA value handed to scene materials.

use serde::{Deserialize, Serialize};

pub use glam::{Quat, Vec3};

/// Linear RGBA color, each channel in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.478, 1.0);
    pub const PURPLE: Self = Self::rgb(0.686, 0.322, 0.871);
    pub const RED: Self = Self::rgb(1.0, 0.231, 0.188);
    pub const YELLOW: Self = Self::rgb(1.0, 0.8, 0.0);
    pub const GREEN: Self = Self::rgb(0.204, 0.78, 0.349);

    /// An opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    pub fn alpha(self) -> f32 {
        self.0[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
