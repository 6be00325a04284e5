//! Scene configuration: which boxes to build and how hard they jump.
//!
//! Configurations are JSON. Every field has a default, so a file only needs
//! to name what it changes:
//!
//! ```json
//! {
//!   "boxes": [
//!     { "position": [0.0, 1.0, 0.0], "color": [1.0, 0.0, 0.0, 1.0], "controlled": true }
//!   ],
//!   "jump_impulse": [0.0, 8.0, 0.0]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ecs::component::DEFAULT_JUMP_IMPULSE;
use crate::math::{Color, Vec3};
use crate::scene::Shape;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One box for the factory to build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub position: Vec3,
    #[serde(default)]
    pub color: Color,
    /// Whether the box gets a `PlayerControl` and jumps on tap.
    #[serde(default)]
    pub controlled: bool,
}

impl BoxSpec {
    /// A white, uncontrolled box at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            color: Color::default(),
            controlled: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn controlled(mut self) -> Self {
        self.controlled = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub boxes: Vec<BoxSpec>,
    pub jump_impulse: Vec3,
    pub box_shape: Shape,
}

impl SceneConfig {
    /// Five unit boxes in a row along X, one meter up. The purple one has no
    /// player control and stays put when the others jump.
    pub fn five_boxes() -> Self {
        let row = [
            (-4.0, Color::BLUE, true),
            (-2.0, Color::PURPLE, false),
            (0.0, Color::RED, true),
            (2.0, Color::YELLOW, true),
            (4.0, Color::GREEN, true),
        ];
        let boxes = row
            .into_iter()
            .map(|(x, color, controlled)| BoxSpec {
                position: Vec3::new(x, 1.0, 0.0),
                color,
                controlled,
            })
            .collect();

        Self {
            boxes,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
            box_shape: Shape::unit_cube(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn controlled_count(&self) -> usize {
        self.boxes.iter().filter(|b| b.controlled).count()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::five_boxes()
    }
}
