//! Path layout: where each level sits on screen and the curve joining them.
//!
//! Coordinates are percentages (0..=100) of the adventure canvas so the
//! presentation layer can scale them to any size.

use serde::{Deserialize, Serialize};

mod grid;
mod path;

pub use grid::{GridSpec, generate_grid_positions, snake_cells};
pub use path::{Jitter, LcgJitter, PathSegment, SmoothPath, ZeroJitter, smooth_path};
#[cfg(feature = "rng")]
pub use path::OsJitter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPosition {
    pub x: f64,
    pub y: f64,
}

impl PathPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: PathPosition) -> PathPosition {
        PathPosition {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Pixel size of the area the adventure is drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}
