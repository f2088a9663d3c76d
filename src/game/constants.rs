//! Game constants for grid size, colors, timing, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

use super::Position;

// Grid dimensions in cells. Row 0 is the top row; the renderer flips to
// screen space.
pub const GRID_WIDTH: i32 = 32;
pub const GRID_HEIGHT: i32 = 24;

// Visual settings
pub const CELL_SIZE: f32 = 20.0;
pub const CORNER_RADIUS: f32 = 4.0;

// Timing
pub const MOVE_INTERVAL: Duration = Duration::from_millis(100);

// The snake respawns at the grid center
pub const START_POSITION: Position = Position {
    x: GRID_WIDTH / 2,
    y: GRID_HEIGHT / 2,
};

// Colors
pub const SNAKE_HEAD_COLOR: Color = Color::srgba(0.3, 1.0, 0.3, 1.0);
pub const SNAKE_SEGMENT_COLOR: Color = Color::srgba(0.0, 0.8, 0.0, 1.0);
pub const FOOD_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 1.0);
pub const ROCK_COLOR: Color = Color::srgba(0.55, 0.55, 0.55, 1.0);
pub const ARENA_COLOR: Color = Color::srgba(0.08, 0.08, 0.08, 1.0);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 1.0);

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_ROCK: f32 = 0.8;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
