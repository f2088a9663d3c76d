//! ECS components and grid vocabulary shared across plugins.

use bevy::prelude::*;

/// Grid position component for entities on the playfield.
///
/// `x` is the column, `y` the row, with row 0 at the top of the screen.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Check if this position occupies the same cell as another.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Component to track previous position for smooth interpolation.
#[derive(Component, Clone, Copy, Debug)]
pub struct PreviousPosition {
    pub pos: Position,
}

/// Direction of snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit cell offset `(dx, dy)`. `Up` decrements the row.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Reads keyboard input and returns the corresponding direction.
    ///
    /// Keys that don't map to a direction leave `current` unchanged.
    pub fn from_input(keyboard_input: &ButtonInput<KeyCode>, current: Direction) -> Direction {
        if keyboard_input.pressed(KeyCode::ArrowLeft) || keyboard_input.pressed(KeyCode::KeyA) {
            Direction::Left
        } else if keyboard_input.pressed(KeyCode::ArrowRight)
            || keyboard_input.pressed(KeyCode::KeyD)
        {
            Direction::Right
        } else if keyboard_input.pressed(KeyCode::ArrowUp) || keyboard_input.pressed(KeyCode::KeyW)
        {
            Direction::Up
        } else if keyboard_input.pressed(KeyCode::ArrowDown)
            || keyboard_input.pressed(KeyCode::KeyS)
        {
            Direction::Down
        } else {
            current
        }
    }
}

/// Component to mark the snake's head entity.
#[derive(Component)]
pub struct SnakeHead;

/// Component to mark snake head eyes (children of head).
#[derive(Component)]
pub struct SnakeEye;

/// Component to mark snake body segment entities.
#[derive(Component)]
pub struct SnakeSegment;

/// Component to mark the food entity.
#[derive(Component)]
pub struct Food;

/// Component to mark the rock entity.
#[derive(Component)]
pub struct Rock;

/// Component for food pulsing animation.
#[derive(Component)]
pub struct FoodPulse {
    pub timer: Timer,
}

/// Component for entities that should flash/pulse.
#[derive(Component)]
pub struct PulseEffect {
    pub timer: Timer,
    pub start_scale: f32,
    pub end_scale: f32,
}

/// Component for animating newly grown segments.
#[derive(Component)]
pub struct GrowingSegment {
    pub timer: Timer,
}
