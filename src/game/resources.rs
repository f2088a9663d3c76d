//! Game resources (singleton state).

use bevy::prelude::*;
use std::time::Duration;

use super::Direction;

/// Entities mirroring the snake body, kept in body order (head first).
///
/// The authoritative body lives in [`crate::snake::SnakeState`]; these are
/// the visuals synced to it after every tick.
#[derive(Resource, Default)]
pub struct SnakeVisuals {
    pub head: Option<Entity>,
    pub segments: Vec<Entity>,
}

/// Input buffer to queue direction changes between ticks.
#[derive(Resource, Default)]
pub struct InputBuffer {
    queued_directions: Vec<Direction>,
}

impl InputBuffer {
    /// Queue a direction change (max 2 buffered inputs).
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.queued_directions.len() < 2 {
            self.queued_directions.push(direction);
        }
    }

    /// Pop the next queued direction.
    pub fn pop_direction(&mut self) -> Option<Direction> {
        if !self.queued_directions.is_empty() {
            Some(self.queued_directions.remove(0))
        } else {
            None
        }
    }

    /// Get the last queued direction without removing it.
    pub fn last_direction(&self) -> Option<Direction> {
        self.queued_directions.last().copied()
    }

    /// Clear all queued directions.
    pub fn clear(&mut self) {
        self.queued_directions.clear();
    }
}

/// Resource to track time since last move for interpolation.
#[derive(Resource)]
pub struct MoveTimer {
    pub elapsed: Duration,
}

impl Default for MoveTimer {
    fn default() -> Self {
        MoveTimer {
            elapsed: Duration::ZERO,
        }
    }
}

/// Resource for camera shake effect.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_buffer_pops_fifo() {
        let mut buffer = InputBuffer::default();
        buffer.queue_direction(Direction::Up);
        buffer.queue_direction(Direction::Left);

        assert_eq!(buffer.last_direction(), Some(Direction::Left));
        assert_eq!(buffer.pop_direction(), Some(Direction::Up));
        assert_eq!(buffer.pop_direction(), Some(Direction::Left));
        assert_eq!(buffer.pop_direction(), None);
    }

    #[test]
    fn input_buffer_caps_at_two() {
        let mut buffer = InputBuffer::default();
        buffer.queue_direction(Direction::Up);
        buffer.queue_direction(Direction::Left);
        buffer.queue_direction(Direction::Down);

        assert_eq!(buffer.pop_direction(), Some(Direction::Up));
        assert_eq!(buffer.pop_direction(), Some(Direction::Left));
        assert_eq!(buffer.pop_direction(), None);
    }

    #[test]
    fn input_buffer_clear_discards_everything() {
        let mut buffer = InputBuffer::default();
        buffer.queue_direction(Direction::Down);
        buffer.clear();
        assert_eq!(buffer.last_direction(), None);
        assert_eq!(buffer.pop_direction(), None);
    }
}
