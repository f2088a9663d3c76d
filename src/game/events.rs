//! Game events (messages).

use bevy::prelude::*;

use super::Position;

/// Message written when food is eaten, carrying the cell it occupied.
///
/// Consumed by the obstacle plugin (rock respawn) and the rendering plugin
/// (pulse effect).
#[derive(Message)]
pub struct FoodEatenEvent {
    pub position: Position,
}

/// Message written whenever food lands on a fresh cell, carrying that
/// cell.
///
/// Food entities (re)spawn through deferred `Commands`, so same-frame
/// readers cannot see the new entity yet; the cell travels in the message
/// instead. Consumed by the obstacle plugin so the rock never resamples
/// onto the food.
#[derive(Message)]
pub struct FoodSpawnedEvent {
    pub position: Position,
}

/// Message written when the snake crashes into itself or the rock.
///
/// The snake plugin resets its own state before writing this; readers
/// respawn food, move the rock, and shake the camera.
#[derive(Message)]
pub struct CrashEvent {
    pub position: Position,
}
