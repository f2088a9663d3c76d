//! Snake plugin - drives the snake state machine from input and the tick
//! timer, and mirrors its body into entities.

use std::time::Duration;

use bevy::{prelude::*, time::common_conditions::on_timer};
use bevy_vector_shapes::prelude::*;

use crate::game::{
    CELL_SIZE, CORNER_RADIUS, CrashEvent, Direction, GrowingSegment, InputBuffer, MOVE_INTERVAL,
    MoveTimer, Position, PreviousPosition, Rock, SNAKE_HEAD_COLOR, SNAKE_SEGMENT_COLOR, SnakeEye,
    SnakeHead, SnakeSegment, SnakeVisuals, Z_SNAKE_HEAD,
};
use crate::rendering::cell_to_world;

mod state;

pub use state::{AdvanceOutcome, SnakeState};

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                snake_movement_input,
                snake_tick.run_if(on_timer(MOVE_INTERVAL)),
            )
                .chain(),
        );
    }
}

// Type alias for the entities the tick system repositions
type BodyPositionQuery<'w, 's> =
    Query<'w, 's, (&'static mut Position, &'static mut PreviousPosition), Without<Rock>>;

/// Spawns the snake head entity with eyes at the given cell.
pub fn spawn_snake_head(commands: &mut Commands, position: Position) -> Entity {
    let size = CELL_SIZE * 0.9;
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);
    let world = cell_to_world(position);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_HEAD_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_xyz(world.x, world.y, Z_SNAKE_HEAD),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeHead,
            position,
            PreviousPosition { pos: position },
        ))
        .with_children(|parent| {
            let eye_radius = CELL_SIZE * 0.08;

            // Right eye (relative to Right direction)
            parent.spawn((
                ShapeBundle::circle(
                    &ShapeConfig {
                        color: Color::srgba(0.0, 0.0, 0.0, 1.0),
                        transform: Transform::from_xyz(CELL_SIZE * 0.15, CELL_SIZE * 0.15, 0.1),
                        ..ShapeConfig::default_2d()
                    },
                    eye_radius,
                ),
                SnakeEye,
            ));

            // Left eye (relative to Right direction)
            parent.spawn((
                ShapeBundle::circle(
                    &ShapeConfig {
                        color: Color::srgba(0.0, 0.0, 0.0, 1.0),
                        transform: Transform::from_xyz(CELL_SIZE * 0.15, -CELL_SIZE * 0.15, 0.1),
                        ..ShapeConfig::default_2d()
                    },
                    eye_radius,
                ),
                SnakeEye,
            ));
        })
        .id()
}

/// Spawns a snake body segment at the given cell.
pub fn spawn_snake_segment(commands: &mut Commands, position: Position) -> Entity {
    let size = CELL_SIZE;
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_SEGMENT_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeSegment,
            position,
            PreviousPosition { pos: position },
        ))
        .id()
}

/// System to read keyboard input and queue direction changes.
fn snake_movement_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut input_buffer: ResMut<InputBuffer>,
    state: Res<SnakeState>,
) {
    // Get the last direction in buffer or the snake's committed direction
    let last_direction = input_buffer.last_direction().unwrap_or(state.direction());

    // Get new direction from input; unknown keys leave it unchanged
    let new_direction = Direction::from_input(&keyboard_input, last_direction);

    // If direction changed and it's not opposite to the last direction, queue it
    if new_direction != last_direction && new_direction != last_direction.opposite() {
        input_buffer.queue_direction(new_direction);
    }
}

/// System to advance the snake one cell at the fixed tick cadence.
///
/// Pops at most one buffered turn, advances the state machine, and either
/// resets everything on a crash or syncs the body entities to the new
/// cells.
#[allow(clippy::too_many_arguments)]
fn snake_tick(
    mut commands: Commands,
    mut state: ResMut<SnakeState>,
    mut input_buffer: ResMut<InputBuffer>,
    mut move_timer: ResMut<MoveTimer>,
    mut visuals: ResMut<SnakeVisuals>,
    mut crash_writer: MessageWriter<CrashEvent>,
    rocks: Query<&Position, With<Rock>>,
    mut positions: BodyPositionQuery,
) {
    // Reset the interpolation timer for this tick
    move_timer.elapsed = Duration::ZERO;

    if let Some(direction) = input_buffer.pop_direction() {
        state.turn(direction);
    }

    let new_head = match state.advance() {
        AdvanceOutcome::Moved(head) => head,
        AdvanceOutcome::SelfCollision => {
            handle_crash(
                &mut commands,
                &mut state,
                &mut input_buffer,
                &mut visuals,
                &mut positions,
                &mut crash_writer,
            );
            return;
        }
    };

    if rocks.iter().any(|rock| new_head.collides_with(rock)) {
        handle_crash(
            &mut commands,
            &mut state,
            &mut input_buffer,
            &mut visuals,
            &mut positions,
            &mut crash_writer,
        );
        return;
    }

    // Move the head entity
    if let Some(head_entity) = visuals.head
        && let Ok((mut pos, mut prev_pos)) = positions.get_mut(head_entity)
    {
        prev_pos.pos = *pos;
        *pos = new_head;
    }

    // One entity per body cell behind the head. The body grows by at most
    // one cell per tick, so at most one segment is spawned here.
    for (i, &cell) in state.body().iter().enumerate().skip(1) {
        match visuals.segments.get(i - 1).copied() {
            Some(entity) => {
                if let Ok((mut pos, mut prev_pos)) = positions.get_mut(entity) {
                    prev_pos.pos = *pos;
                    *pos = cell;
                }
            }
            None => {
                let entity = spawn_snake_segment(&mut commands, cell);

                // Add growing animation component
                commands.entity(entity).insert(GrowingSegment {
                    timer: Timer::from_seconds(0.2, TimerMode::Once),
                });

                visuals.segments.push(entity);
            }
        }
    }
}

/// Start a fresh round: reset the state machine and discard queued input,
/// so directions buffered before the crash cannot steer the new snake.
fn crash_reset(state: &mut SnakeState, input_buffer: &mut InputBuffer) {
    state.reset();
    input_buffer.clear();
}

/// Reset the state machine and rebuild the visuals after a crash.
fn handle_crash(
    commands: &mut Commands,
    state: &mut SnakeState,
    input_buffer: &mut InputBuffer,
    visuals: &mut SnakeVisuals,
    positions: &mut BodyPositionQuery,
    crash_writer: &mut MessageWriter<CrashEvent>,
) {
    let head = state.head();
    info!(
        "snake crashed at ({}, {}) with length {}, resetting",
        head.x,
        head.y,
        state.len()
    );
    crash_writer.write(CrashEvent { position: head });

    crash_reset(state, input_buffer);

    for entity in visuals.segments.drain(..) {
        commands.entity(entity).despawn();
    }

    // Teleport the head back to the start cell, without interpolation
    if let Some(head_entity) = visuals.head
        && let Ok((mut pos, mut prev_pos)) = positions.get_mut(head_entity)
    {
        *pos = state.head();
        prev_pos.pos = state.head();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crash_reset_discards_buffered_input() {
        let start = Position { x: 16, y: 12 };
        let mut state = SnakeState::new(32, 24, start);
        let mut input_buffer = InputBuffer::default();

        state.grow();
        state.advance();
        input_buffer.queue_direction(Direction::Up);
        input_buffer.queue_direction(Direction::Left);

        crash_reset(&mut state, &mut input_buffer);

        assert_eq!(input_buffer.pop_direction(), None);
        assert_eq!(state.body(), &[start]);
        assert_eq!(state.direction(), Direction::Right);

        // The first tick after the reset moves right, not up.
        assert_eq!(
            state.advance(),
            AdvanceOutcome::Moved(Position { x: 17, y: 12 })
        );
    }
}
