//! Rendering plugin - handles position interpolation, rotation, visual
//! effects, and camera shake.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::game::{
    CELL_SIZE, CameraShake, CrashEvent, Direction, Food, FoodEatenEvent, GRID_HEIGHT, GRID_WIDTH,
    GrowingSegment, MOVE_INTERVAL, MoveTimer, Position, PreviousPosition, PulseEffect, Rock,
    SnakeHead, SnakeSegment, Z_BACKGROUND, Z_FOOD, Z_ROCK, Z_SNAKE_HEAD, Z_SNAKE_SEGMENT,
};
use crate::snake::SnakeState;

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                update_move_timer,
                position_translation,
                update_head_rotation,
                pulse_effect_system,
                spawn_food_eaten_effect,
                trigger_camera_shake_on_crash,
                camera_shake_system,
                growing_segment_animation,
            )
                .chain(),
        );
    }
}

// Type alias for transform interpolation query
type TransformInterpolationQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Position,
        &'static PreviousPosition,
        &'static mut Transform,
        Option<&'static SnakeHead>,
        Option<&'static SnakeSegment>,
        Option<&'static Food>,
        Option<&'static Rock>,
    ),
>;

/// Maps a grid cell to the center of that cell in world space.
///
/// Row 0 is the top row, so the row index is flipped into Bevy's y-up
/// coordinates.
pub fn cell_to_world(pos: Position) -> Vec2 {
    Vec2::new(
        (pos.x as f32 - GRID_WIDTH as f32 / 2.0 + 0.5) * CELL_SIZE,
        (GRID_HEIGHT as f32 / 2.0 - 0.5 - pos.y as f32) * CELL_SIZE,
    )
}

/// System to track elapsed time for interpolation.
fn update_move_timer(mut move_timer: ResMut<MoveTimer>, time: Res<Time>) {
    move_timer.elapsed += time.delta();
}

/// Shortest-path delta on a wrapped axis of the given span.
fn wrap_delta(delta: f32, span: f32) -> f32 {
    if delta.abs() > span / 2.0 {
        if delta > 0.0 { delta - span } else { delta + span }
    } else {
        delta
    }
}

/// System to interpolate entity positions for smooth movement.
fn position_translation(mut transforms: TransformInterpolationQuery, move_timer: Res<MoveTimer>) {
    // Calculate interpolation progress (0.0 to 1.0)
    let progress = (move_timer.elapsed.as_secs_f32() / MOVE_INTERVAL.as_secs_f32()).min(1.0);

    for (pos, prev_pos, mut transform, head, segment, food, rock) in transforms.iter_mut() {
        // Set z-index based on entity type to ensure proper layering
        let z = if head.is_some() {
            Z_SNAKE_HEAD
        } else if segment.is_some() {
            Z_SNAKE_SEGMENT
        } else if food.is_some() {
            Z_FOOD
        } else if rock.is_some() {
            Z_ROCK
        } else {
            Z_BACKGROUND
        };

        // Interpolate between previous and current position, taking the
        // short way around the torus
        let curr = cell_to_world(*pos);
        let prev = cell_to_world(prev_pos.pos);

        let dx = wrap_delta(curr.x - prev.x, GRID_WIDTH as f32 * CELL_SIZE);
        let dy = wrap_delta(curr.y - prev.y, GRID_HEIGHT as f32 * CELL_SIZE);

        transform.translation = Vec3::new(prev.x + dx * progress, prev.y + dy * progress, z);
    }
}

/// System to update snake head rotation based on travel direction.
fn update_head_rotation(
    state: Res<SnakeState>,
    mut heads: Query<&mut Transform, With<SnakeHead>>,
) {
    let rotation = match state.direction() {
        Direction::Right => 0.0,
        Direction::Up => std::f32::consts::FRAC_PI_2,
        Direction::Left => std::f32::consts::PI,
        Direction::Down => -std::f32::consts::FRAC_PI_2,
    };

    for mut transform in heads.iter_mut() {
        transform.rotation = Quat::from_rotation_z(rotation);
    }
}

/// System to handle pulse effects (for eaten food flash).
fn pulse_effect_system(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut PulseEffect)>,
) {
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
        } else {
            let progress = effect.timer.fraction();
            let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
            transform.scale = Vec3::splat(scale);
        }
    }
}

/// System to spawn a visual effect where food was eaten.
fn spawn_food_eaten_effect(
    mut commands: Commands,
    mut food_eaten_reader: MessageReader<FoodEatenEvent>,
) {
    for event in food_eaten_reader.read() {
        let world = cell_to_world(event.position);

        commands.spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: Color::srgba(1.0, 1.0, 0.3, 0.8),
                    transform: Transform::from_xyz(world.x, world.y, Z_FOOD + 0.5),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            PulseEffect {
                timer: Timer::from_seconds(0.3, TimerMode::Once),
                start_scale: 1.0,
                end_scale: 2.5,
            },
        ));
    }
}

/// System to trigger camera shake when the snake crashes.
fn trigger_camera_shake_on_crash(
    mut crash_reader: MessageReader<CrashEvent>,
    mut camera_shake: ResMut<CameraShake>,
) {
    if crash_reader.read().next().is_some() {
        camera_shake.timer = Timer::from_seconds(0.5, TimerMode::Once);
        camera_shake.intensity = 8.0;
    }
}

/// System to apply camera shake effect.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if !camera_shake.timer.is_finished() {
        camera_shake.timer.tick(time.delta());

        if let Ok(mut camera_transform) = camera_query.single_mut() {
            if camera_shake.timer.is_finished() {
                // Reset camera position when shake is done
                camera_transform.translation.x = 0.0;
                camera_transform.translation.y = 0.0;
            } else {
                // Apply random shake based on intensity
                let progress = camera_shake.timer.fraction();
                let decay = 1.0 - progress;

                let mut rng = rand::rng();
                let shake_x = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
                let shake_y = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;

                camera_transform.translation.x = shake_x;
                camera_transform.translation.y = shake_y;
            }
        }
    }
}

/// System to animate growing segments.
fn growing_segment_animation(
    mut commands: Commands,
    time: Res<Time>,
    mut growing: Query<(Entity, &mut Transform, &mut GrowingSegment)>,
) {
    for (entity, mut transform, mut growing_segment) in growing.iter_mut() {
        growing_segment.timer.tick(time.delta());

        if growing_segment.timer.is_finished() {
            transform.scale = Vec3::splat(1.0);
            commands.entity(entity).remove::<GrowingSegment>();
        } else {
            let progress = growing_segment.timer.fraction();
            // Use ease-out for a bouncy effect
            let scale = progress * (2.0 - progress);
            transform.scale = Vec3::splat(scale);
        }
    }
}
