//! Obstacle plugin - a single static rock that is lethal to touch and
//! moves to a fresh cell whenever the food does.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::Rng;

use crate::food::FoodSpawner;
use crate::game::{
    CELL_SIZE, CORNER_RADIUS, FoodSpawnedEvent, Position, PreviousPosition, ROCK_COLOR, Rock,
    Z_ROCK,
};
use crate::rendering::cell_to_world;
use crate::snake::SnakeState;

/// Plugin for the rock.
pub struct ObstaclePlugin;

impl Plugin for ObstaclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, rock_respawn);
    }
}

/// Spawns the rock entity at the given cell.
pub fn spawn_rock(commands: &mut Commands, position: Position) -> Entity {
    let size = CELL_SIZE;
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);
    let world = cell_to_world(position);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: ROCK_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_xyz(world.x, world.y, Z_ROCK),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            Rock,
            position,
            PreviousPosition { pos: position },
        ))
        .id()
}

/// Pick a fresh rock cell avoiding the snake body and the food cell.
fn resample_rock_cell(
    spawner: &FoodSpawner,
    rng: &mut impl Rng,
    body: &[Position],
    food: Position,
) -> Option<Position> {
    let mut occupied = body.to_vec();
    occupied.push(food);
    spawner.sample(rng, &occupied)
}

/// System to move the rock whenever food lands on a fresh cell (after a
/// meal or a crash reset).
///
/// The food cell comes from the message rather than a `Food` query: the
/// food entity spawns through deferred commands, so a same-frame query
/// would still see the eaten food and could put the rock on the new one.
fn rock_respawn(
    mut food_spawned_reader: MessageReader<FoodSpawnedEvent>,
    state: Res<SnakeState>,
    spawner: Res<FoodSpawner>,
    mut rocks: Query<(&mut Position, &mut PreviousPosition), With<Rock>>,
) {
    let Some(food_cell) = food_spawned_reader.read().last().map(|event| event.position) else {
        return;
    };

    let mut rng = rand::rng();
    for (mut pos, mut prev_pos) in rocks.iter_mut() {
        if let Some(cell) = resample_rock_cell(&spawner, &mut rng, state.body(), food_cell) {
            // Teleport, no interpolation
            *pos = cell;
            prev_pos.pos = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    #[test]
    fn rock_avoids_body_and_the_new_food_cell() {
        // 2x2 grid: body on (0,0), fresh food on (1,1). Even though the
        // old food cell (0,1) is also free, the rock must only ever land
        // on a cell that is neither body nor the new food.
        let spawner = FoodSpawner::new(2, 2);
        let mut rng = StdRng::seed_from_u64(11);
        let body = [pos(0, 0)];

        for _ in 0..100 {
            let cell = resample_rock_cell(&spawner, &mut rng, &body, pos(1, 1)).unwrap();
            assert_ne!(cell, pos(0, 0));
            assert_ne!(cell, pos(1, 1));
        }
    }

    #[test]
    fn rock_stays_put_when_no_cell_is_free() {
        let spawner = FoodSpawner::new(1, 2);
        let mut rng = StdRng::seed_from_u64(11);
        let body = [pos(0, 0)];

        assert_eq!(
            resample_rock_cell(&spawner, &mut rng, &body, pos(0, 1)),
            None
        );
    }
}
