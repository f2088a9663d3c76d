//! Food plugin - free-cell sampling, eat detection, and the pulse
//! animation.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::game::{
    CELL_SIZE, CrashEvent, FOOD_COLOR, Food, FoodEatenEvent, FoodPulse, FoodSpawnedEvent, Position,
    PreviousPosition, Rock, Z_FOOD,
};
use crate::rendering::cell_to_world;
use crate::snake::SnakeState;

/// Plugin for food-related systems.
pub struct FoodPlugin;

impl Plugin for FoodPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (food_collision, food_respawn_after_crash, food_pulse_animation).chain(),
        );
    }
}

/// Picks uniformly random free cells on the playfield.
#[derive(Resource)]
pub struct FoodSpawner {
    width: i32,
    height: i32,
}

impl FoodSpawner {
    pub fn new(width: i32, height: i32) -> Self {
        FoodSpawner { width, height }
    }

    /// Sample a random cell outside `occupied`, or `None` when every cell
    /// is taken.
    ///
    /// Rejection sampling with a bounded number of attempts; falls back to
    /// enumerating the free cells so a nearly-full grid still terminates.
    pub fn sample(&self, rng: &mut impl Rng, occupied: &[Position]) -> Option<Position> {
        let cells = (self.width * self.height) as usize;
        if occupied.len() < cells {
            for _ in 0..128 {
                let candidate = Position {
                    x: rng.random_range(0..self.width),
                    y: rng.random_range(0..self.height),
                };
                if !occupied.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        let free: Vec<Position> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Position { x, y }))
            .filter(|cell| !occupied.contains(cell))
            .collect();
        free.choose(rng).copied()
    }
}

/// Spawns the food entity at the given cell.
pub fn spawn_food(commands: &mut Commands, position: Position) -> Entity {
    let world = cell_to_world(position);

    commands
        .spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: FOOD_COLOR,
                    transform: Transform::from_xyz(world.x, world.y, Z_FOOD),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            Food,
            position,
            PreviousPosition { pos: position },
            FoodPulse {
                timer: Timer::from_seconds(0.8, TimerMode::Repeating),
            },
        ))
        .id()
}

fn respawn_food(
    commands: &mut Commands,
    spawner: &FoodSpawner,
    occupied: &[Position],
    food_spawned_writer: &mut MessageWriter<FoodSpawnedEvent>,
) {
    let mut rng = rand::rng();
    match spawner.sample(&mut rng, occupied) {
        Some(cell) => {
            spawn_food(commands, cell);
            food_spawned_writer.write(FoodSpawnedEvent { position: cell });
        }
        None => warn!("no free cell left for food"),
    }
}

/// System to detect the head landing on food: grow the snake and respawn
/// the food on a fresh cell.
fn food_collision(
    mut commands: Commands,
    mut state: ResMut<SnakeState>,
    spawner: Res<FoodSpawner>,
    mut food_eaten_writer: MessageWriter<FoodEatenEvent>,
    mut food_spawned_writer: MessageWriter<FoodSpawnedEvent>,
    foods: Query<(Entity, &Position), With<Food>>,
    rocks: Query<&Position, (With<Rock>, Without<Food>)>,
) {
    let head = state.head();
    for (food_entity, food_pos) in foods.iter() {
        if head.collides_with(food_pos) {
            commands.entity(food_entity).despawn();
            state.grow();
            food_eaten_writer.write(FoodEatenEvent {
                position: *food_pos,
            });

            let mut occupied: Vec<Position> = state.body().to_vec();
            occupied.extend(rocks.iter().copied());
            respawn_food(&mut commands, &spawner, &occupied, &mut food_spawned_writer);
        }
    }
}

/// System to move the food after a crash, so a fresh round starts with a
/// fresh cell.
fn food_respawn_after_crash(
    mut commands: Commands,
    mut crash_reader: MessageReader<CrashEvent>,
    state: Res<SnakeState>,
    spawner: Res<FoodSpawner>,
    mut food_spawned_writer: MessageWriter<FoodSpawnedEvent>,
    foods: Query<Entity, With<Food>>,
    rocks: Query<&Position, (With<Rock>, Without<Food>)>,
) {
    if crash_reader.read().next().is_none() {
        return;
    }

    for entity in foods.iter() {
        commands.entity(entity).despawn();
    }

    let mut occupied: Vec<Position> = state.body().to_vec();
    occupied.extend(rocks.iter().copied());
    respawn_food(&mut commands, &spawner, &occupied, &mut food_spawned_writer);
}

/// System to animate food with a pulsing effect.
fn food_pulse_animation(
    time: Res<Time>,
    mut foods: Query<(&mut Transform, &mut FoodPulse), With<Food>>,
) {
    for (mut transform, mut pulse) in foods.iter_mut() {
        pulse.timer.tick(time.delta());

        // Use sine wave for smooth pulsing
        let progress = pulse.timer.fraction();
        let scale = 1.0 + (progress * std::f32::consts::PI * 2.0).sin() * 0.15;

        transform.scale = Vec3::splat(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    #[test]
    fn sample_avoids_occupied_cells() {
        let spawner = FoodSpawner::new(8, 8);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: Vec<Position> = (0..8).map(|x| pos(x, 3)).collect();

        for _ in 0..200 {
            let cell = spawner.sample(&mut rng, &occupied).unwrap();
            assert!(!occupied.contains(&cell));
            assert!((0..8).contains(&cell.x));
            assert!((0..8).contains(&cell.y));
        }
    }

    #[test]
    fn sample_finds_the_last_free_cell() {
        let spawner = FoodSpawner::new(4, 4);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: Vec<Position> = (0..4)
            .flat_map(|y| (0..4).map(move |x| pos(x, y)))
            .filter(|cell| *cell != pos(2, 1))
            .collect();

        assert_eq!(spawner.sample(&mut rng, &occupied), Some(pos(2, 1)));
    }

    #[test]
    fn sample_returns_none_on_a_full_grid() {
        let spawner = FoodSpawner::new(3, 3);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: Vec<Position> = (0..3)
            .flat_map(|y| (0..3).map(move |x| pos(x, y)))
            .collect();

        assert_eq!(spawner.sample(&mut rng, &occupied), None);
    }
}
