//! Toroidal grid snake: fixed-cadence ticks, wraparound movement, one food
//! cell, one lethal rock, and an immediate reset on any crash.

use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

mod food;
mod game;
mod obstacle;
mod rendering;
mod snake;

use food::{FoodPlugin, FoodSpawner, spawn_food};
use game::{
    ARENA_COLOR, BACKGROUND_COLOR, CELL_SIZE, CameraShake, CrashEvent, FoodEatenEvent,
    FoodSpawnedEvent, GRID_HEIGHT, GRID_WIDTH, InputBuffer, MoveTimer, Position, START_POSITION,
    SnakeVisuals,
};
use obstacle::{ObstaclePlugin, spawn_rock};
use rendering::RenderingPlugin;
use snake::{SnakePlugin, SnakeState, spawn_snake_head};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(
                        (GRID_WIDTH as f32 * CELL_SIZE) as u32,
                        (GRID_HEIGHT as f32 * CELL_SIZE) as u32,
                    ),
                    title: "Snake (press Esc to quit)".to_string(),
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(SnakeState::new(GRID_WIDTH, GRID_HEIGHT, START_POSITION))
        .insert_resource(FoodSpawner::new(GRID_WIDTH, GRID_HEIGHT))
        .init_resource::<InputBuffer>()
        .init_resource::<MoveTimer>()
        .init_resource::<SnakeVisuals>()
        .init_resource::<CameraShake>()
        .add_message::<FoodEatenEvent>()
        .add_message::<FoodSpawnedEvent>()
        .add_message::<CrashEvent>()
        .add_plugins((SnakePlugin, FoodPlugin, ObstaclePlugin, RenderingPlugin))
        .add_systems(Startup, setup)
        .add_systems(Update, quit_on_escape)
        .run();
}

/// Initial setup: camera, arena background, snake head, food, and rock.
fn setup(
    mut commands: Commands,
    state: Res<SnakeState>,
    spawner: Res<FoodSpawner>,
    mut visuals: ResMut<SnakeVisuals>,
) {
    commands.spawn(Camera2d);

    // Arena background
    commands.spawn((
        Sprite {
            color: ARENA_COLOR,
            custom_size: Some(Vec2::new(
                GRID_WIDTH as f32 * CELL_SIZE,
                GRID_HEIGHT as f32 * CELL_SIZE,
            )),
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));

    visuals.head = Some(spawn_snake_head(&mut commands, state.head()));

    let mut rng = rand::rng();
    let mut occupied: Vec<Position> = state.body().to_vec();
    if let Some(cell) = spawner.sample(&mut rng, &occupied) {
        spawn_food(&mut commands, cell);
        occupied.push(cell);
    }
    if let Some(cell) = spawner.sample(&mut rng, &occupied) {
        spawn_rock(&mut commands, cell);
    }
}

/// Quit is an ordinary control-flow outcome: Escape writes `AppExit`.
fn quit_on_escape(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut app_exit: MessageWriter<AppExit>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        app_exit.write(AppExit::Success);
    }
}
