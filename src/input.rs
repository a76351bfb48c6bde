use std::time::Duration;

use bevy::{input::InputSystems, prelude::*};

use tb_physics::direction::Direction;
use tb_world::player::{KeyPresses, PlayerInput};

pub struct InputPlugin;

const MOVE_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::KeyW, Direction::Up),
    (KeyCode::KeyS, Direction::Down),
    (KeyCode::KeyA, Direction::Left),
    (KeyCode::KeyD, Direction::Right),
];

const FIRE_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::ArrowUp, Direction::Up),
    (KeyCode::ArrowDown, Direction::Down),
    (KeyCode::ArrowLeft, Direction::Left),
    (KeyCode::ArrowRight, Direction::Right),
];

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, read_keyboard.after(InputSystems));
    }
}

pub fn read_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<PlayerInput>,
    time: Res<Time>,
) {
    let now = time.elapsed();
    apply_keys(&mut input.movement, &MOVE_KEYS, &keys, now);
    apply_keys(&mut input.fire, &FIRE_KEYS, &keys, now);
}

fn apply_keys(
    presses: &mut KeyPresses,
    bindings: &[(KeyCode, Direction)],
    keys: &ButtonInput<KeyCode>,
    now: Duration,
) {
    for &(key, direction) in bindings {
        if keys.pressed(key) {
            presses.press(direction, now);
        } else if presses.is_held(direction) {
            presses.release(direction);
        }
    }
}
