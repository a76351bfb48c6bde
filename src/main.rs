mod arena;
mod input;

use bevy::{prelude::*, window::WindowResolution};

use tb_physics::{PhysicsPlugin as TbPhysicsPlugin, area::PlayArea};
use tb_render::RenderPlugin as TbRenderPlugin;
use tb_world::WorldPlugin as TbWorldPlugin;

use crate::{arena::ArenaPlugin, input::InputPlugin as TbInputPlugin};

/// Simulation ticks per second.
const TICK_RATE: f64 = 60.0;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "tilebound".to_owned(),
                    resolution: WindowResolution::new(
                        PlayArea::DEFAULT_SIZE.x as u32,
                        PlayArea::DEFAULT_SIZE.y as u32,
                    ),
                    ..default()
                }),
                ..default()
            }),
            TbPhysicsPlugin,
            TbWorldPlugin,
            TbRenderPlugin,
            TbInputPlugin,
            ArenaPlugin,
        ))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
        .run();
}
