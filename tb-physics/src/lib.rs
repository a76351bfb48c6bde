pub mod area;
pub mod body;
pub mod direction;
pub mod terrain;
pub mod tile;

use bevy_app::prelude::*;

use crate::{area::PlayArea, tile::storage::TileMap};

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayArea>().init_resource::<TileMap>();
    }
}
