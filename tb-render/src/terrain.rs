use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_math::prelude::*;
use bevy_sprite::prelude::*;
use bevy_transform::prelude::*;

use tb_physics::{
    area::PlayArea,
    tile::{TILE_SIZE, TilePosition, storage::TileMap},
};

use crate::sprite::screen_position;

pub struct TerrainPlugin;

#[derive(Copy, Clone, Component, Debug, PartialEq, Eq)]
pub struct WallSprite {
    pub tile: TilePosition,
}

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            rebuild_wall_sprites
                .run_if(resource_changed::<TileMap>.or(resource_changed::<PlayArea>)),
        );
    }
}

pub fn rebuild_wall_sprites(
    mut commands: Commands,
    walls: Query<Entity, With<WallSprite>>,
    tiles: Res<TileMap>,
    area: Res<PlayArea>,
) {
    walls
        .iter()
        .for_each(|id| commands.entity(id).despawn());

    let size = Vec2::splat(TILE_SIZE as f32);
    tiles.walls().for_each(|tile| {
        let min = tile.to_pixel();
        let rect = IRect::from_corners(min, min + IVec2::splat(TILE_SIZE));
        commands.spawn((
            WallSprite { tile },
            Sprite::from_color(WallSprite::COLOR, size),
            Transform::from_translation(screen_position(&area, rect).extend(0.0)),
        ));
    });
}

impl WallSprite {
    pub const COLOR: Color = Color::srgb(0.35, 0.33, 0.3);
}
