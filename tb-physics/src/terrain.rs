use bevy_ecs::{prelude::*, system::SystemParam};
use bevy_math::prelude::*;

use crate::{area::PlayArea, tile::storage::TileMap};

/// Read-only view of the world geometry a body moves through.
#[derive(Copy, Clone)]
pub struct Terrain<'a> {
    pub area: &'a PlayArea,
    pub tiles: &'a TileMap,
}

#[derive(SystemParam)]
pub struct TerrainParam<'w> {
    area: Res<'w, PlayArea>,
    tiles: Res<'w, TileMap>,
}

impl<'a> Terrain<'a> {
    pub fn new(area: &'a PlayArea, tiles: &'a TileMap) -> Self {
        Terrain { area, tiles }
    }

    /// Whether a body may occupy `rect`: fully inside the play area, and clear of walls.
    pub fn admits(&self, rect: IRect) -> bool {
        self.area.contains(rect) && self.tiles.is_traversable(rect)
    }
}

impl TerrainParam<'_> {
    pub fn get(&self) -> Terrain<'_> {
        Terrain::new(&self.area, &self.tiles)
    }
}
