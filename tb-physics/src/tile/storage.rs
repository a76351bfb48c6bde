use std::fmt;

use bevy_ecs::prelude::*;
use bevy_math::prelude::*;
use bevy_platform::collections::HashMap;

use crate::tile::{CHUNK_SIZE, TileChunkOffset, TileChunkPosition, TilePosition};

/// Level terrain, stored sparsely in fixed-size chunks.
#[derive(Default, Resource)]
pub struct TileMap {
    chunks: HashMap<TileChunkPosition, TileChunk>,
}

pub struct TileChunk {
    position: TileChunkPosition,
    tiles: Box<[TileMaterial; CHUNK_SIZE * CHUNK_SIZE]>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileMaterial {
    #[default]
    Empty,
    Wall,
}

impl TileMap {
    pub fn get_material(&self, tile: TilePosition) -> TileMaterial {
        match self.chunks.get(&tile.chunk_position()) {
            Some(chunk) => chunk.get(tile.chunk_offset()),
            None => TileMaterial::Empty,
        }
    }

    pub fn set_material(&mut self, tile: TilePosition, material: TileMaterial) {
        let position = tile.chunk_position();
        if material == TileMaterial::Empty && !self.chunks.contains_key(&position) {
            return;
        }

        self.chunks
            .entry(position)
            .or_insert_with(|| TileChunk::empty(position))
            .set(tile.chunk_offset(), material);
    }

    pub fn is_solid(&self, tile: TilePosition) -> bool {
        self.get_material(tile).is_solid()
    }

    /// Whether a pixel rectangle overlaps no blocking terrain.
    pub fn is_traversable(&self, rect: IRect) -> bool {
        TilePosition::covering(rect).all(|tile| !self.is_solid(tile))
    }

    pub fn chunk(&self, position: TileChunkPosition) -> Option<&TileChunk> {
        self.chunks.get(&position)
    }

    pub fn walls(&self) -> impl Iterator<Item = TilePosition> + '_ {
        self.chunks.values().flat_map(|chunk| chunk.walls())
    }
}

impl TileChunk {
    fn empty(position: TileChunkPosition) -> Self {
        TileChunk {
            position,
            tiles: Box::new([TileMaterial::Empty; CHUNK_SIZE * CHUNK_SIZE]),
        }
    }

    pub fn position(&self) -> TileChunkPosition {
        self.position
    }

    pub fn get(&self, offset: TileChunkOffset) -> TileMaterial {
        self.tiles[offset.index()]
    }

    fn set(&mut self, offset: TileChunkOffset, material: TileMaterial) {
        self.tiles[offset.index()] = material;
    }

    pub fn walls(&self) -> impl Iterator<Item = TilePosition> + '_ {
        let origin = IVec2::new(self.position.x() as i32, self.position.y() as i32)
            * CHUNK_SIZE as i32;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, material)| material.is_solid())
            .map(move |(index, _)| {
                let offset = TileChunkOffset::from_index(index);
                TilePosition::from_vec(
                    origin + IVec2::new(offset.x() as i32, offset.y() as i32),
                )
            })
    }
}

impl fmt::Debug for TileChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileChunk")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl TileMaterial {
    pub fn is_solid(&self) -> bool {
        matches!(self, TileMaterial::Wall)
    }
}
