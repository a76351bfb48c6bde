pub mod storage;

use std::fmt;

use bevy_math::{I16Vec2, U16Vec2, prelude::*};

use crate::direction::Direction;

/// Side length of a tile, in pixels.
pub const TILE_SIZE: i32 = 8;
pub const CHUNK_SIZE: usize = 32;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TilePosition {
    position: IVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileChunkPosition(I16Vec2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileChunkOffset(U16Vec2);

impl TilePosition {
    pub fn new(x: i32, y: i32) -> Self {
        TilePosition {
            position: IVec2::new(x, y),
        }
    }

    pub fn from_vec(position: IVec2) -> Self {
        TilePosition { position }
    }

    /// The tile containing the given pixel.
    pub fn containing(pixel: IVec2) -> Self {
        TilePosition::from_vec(pixel.div_euclid(IVec2::splat(TILE_SIZE)))
    }

    pub fn with_offset(&self, offset: IVec2) -> Self {
        TilePosition::from_vec(self.position + offset)
    }

    pub fn step(&self, direction: Direction) -> Self {
        self.with_offset(direction.unit())
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    /// Top-left pixel of this tile.
    pub fn to_pixel(&self) -> IVec2 {
        self.position * TILE_SIZE
    }

    pub fn chunk_position(&self) -> TileChunkPosition {
        TileChunkPosition::new(
            self.x().div_euclid(CHUNK_SIZE as i32) as i16,
            self.y().div_euclid(CHUNK_SIZE as i32) as i16,
        )
    }

    pub fn chunk_offset(&self) -> TileChunkOffset {
        TileChunkOffset::new(
            self.x().rem_euclid(CHUNK_SIZE as i32) as u16,
            self.y().rem_euclid(CHUNK_SIZE as i32) as u16,
        )
    }

    /// All tiles overlapped by a pixel rectangle with an exclusive `max` corner.
    pub fn covering(rect: IRect) -> impl Iterator<Item = TilePosition> {
        let min = TilePosition::containing(rect.min);
        let max = TilePosition::containing(rect.max - IVec2::ONE);
        (min.y()..=max.y())
            .flat_map(move |y| (min.x()..=max.x()).map(move |x| TilePosition::new(x, y)))
    }
}

impl fmt::Debug for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}, {})", self.x(), self.y())
    }
}

impl From<(i32, i32)> for TilePosition {
    fn from((x, y): (i32, i32)) -> Self {
        TilePosition::new(x, y)
    }
}

impl TileChunkPosition {
    pub fn new(x: i16, y: i16) -> Self {
        TileChunkPosition(I16Vec2::new(x, y))
    }

    pub fn x(&self) -> i16 {
        self.0.x
    }

    pub fn y(&self) -> i16 {
        self.0.y
    }
}

impl TileChunkOffset {
    pub fn new(x: u16, y: u16) -> Self {
        TileChunkOffset(U16Vec2::new(x, y))
    }

    pub fn x(&self) -> u16 {
        self.0.x
    }

    pub fn y(&self) -> u16 {
        self.0.y
    }

    pub fn index(&self) -> usize {
        self.0.y as usize * CHUNK_SIZE + self.0.x as usize
    }

    pub fn from_index(index: usize) -> Self {
        let x = (index % CHUNK_SIZE) as u16;
        let y = (index / CHUNK_SIZE) as u16;
        TileChunkOffset(U16Vec2::new(x, y))
    }
}
