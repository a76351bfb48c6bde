#[cfg(test)]
mod tests;

use bevy_ecs::{lifecycle::HookContext, prelude::*, world::DeferredWorld};
use bevy_math::prelude::*;

use crate::{direction::Direction, terrain::Terrain};

/// Position, extents and movement state of an actor. The position is the top-left corner of
/// its bounding box, in pixels.
#[derive(Copy, Clone, Component, Debug, PartialEq, Eq)]
#[require(Bounds)]
#[component(on_insert = Body::on_insert)]
pub struct Body {
    position: IVec2,
    size: IVec2,
    speed: i32,
    facing: Direction,
    moving: bool,
}

/// Bounding box of a [`Body`], refreshed once per update. Collision checks and rendering
/// read this; the body's position stays authoritative.
#[derive(Copy, Clone, Component, Debug, Default, PartialEq, Eq)]
pub struct Bounds(IRect);

impl Body {
    pub const SPRITE_SCALE: f32 = 1.5;

    pub fn new(position: IVec2, size: IVec2, speed: i32) -> Self {
        Body {
            position,
            size,
            speed,
            facing: Direction::Down,
            moving: false,
        }
    }

    /// A body sized to draw a sprite of `sprite_size` pixels at [`Body::SPRITE_SCALE`].
    pub fn from_sprite(position: IVec2, sprite_size: UVec2, speed: i32) -> Self {
        Body::new(position, Body::scaled_size(sprite_size), speed)
    }

    pub fn scaled_size(sprite_size: UVec2) -> IVec2 {
        IVec2::new(
            (sprite_size.x as f32 * Body::SPRITE_SCALE) as i32,
            (sprite_size.y as f32 * Body::SPRITE_SCALE) as i32,
        )
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
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

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn set_size(&mut self, size: IVec2) {
        self.size = size;
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Clears the moving flag ahead of a new tick.
    pub fn settle(&mut self) {
        self.moving = false;
    }

    /// Moves the body without any checks. Used when spawning and resetting.
    pub fn place(&mut self, position: IVec2) {
        self.position = position;
    }

    pub fn center(&self) -> IVec2 {
        self.position + self.size / 2
    }

    pub fn rect(&self) -> IRect {
        self.rect_at(self.position)
    }

    pub fn rect_at(&self, position: IVec2) -> IRect {
        IRect::from_corners(position, position + self.size)
    }

    /// Tries to move one step in `direction`. Diagonal steps cover half the distance.
    ///
    /// Facing and the moving flag are updated even when the step is blocked, so a blocked
    /// body still turns toward where it tried to go.
    pub fn attempt_move(&mut self, direction: Direction, diagonal: bool, terrain: Terrain) -> bool {
        let distance = if diagonal { self.speed / 2 } else { self.speed };

        self.facing = direction;
        self.moving = true;

        let target = self.position + direction.offset(distance);
        if terrain.admits(self.rect_at(target)) {
            self.position = target;
            true
        } else {
            false
        }
    }

    /// Moves a full step in `direction` regardless of terrain.
    pub fn advance(&mut self, direction: Direction) {
        self.facing = direction;
        self.moving = true;
        self.position += direction.offset(self.speed);
    }

    pub fn distance_to(&self, other: &Body) -> f32 {
        self.distance_to_point(other.center())
    }

    pub fn distance_to_point(&self, point: IVec2) -> f32 {
        self.center().as_vec2().distance(point.as_vec2())
    }

    fn on_insert(mut world: DeferredWorld, context: HookContext) {
        let body = *world.get::<Body>(context.entity).unwrap();
        *world.get_mut::<Bounds>(context.entity).unwrap() = Bounds::of(&body);
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::new(IVec2::ZERO, IVec2::ZERO, 0)
    }
}

impl Bounds {
    pub fn of(body: &Body) -> Self {
        Bounds(body.rect())
    }

    pub fn rect(&self) -> IRect {
        self.0
    }

    /// Whether the two rectangles share any area. Touching edges do not count.
    pub fn intersects(&self, rect: IRect) -> bool {
        self.0.min.cmplt(rect.max).all() && rect.min.cmplt(self.0.max).all()
    }
}
