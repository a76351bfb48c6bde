use approx::assert_relative_eq;
use bevy_ecs::prelude::*;
use bevy_math::prelude::*;

use crate::{
    area::PlayArea,
    body::{Body, Bounds},
    direction::Direction,
    terrain::Terrain,
    tile::{
        TilePosition,
        storage::{TileMap, TileMaterial},
    },
};

#[test]
fn attempt_move_open_terrain() {
    let area = PlayArea::from_size(IVec2::new(200, 200));
    let tiles = TileMap::default();
    let terrain = Terrain::new(&area, &tiles);

    let mut body = Body::new(IVec2::new(50, 50), IVec2::new(12, 12), 4);

    assert!(body.attempt_move(Direction::Right, false, terrain));
    assert_eq!(body.position(), IVec2::new(54, 50));
    assert_eq!(body.facing(), Direction::Right);
    assert!(body.is_moving());

    assert!(body.attempt_move(Direction::Up, false, terrain));
    assert_eq!(body.position(), IVec2::new(54, 46));

    assert!(body.attempt_move(Direction::Left, false, terrain));
    assert!(body.attempt_move(Direction::Down, false, terrain));
    assert_eq!(body.position(), IVec2::new(50, 50));
    assert_eq!(body.facing(), Direction::Down);
}

#[test]
fn attempt_move_diagonal_halves_speed() {
    let area = PlayArea::from_size(IVec2::new(200, 200));
    let tiles = TileMap::default();
    let terrain = Terrain::new(&area, &tiles);

    let mut body = Body::new(IVec2::new(50, 50), IVec2::new(12, 12), 5);

    assert!(body.attempt_move(Direction::Right, true, terrain));
    assert!(body.attempt_move(Direction::Down, true, terrain));
    assert_eq!(body.position(), IVec2::new(52, 52));

    body.set_speed(1);
    assert!(body.attempt_move(Direction::Right, true, terrain));
    assert_eq!(body.position(), IVec2::new(52, 52));
}

#[test]
fn attempt_move_blocked_by_area() {
    let area = PlayArea::from_size(IVec2::new(100, 100));
    let tiles = TileMap::default();
    let terrain = Terrain::new(&area, &tiles);

    let mut body = Body::new(IVec2::new(2, 50), IVec2::new(12, 12), 4);

    assert!(!body.attempt_move(Direction::Left, false, terrain));
    assert_eq!(body.position(), IVec2::new(2, 50));
    assert_eq!(body.facing(), Direction::Left);
    assert!(body.is_moving());

    let mut body = Body::new(IVec2::new(84, 88), IVec2::new(12, 12), 4);
    assert!(!body.attempt_move(Direction::Down, false, terrain));
    assert_eq!(body.position(), IVec2::new(84, 88));
    assert!(body.attempt_move(Direction::Right, false, terrain));
    assert_eq!(body.position(), IVec2::new(88, 88));
    assert!(!body.attempt_move(Direction::Right, false, terrain));
}

#[test]
fn attempt_move_blocked_by_wall() {
    let area = PlayArea::from_size(IVec2::new(200, 200));
    let mut tiles = TileMap::default();
    tiles.set_material(TilePosition::new(4, 2), TileMaterial::Wall);
    let terrain = Terrain::new(&area, &tiles);

    // Right edge at x = 30; the wall tile starts at x = 32.
    let mut body = Body::new(IVec2::new(18, 16), IVec2::new(12, 8), 4);

    assert!(!body.attempt_move(Direction::Right, false, terrain));
    assert_eq!(body.position(), IVec2::new(18, 16));
    assert_eq!(body.facing(), Direction::Right);

    assert!(body.attempt_move(Direction::Right, true, terrain));
    assert_eq!(body.position(), IVec2::new(20, 16));

    assert!(!body.attempt_move(Direction::Right, true, terrain));
    assert_eq!(body.position(), IVec2::new(20, 16));

    assert!(body.attempt_move(Direction::Up, false, terrain));
    assert_eq!(body.position(), IVec2::new(20, 12));
}

#[test]
fn settle_clears_moving() {
    let area = PlayArea::default();
    let tiles = TileMap::default();

    let mut body = Body::new(IVec2::new(50, 50), IVec2::new(12, 12), 4);
    body.attempt_move(Direction::Up, false, Terrain::new(&area, &tiles));
    assert!(body.is_moving());

    body.settle();
    assert!(!body.is_moving());
    assert_eq!(body.facing(), Direction::Up);
}

#[test]
fn advance_ignores_terrain() {
    let mut body = Body::new(IVec2::new(-4, 0), IVec2::new(7, 7), 8);

    body.advance(Direction::Left);
    assert_eq!(body.position(), IVec2::new(-12, 0));
    assert_eq!(body.facing(), Direction::Left);
    assert!(body.is_moving());
}

#[test]
fn center_and_distance() {
    let a = Body::new(IVec2::new(0, 0), IVec2::new(10, 10), 1);
    let b = Body::new(IVec2::new(30, 40), IVec2::new(10, 10), 1);

    assert_eq!(a.center(), IVec2::new(5, 5));
    assert_relative_eq!(a.distance_to(&b), 50.0);
    assert_relative_eq!(b.distance_to(&a), 50.0);
    assert_relative_eq!(a.distance_to_point(IVec2::new(5, 5)), 0.0);

    let odd = Body::new(IVec2::new(0, 0), IVec2::new(7, 7), 1);
    assert_eq!(odd.center(), IVec2::new(3, 3));
    assert_relative_eq!(odd.distance_to_point(IVec2::new(6, 7)), 5.0);
}

#[test]
fn sprite_scale() {
    let body = Body::from_sprite(IVec2::ZERO, UVec2::new(16, 16), 2);
    assert_eq!(body.size(), IVec2::new(24, 24));

    let body = Body::from_sprite(IVec2::ZERO, UVec2::new(7, 13), 2);
    assert_eq!(body.size(), IVec2::new(10, 19));
}

#[test]
fn bounds_intersection() {
    let bounds = Bounds::of(&Body::new(IVec2::new(10, 10), IVec2::new(10, 10), 0));

    assert!(bounds.intersects(IRect::new(15, 15, 25, 25)));
    assert!(bounds.intersects(IRect::new(0, 0, 11, 11)));
    assert!(!bounds.intersects(IRect::new(0, 0, 10, 10)));
    assert!(!bounds.intersects(IRect::new(20, 10, 30, 20)));
}

#[test]
fn bounds_initialized_on_insert() {
    let mut world = World::new();

    let entity = world
        .spawn(Body::new(IVec2::new(3, 4), IVec2::new(5, 6), 1))
        .id();

    let bounds = world.get::<Bounds>(entity).unwrap();
    assert_eq!(bounds.rect(), IRect::new(3, 4, 8, 10));

    world
        .entity_mut(entity)
        .insert(Body::new(IVec2::new(10, 10), IVec2::new(2, 2), 1));
    let bounds = world.get::<Bounds>(entity).unwrap();
    assert_eq!(bounds.rect(), IRect::new(10, 10, 12, 12));
}
