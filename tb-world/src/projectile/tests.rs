use bevy_app::prelude::*;
use bevy_ecs::{prelude::*, system::RunSystemOnce};
use bevy_math::prelude::*;

use tb_physics::{PhysicsPlugin, area::PlayArea, body::Body, direction::Direction};

use super::{CircleProjectile, Projectile, ProjectilePlugin};
use crate::{
    actor::ActorPlugin,
    combat::{CombatPlugin, Damaged, Health},
    configure_sets,
};

#[test]
fn projectile_moves_ignoring_terrain() {
    let mut app = make_app();
    let owner = app.world_mut().spawn_empty().id();

    let projectile = app
        .world_mut()
        .spawn(CircleProjectile::bundle(
            IVec2::new(100, 100),
            owner,
            Direction::Left,
        ))
        .id();

    assert_eq!(
        app.world().get::<Body>(projectile).unwrap().position(),
        IVec2::new(97, 97)
    );

    app.world_mut().run_schedule(FixedUpdate);

    let body = app.world().get::<Body>(projectile).unwrap();
    assert_eq!(body.position(), IVec2::new(89, 97));
    assert_eq!(body.facing(), Direction::Left);
}

#[test]
fn projectile_damages_first_target_once() {
    let mut app = make_app();
    let owner = spawn_target(&mut app, IVec2::new(0, 0));
    let target = spawn_target(&mut app, IVec2::new(100, 90));

    let projectile = app
        .world_mut()
        .spawn(CircleProjectile::bundle(
            IVec2::new(92, 100),
            owner,
            Direction::Right,
        ))
        .id();

    app.world_mut().run_schedule(FixedUpdate);

    assert!(app.world().get_entity(projectile).is_err());
    assert_eq!(app.world().get::<Health>(target).unwrap().current(), 4);
    assert_eq!(app.world().get::<Health>(owner).unwrap().current(), 5);

    let events = app.world().get::<Health>(target).unwrap().damage_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target(), target);

    assert_eq!(
        damaged(&mut app),
        vec![Damaged {
            target,
            amount: CircleProjectile::POWER
        }]
    );

    app.world_mut().run_schedule(FixedUpdate);
    assert_eq!(app.world().get::<Health>(target).unwrap().current(), 4);
}

#[test]
fn projectile_ignores_owner() {
    let mut app = make_app();
    let owner = spawn_target(&mut app, IVec2::new(100, 100));

    let projectile = app
        .world_mut()
        .spawn(CircleProjectile::bundle(
            IVec2::new(110, 110),
            owner,
            Direction::Down,
        ))
        .id();

    app.world_mut().run_schedule(FixedUpdate);

    assert!(app.world().get_entity(projectile).is_ok());
    assert_eq!(app.world().get::<Health>(owner).unwrap().current(), 5);
    assert!(damaged(&mut app).is_empty());
}

#[test]
fn projectile_needs_overlap() {
    let mut app = make_app();
    let owner = app.world_mut().spawn_empty().id();
    let target = spawn_target(&mut app, IVec2::new(100, 100));

    // After one step the projectile's right edge touches the target's left edge.
    let projectile = app
        .world_mut()
        .spawn(CircleProjectile::bundle(
            IVec2::new(88, 113),
            owner,
            Direction::Right,
        ))
        .id();

    app.world_mut().run_schedule(FixedUpdate);

    assert!(app.world().get_entity(projectile).is_ok());
    assert_eq!(app.world().get::<Health>(target).unwrap().current(), 5);
}

#[test]
fn projectile_skips_defeated_targets() {
    let mut app = make_app();
    let owner = app.world_mut().spawn_empty().id();
    let target = spawn_target(&mut app, IVec2::new(100, 100));
    app.world_mut()
        .get_mut::<Health>(target)
        .unwrap()
        .adjust(target, -5);

    let projectile = app
        .world_mut()
        .spawn(CircleProjectile::bundle(
            IVec2::new(110, 110),
            owner,
            Direction::Up,
        ))
        .id();

    app.world_mut().run_schedule(FixedUpdate);

    assert!(app.world().get_entity(projectile).is_ok());
    assert!(damaged(&mut app).is_empty());
}

#[test]
fn stray_projectiles_despawn() {
    let mut app = make_app();
    app.insert_resource(PlayArea::from_size(IVec2::new(100, 100)));
    let owner = app.world_mut().spawn_empty().id();

    let projectile = app
        .world_mut()
        .spawn(CircleProjectile::bundle(
            IVec2::new(10, 50),
            owner,
            Direction::Left,
        ))
        .id();

    // Still partly inside after the first step.
    app.world_mut().run_schedule(FixedUpdate);
    assert_eq!(
        app.world().get::<Body>(projectile).unwrap().position(),
        IVec2::new(-1, 47)
    );

    app.world_mut().run_schedule(FixedUpdate);
    assert!(app.world().get_entity(projectile).is_err());
}

#[test]
fn projectile_accessors() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();

    let projectile = Projectile::new(3, owner, Direction::Up);
    assert_eq!(projectile.power(), 3);
    assert_eq!(projectile.owner(), owner);
    assert_eq!(projectile.direction(), Direction::Up);
}

fn make_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        TaskPoolPlugin::default(),
        PhysicsPlugin,
        ActorPlugin,
        CombatPlugin,
        ProjectilePlugin,
    ));
    configure_sets(&mut app);
    app
}

fn spawn_target(app: &mut App, position: IVec2) -> Entity {
    app.world_mut()
        .spawn((
            Body::new(position, IVec2::new(20, 20), 2),
            Health::new(5),
        ))
        .id()
}

fn damaged(app: &mut App) -> Vec<Damaged> {
    app.world_mut()
        .run_system_once(|mut reader: MessageReader<Damaged>| {
            reader.read().copied().collect::<Vec<_>>()
        })
        .unwrap()
}
