use std::{collections::VecDeque, iter, time::Duration};

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_platform::collections::HashMap;
use bevy_time::prelude::*;

use tb_physics::{
    body::Body,
    direction::Direction,
    terrain::{Terrain, TerrainParam},
    tile::TilePosition,
};

use crate::{
    WorldSystems,
    animation::Animation,
    combat::{Damaged, Health},
    path::{Path, PathFollower},
    player::Player,
};

pub struct EnemyPlugin;

#[derive(Clone, Component, Debug)]
#[require(
    Health = Health::new(Enemy::MAX_HEALTH),
    PathFollower,
    Animation = Animation::with_sheet()
)]
pub struct Enemy {
    attack_timer: Timer,
}

/// Hands idle enemies a new path toward the player.
pub fn plan_chase_paths(
    mut enemies: Query<(&Body, &mut PathFollower, &mut Path), With<Enemy>>,
    players: Query<&Body, With<Player>>,
    terrain: TerrainParam,
) {
    let Some(player) = players.iter().next() else {
        return;
    };

    let terrain = terrain.get();
    enemies
        .iter_mut()
        .for_each(|(body, mut follower, mut path)| {
            if !follower.is_idle(&path) {
                return;
            }

            // Waypoints address the top-left corner, so aim it at where the centers line up.
            let goal = TilePosition::containing(player.center() - body.size() / 2);
            let start = TilePosition::containing(body.position());
            if start == goal {
                return;
            }

            follower.reset();
            *path = chase_path(start, goal, body.size(), terrain);
        });
}

/// Enemies within reach of the player hit it, then wait out their attack interval.
pub fn attack_players(
    mut enemies: Query<(Entity, &mut Enemy, &Body)>,
    mut players: Query<(Entity, &Body, &mut Health), With<Player>>,
    mut damaged: MessageWriter<Damaged>,
    time: Res<Time>,
) {
    enemies.iter_mut().for_each(|(id, mut enemy, body)| {
        if !enemy.attack_timer.tick(time.delta()).is_finished() {
            return;
        }

        let target = players.iter_mut().find(|(_, player, health)| {
            health.is_alive() && body.distance_to(player) <= Enemy::ATTACK_RANGE
        });

        if let Some((player, _, mut health)) = target {
            health.adjust(player, -(Enemy::ATTACK_POWER as i32));
            damaged.write(Damaged {
                target: player,
                amount: Enemy::ATTACK_POWER,
            });
            enemy.attack_timer.reset();
            debug!(
                "enemy {id} hit player {player}, {} health left",
                health.current()
            );
        }
    });
}

pub fn despawn_defeated_enemies(
    mut commands: Commands,
    enemies: Query<(Entity, &Health), With<Enemy>>,
) {
    enemies.iter().for_each(|(id, health)| {
        if !health.is_alive() {
            info!("enemy {id} defeated");
            commands.entity(id).despawn();
        }
    });
}

/// The first [`Enemy::MAX_WAYPOINTS`] steps of a shortest route from `start` to `goal` over
/// tiles where a body of `size` fits.
///
/// If `goal` can't be reached, the route leads to the closest reachable tile instead, and is
/// empty when that is `start` itself.
pub fn chase_path(
    start: TilePosition,
    goal: TilePosition,
    size: IVec2,
    terrain: Terrain,
) -> Path {
    let fits = |tile: TilePosition| {
        let min = tile.to_pixel();
        terrain.admits(IRect::from_corners(min, min + size))
    };
    let remaining = |tile: TilePosition| (goal.position() - tile.position()).abs().element_sum();

    let mut parents: HashMap<_, _> = HashMap::from_iter([(start, start)]);
    let mut queue = VecDeque::from([start]);
    let mut closest = start;

    while let Some(tile) = queue.pop_front() {
        if remaining(tile) < remaining(closest) {
            closest = tile;
        }
        if tile == goal || parents.len() >= Enemy::SEARCH_LIMIT {
            break;
        }

        for direction in Direction::ALL {
            let next = tile.step(direction);
            if !parents.contains_key(&next) && fits(next) {
                parents.insert(next, tile);
                queue.push_back(next);
            }
        }
    }

    let mut route: Vec<TilePosition> = iter::successors(Some(closest), |tile| {
        parents.get(tile).copied().filter(|parent| parent != tile)
    })
    .collect();
    route.pop();
    route.reverse();
    route.truncate(Enemy::MAX_WAYPOINTS);
    route.into_iter().collect()
}

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, plan_chase_paths.in_set(WorldSystems::Plan));
        app.add_systems(FixedUpdate, attack_players.in_set(WorldSystems::Collide));
        app.add_systems(
            FixedUpdate,
            despawn_defeated_enemies.in_set(WorldSystems::Resolve),
        );
    }
}

impl Enemy {
    pub const SPRITE_SIZE: UVec2 = UVec2::splat(32);
    pub const SPEED: i32 = 2;
    pub const MAX_HEALTH: u32 = 3;
    pub const MAX_WAYPOINTS: usize = 16;
    /// Tiles explored per plan before settling for the closest one found.
    pub const SEARCH_LIMIT: usize = 16384;
    /// Center to center distance at which an enemy can hit the player.
    pub const ATTACK_RANGE: f32 = 48.0;
    pub const ATTACK_POWER: u32 = 1;
    pub const ATTACK_INTERVAL: Duration = Duration::from_secs(1);

    pub fn bundle(position: IVec2) -> impl Bundle {
        (
            Enemy::default(),
            Body::from_sprite(position, Enemy::SPRITE_SIZE, Enemy::SPEED),
        )
    }

    pub fn attack_timer(&self) -> &Timer {
        &self.attack_timer
    }
}

impl Default for Enemy {
    /// The first attack is ready as soon as the player comes into range.
    fn default() -> Self {
        let mut attack_timer = Timer::new(Enemy::ATTACK_INTERVAL, TimerMode::Once);
        attack_timer.tick(Enemy::ATTACK_INTERVAL);
        Enemy { attack_timer }
    }
}
