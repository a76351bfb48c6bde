
use std::time::Duration;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_time::prelude::*;

use tb_physics::{body::Body, direction::Direction, terrain::TerrainParam};

use crate::{WorldSystems, animation::Animation, combat::Health, projectile::CircleProjectile};

pub struct PlayerPlugin;

#[derive(Clone, Component, Debug)]
#[require(Health = Health::new(Player::MAX_HEALTH), Animation)]
pub struct Player {
    fire_timer: Timer,
}

/// Directional keys currently held, with the time each was pressed.
#[derive(Clone, Debug, Default, Resource)]
pub struct PlayerInput {
    pub movement: KeyPresses,
    pub fire: KeyPresses,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPresses {
    pressed: [Option<Duration>; 4],
    resolved: Option<Direction>,
}

#[derive(Copy, Clone, Debug, Message, PartialEq, Eq)]
pub struct PlayerDefeated {
    pub player: Entity,
}

pub fn apply_player_input(
    mut commands: Commands,
    mut players: Query<(Entity, &mut Player, &mut Body)>,
    mut input: ResMut<PlayerInput>,
    terrain: TerrainParam,
    time: Res<Time>,
) {
    let terrain = terrain.get();
    let fire = input.fire.resolve();
    let movement = input.movement.resolve();

    players
        .iter_mut()
        .for_each(|(id, mut player, mut body)| {
            if player.fire_timer.tick(time.delta()).is_finished()
                && let Some(direction) = fire
            {
                let projectile = commands
                    .spawn(CircleProjectile::bundle(body.center(), id, direction))
                    .id();
                debug!("player {id} fired {projectile} {direction:?}");
                player.fire_timer = Timer::new(Player::FIRE_INTERVAL, TimerMode::Once);
            }

            if let Some(direction) = movement {
                body.attempt_move(direction, false, terrain);
            }
        });
}

pub fn check_player_health(
    players: Query<(Entity, &Health), With<Player>>,
    mut defeated: MessageWriter<PlayerDefeated>,
) {
    players.iter().for_each(|(player, health)| {
        if !health.is_alive() {
            defeated.write(PlayerDefeated { player });
        }
    });
}

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>();
        app.add_message::<PlayerDefeated>();

        app.add_systems(
            FixedUpdate,
            apply_player_input.in_set(WorldSystems::Behave),
        );
        app.add_systems(
            FixedUpdate,
            check_player_health.in_set(WorldSystems::Resolve),
        );
    }
}

impl Player {
    pub const SIZE: IVec2 = IVec2::splat(56);
    pub const SPEED: i32 = 4;
    pub const MAX_HEALTH: u32 = 3;
    pub const FIRE_INTERVAL: Duration = Duration::from_millis(100);
    pub const FIRST_SHOT_DELAY: Duration = Duration::from_millis(500);

    pub fn bundle(position: IVec2) -> impl Bundle {
        (
            Player::default(),
            Body::new(position, Player::SIZE, Player::SPEED),
        )
    }

    pub fn fire_timer(&self) -> &Timer {
        &self.fire_timer
    }

    pub fn fire_timer_mut(&mut self) -> &mut Timer {
        &mut self.fire_timer
    }
}

impl Default for Player {
    fn default() -> Self {
        Player {
            fire_timer: Timer::new(Player::FIRST_SHOT_DELAY, TimerMode::Once),
        }
    }
}

impl KeyPresses {
    /// Records a key press. Holding a key that is already down keeps its first press time.
    pub fn press(&mut self, direction: Direction, at: Duration) {
        self.pressed[direction.index()].get_or_insert(at);
    }

    pub fn release(&mut self, direction: Direction) {
        self.pressed[direction.index()] = None;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.pressed[direction.index()].is_some()
    }

    pub fn any_held(&self) -> bool {
        self.pressed.iter().any(Option::is_some)
    }

    pub fn presses(&self) -> impl Iterator<Item = (Direction, Option<Duration>)> + '_ {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, self.pressed[direction.index()]))
    }

    pub fn resolved(&self) -> Option<Direction> {
        self.resolved
    }

    /// Picks the single direction to act on this tick.
    pub fn resolve(&mut self) -> Option<Direction> {
        self.resolved = most_recent(self.presses(), self.resolved);
        self.resolved
    }
}

/// The most recently pressed of the held keys. When several were pressed at the same time,
/// `previous` is kept if it is one of them, otherwise the first in iteration order wins.
pub fn most_recent<T: Ord + Copy>(
    presses: impl IntoIterator<Item = (Direction, Option<T>)>,
    previous: Option<Direction>,
) -> Option<Direction> {
    presses
        .into_iter()
        .filter_map(|(direction, pressed)| Some((direction, pressed?)))
        .fold(None, |best, (direction, pressed)| match best {
            Some((_, best_pressed)) if best_pressed > pressed => best,
            Some((_, best_pressed)) if best_pressed == pressed && Some(direction) != previous => {
                best
            }
            _ => Some((direction, pressed)),
        })
        .map(|(direction, _)| direction)
}
