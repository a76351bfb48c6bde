use bevy::prelude::*;

use tb_physics::{
    body::Body,
    tile::{
        TilePosition,
        storage::{TileMap, TileMaterial},
    },
};
use tb_world::{
    WorldSystems,
    combat::Health,
    enemy::Enemy,
    player::{Player, PlayerDefeated},
    projectile::Projectile,
};

pub struct ArenaPlugin;

pub const PLAYER_SPAWN: IVec2 = IVec2::new(452, 332);

pub const ENEMY_SPAWNS: [IVec2; 4] = [
    IVec2::new(40, 40),
    IVec2::new(872, 40),
    IVec2::new(40, 632),
    IVec2::new(872, 632),
];

/// Top-left tile and extent of each wall block.
const PILLARS: [(IVec2, IVec2); 4] = [
    (IVec2::new(30, 20), IVec2::new(4, 6)),
    (IVec2::new(86, 20), IVec2::new(4, 6)),
    (IVec2::new(30, 64), IVec2::new(4, 6)),
    (IVec2::new(86, 64), IVec2::new(4, 6)),
];

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup);
        app.add_systems(
            FixedUpdate,
            (reset_defeated_player, spawn_enemy_wave)
                .chain()
                .after(WorldSystems::Resolve),
        );
    }
}

pub fn setup(mut commands: Commands, mut tiles: ResMut<TileMap>) {
    commands.spawn(Camera2d);

    arena_walls().for_each(|tile| tiles.set_material(tile, TileMaterial::Wall));

    let player = commands.spawn(Player::bundle(PLAYER_SPAWN)).id();
    info!("spawned player {player} at {PLAYER_SPAWN}");
}

/// Puts a defeated player back at the spawn point with full health and clears the field.
pub fn reset_defeated_player(
    mut commands: Commands,
    mut defeated: MessageReader<PlayerDefeated>,
    mut players: Query<(&mut Player, &mut Body, &mut Health)>,
    enemies: Query<Entity, With<Enemy>>,
    projectiles: Query<Entity, With<Projectile>>,
) -> Result {
    let Some(defeated) = defeated.read().last() else {
        return Ok(());
    };

    let (mut player, mut body, mut health) = players.get_mut(defeated.player)?;
    *player = Player::default();
    body.place(PLAYER_SPAWN);
    health.restore();
    health.clear_damage_events();

    enemies
        .iter()
        .chain(projectiles.iter())
        .for_each(|id| commands.entity(id).try_despawn());

    info!("player {} defeated, resetting arena", defeated.player);
    Ok(())
}

pub fn spawn_enemy_wave(mut commands: Commands, enemies: Query<(), With<Enemy>>) {
    if !enemies.is_empty() {
        return;
    }

    for position in ENEMY_SPAWNS {
        commands.spawn(Enemy::bundle(position));
    }
    info!("spawned {} enemies", ENEMY_SPAWNS.len());
}

pub fn arena_walls() -> impl Iterator<Item = TilePosition> {
    PILLARS.into_iter().flat_map(|(origin, size)| {
        (0..size.y).flat_map(move |y| {
            (0..size.x).map(move |x| TilePosition::from_vec(origin + IVec2::new(x, y)))
        })
    })
}
