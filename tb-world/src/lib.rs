pub mod actor;
pub mod animation;
pub mod combat;
pub mod enemy;
pub mod path;
pub mod player;
pub mod projectile;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

use crate::actor::ActorPlugin;
use crate::combat::CombatPlugin;
use crate::enemy::EnemyPlugin;
use crate::path::PathPlugin;
use crate::player::PlayerPlugin;
use crate::projectile::ProjectilePlugin;

pub struct WorldPlugin;

/// Phases of a simulation tick, run in order in [`FixedUpdate`].
#[derive(Debug, PartialEq, Eq, Clone, Hash, SystemSet)]
pub enum WorldSystems {
    BeginTick,
    Plan,
    Behave,
    Collide,
    Update,
    Resolve,
}

pub fn configure_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            WorldSystems::BeginTick,
            WorldSystems::Plan,
            WorldSystems::Behave,
            WorldSystems::Collide,
            WorldSystems::Update,
            WorldSystems::Resolve,
        )
            .chain(),
    );
}

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        configure_sets(app);

        app.add_plugins((
            ActorPlugin,
            CombatPlugin,
            PathPlugin,
            PlayerPlugin,
            ProjectilePlugin,
            EnemyPlugin,
        ));
    }
}
