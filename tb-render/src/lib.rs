pub mod assets;
pub mod damage;
pub mod hud;
pub mod sprite;
pub mod terrain;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

use crate::{
    assets::AssetsPlugin, damage::DamagePlugin, hud::HudPlugin, sprite::ActorSpritePlugin,
    terrain::TerrainPlugin,
};

pub struct RenderPlugin;

#[derive(Debug, PartialEq, Eq, Clone, Hash, SystemSet)]
pub enum RenderSystems {
    SyncSprites,
    Tint,
}

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            PostUpdate,
            (RenderSystems::SyncSprites, RenderSystems::Tint).chain(),
        );

        app.add_plugins((
            AssetsPlugin,
            ActorSpritePlugin,
            DamagePlugin,
            HudPlugin,
            TerrainPlugin,
        ));
    }
}
