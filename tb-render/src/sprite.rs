use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::{lifecycle::HookContext, prelude::*, world::DeferredWorld};
use bevy_math::prelude::*;
use bevy_sprite::prelude::*;
use bevy_transform::prelude::*;

use tb_physics::{area::PlayArea, body::Bounds};
use tb_world::{
    animation::Animation, enemy::Enemy, player::Player, projectile::CircleProjectile,
};

use crate::{RenderSystems, assets::AssetHandles};

pub struct ActorSpritePlugin;

#[derive(Copy, Clone, Component, Debug, Default)]
#[require(Sprite)]
#[component(on_add = PlayerSprite::on_add)]
pub struct PlayerSprite;

#[derive(Copy, Clone, Component, Debug, Default)]
#[require(Sprite)]
#[component(on_add = EnemySprite::on_add)]
pub struct EnemySprite;

#[derive(Copy, Clone, Component, Debug, Default)]
#[require(Sprite)]
#[component(on_add = ProjectileSprite::on_add)]
pub struct ProjectileSprite;

impl Plugin for ActorSpritePlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<Player, PlayerSprite>();
        app.register_required_components::<Enemy, EnemySprite>();
        app.register_required_components::<CircleProjectile, ProjectileSprite>();

        app.add_systems(PostUpdate, sync_sprites.in_set(RenderSystems::SyncSprites));
    }
}

/// Places sprites over their bodies and picks the current sheet frame.
pub fn sync_sprites(
    area: Res<PlayArea>,
    mut query: Query<(&Bounds, Option<&Animation>, &mut Transform, &mut Sprite)>,
) {
    query
        .iter_mut()
        .for_each(|(bounds, animation, mut transform, mut sprite)| {
            let position = screen_position(&area, bounds.rect());
            transform.translation.x = position.x;
            transform.translation.y = position.y;

            let size = bounds.rect().size().as_vec2();
            if sprite.custom_size != Some(size) {
                sprite.custom_size = Some(size);
            }

            if let Some(index) = animation.and_then(Animation::index)
                && let Some(atlas) = sprite.texture_atlas.as_mut()
            {
                atlas.index = index;
            }
        });
}

/// Center of `rect` relative to the center of the play area, with `y` pointing up.
pub fn screen_position(area: &PlayArea, rect: IRect) -> Vec2 {
    let center = rect.as_rect().center();
    let origin = area.rect().as_rect().center();
    Vec2::new(center.x - origin.x, origin.y - center.y)
}

impl PlayerSprite {
    pub const COLOR: Color = Color::srgb(0.25, 0.55, 0.95);
    pub const DEPTH: f32 = 2.0;

    fn on_add(mut world: DeferredWorld, context: HookContext) {
        *world.get_mut::<Sprite>(context.entity).unwrap() =
            Sprite::from_color(PlayerSprite::COLOR, Vec2::ONE);
        world
            .get_mut::<Transform>(context.entity)
            .unwrap()
            .translation
            .z = PlayerSprite::DEPTH;
    }
}

impl EnemySprite {
    pub const DEPTH: f32 = 1.0;

    fn on_add(mut world: DeferredWorld, context: HookContext) {
        let sprite = world.resource::<AssetHandles>().character(0);
        *world.get_mut::<Sprite>(context.entity).unwrap() = sprite;
        world
            .get_mut::<Transform>(context.entity)
            .unwrap()
            .translation
            .z = EnemySprite::DEPTH;
    }
}

impl ProjectileSprite {
    pub const COLOR: Color = Color::srgb(1.0, 0.85, 0.3);
    pub const DEPTH: f32 = 3.0;

    fn on_add(mut world: DeferredWorld, context: HookContext) {
        *world.get_mut::<Sprite>(context.entity).unwrap() =
            Sprite::from_color(ProjectileSprite::COLOR, Vec2::ONE);
        world
            .get_mut::<Transform>(context.entity)
            .unwrap()
            .translation
            .z = ProjectileSprite::DEPTH;
    }
}
