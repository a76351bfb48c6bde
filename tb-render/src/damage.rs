use bevy_app::prelude::*;
use bevy_color::{Alpha, Color, Mix};
use bevy_ecs::prelude::*;
use bevy_math::{Curve, curve::ExponentialInCurve, prelude::*};
use bevy_sprite::prelude::*;
use bevy_transform::prelude::*;

use tb_physics::{area::PlayArea, body::Bounds};
use tb_world::combat::{DamageEvent, Damaged, Health};

use crate::{RenderSystems, sprite::screen_position};

pub struct DamagePlugin;

/// Marks a sprite as tinted by recent damage. Removed once the target's damage events
/// have all expired.
#[derive(Copy, Clone, Component, Debug)]
pub struct DamageTint {
    pub base: Color,
}

/// One damage event drawn above its target, a bar one pip wide per point of damage that
/// rises and fades as the event runs out.
#[derive(Copy, Clone, Component, Debug, PartialEq, Eq)]
pub struct DamageMarker {
    pub target: Entity,
    pub amount: u32,
}

impl Plugin for DamagePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (start_damage_tints, update_damage_tints, update_damage_markers)
                .chain()
                .in_set(RenderSystems::Tint),
        );
    }
}

pub fn start_damage_tints(
    mut commands: Commands,
    mut damage_messages: MessageReader<Damaged>,
    sprites: Query<&Sprite, Without<DamageTint>>,
) {
    damage_messages.read().for_each(|damaged| {
        if let Ok(sprite) = sprites.get(damaged.target) {
            commands.entity(damaged.target).insert(DamageTint {
                base: sprite.color,
            });
        }
    });
}

pub fn update_damage_tints(
    mut commands: Commands,
    mut tinted: Query<(Entity, &DamageTint, &Health, &mut Sprite)>,
) {
    tinted
        .iter_mut()
        .for_each(|(id, tint, health, mut sprite)| {
            sprite.color = match health.damage_events().last() {
                Some(event) => tint.tint(event.progress()),
                None => {
                    commands.entity(id).remove::<DamageTint>();
                    tint.base
                }
            };
        });
}

/// Rebuilds the markers of targets whose damage events changed this frame.
pub fn update_damage_markers(
    mut commands: Commands,
    area: Res<PlayArea>,
    targets: Query<(&Health, &Bounds), Changed<Health>>,
    alive: Query<(), With<Health>>,
    markers: Query<(Entity, &DamageMarker)>,
) {
    markers.iter().for_each(|(id, marker)| {
        if targets.contains(marker.target) || !alive.contains(marker.target) {
            commands.entity(id).despawn();
        }
    });

    targets.iter().for_each(|(health, bounds)| {
        health
            .damage_events()
            .iter()
            .enumerate()
            .for_each(|(slot, event)| {
                commands.spawn(DamageMarker::bundle(&area, bounds.rect(), slot, event));
            });
    });
}

impl DamageTint {
    pub const COLOR: Color = Color::linear_rgb(0.7, 0.0, 0.0);

    /// The sprite color `progress` of the way through a damage event.
    pub fn tint(&self, progress: f32) -> Color {
        match ExponentialInCurve.sample(progress) {
            Some(t) => DamageTint::COLOR.mix(&self.base, t),
            None => self.base,
        }
    }
}

impl DamageMarker {
    pub const PIP_SIZE: Vec2 = Vec2::splat(4.0);
    pub const SPACING: f32 = 6.0;
    pub const RISE: f32 = 12.0;
    pub const DEPTH: f32 = 4.0;

    pub fn bundle(area: &PlayArea, rect: IRect, slot: usize, event: &DamageEvent) -> impl Bundle {
        let progress = event.progress();
        let size = Vec2::new(
            DamageMarker::PIP_SIZE.x * event.amount() as f32,
            DamageMarker::PIP_SIZE.y,
        );

        let top = screen_position(area, rect) + Vec2::Y * (rect.height() as f32 / 2.0);
        let offset = DamageMarker::SPACING * (slot + 1) as f32 + DamageMarker::RISE * progress;

        (
            DamageMarker {
                target: event.target(),
                amount: event.amount(),
            },
            Sprite::from_color(DamageTint::COLOR.with_alpha(1.0 - progress), size),
            Transform::from_translation((top + Vec2::Y * offset).extend(DamageMarker::DEPTH)),
        )
    }
}
