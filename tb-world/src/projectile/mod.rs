#[cfg(test)]
mod tests;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;

use tb_physics::{
    area::PlayArea,
    body::{Body, Bounds},
    direction::Direction,
};

use crate::{
    WorldSystems,
    combat::{Damaged, Health},
};

pub struct ProjectilePlugin;

/// Travels in a straight line, ignoring terrain, until it hits something other than its owner.
#[derive(Copy, Clone, Component, Debug, PartialEq, Eq)]
pub struct Projectile {
    power: u32,
    owner: Entity,
    direction: Direction,
}

#[derive(Copy, Clone, Component, Debug, Default)]
pub struct CircleProjectile;

pub fn move_projectiles(mut projectiles: Query<(&Projectile, &mut Body)>) {
    projectiles
        .iter_mut()
        .for_each(|(projectile, mut body)| body.advance(projectile.direction));
}

pub fn apply_projectiles(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile, &Body)>,
    mut targets: Query<(Entity, &Bounds, &mut Health)>,
    mut damaged: MessageWriter<Damaged>,
) {
    projectiles.iter().for_each(|(id, projectile, body)| {
        let rect = body.rect();
        let hit = targets.iter_mut().find(|(target, bounds, health)| {
            *target != projectile.owner && health.is_alive() && bounds.intersects(rect)
        });

        if let Some((target, _, mut health)) = hit {
            health.adjust(target, -(projectile.power as i32));
            damaged.write(Damaged {
                target,
                amount: projectile.power,
            });
            debug!(
                "projectile {id} hit {target}, {} health left",
                health.current()
            );

            commands.entity(id).despawn();
        }
    });
}

pub fn despawn_stray_projectiles(
    mut commands: Commands,
    projectiles: Query<(Entity, &Body), With<Projectile>>,
    area: Res<PlayArea>,
) {
    projectiles.iter().for_each(|(id, body)| {
        if !area.overlaps(body.rect()) {
            commands.entity(id).despawn();
        }
    });
}

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            move_projectiles.in_set(WorldSystems::Behave),
        );
        app.add_systems(
            FixedUpdate,
            apply_projectiles.in_set(WorldSystems::Collide),
        );
        app.add_systems(
            FixedUpdate,
            despawn_stray_projectiles.in_set(WorldSystems::Resolve),
        );
    }
}

impl Projectile {
    pub fn new(power: u32, owner: Entity, direction: Direction) -> Self {
        Projectile {
            power,
            owner,
            direction,
        }
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl CircleProjectile {
    pub const SIZE: IVec2 = IVec2::splat(7);
    pub const POWER: u32 = 1;
    pub const SPEED: i32 = 8;

    /// A projectile centered on `center`, fired by `owner`.
    pub fn bundle(center: IVec2, owner: Entity, direction: Direction) -> impl Bundle {
        (
            CircleProjectile,
            Projectile::new(CircleProjectile::POWER, owner, direction),
            Body::new(
                center - CircleProjectile::SIZE / 2,
                CircleProjectile::SIZE,
                CircleProjectile::SPEED,
            )
            .with_facing(direction),
        )
    }
}
