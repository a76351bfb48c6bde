use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_math::prelude::*;
use bevy_sprite::prelude::*;
use bevy_transform::prelude::*;

use tb_physics::area::PlayArea;
use tb_world::{combat::Health, player::Player};

pub struct HudPlugin;

/// One of the player's remaining health points, drawn along the top-left edge.
#[derive(Copy, Clone, Component, Debug, PartialEq, Eq)]
pub struct HealthIcon {
    pub slot: u32,
}

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, update_health_icons);
    }
}

pub fn update_health_icons(
    mut commands: Commands,
    players: Query<&Health, (With<Player>, Changed<Health>)>,
    icons: Query<(Entity, &HealthIcon)>,
    area: Res<PlayArea>,
) {
    let Some(health) = players.iter().next() else {
        return;
    };

    let shown = icons.iter().count() as u32;
    if shown == health.current() {
        return;
    }

    icons.iter().for_each(|(id, icon)| {
        if icon.slot >= health.current() {
            commands.entity(id).despawn();
        }
    });

    (shown..health.current()).for_each(|slot| {
        commands.spawn((
            HealthIcon { slot },
            Sprite::from_color(HealthIcon::COLOR, Vec2::splat(HealthIcon::SIZE)),
            Transform::from_translation(
                HealthIcon::position(&area, slot).extend(HealthIcon::DEPTH),
            ),
        ));
    });
}

impl HealthIcon {
    pub const COLOR: Color = Color::srgb(0.85, 0.1, 0.15);
    pub const SIZE: f32 = 12.0;
    pub const SPACING: f32 = 18.0;
    pub const DEPTH: f32 = 10.0;

    pub fn position(area: &PlayArea, slot: u32) -> Vec2 {
        let half = area.rect().size().as_vec2() / 2.0;
        Vec2::new(
            -half.x + HealthIcon::SPACING * (slot as f32 + 0.5),
            half.y - HealthIcon::SPACING / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use bevy_app::prelude::*;
    use bevy_ecs::prelude::*;
    use bevy_math::prelude::*;

    use tb_physics::{PhysicsPlugin, area::PlayArea};
    use tb_world::{combat::Health, player::Player};

    use crate::hud::{HealthIcon, HudPlugin};

    #[test]
    fn icon_positions() {
        let area = PlayArea::from_size(IVec2::new(200, 100));

        assert_eq!(HealthIcon::position(&area, 0), Vec2::new(-91.0, 41.0));
        assert_eq!(HealthIcon::position(&area, 2), Vec2::new(-55.0, 41.0));
    }

    #[test]
    fn icons_follow_player_health() {
        let mut app = App::new();
        app.add_plugins((TaskPoolPlugin::default(), PhysicsPlugin, HudPlugin));

        let player = app.world_mut().spawn(Player::bundle(IVec2::ZERO)).id();
        app.world_mut().run_schedule(PostUpdate);
        assert_eq!(slots(&mut app), vec![0, 1, 2]);

        app.world_mut()
            .get_mut::<Health>(player)
            .unwrap()
            .adjust(player, -2);
        app.world_mut().run_schedule(PostUpdate);
        assert_eq!(slots(&mut app), vec![0]);

        app.world_mut().get_mut::<Health>(player).unwrap().restore();
        app.world_mut().run_schedule(PostUpdate);
        assert_eq!(slots(&mut app), vec![0, 1, 2]);
    }

    fn slots(app: &mut App) -> Vec<u32> {
        let mut slots: Vec<_> = app
            .world_mut()
            .query::<&HealthIcon>()
            .iter(app.world())
            .map(|icon| icon.slot)
            .collect();
        slots.sort();
        slots
    }
}
