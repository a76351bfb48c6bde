use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

use tb_physics::body::{Body, Bounds};

use crate::{WorldSystems, animation::Animation};

pub struct ActorPlugin;

pub fn settle_bodies(mut bodies: Query<&mut Body>) {
    bodies.iter_mut().for_each(|mut body| {
        if body.is_moving() {
            body.settle();
        }
    });
}

pub fn update_actors(mut query: Query<(&Body, &mut Bounds, Option<&mut Animation>)>) {
    query.iter_mut().for_each(|(body, mut bounds, animation)| {
        bounds.set_if_neq(Bounds::of(body));

        if let Some(mut animation) = animation {
            animation.advance(body.facing(), body.is_moving());
        }
    });
}

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, settle_bodies.in_set(WorldSystems::BeginTick));
        app.add_systems(FixedUpdate, update_actors.in_set(WorldSystems::Update));
    }
}
