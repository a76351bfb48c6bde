use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

use crate::WorldSystems;

pub struct CombatPlugin;

#[derive(Clone, Component, Debug, Default)]
pub struct Health {
    current: u32,
    max: u32,
    damage: Vec<DamageEvent>,
}

/// One instance of damage taken, kept around for a few ticks so it can be displayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    target: Entity,
    amount: u32,
    ticks: i32,
    duration: i32,
}

#[derive(Copy, Clone, Debug, Message, PartialEq, Eq)]
pub struct Damaged {
    pub target: Entity,
    pub amount: u32,
}

pub fn tick_damage_events(mut query: Query<&mut Health>) {
    query.iter_mut().for_each(|mut health| {
        if !health.damage.is_empty() {
            health.tick_damage();
        }
    });
}

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Damaged>();

        app.add_systems(
            FixedUpdate,
            tick_damage_events.in_set(WorldSystems::Update),
        );
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            damage: Vec::new(),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn set_max(&mut self, max: u32) {
        self.max = max;
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Adds `delta` to the current health, stopping at zero. Negative deltas are recorded as
    /// damage events against `target`. There is no upper limit: healing past `max` is allowed.
    pub fn adjust(&mut self, target: Entity, delta: i32) {
        if delta < 0 {
            let amount = delta.unsigned_abs();
            self.damage.push(DamageEvent::new(target, amount));
            self.current = self.current.saturating_sub(amount);
        } else {
            self.current = self.current.saturating_add(delta as u32);
        }
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn clear_damage_events(&mut self) {
        self.damage.clear();
    }

    pub fn damage_events(&self) -> &[DamageEvent] {
        &self.damage
    }

    /// Counts down every damage event and drops those that have run out.
    pub fn tick_damage(&mut self) {
        self.damage.iter_mut().for_each(DamageEvent::tick);
        self.damage.retain(|event| !event.is_expired());
    }
}

impl DamageEvent {
    pub const TICKS: i32 = 30;

    pub fn new(target: Entity, amount: u32) -> Self {
        DamageEvent::with_ticks(target, amount, DamageEvent::TICKS)
    }

    pub fn with_ticks(target: Entity, amount: u32, ticks: i32) -> Self {
        DamageEvent {
            target,
            amount,
            ticks,
            duration: ticks,
        }
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn ticks(&self) -> i32 {
        self.ticks
    }

    pub fn tick(&mut self) {
        self.ticks -= 1;
    }

    pub fn is_expired(&self) -> bool {
        self.ticks < 0
    }

    /// Fraction of the countdown that has elapsed, from 0 when created to 1 when it runs out.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0 {
            return 1.0;
        }

        ((self.duration - self.ticks) as f32 / self.duration as f32).clamp(0.0, 1.0)
    }
}
