
use std::collections::VecDeque;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;

use tb_physics::{
    body::Body,
    direction::Direction,
    terrain::{Terrain, TerrainParam},
    tile::TilePosition,
};

use crate::WorldSystems;

pub struct PathPlugin;

/// Tile waypoints, consumed front to back.
#[derive(Clone, Component, Debug, Default, PartialEq, Eq)]
pub struct Path {
    waypoints: VecDeque<TilePosition>,
}

#[derive(Copy, Clone, Component, Debug, Default, PartialEq, Eq)]
#[require(Path)]
pub struct PathFollower {
    target: Option<IVec2>,
    failed_attempts: u32,
}

pub fn follow_paths(
    mut query: Query<(&mut Body, &mut PathFollower, &mut Path)>,
    terrain: TerrainParam,
) {
    let terrain = terrain.get();
    query
        .iter_mut()
        .for_each(|(mut body, mut follower, mut path)| {
            if follower.is_idle(&path) {
                return;
            }

            follower.follow(&mut body, &mut path, terrain);
        });
}

impl Plugin for PathPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, follow_paths.in_set(WorldSystems::Behave));
    }
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    pub fn push(&mut self, waypoint: TilePosition) {
        self.waypoints.push_back(waypoint);
    }

    pub fn peek(&self) -> Option<TilePosition> {
        self.waypoints.front().copied()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<TilePosition> {
        self.waypoints.pop_front()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> impl ExactSizeIterator<Item = TilePosition> + '_ {
        self.waypoints.iter().copied()
    }
}

impl<T: Into<TilePosition>> FromIterator<T> for Path {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Path {
            waypoints: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathFollower {
    /// Within this many pixels of its target, a follower moves on to the next waypoint.
    pub const ARRIVAL_DISTANCE: f32 = 40.0;
    /// Consecutive blocked moves before the path is abandoned.
    pub const MAX_FAILED_ATTEMPTS: u32 = 3;

    /// The pixel position currently being steered toward.
    pub fn target(&self) -> Option<IVec2> {
        self.target
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn is_idle(&self, path: &Path) -> bool {
        self.target.is_none() && path.is_empty()
    }

    /// Drops the current target, e.g. before handing out a new path.
    pub fn reset(&mut self) {
        self.target = None;
        self.failed_attempts = 0;
    }

    /// Steps `body` toward the next waypoint of `path`, one axis at a time.
    ///
    /// When more than one axis needs correcting, each correction is a half-speed diagonal
    /// step. After [`Self::MAX_FAILED_ATTEMPTS`] blocked moves in a row the path is cleared.
    pub fn follow(&mut self, body: &mut Body, path: &mut Path, terrain: Terrain) {
        let target = match self.target {
            Some(target) => target,
            None => match path.next() {
                Some(waypoint) => *self.target.insert(waypoint.to_pixel()),
                None => return,
            },
        };

        let position = body.position();
        let speed = body.speed();
        let min = terrain.area.min();
        let reach = terrain.area.reach(body.size());

        let steps = [
            (
                Direction::Right,
                position.x < target.x,
                position.x + speed < reach.x,
            ),
            (
                Direction::Left,
                position.x > target.x,
                position.x - speed >= min.x,
            ),
            (
                Direction::Down,
                position.y < target.y,
                position.y + speed < reach.y,
            ),
            (
                Direction::Up,
                position.y > target.y,
                position.y - speed >= min.y,
            ),
        ];
        let diagonal = steps.iter().filter(|&&(_, needed, _)| needed).count() > 1;

        for (direction, needed, in_reach) in steps {
            if !needed || !in_reach {
                continue;
            }

            if body.attempt_move(direction, diagonal, terrain) {
                self.failed_attempts = 0;
            } else {
                self.failed_attempts += 1;
            }
        }

        if body.distance_to_point(target) < PathFollower::ARRIVAL_DISTANCE {
            self.target = None;
        }

        if self.failed_attempts >= PathFollower::MAX_FAILED_ATTEMPTS {
            debug!(
                "abandoning path with {} waypoints left at {:?}",
                path.len(),
                body.position()
            );
            path.clear();
            self.reset();
        }
    }
}
