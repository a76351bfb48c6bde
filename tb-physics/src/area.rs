use bevy_ecs::prelude::*;
use bevy_math::prelude::*;

/// The playable region of the world, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Resource)]
pub struct PlayArea {
    rect: IRect,
}

impl PlayArea {
    pub const DEFAULT_SIZE: IVec2 = IVec2::new(960, 720);
    /// How far past the far edges a path follower may still plan a step.
    pub const EDGE_SLACK: i32 = 10;

    pub fn new(rect: IRect) -> Self {
        PlayArea { rect }
    }

    pub fn from_size(size: IVec2) -> Self {
        PlayArea::new(IRect::from_corners(IVec2::ZERO, size))
    }

    pub fn rect(&self) -> IRect {
        self.rect
    }

    pub fn min(&self) -> IVec2 {
        self.rect.min
    }

    pub fn max(&self) -> IVec2 {
        self.rect.max
    }

    /// Whether `rect` lies entirely inside the play area. Touching an edge counts as inside.
    pub fn contains(&self, rect: IRect) -> bool {
        rect.min.cmpge(self.rect.min).all() && rect.max.cmple(self.rect.max).all()
    }

    /// Whether `rect` shares any area with the play area.
    pub fn overlaps(&self, rect: IRect) -> bool {
        rect.min.cmplt(self.rect.max).all() && rect.max.cmpgt(self.rect.min).all()
    }

    /// The exclusive upper limit for the top-left corner of a body of the given size.
    pub fn reach(&self, size: IVec2) -> IVec2 {
        self.rect.max - size + IVec2::splat(PlayArea::EDGE_SLACK)
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        PlayArea::from_size(PlayArea::DEFAULT_SIZE)
    }
}

#[test]
fn test_contains() {
    let area = PlayArea::from_size(IVec2::new(100, 50));

    assert!(area.contains(IRect::new(0, 0, 100, 50)));
    assert!(area.contains(IRect::new(10, 10, 20, 20)));
    assert!(!area.contains(IRect::new(-1, 0, 10, 10)));
    assert!(!area.contains(IRect::new(95, 0, 101, 10)));
    assert!(!area.contains(IRect::new(0, 45, 10, 51)));
}

#[test]
fn test_overlaps() {
    let area = PlayArea::from_size(IVec2::new(100, 50));

    assert!(area.overlaps(IRect::new(-5, -5, 1, 1)));
    assert!(!area.overlaps(IRect::new(-5, -5, 0, 0)));
    assert!(!area.overlaps(IRect::new(100, 10, 110, 20)));
    assert!(area.overlaps(IRect::new(99, 49, 110, 60)));
}
