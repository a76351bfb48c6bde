use bevy_math::IVec2;

/// A cardinal direction in screen space, where `y` grows downward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn offset(self, distance: i32) -> IVec2 {
        self.unit() * distance
    }

    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

#[test]
fn test_direction_offset() {
    assert_eq!(Direction::Up.offset(4), IVec2::new(0, -4));
    assert_eq!(Direction::Down.offset(4), IVec2::new(0, 4));
    assert_eq!(Direction::Left.offset(3), IVec2::new(-3, 0));
    assert_eq!(Direction::Right.offset(3), IVec2::new(3, 0));
}

#[test]
fn test_direction_index() {
    for (index, direction) in Direction::ALL.into_iter().enumerate() {
        assert_eq!(direction.index(), index);
    }
}
