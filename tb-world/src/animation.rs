use bevy_ecs::prelude::*;

use tb_physics::direction::Direction;

/// Walk-cycle state for an actor drawn from a character sheet.
///
/// The sheet is a 4x4 grid: row 0 faces down, row 1 left, row 2 right, row 3 up. The first
/// column of each row is the standing frame.
#[derive(Copy, Clone, Component, Debug, Default, PartialEq, Eq)]
pub struct Animation {
    frame: u32,
    sheet: bool,
    index: usize,
}

impl Animation {
    /// The frame counter returns to zero after reaching this value.
    pub const WRAP: u32 = 10_000;

    pub fn with_sheet() -> Self {
        Animation {
            sheet: true,
            ..Default::default()
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn has_sheet(&self) -> bool {
        self.sheet
    }

    pub fn set_sheet(&mut self, sheet: bool) {
        self.sheet = sheet;
    }

    /// The sheet frame to draw, or `None` when no sheet is bound.
    pub fn index(&self) -> Option<usize> {
        self.sheet.then_some(self.index)
    }

    pub fn advance(&mut self, facing: Direction, moving: bool) {
        self.frame = if self.frame < Animation::WRAP {
            self.frame + 1
        } else {
            0
        };

        if !self.sheet {
            return;
        }

        self.index = frame_index(facing, moving, self.frame);
    }
}

pub fn frame_index(facing: Direction, moving: bool, frame: u32) -> usize {
    if !moving {
        return match facing {
            Direction::Down => 0,
            Direction::Left => 4,
            Direction::Right => 8,
            Direction::Up => 12,
        };
    }

    match facing {
        Direction::Down => alternate(frame, 1, 3),
        Direction::Up => alternate(frame, 13, 15),
        Direction::Left => stride(frame, 5),
        Direction::Right => stride(frame, 9),
    }
}

fn alternate(frame: u32, first: usize, second: usize) -> usize {
    if frame % 20 < 10 { first } else { second }
}

// Sideways walking changes frame every 10 ticks. Multiples of 30 take precedence over
// multiples of 20.
fn stride(frame: u32, first: usize) -> usize {
    let step = frame - frame % 10;
    if step % 30 == 0 {
        first + 2
    } else if step % 20 == 0 {
        first + 1
    } else {
        first
    }
}
