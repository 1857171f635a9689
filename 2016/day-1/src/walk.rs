use std::collections::HashSet;

use glam::IVec2;
use miette::*;
use tracing::{debug, trace};

/// Compass heading, ordinal encoded so that turning is arithmetic mod 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Heading {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Heading {
    /// Headings in clockwise order, indexed by their ordinal.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Returns the heading 90° to the given side.
    pub fn turn(self, side: Side) -> Self {
        let offset = match side {
            Side::Right => 1,
            Side::Left => 3,
        };
        Self::ALL[(self as usize + offset) % 4]
    }

    /// Unit step for one cell of movement. North is +y.
    pub fn step(self) -> IVec2 {
        match self {
            Heading::North => IVec2::Y,
            Heading::East => IVec2::X,
            Heading::South => IVec2::NEG_Y,
            Heading::West => IVec2::NEG_X,
        }
    }
}

impl TryFrom<u8> for Heading {
    type Error = Report;

    fn try_from(ordinal: u8) -> Result<Self> {
        Self::ALL.get(ordinal as usize).copied().ok_or_else(|| {
            miette!(
                code = "walk::invalid_input",
                help = "headings are encoded as 0 (north) through 3 (west)",
                "unknown heading ordinal {ordinal}"
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl TryFrom<char> for Side {
    type Error = Report;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'L' => Ok(Side::Left),
            'R' => Ok(Side::Right),
            _ => Err(miette!(
                code = "walk::invalid_input",
                help = "a turn is either 'L' or 'R'",
                "unknown turn side {c:?}"
            )),
        }
    }
}

/// Free-standing form of [`Heading::turn`].
pub fn apply_turn(heading: Heading, side: Side) -> Heading {
    heading.turn(side)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Turn(Side),
    Move(u32),
}

/// One parsed token such as `R5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub side: Side,
    pub distance: u32,
}

impl Instruction {
    /// The turn always comes before the move.
    pub fn operations(self) -> [Operation; 2] {
        [Operation::Turn(self.side), Operation::Move(self.distance)]
    }
}

/// Manhattan distance of a cell from the origin.
pub fn manhattan(position: IVec2) -> u32 {
    position.x.unsigned_abs() + position.y.unsigned_abs()
}

/// Distances reported at the end of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distances {
    pub final_distance: u32,
    /// `None` when no cell was ever visited twice.
    pub first_repeat_distance: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Walk {
    position: IVec2,
    heading: Heading,
    visited: HashSet<IVec2>,
    first_repeat: Option<IVec2>,
}

impl Default for Walk {
    fn default() -> Self {
        Self::new()
    }
}

impl Walk {
    /// Starts at the origin facing north. The origin counts as visited.
    pub fn new() -> Self {
        Self {
            position: IVec2::ZERO,
            heading: Heading::North,
            visited: HashSet::from([IVec2::ZERO]),
            first_repeat: None,
        }
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn first_repeat(&self) -> Option<IVec2> {
        self.first_repeat
    }

    pub fn has_visited(&self, cell: IVec2) -> bool {
        self.visited.contains(&cell)
    }

    /// Number of distinct cells occupied so far.
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn turn(&mut self, side: Side) {
        let heading = self.heading.turn(side);
        trace!(from = ?self.heading, to = ?heading, ?side, "turn");
        self.heading = heading;
    }

    /// Walks `distance` cells along the current heading, one cell at a time,
    /// and returns the first repeated cell of the whole walk, if any.
    pub fn advance(&mut self, distance: u32) -> Option<IVec2> {
        let step = self.heading.step();

        for _ in 0..distance {
            self.position += step;
            // `insert` returns false when the cell was already there.
            if !self.visited.insert(self.position) && self.first_repeat.is_none() {
                debug!(cell = %self.position, "first cell visited twice");
                self.first_repeat = Some(self.position);
            }
        }

        trace!(heading = ?self.heading, distance, position = %self.position, "move");
        self.first_repeat
    }

    /// Applies one operation, consuming and returning the state so a walk can
    /// be driven by a plain fold.
    pub fn apply(mut self, operation: Operation) -> Self {
        match operation {
            Operation::Turn(side) => self.turn(side),
            Operation::Move(distance) => {
                self.advance(distance);
            }
        }
        self
    }

    pub fn report(&self) -> Distances {
        Distances {
            final_distance: manhattan(self.position),
            first_repeat_distance: self.first_repeat.map(manhattan),
        }
    }
}

/// Replays every instruction in order from a fresh walk.
#[tracing::instrument(skip(instructions))]
pub fn run<'a, I>(instructions: I) -> Walk
where
    I: IntoIterator<Item = &'a Instruction>,
{
    instructions
        .into_iter()
        .flat_map(|instruction| instruction.operations())
        .fold(Walk::new(), Walk::apply)
}
