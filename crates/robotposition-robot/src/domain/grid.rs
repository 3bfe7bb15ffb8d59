//! Grid geometry: facings, positions, and the bounds a robot may occupy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four cardinal directions a robot can point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Facing {
    /// Towards increasing `y`.
    North,
    /// Towards increasing `x`.
    East,
    /// Towards decreasing `y`.
    South,
    /// Towards decreasing `x`.
    West,
}

impl Facing {
    /// All facings in clockwise order starting at north.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// The facing after a 90° clockwise turn.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    /// The facing after a 90° counter-clockwise turn.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::East => Facing::North,
            Facing::South => Facing::East,
            Facing::West => Facing::South,
        }
    }

    /// The `(dx, dy)` a single MOVE applies while facing this way.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, 1),
            Facing::East => (1, 0),
            Facing::South => (0, -1),
            Facing::West => (-1, 0),
        }
    }

    /// Upper-case wire name, e.g. `NORTH`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Facing::North => "NORTH",
            Facing::East => "EAST",
            Facing::South => "SOUTH",
            Facing::West => "WEST",
        }
    }

    /// Lower-case name used in rejection messages, e.g. `north`.
    #[must_use]
    pub const fn direction_name(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four facing names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("facing must be one of NORTH, SOUTH, EAST, WEST (got {0:?})")]
pub struct ParseFacingError(pub String);

impl FromStr for Facing {
    type Err = ParseFacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facing::ALL
            .into_iter()
            .find(|facing| facing.as_str() == s)
            .ok_or_else(|| ParseFacingError(s.to_owned()))
    }
}

/// Inclusive rectangular region a robot must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    /// Smallest legal `x`.
    pub min_x: i32,
    /// Largest legal `x`.
    pub max_x: i32,
    /// Smallest legal `y`.
    pub min_y: i32,
    /// Largest legal `y`.
    pub max_y: i32,
}

impl GridBounds {
    /// The 5×5 table the service operates on: `0..=4` on both axes.
    pub const STANDARD: GridBounds = GridBounds {
        min_x: 0,
        max_x: 4,
        min_y: 0,
        max_y: 4,
    };

    /// Returns true if `(x, y)` lies inside the bounds.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A robot's cell and facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Direction the robot points.
    pub facing: Facing,
}

impl Position {
    /// Creates a position without checking bounds.
    #[must_use]
    pub const fn new(x: i32, y: i32, facing: Facing) -> Self {
        Self { x, y, facing }
    }

    /// Creates a position, rejecting coordinates outside `bounds`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` naming the first offending axis.
    pub fn within(x: i32, y: i32, facing: Facing, bounds: &GridBounds) -> Result<Self, OutOfBounds> {
        if !(bounds.min_x..=bounds.max_x).contains(&x) {
            return Err(OutOfBounds {
                axis: 'x',
                value: x,
                min: bounds.min_x,
                max: bounds.max_x,
            });
        }
        if !(bounds.min_y..=bounds.max_y).contains(&y) {
            return Err(OutOfBounds {
                axis: 'y',
                value: y,
                min: bounds.min_y,
                max: bounds.max_y,
            });
        }
        Ok(Self { x, y, facing })
    }
}

/// A coordinate that falls outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{axis} position must be between {min} and {max} (got {value})")]
pub struct OutOfBounds {
    /// `'x'` or `'y'`.
    pub axis: char,
    /// The rejected value.
    pub value: i32,
    /// Inclusive lower bound.
    pub min: i32,
    /// Inclusive upper bound.
    pub max: i32,
}
