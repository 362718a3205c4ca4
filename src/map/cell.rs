//! Square cell coordinates, facings and map edges

use serde::{Deserialize, Serialize};

/// Map cell coordinate (x grows east, y grows south)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell one step away in the given facing
    pub fn adjacent(&self, facing: Facing) -> Cell {
        let (dx, dy) = facing.offset();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// All 8 neighbors, in facing order starting north
    pub fn neighbors(&self) -> [Cell; 8] {
        Facing::ALL.map(|f| self.adjacent(f))
    }

    /// Chebyshev distance (diagonal steps cost one)
    pub fn distance(&self, other: &Self) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.y - other.y).unsigned_abs())
    }
}

/// One of the eight compass facings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::North,
        Facing::NorthEast,
        Facing::East,
        Facing::SouthEast,
        Facing::South,
        Facing::SouthWest,
        Facing::West,
        Facing::NorthWest,
    ];

    pub fn offset(&self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::NorthEast => (1, -1),
            Facing::East => (1, 0),
            Facing::SouthEast => (1, 1),
            Facing::South => (0, 1),
            Facing::SouthWest => (-1, 1),
            Facing::West => (-1, 0),
            Facing::NorthWest => (-1, -1),
        }
    }

    pub fn from_index(index: usize) -> Facing {
        Facing::ALL[index % 8]
    }

    pub fn opposite(&self) -> Facing {
        let idx = Facing::ALL.iter().position(|f| f == self).unwrap_or(0);
        Facing::from_index(idx + 4)
    }
}

/// Map edge a house's reinforcements arrive from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    /// Facing of an object that has just come in over this edge
    pub fn inward_facing(&self) -> Facing {
        match self {
            Edge::North => Facing::South,
            Edge::East => Facing::West,
            Edge::South => Facing::North,
            Edge::West => Facing::East,
        }
    }
}

/// Locomotion class used to pick a suitable entry cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedClass {
    Foot,
    Track,
    Wheel,
    Float,
    Winged,
}

/// Result of asking whether a cell may be entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Ok,
    Blocked,
}
