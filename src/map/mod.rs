//! Map cells, facings and the map collaborator

pub mod cell;
pub mod grid;

pub use cell::{Cell, Edge, Facing, MoveResult, SpeedClass};
pub use grid::{GridMap, MapView};
