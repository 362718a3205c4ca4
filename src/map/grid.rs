//! Map collaborator interface and an in-memory grid implementation

use ahash::{AHashMap, AHashSet};
use glam::Vec2;

use crate::core::types::WaypointId;
use crate::map::cell::{Cell, Edge, Facing, MoveResult, SpeedClass};

/// Terrain queries the scripting core needs from the map
pub trait MapView {
    /// Cell just outside the visible area where objects arriving over `edge`
    /// appear. The origin waypoint (or else the fallback) picks the spot along
    /// the edge.
    fn resolve_entry_cell(
        &self,
        edge: Edge,
        origin: Option<WaypointId>,
        fallback: Option<WaypointId>,
        speed: SpeedClass,
    ) -> Option<Cell>;

    /// Whether the cell is inside the player-visible (radar) area
    fn is_radar_visible(&self, cell: Cell) -> bool;

    /// Whether terrain allows entering the cell
    fn can_enter(&self, cell: Cell, facing: Option<Facing>) -> MoveResult;

    fn adjacent_cell(&self, cell: Cell, facing: Facing) -> Cell {
        cell.adjacent(facing)
    }

    fn cell_to_world(&self, cell: Cell) -> Vec2;

    fn waypoint(&self, id: WaypointId) -> Option<Cell>;
}

/// Rectangular map with an invisible border band around the radar area
#[derive(Debug, Clone)]
pub struct GridMap {
    pub width: i32,
    pub height: i32,
    /// Width of the off-radar band on every side
    pub border: i32,
    /// World units per cell
    pub cell_size: f32,
    blocked: AHashSet<Cell>,
    waypoints: AHashMap<WaypointId, Cell>,
}

impl GridMap {
    pub fn new(width: i32, height: i32, border: i32) -> Self {
        Self {
            width,
            height,
            border,
            cell_size: 24.0,
            blocked: AHashSet::new(),
            waypoints: AHashMap::new(),
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub fn block(&mut self, cell: Cell) {
        self.blocked.insert(cell);
    }

    pub fn unblock(&mut self, cell: Cell) {
        self.blocked.remove(&cell);
    }

    pub fn set_waypoint(&mut self, id: WaypointId, cell: Cell) {
        self.waypoints.insert(id, cell);
    }

    fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    fn clamp_visible(&self, value: i32, extent: i32) -> i32 {
        let lo = self.border;
        let hi = (extent - self.border - 1).max(lo);
        value.clamp(lo, hi)
    }
}

impl MapView for GridMap {
    fn resolve_entry_cell(
        &self,
        edge: Edge,
        origin: Option<WaypointId>,
        fallback: Option<WaypointId>,
        _speed: SpeedClass,
    ) -> Option<Cell> {
        let anchor = origin
            .and_then(|w| self.waypoint(w))
            .or_else(|| fallback.and_then(|w| self.waypoint(w)))
            .unwrap_or_else(|| self.center());

        let cell = match edge {
            Edge::North => Cell::new(self.clamp_visible(anchor.x, self.width), self.border - 1),
            Edge::South => Cell::new(self.clamp_visible(anchor.x, self.width), self.height - self.border),
            Edge::West => Cell::new(self.border - 1, self.clamp_visible(anchor.y, self.height)),
            Edge::East => Cell::new(self.width - self.border, self.clamp_visible(anchor.y, self.height)),
        };

        self.in_bounds(cell).then_some(cell)
    }

    fn is_radar_visible(&self, cell: Cell) -> bool {
        cell.x >= self.border
            && cell.y >= self.border
            && cell.x < self.width - self.border
            && cell.y < self.height - self.border
    }

    fn can_enter(&self, cell: Cell, _facing: Option<Facing>) -> MoveResult {
        if !self.in_bounds(cell) || self.blocked.contains(&cell) {
            MoveResult::Blocked
        } else {
            MoveResult::Ok
        }
    }

    fn cell_to_world(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    fn waypoint(&self, id: WaypointId) -> Option<Cell> {
        self.waypoints.get(&id).copied()
    }
}
