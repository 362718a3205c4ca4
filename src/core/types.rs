//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::map::Cell;

/// Unique identifier for objects in the object pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a live team built from a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamInstanceId(pub Uuid);

impl TeamInstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TeamInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// House (faction) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HouseId(pub u8);

/// Logical index of a team template; this is what trigger records store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamTemplateId(pub u16);

/// Scenario-authored waypoint number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaypointId(pub u16);

impl WaypointId {
    /// Reserved waypoint special reinforcements unload at
    pub const REINFORCEMENT: WaypointId = WaypointId(98);
}

/// What an order is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Object(ObjectId),
    Cell(Cell),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ids_are_unique() {
        assert_ne!(ObjectId::new(), ObjectId::new());
    }

    #[test]
    fn test_house_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<HouseId, &str> = HashMap::new();
        map.insert(HouseId(1), "allies");
        assert_eq!(map.get(&HouseId(1)), Some(&"allies"));
    }

    #[test]
    fn test_target_equality() {
        let id = ObjectId::new();
        assert_eq!(Target::Object(id), Target::Object(id));
        assert_ne!(Target::Cell(Cell::new(1, 1)), Target::Cell(Cell::new(1, 2)));
    }
}
