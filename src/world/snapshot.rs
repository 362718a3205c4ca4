//! Save-state snapshots of the object pool
//!
//! Objects refer to each other by id, so a snapshot is just the records.
//! Loading is all-or-nothing: a count that disagrees with the header leaves
//! the live pool untouched.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScriptError};
use crate::world::objects::{GameObject, ObjectStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub record_count: usize,
    pub records: Vec<GameObject>,
}

impl PoolSnapshot {
    pub fn capture(store: &ObjectStore) -> Self {
        let records: Vec<GameObject> = store.iter().cloned().collect();
        Self {
            record_count: records.len(),
            records,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the pool's contents with this snapshot
    pub fn restore(self, store: &mut ObjectStore) -> Result<()> {
        if self.records.len() != self.record_count {
            tracing::warn!(
                "Snapshot header claims {} records, found {}",
                self.record_count,
                self.records.len()
            );
            return Err(ScriptError::SnapshotMismatch {
                expected: self.record_count,
                found: self.records.len(),
            });
        }
        if self.record_count > store.capacity() {
            return Err(ScriptError::InvalidConfig(format!(
                "snapshot holds {} objects but the pool takes {}",
                self.record_count,
                store.capacity()
            )));
        }

        store.replace_all(self.records);
        tracing::debug!("Restored {} objects", store.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::HouseId;
    use crate::mission::MissionKind;
    use crate::world::object_type::{InfantryType, ObjectType, UnitType};

    fn populated() -> ObjectStore {
        let mut store = ObjectStore::new(10);
        let tank = store.create_instance(ObjectType::Unit(UnitType(2)), HouseId(1)).unwrap();
        store.create_instance(ObjectType::Infantry(InfantryType(0)), HouseId(2));

        let mission = &mut store.get_mut(tank).unwrap().mission;
        mission.set_mission(MissionKind::Hunt);
        mission.assign_mission(MissionKind::Retreat);
        mission.timer = 37;
        mission.sub_state = 2;
        store
    }

    #[test]
    fn test_mission_state_survives_save_load() {
        let store = populated();
        let json = PoolSnapshot::capture(&store).to_json().unwrap();

        let mut loaded = ObjectStore::new(10);
        PoolSnapshot::from_json(&json).unwrap().restore(&mut loaded).unwrap();

        assert_eq!(loaded.len(), 2);
        for obj in store.iter() {
            assert_eq!(loaded.get(obj.id), Some(obj));
        }
    }

    #[test]
    fn test_count_mismatch_aborts_load() {
        let mut snapshot = PoolSnapshot::capture(&populated());
        snapshot.record_count = 3;

        let mut live = ObjectStore::new(10);
        live.create_instance(ObjectType::Unit(UnitType(9)), HouseId(4));

        let result = snapshot.restore(&mut live);
        assert!(matches!(
            result,
            Err(ScriptError::SnapshotMismatch { expected: 3, found: 2 })
        ));
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn test_garbage_json_is_an_error() {
        assert!(PoolSnapshot::from_json("{not json").is_err());
    }
}
