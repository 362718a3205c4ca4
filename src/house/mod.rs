//! Per-faction state read by events and reinforcement delivery

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::HouseId;
use crate::map::{Cell, Edge};
use crate::world::object_type::{AircraftType, InfantryType, ObjectKind, ObjectType, StructureType, UnitType};
use crate::world::objects::ObjectStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    ReinforcementsArrived,
    MissionTimerExpired,
}

/// Message queued for the player's UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub cell: Option<Cell>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseState {
    pub id: HouseId,
    pub name: String,
    pub is_human: bool,
    pub credits: u32,
    /// Ore/gold held in silos, spendable like credits
    pub tiberium: u32,
    pub power_output: u32,
    pub power_drain: u32,
    /// Edge reinforcements arrive from (North when unset)
    pub edge: Option<Edge>,

    // Presence masks, one bit per type with live objects
    pub active_buildings: u64,
    pub active_units: u64,
    pub active_infantry: u64,
    pub active_vessels: u64,
    pub active_aircraft: u64,
    pub building_counts: AHashMap<StructureType, u32>,

    pub units_lost: u32,
    pub buildings_lost: u32,

    pub just_built_structure: Option<StructureType>,
    pub just_built_unit: Option<UnitType>,
    pub just_built_infantry: Option<InfantryType>,
    pub just_built_aircraft: Option<AircraftType>,

    pub is_civ_evacuated: bool,
    pub is_thieved: bool,
    pub is_discovered: bool,

    pub notifications: Vec<Notification>,
}

impl HouseState {
    pub fn new(id: HouseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn available_money(&self) -> u32 {
        self.credits.saturating_add(self.tiberium)
    }

    /// Output over drain; below 1.0 the house is in low power
    pub fn power_ratio(&self) -> f32 {
        if self.power_drain == 0 {
            1.0
        } else {
            self.power_output as f32 / self.power_drain as f32
        }
    }

    pub fn edge_or_default(&self) -> Edge {
        self.edge.unwrap_or(Edge::North)
    }

    pub fn building_count(&self, structure: StructureType) -> u32 {
        self.building_counts.get(&structure).copied().unwrap_or(0)
    }

    pub fn notify(&mut self, kind: NotificationKind, cell: Option<Cell>) {
        tracing::info!("{}: {:?} at {:?}", self.name, kind, cell);
        self.notifications.push(Notification { kind, cell });
    }

    /// Set the just-built marker for the type's category
    pub fn record_built(&mut self, object_type: ObjectType) {
        match object_type {
            ObjectType::Structure(s) => self.just_built_structure = Some(s),
            ObjectType::Unit(u) => self.just_built_unit = Some(u),
            ObjectType::Infantry(i) => self.just_built_infantry = Some(i),
            ObjectType::Aircraft(a) => self.just_built_aircraft = Some(a),
            ObjectType::Vessel(_) => {}
        }
    }

    pub fn record_loss(&mut self, kind: ObjectKind) {
        if kind == ObjectKind::Building {
            self.buildings_lost += 1;
        } else {
            self.units_lost += 1;
        }
    }

    /// Rebuild the presence masks and building counts from live objects
    pub fn tally(&mut self, objects: &ObjectStore) {
        self.active_buildings = 0;
        self.active_units = 0;
        self.active_infantry = 0;
        self.active_vessels = 0;
        self.active_aircraft = 0;
        self.building_counts.clear();

        for obj in objects.iter().filter(|o| o.owner == self.id && o.is_alive()) {
            match obj.object_type {
                ObjectType::Structure(s) => {
                    self.active_buildings |= s.bit();
                    *self.building_counts.entry(s).or_insert(0) += 1;
                }
                ObjectType::Unit(u) => self.active_units |= u.bit(),
                ObjectType::Infantry(i) => self.active_infantry |= i.bit(),
                ObjectType::Vessel(v) => self.active_vessels |= v.bit(),
                ObjectType::Aircraft(a) => self.active_aircraft |= a.bit(),
            }
        }
    }
}

/// All houses in the scenario
#[derive(Debug, Clone, Default)]
pub struct Houses {
    list: Vec<HouseState>,
    /// The human player's house
    pub player: Option<HouseId>,
}

impl Houses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, house: HouseState) {
        if house.is_human && self.player.is_none() {
            self.player = Some(house.id);
        }
        self.list.retain(|h| h.id != house.id);
        self.list.push(house);
    }

    pub fn get(&self, id: HouseId) -> Option<&HouseState> {
        self.list.iter().find(|h| h.id == id)
    }

    pub fn get_mut(&mut self, id: HouseId) -> Option<&mut HouseState> {
        self.list.iter_mut().find(|h| h.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&HouseState> {
        self.list.iter().find(|h| h.name.eq_ignore_ascii_case(name))
    }

    pub fn is_player(&self, id: HouseId) -> bool {
        self.player == Some(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HouseState> {
        self.list.iter()
    }

    pub fn tally_all(&mut self, objects: &ObjectStore) {
        for house in &mut self.list {
            house.tally(objects);
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_ratio() {
        let mut house = HouseState::new(HouseId(1), "Greece");
        assert_eq!(house.power_ratio(), 1.0);
        house.power_output = 50;
        house.power_drain = 100;
        assert!(house.power_ratio() < 1.0);
    }

    #[test]
    fn test_money_includes_silos() {
        let mut house = HouseState::new(HouseId(1), "Greece");
        house.credits = 300;
        house.tiberium = 200;
        assert_eq!(house.available_money(), 500);
    }

    #[test]
    fn test_tally_sets_masks() {
        let mut store = ObjectStore::new(10);
        store.create_instance(ObjectType::Structure(StructureType(2)), HouseId(1));
        store.create_instance(ObjectType::Structure(StructureType(2)), HouseId(1));
        store.create_instance(ObjectType::Infantry(InfantryType(0)), HouseId(1));
        store.create_instance(ObjectType::Unit(UnitType(3)), HouseId(2));

        let mut house = HouseState::new(HouseId(1), "Greece");
        house.tally(&store);
        assert_eq!(house.active_buildings, 0b100);
        assert_eq!(house.active_infantry, 0b1);
        assert_eq!(house.active_units, 0);
        assert_eq!(house.building_count(StructureType(2)), 2);
    }

    #[test]
    fn test_first_human_is_player() {
        let mut houses = Houses::new();
        houses.add(HouseState::new(HouseId(2), "USSR"));
        let mut greece = HouseState::new(HouseId(1), "Greece");
        greece.is_human = true;
        houses.add(greece);

        assert_eq!(houses.player, Some(HouseId(1)));
        assert!(houses.by_name("ussr").is_some());
    }

    #[test]
    fn test_notify_queues_message() {
        let mut house = HouseState::new(HouseId(1), "Greece");
        house.notify(NotificationKind::ReinforcementsArrived, Some(Cell::new(3, 0)));
        assert_eq!(house.notifications.len(), 1);
    }
}
