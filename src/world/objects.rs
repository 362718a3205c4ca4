//! Object pool: storage, creation, passengers and placement

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{HouseId, ObjectId, TeamInstanceId};
use crate::map::{Cell, Facing, MapView, MoveResult};
use crate::mission::MissionState;
use crate::world::object_type::{InfantryType, ObjectKind, ObjectType};

/// A live object and everything the scripting core tracks about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: ObjectId,
    /// Creation order within the pool; breaks ties between objects in a cell
    #[serde(default)]
    pub serial: u64,
    pub object_type: ObjectType,
    pub owner: HouseId,
    pub strength: u16,
    pub max_strength: u16,
    /// Altitude; ground objects above 0 are dropping by parachute
    pub height: i32,
    /// `None` while in limbo (not yet placed, or riding in a transport)
    pub cell: Option<Cell>,
    pub facing: Facing,
    /// Removed automatically once it leaves the map or finishes its job
    pub is_loaner: bool,
    pub mission: MissionState,
    pub passengers: Vec<ObjectId>,
    pub transporter: Option<ObjectId>,
    /// Infantry this aircraft drops by parachute when it arrives
    pub paradrop: Option<InfantryType>,
    pub team: Option<TeamInstanceId>,
}

impl GameObject {
    pub fn kind(&self) -> ObjectKind {
        self.object_type.kind()
    }

    pub fn is_alive(&self) -> bool {
        self.strength > 0
    }

    pub fn is_on_map(&self) -> bool {
        self.cell.is_some()
    }

}

/// Per-type properties the pool needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub max_passengers: u32,
    pub strength: u16,
}

impl TypeInfo {
    fn default_for(object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Infantry(_) => Self { max_passengers: 0, strength: 50 },
            ObjectType::Unit(_) => Self { max_passengers: 0, strength: 300 },
            ObjectType::Vessel(_) => Self { max_passengers: 0, strength: 400 },
            ObjectType::Aircraft(a) => Self {
                max_passengers: if a == crate::world::AircraftType::TransportHeli { 5 } else { 0 },
                strength: 150,
            },
            ObjectType::Structure(_) => Self { max_passengers: 0, strength: 800 },
        }
    }
}

/// Result of ejecting an object from a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Ok,
    /// No free cell next to the host
    Blocked,
    /// Host or object missing, or host not on the map
    Invalid,
}

/// Storage for all live objects
pub struct ObjectStore {
    objects: AHashMap<ObjectId, GameObject>,
    catalog: AHashMap<ObjectType, TypeInfo>,
    capacity: usize,
    next_serial: u64,
}

impl ObjectStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            objects: AHashMap::new(),
            catalog: AHashMap::new(),
            capacity,
            next_serial: 0,
        }
    }

    /// Override the built-in properties of a type
    pub fn register_type(&mut self, object_type: ObjectType, info: TypeInfo) {
        self.catalog.insert(object_type, info);
    }

    pub fn type_info(&self, object_type: ObjectType) -> TypeInfo {
        self.catalog
            .get(&object_type)
            .copied()
            .unwrap_or_else(|| TypeInfo::default_for(object_type))
    }

    pub fn max_passengers(&self, object_type: ObjectType) -> u32 {
        self.type_info(object_type).max_passengers
    }

    /// Create an object in limbo. Fails when the pool is full.
    pub fn create_instance(&mut self, object_type: ObjectType, house: HouseId) -> Option<ObjectId> {
        if self.objects.len() >= self.capacity {
            tracing::warn!("Object pool full ({}), cannot create {:?}", self.capacity, object_type);
            return None;
        }

        let info = self.type_info(object_type);
        let id = ObjectId::new();
        let serial = self.next_serial;
        self.next_serial += 1;
        self.objects.insert(
            id,
            GameObject {
                id,
                serial,
                object_type,
                owner: house,
                strength: info.strength,
                max_strength: info.strength,
                height: 0,
                cell: None,
                facing: Facing::North,
                is_loaner: false,
                mission: MissionState::new(),
                passengers: Vec::new(),
                transporter: None,
                paradrop: None,
                team: None,
            },
        );
        Some(id)
    }

    /// Remove an object along with everything it carries
    ///
    /// Returns the removed records so callers can drop other references.
    pub fn destroy(&mut self, id: ObjectId) -> Vec<GameObject> {
        let mut removed = Vec::new();
        let mut pending = vec![id];

        while let Some(next) = pending.pop() {
            if let Some(obj) = self.objects.remove(&next) {
                pending.extend(obj.passengers.iter().copied());
                if let Some(host) = obj.transporter {
                    if let Some(host) = self.objects.get_mut(&host) {
                        host.passengers.retain(|p| *p != next);
                    }
                }
                removed.push(obj);
            }
        }

        removed
    }

    /// Load `passenger` into `host` if it has room
    pub fn attach(&mut self, host: ObjectId, passenger: ObjectId) -> bool {
        if host == passenger {
            return false;
        }

        let room = match (self.objects.get(&host), self.objects.get(&passenger)) {
            (Some(h), Some(p)) if !p.is_on_map() && p.transporter.is_none() => {
                (h.passengers.len() as u32) < self.max_passengers(h.object_type)
            }
            _ => false,
        };
        if !room {
            return false;
        }

        if let Some(p) = self.objects.get_mut(&passenger) {
            p.transporter = Some(host);
        }
        if let Some(h) = self.objects.get_mut(&host) {
            h.passengers.push(passenger);
        }
        true
    }

    /// Put a limbo object on the map
    pub fn unlimbo(&mut self, id: ObjectId, cell: Cell, facing: Facing, map: &dyn MapView) -> bool {
        let Some(obj) = self.objects.get(&id) else {
            return false;
        };
        if obj.is_on_map() || obj.transporter.is_some() {
            return false;
        }
        if !self.can_occupy(obj.kind(), cell, map) {
            return false;
        }

        if let Some(obj) = self.objects.get_mut(&id) {
            obj.cell = Some(cell);
            obj.facing = facing;
        }
        true
    }

    /// Terrain allows the cell and, for ground objects, nobody stands there
    pub fn can_occupy(&self, kind: ObjectKind, cell: Cell, map: &dyn MapView) -> bool {
        if map.can_enter(cell, None) != MoveResult::Ok {
            return false;
        }
        kind == ObjectKind::Aircraft || self.ground_occupant(cell).is_none()
    }

    /// Have a building eject `unit` onto a free neighboring cell
    pub fn exit_object(&mut self, host: ObjectId, unit: ObjectId, map: &dyn MapView) -> ExitStatus {
        let Some(origin) = self.objects.get(&host).and_then(|h| h.cell) else {
            return ExitStatus::Invalid;
        };
        let Some(kind) = self.objects.get(&unit).map(|u| u.kind()) else {
            return ExitStatus::Invalid;
        };
        if self.objects.get(&unit).is_some_and(|u| u.is_on_map()) {
            return ExitStatus::Invalid;
        }

        let exit = Facing::ALL
            .iter()
            .map(|f| (*f, map.adjacent_cell(origin, *f)))
            .find(|(_, cell)| self.can_occupy(kind, *cell, map));

        let Some((facing, cell)) = exit else {
            return ExitStatus::Blocked;
        };

        if let Some(h) = self.objects.get_mut(&host) {
            h.passengers.retain(|p| *p != unit);
        }
        if let Some(u) = self.objects.get_mut(&unit) {
            u.transporter = None;
            u.cell = Some(cell);
            u.facing = facing;
        }
        ExitStatus::Ok
    }

    /// Oldest non-aircraft object standing in the cell
    pub fn ground_occupant(&self, cell: Cell) -> Option<ObjectId> {
        self.objects
            .values()
            .filter(|o| o.cell == Some(cell) && o.kind() != ObjectKind::Aircraft)
            .min_by_key(|o| o.serial)
            .map(|o| o.id)
    }

    /// Every object in the cell, oldest first
    pub fn objects_at(&self, cell: Cell) -> Vec<ObjectId> {
        let mut found: Vec<_> = self
            .objects
            .values()
            .filter(|o| o.cell == Some(cell))
            .map(|o| (o.serial, o.id))
            .collect();
        found.sort_unstable_by_key(|(serial, _)| *serial);
        found.into_iter().map(|(_, id)| id).collect()
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.objects.values_mut()
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Swap in a complete set of records (snapshot restore)
    pub fn replace_all(&mut self, records: Vec<GameObject>) {
        self.next_serial = records.iter().map(|o| o.serial + 1).max().unwrap_or(0);
        self.objects = records.into_iter().map(|o| (o.id, o)).collect();
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new(500)
    }
}
