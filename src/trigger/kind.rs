//! Event kinds, their names and static lookups
//!
//! Discriminant order is the persisted order; do not reorder.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventKind {
    #[default]
    None,
    PlayerEntered,
    Spied,
    Thieved,
    Discovered,
    HouseDiscovered,
    Attacked,
    Destroyed,
    Any,
    UnitsDestroyed,
    BuildingsDestroyed,
    AllDestroyed,
    Credits,
    Time,
    MissionTimerExpired,
    NBuildingsDestroyed,
    NUnitsDestroyed,
    NoFactories,
    CivEvacuated,
    BuildStructure,
    BuildUnit,
    BuildInfantry,
    BuildAircraft,
    LeavesMap,
    EntersZone,
    CrossHorizontal,
    CrossVertical,
    GlobalSet,
    GlobalClear,
    FakesDestroyed,
    LowPower,
    AllBridgesDestroyed,
    BuildingExists,
}

const EVENT_NAMES: [(EventKind, &str); 33] = [
    (EventKind::None, "-No Event-"),
    (EventKind::PlayerEntered, "Entered by..."),
    (EventKind::Spied, "Spied by..."),
    (EventKind::Thieved, "Thieved by..."),
    (EventKind::Discovered, "Discovered by player"),
    (EventKind::HouseDiscovered, "House Discovered..."),
    (EventKind::Attacked, "Attacked by anybody"),
    (EventKind::Destroyed, "Destroyed by anybody"),
    (EventKind::Any, "Any Event"),
    (EventKind::UnitsDestroyed, "Destroyed, Units, All..."),
    (EventKind::BuildingsDestroyed, "Destroyed, Buildings, All..."),
    (EventKind::AllDestroyed, "Destroyed, All..."),
    (EventKind::Credits, "Credits exceed..."),
    (EventKind::Time, "Elapsed Time..."),
    (EventKind::MissionTimerExpired, "Mission Timer Expired"),
    (EventKind::NBuildingsDestroyed, "Destroyed, Buildings, #..."),
    (EventKind::NUnitsDestroyed, "Destroyed, Units, #..."),
    (EventKind::NoFactories, "No Factories left"),
    (EventKind::CivEvacuated, "Civilians Evacuated"),
    (EventKind::BuildStructure, "Build Building Type..."),
    (EventKind::BuildUnit, "Build Unit Type..."),
    (EventKind::BuildInfantry, "Build Infantry Type..."),
    (EventKind::BuildAircraft, "Build Aircraft Type..."),
    (EventKind::LeavesMap, "Leaves map (team)..."),
    (EventKind::EntersZone, "Zone Entry by..."),
    (EventKind::CrossHorizontal, "Horizontal Crossing by..."),
    (EventKind::CrossVertical, "Vertical Crossing by..."),
    (EventKind::GlobalSet, "Global is set..."),
    (EventKind::GlobalClear, "Global is clear..."),
    (EventKind::FakesDestroyed, "Destroyed, Fakes, All..."),
    (EventKind::LowPower, "Low Power..."),
    (EventKind::AllBridgesDestroyed, "All bridges destroyed"),
    (EventKind::BuildingExists, "Building exists..."),
];

/// Which kind of datum an event's value field carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataNeed {
    None,
    House,
    Number,
    Structure,
    Unit,
    Infantry,
    Aircraft,
    Team,
}

/// What an event can be attached to in the scenario editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttachMask(u8);

impl AttachMask {
    pub const NONE: AttachMask = AttachMask(0);
    pub const CELL: AttachMask = AttachMask(1 << 0);
    pub const OBJECT: AttachMask = AttachMask(1 << 1);
    pub const MAP: AttachMask = AttachMask(1 << 2);
    pub const HOUSE: AttachMask = AttachMask(1 << 3);
    pub const GENERAL: AttachMask = AttachMask(1 << 4);
    pub const ALL: AttachMask = AttachMask(0b1_1111);

    pub fn contains(&self, other: AttachMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr for AttachMask {
    type Output = AttachMask;

    fn bitor(self, rhs: AttachMask) -> AttachMask {
        AttachMask(self.0 | rhs.0)
    }
}

impl EventKind {
    pub fn all() -> impl Iterator<Item = EventKind> {
        EVENT_NAMES.iter().map(|(k, _)| *k)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: i64) -> EventKind {
        usize::try_from(index)
            .ok()
            .and_then(|i| EVENT_NAMES.get(i))
            .map(|(k, _)| *k)
            .unwrap_or(EventKind::None)
    }

    pub fn name(&self) -> &'static str {
        EVENT_NAMES[self.index()].1
    }

    /// Case-insensitive lookup; unknown names give `None`
    pub fn from_name(name: &str) -> EventKind {
        let name = name.trim();
        EVENT_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(k, _)| *k)
            .unwrap_or_else(|| {
                tracing::warn!("Unknown event name {:?}", name);
                EventKind::None
            })
    }

    pub fn data_need(&self) -> DataNeed {
        use EventKind::*;
        match self {
            PlayerEntered | CrossHorizontal | CrossVertical | EntersZone | Thieved
            | HouseDiscovered | UnitsDestroyed | BuildingsDestroyed | AllDestroyed | LowPower
            | FakesDestroyed => DataNeed::House,
            Credits | Time | NBuildingsDestroyed | NUnitsDestroyed | GlobalSet | GlobalClear => {
                DataNeed::Number
            }
            BuildStructure | BuildingExists => DataNeed::Structure,
            BuildUnit => DataNeed::Unit,
            BuildInfantry => DataNeed::Infantry,
            BuildAircraft => DataNeed::Aircraft,
            LeavesMap => DataNeed::Team,
            None | Spied | Discovered | Attacked | Destroyed | Any | MissionTimerExpired
            | NoFactories | CivEvacuated | AllBridgesDestroyed => DataNeed::None,
        }
    }

    pub fn attach_mask(&self) -> AttachMask {
        use EventKind::*;
        match self {
            PlayerEntered => AttachMask::CELL | AttachMask::OBJECT,
            Spied | Discovered | Attacked | Destroyed => AttachMask::OBJECT,
            Any => AttachMask::ALL,
            CrossHorizontal | CrossVertical => AttachMask::MAP,
            EntersZone => AttachMask::CELL,
            Thieved | HouseDiscovered | UnitsDestroyed | BuildingsDestroyed | AllDestroyed
            | Credits | NBuildingsDestroyed | NUnitsDestroyed | NoFactories | CivEvacuated
            | BuildStructure | BuildUnit | BuildInfantry | BuildAircraft | FakesDestroyed
            | LowPower | BuildingExists => AttachMask::HOUSE,
            Time | MissionTimerExpired | GlobalSet | GlobalClear | AllBridgesDestroyed
            | LeavesMap => AttachMask::GENERAL,
            None => AttachMask::NONE,
        }
    }

    /// Kinds that only hold when the caller reports this very occurrence
    pub fn is_confirmed_by_call(&self) -> bool {
        matches!(
            self,
            EventKind::Attacked
                | EventKind::Destroyed
                | EventKind::Discovered
                | EventKind::Spied
                | EventKind::CrossHorizontal
                | EventKind::CrossVertical
                | EventKind::EntersZone
                | EventKind::PlayerEntered
        )
    }

    /// Cell-crossing kinds filtered by the owner of the object involved
    pub fn is_ownership_filtered(&self) -> bool {
        matches!(
            self,
            EventKind::PlayerEntered
                | EventKind::CrossHorizontal
                | EventKind::CrossVertical
                | EventKind::EntersZone
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
