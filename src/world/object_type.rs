//! Object type identifiers
//!
//! Ground, naval and structure types are scenario content and are plain
//! numbers. Aircraft are a fixed roster because reinforcement rules key off
//! specific airframes.

use serde::{Deserialize, Serialize};

use crate::map::SpeedClass;

/// Broad runtime class of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Infantry,
    Unit,
    Vessel,
    Aircraft,
    Building,
}

impl ObjectKind {
    /// Ground-bound kinds whose missions pause while they are in the air
    pub fn is_ground(&self) -> bool {
        matches!(self, ObjectKind::Infantry | ObjectKind::Unit | ObjectKind::Vessel)
    }
}

macro_rules! numbered_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u8);

        impl $name {
            /// Bit of this type in a 64-bit presence mask (0 if it does not fit)
            pub fn bit(&self) -> u64 {
                1u64.checked_shl(self.0 as u32).unwrap_or(0)
            }
        }
    };
}

numbered_type!(
    /// Foot soldier type
    InfantryType
);
numbered_type!(
    /// Ground vehicle type
    UnitType
);
numbered_type!(
    /// Naval type
    VesselType
);
numbered_type!(
    /// Building type
    StructureType
);

/// Aircraft roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    TransportHeli,
    Longbow,
    Hind,
    SpyPlane,
    Yak,
    Mig,
    Badger,
}

impl AircraftType {
    pub const ALL: [AircraftType; 7] = [
        AircraftType::TransportHeli,
        AircraftType::Longbow,
        AircraftType::Hind,
        AircraftType::SpyPlane,
        AircraftType::Yak,
        AircraftType::Mig,
        AircraftType::Badger,
    ];

    pub fn index(&self) -> u8 {
        AircraftType::ALL
            .iter()
            .position(|a| a == self)
            .unwrap_or(0) as u8
    }

    pub fn from_index(index: i32) -> Option<AircraftType> {
        usize::try_from(index)
            .ok()
            .and_then(|i| AircraftType::ALL.get(i).copied())
    }

    pub fn bit(&self) -> u64 {
        1u64 << self.index()
    }

    /// Fixed-wing planes that dock at an airstrip
    pub fn needs_airstrip(&self) -> bool {
        matches!(self, AircraftType::Yak | AircraftType::Mig)
    }
}

/// Any creatable object type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Infantry(InfantryType),
    Unit(UnitType),
    Vessel(VesselType),
    Aircraft(AircraftType),
    Structure(StructureType),
}

impl ObjectType {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectType::Infantry(_) => ObjectKind::Infantry,
            ObjectType::Unit(_) => ObjectKind::Unit,
            ObjectType::Vessel(_) => ObjectKind::Vessel,
            ObjectType::Aircraft(_) => ObjectKind::Aircraft,
            ObjectType::Structure(_) => ObjectKind::Building,
        }
    }

    pub fn speed_class(&self) -> SpeedClass {
        match self {
            ObjectType::Infantry(_) => SpeedClass::Foot,
            ObjectType::Unit(_) => SpeedClass::Track,
            ObjectType::Vessel(_) => SpeedClass::Float,
            ObjectType::Aircraft(_) => SpeedClass::Winged,
            ObjectType::Structure(_) => SpeedClass::Track,
        }
    }

    pub fn as_aircraft(&self) -> Option<AircraftType> {
        match self {
            ObjectType::Aircraft(a) => Some(*a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aircraft_index_round_trip() {
        for a in AircraftType::ALL {
            assert_eq!(AircraftType::from_index(a.index() as i32), Some(a));
        }
        assert_eq!(AircraftType::from_index(-1), None);
        assert_eq!(AircraftType::from_index(99), None);
    }

    #[test]
    fn test_only_fixed_wing_needs_airstrip() {
        let docked: Vec<_> = AircraftType::ALL
            .iter()
            .filter(|a| a.needs_airstrip())
            .collect();
        assert_eq!(docked, vec![&AircraftType::Yak, &AircraftType::Mig]);
    }

    #[test]
    fn test_wide_type_has_no_bit() {
        assert_eq!(StructureType(3).bit(), 8);
        assert_eq!(StructureType(64).bit(), 0);
    }

    #[test]
    fn test_ground_kinds() {
        assert!(ObjectKind::Infantry.is_ground());
        assert!(ObjectKind::Vessel.is_ground());
        assert!(!ObjectKind::Aircraft.is_ground());
        assert!(!ObjectKind::Building.is_ground());
    }
}
