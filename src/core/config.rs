//! Scripting configuration with documented constants
//!
//! Structure type numbers are scenario content, so which of them count as
//! factories, fakes or airstrips is configured here rather than hard-coded.

use serde::Deserialize;

use crate::world::StructureType;

/// Configuration for the scripting systems
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    // === OBJECT POOL ===
    /// Maximum number of live objects the pool will hand out
    ///
    /// Creation beyond this fails and reinforcement requests shrink or fail
    /// accordingly.
    pub pool_capacity: usize,

    // === EVENTS ===
    /// Structure types that count as production buildings
    ///
    /// The no-factories event holds once a house has none of these active.
    pub factory_structures: Vec<StructureType>,

    /// Structure types that are decoys
    pub fake_structures: Vec<StructureType>,

    /// Evaluate fakes-destroyed against the fake structure mask
    ///
    /// Off by default: the event has historically always been satisfied and
    /// shipped scenarios rely on that.
    pub strict_fakes_check: bool,

    // === REINFORCEMENTS ===
    /// Structure that docks fixed-wing aircraft
    ///
    /// A house keeps (confiscates) a delivered Yak or Mig only while it has
    /// more of these than matching planes.
    pub airstrip: StructureType,

    /// Seed for the world random number generator
    pub seed: u64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 500,
            // Airstrip, helipad, weapons factory, barracks, tent, construction yard, shipyard, sub pen
            factory_structures: vec![
                StructureType(0),
                StructureType(1),
                StructureType(2),
                StructureType(3),
                StructureType(4),
                StructureType(5),
                StructureType(6),
                StructureType(7),
            ],
            fake_structures: vec![StructureType(40), StructureType(41), StructureType(42)],
            strict_fakes_check: false,
            airstrip: StructureType(0),
            seed: 0,
        }
    }
}

impl ScriptConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Bitmask of factory structure types, matching the house presence masks
    pub fn factory_mask(&self) -> u64 {
        mask_of(&self.factory_structures)
    }

    /// Bitmask of fake structure types
    pub fn fake_mask(&self) -> u64 {
        mask_of(&self.fake_structures)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.pool_capacity == 0 {
            return Err("pool_capacity must be positive".into());
        }

        // Presence masks are 64 bits wide
        for s in self.factory_structures.iter().chain(&self.fake_structures) {
            if s.0 >= 64 {
                return Err(format!("structure type {} does not fit a presence mask", s.0));
            }
        }

        if self.airstrip.0 >= 64 {
            return Err(format!("airstrip type {} does not fit a presence mask", self.airstrip.0));
        }

        Ok(())
    }
}

fn mask_of(types: &[StructureType]) -> u64 {
    types.iter().fold(0u64, |mask, s| mask | s.bit())
}
