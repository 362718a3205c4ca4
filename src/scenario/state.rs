//! Scenario-wide state shared by every trigger

use ahash::AHashSet;

use crate::core::constants::GLOBAL_FLAG_COUNT;
use crate::core::types::Tick;
use crate::world::object_type::InfantryType;

/// Designer-controlled boolean switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalFlags([bool; GLOBAL_FLAG_COUNT]);

impl GlobalFlags {
    /// Out-of-range indices read as clear
    pub fn get(&self, index: i64) -> bool {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.0.get(i).copied())
            .unwrap_or(false)
    }

    /// Returns false when the index is out of range
    pub fn set(&mut self, index: i64, value: bool) -> bool {
        match usize::try_from(index).ok().and_then(|i| self.0.get_mut(i)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Countdown shown to the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissionTimer {
    pub active: bool,
    pub remaining: u32,
}

impl MissionTimer {
    pub fn start(&mut self, ticks: u32) {
        self.active = true;
        self.remaining = ticks;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn tick(&mut self) {
        if self.active {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.active && self.remaining == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioState {
    pub globals: GlobalFlags,
    /// Bridges still standing
    pub bridge_count: u32,
    pub mission_timer: MissionTimer,
    /// Unique characters that have been killed
    pub dead_vips: AHashSet<InfantryType>,
    pub tick: Tick,
}

impl ScenarioState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_vip_dead(&self, infantry: InfantryType) -> bool {
        self.dead_vips.contains(&infantry)
    }
}
