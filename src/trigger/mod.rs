//! Scenario triggers: event conditions and the actions they fire
//!
//! A `Trigger` is authored once; every copy that runs gets its own
//! `EventState` so latches and timers stay independent.

pub mod event;
pub mod kind;
pub mod record;

pub use event::{EventContext, EventDefinition, EventPayload, EventState};
pub use kind::{AttachMask, DataNeed, EventKind};
pub use record::{detect_format, parse_record, write_record, RecordFormat};

use serde::{Deserialize, Serialize};

use crate::core::types::{HouseId, TeamTemplateId};

/// What a satisfied trigger does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerAction {
    #[default]
    None,
    Reinforce(TeamTemplateId),
    SetGlobal(i64),
    ClearGlobal(i64),
    /// Start the mission timer, in tenths of a minute
    StartTimer(u32),
    StopTimer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,
    /// House the trigger acts for (the acting house for house-local events)
    pub house: Option<HouseId>,
    pub event: EventDefinition,
    pub action: TriggerAction,
    /// Reset after firing instead of retiring
    pub repeat: bool,
}

/// Running copy of a trigger
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerInstance {
    pub trigger: Trigger,
    pub state: EventState,
    pub retired: bool,
}

impl TriggerInstance {
    pub fn new(trigger: Trigger) -> Self {
        let state = EventState::new(&trigger.event);
        Self {
            trigger,
            state,
            retired: false,
        }
    }

    /// Polled every tick rather than only when something happens to it
    pub fn is_polled(&self) -> bool {
        let mask = self.trigger.event.kind.attach_mask();
        self.trigger.event.kind != EventKind::Any
            && (mask.contains(AttachMask::HOUSE) || mask.contains(AttachMask::GENERAL))
    }

    /// Clear the latch after firing; non-repeating triggers retire instead
    pub fn after_fire(&mut self) {
        if self.trigger.repeat {
            self.state.reset(&self.trigger.event);
        } else {
            self.retired = true;
        }
    }
}
