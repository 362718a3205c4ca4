//! Event definitions, per-instance state and the evaluator

use serde::{Deserialize, Serialize};

use crate::core::config::ScriptConfig;
use crate::core::constants::TICKS_PER_TENTH_MINUTE;
use crate::core::types::{HouseId, TeamTemplateId};
use crate::house::Houses;
use crate::reinforce::TeamRegistry;
use crate::scenario::ScenarioState;
use crate::trigger::kind::{DataNeed, EventKind};
use crate::world::object_type::{AircraftType, InfantryType, StructureType, UnitType};
use crate::world::objects::GameObject;

/// The datum an event compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventPayload {
    #[default]
    None,
    Number(i64),
    House(HouseId),
    Structure(StructureType),
    Unit(UnitType),
    Infantry(InfantryType),
    Aircraft(AircraftType),
}

impl EventPayload {
    /// Interpret a raw record value through the kind's data need
    pub fn from_value(need: DataNeed, value: i64) -> EventPayload {
        let small = u8::try_from(value).ok();
        match need {
            DataNeed::Number => EventPayload::Number(value),
            DataNeed::House => small.map_or(EventPayload::None, |v| EventPayload::House(HouseId(v))),
            DataNeed::Structure => {
                small.map_or(EventPayload::None, |v| EventPayload::Structure(StructureType(v)))
            }
            DataNeed::Unit => small.map_or(EventPayload::None, |v| EventPayload::Unit(UnitType(v))),
            DataNeed::Infantry => {
                small.map_or(EventPayload::None, |v| EventPayload::Infantry(InfantryType(v)))
            }
            DataNeed::Aircraft => {
                i32::try_from(value)
                    .ok()
                    .and_then(AircraftType::from_index)
                    .map_or(EventPayload::None, EventPayload::Aircraft)
            }
            DataNeed::Team | DataNeed::None => EventPayload::None,
        }
    }

    /// Raw value as written to a record
    pub fn value(&self) -> i64 {
        match self {
            EventPayload::None => -1,
            EventPayload::Number(n) => *n,
            EventPayload::House(h) => h.0 as i64,
            EventPayload::Structure(s) => s.0 as i64,
            EventPayload::Unit(u) => u.0 as i64,
            EventPayload::Infantry(i) => i.0 as i64,
            EventPayload::Aircraft(a) => a.index() as i64,
        }
    }

    pub fn number(&self) -> i64 {
        match self {
            EventPayload::Number(n) => *n,
            _ => 0,
        }
    }

    pub fn house(&self) -> Option<HouseId> {
        match self {
            EventPayload::House(h) => Some(*h),
            _ => None,
        }
    }
}

/// Scenario-authored condition; shared by every instance of its trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventDefinition {
    pub kind: EventKind,
    pub payload: EventPayload,
    /// Team template (leaves-map only)
    pub team: Option<TeamTemplateId>,
}

impl EventDefinition {
    pub fn new(kind: EventKind, payload: EventPayload) -> Self {
        Self { kind, payload, team: None }
    }

    pub fn with_team(mut self, team: TeamTemplateId) -> Self {
        self.team = Some(team);
        self
    }
}

/// Latch and countdown for one trigger instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventState {
    pub tripped: bool,
    /// Ticks left for elapsed-time events
    pub timer: u32,
}

/// Read-only scenario view the evaluator needs
#[derive(Clone, Copy)]
pub struct EventContext<'a> {
    pub scenario: &'a ScenarioState,
    pub houses: &'a Houses,
    pub teams: &'a TeamRegistry,
    pub config: &'a ScriptConfig,
}

impl EventState {
    pub fn new(def: &EventDefinition) -> Self {
        let mut state = Self::default();
        state.reset(def);
        state
    }

    /// Clear the latch and rearm the elapsed-time countdown
    pub fn reset(&mut self, def: &EventDefinition) {
        self.tripped = false;
        self.timer = if def.kind == EventKind::Time {
            let tenths = u32::try_from(def.payload.number()).unwrap_or(0);
            tenths.saturating_mul(TICKS_PER_TENTH_MINUTE)
        } else {
            0
        };
    }

    pub fn advance(&mut self, ticks: u32) {
        self.timer = self.timer.saturating_sub(ticks);
    }

    fn latch(&mut self) -> bool {
        self.tripped = true;
        true
    }

    /// Decide whether the event holds for this occurrence
    ///
    /// `house` is the acting house (the one that built, lost, or owns the
    /// occurrence); `object` is the object involved, if any.
    pub fn evaluate(
        &mut self,
        def: &EventDefinition,
        occurred: EventKind,
        house: Option<HouseId>,
        object: Option<&GameObject>,
        forced: bool,
        ctx: &EventContext<'_>,
    ) -> bool {
        if forced {
            self.tripped = true;
        }
        if self.tripped {
            return true;
        }

        match def.kind {
            EventKind::GlobalSet => return ctx.scenario.globals.get(def.payload.number()),
            EventKind::GlobalClear => return !ctx.scenario.globals.get(def.payload.number()),
            EventKind::MissionTimerExpired => return ctx.scenario.mission_timer.is_expired(),
            EventKind::Time => return self.timer == 0,
            EventKind::None => return false,
            _ => {}
        }

        if def.kind.is_confirmed_by_call() && occurred != def.kind && occurred != EventKind::Any {
            return false;
        }

        if def.kind.is_ownership_filtered() {
            let owner_matches = match (object, def.payload.house()) {
                (Some(obj), Some(wanted)) => obj.owner == wanted,
                _ => false,
            };
            return owner_matches && self.latch();
        }

        if def.kind == EventKind::AllBridgesDestroyed {
            return ctx.scenario.bridge_count == 0 && self.latch();
        }

        match def.kind {
            EventKind::LeavesMap
            | EventKind::Credits
            | EventKind::NoFactories
            | EventKind::CivEvacuated
            | EventKind::BuildingExists
            | EventKind::BuildStructure
            | EventKind::BuildUnit
            | EventKind::BuildInfantry
            | EventKind::BuildAircraft
            | EventKind::NBuildingsDestroyed
            | EventKind::NUnitsDestroyed => {
                let Some(acting) = house.and_then(|h| ctx.houses.get(h)) else {
                    return false;
                };
                let value = def.payload.number();
                match def.kind {
                    EventKind::LeavesMap => def.team.is_some_and(|t| ctx.teams.has_left_map(t)),
                    EventKind::Credits => acting.available_money() as i64 >= value,
                    EventKind::NoFactories => acting.active_buildings & ctx.config.factory_mask() == 0,
                    EventKind::CivEvacuated => acting.is_civ_evacuated,
                    EventKind::NBuildingsDestroyed => acting.buildings_lost as i64 >= value,
                    EventKind::NUnitsDestroyed => acting.units_lost as i64 >= value,
                    _ => {
                        let built = match def.payload {
                            EventPayload::Structure(s) => acting.just_built_structure == Some(s),
                            EventPayload::Unit(u) => acting.just_built_unit == Some(u),
                            EventPayload::Infantry(i) => acting.just_built_infantry == Some(i),
                            EventPayload::Aircraft(a) => acting.just_built_aircraft == Some(a),
                            _ => false,
                        };
                        built && self.latch()
                    }
                }
            }

            EventKind::LowPower
            | EventKind::Thieved
            | EventKind::HouseDiscovered
            | EventKind::UnitsDestroyed
            | EventKind::BuildingsDestroyed
            | EventKind::AllDestroyed
            | EventKind::FakesDestroyed => {
                let Some(target) = def.payload.house().and_then(|h| ctx.houses.get(h)) else {
                    return false;
                };
                let no_units = target.active_units == 0
                    && target.active_infantry == 0
                    && target.active_vessels == 0;
                let no_buildings = target.active_buildings == 0;
                match def.kind {
                    EventKind::LowPower => target.power_ratio() < 1.0,
                    EventKind::Thieved => target.is_thieved,
                    EventKind::HouseDiscovered => target.is_discovered,
                    EventKind::UnitsDestroyed => no_units,
                    EventKind::BuildingsDestroyed => no_buildings,
                    EventKind::AllDestroyed => no_units && no_buildings,
                    _ => {
                        !ctx.config.strict_fakes_check
                            || target.active_buildings & ctx.config.fake_mask() == 0
                    }
                }
            }

            _ => true,
        }
    }
}
