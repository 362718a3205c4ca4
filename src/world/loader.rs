//! Load scenarios from TOML files
//!
//! A scenario file describes the map, houses, pre-placed objects, team
//! templates, triggers and optional mission rule overrides. `ScenarioLoader`
//! turns it into a ready-to-run `ScenarioRunner`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::config::ScriptConfig;
use crate::core::constants::TICKS_PER_TENTH_MINUTE;
use crate::core::types::{HouseId, TeamTemplateId, WaypointId};
use crate::house::HouseState;
use crate::map::{Cell, Edge, Facing, GridMap};
use crate::mission::MissionKind;
use crate::reinforce::{ScriptStep, TeamMember, TeamMission, TeamTemplate};
use crate::scenario::ScenarioRunner;
use crate::trigger::{parse_record, Trigger, TriggerAction};
use crate::world::object_type::{InfantryType, ObjectType};
use crate::world::objects::TypeInfo;
use crate::world::World;

/// Errors that can occur when loading a scenario
#[derive(Debug, Error)]
pub enum LoadError {
    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    /// A team, object or trigger names a house that is not declared
    #[error("Unknown house: {0}")]
    UnknownHouse(u8),
    /// A trigger reinforces a team that is not declared
    #[error("Unknown team: {0}")]
    UnknownTeam(String),
    /// The `[config]` table failed validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// A pre-placed object could not be put on the map
    #[error("Cannot place {0}")]
    PlacementFailed(String),
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    map: MapSection,
    #[serde(default)]
    config: ScriptConfig,
    #[serde(default)]
    scenario: ScenarioSection,
    #[serde(default, rename = "house")]
    houses: Vec<HouseEntry>,
    #[serde(default, rename = "object_type")]
    object_types: Vec<TypeEntry>,
    #[serde(default, rename = "object")]
    objects: Vec<ObjectEntry>,
    #[serde(default, rename = "team")]
    teams: Vec<TeamEntry>,
    #[serde(default, rename = "trigger")]
    triggers: Vec<TriggerEntry>,
    /// Mission rule sections, keyed by mission name
    #[serde(default)]
    missions: Option<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct MapSection {
    width: i32,
    height: i32,
    #[serde(default = "default_border")]
    border: i32,
    #[serde(default)]
    blocked: Vec<[i32; 2]>,
    #[serde(default)]
    waypoints: Vec<WaypointEntry>,
}

fn default_border() -> i32 {
    2
}

#[derive(Debug, Deserialize)]
struct WaypointEntry {
    id: u16,
    cell: [i32; 2],
}

#[derive(Debug, Default, Deserialize)]
struct ScenarioSection {
    #[serde(default)]
    bridges: u32,
    /// Starting mission timer, in tenths of a minute
    #[serde(default)]
    mission_timer: Option<u32>,
    #[serde(default)]
    globals: Vec<i64>,
    #[serde(default)]
    dead_vips: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct HouseEntry {
    id: u8,
    name: String,
    #[serde(default)]
    human: bool,
    #[serde(default)]
    credits: u32,
    #[serde(default)]
    power_output: u32,
    #[serde(default)]
    power_drain: u32,
    #[serde(default)]
    edge: Option<Edge>,
}

#[derive(Debug, Deserialize)]
struct TypeEntry {
    #[serde(rename = "type")]
    object_type: ObjectType,
    #[serde(default)]
    max_passengers: u32,
    #[serde(default)]
    strength: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ObjectEntry {
    #[serde(rename = "type")]
    object_type: ObjectType,
    house: u8,
    cell: [i32; 2],
    #[serde(default)]
    facing: Option<Facing>,
    #[serde(default)]
    mission: Option<String>,
    #[serde(default)]
    strength: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct MemberEntry {
    #[serde(rename = "type")]
    object_type: ObjectType,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct StepEntry {
    mission: String,
    #[serde(default)]
    arg: i32,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    name: String,
    house: u8,
    #[serde(default)]
    origin: Option<u16>,
    members: Vec<MemberEntry>,
    #[serde(default)]
    steps: Vec<StepEntry>,
    #[serde(default)]
    transient: bool,
    #[serde(default = "default_true")]
    reinforcable: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActionEntry {
    #[default]
    None,
    Reinforce(String),
    SetGlobal(i64),
    ClearGlobal(i64),
    StartTimer(u32),
    StopTimer,
}

#[derive(Debug, Deserialize)]
struct TriggerEntry {
    name: String,
    #[serde(default)]
    house: Option<u8>,
    /// Event record in any supported layout
    event: String,
    #[serde(default)]
    action: ActionEntry,
    #[serde(default)]
    repeat: bool,
}

/// Loader that converts scenario TOML into a runnable scenario
#[derive(Debug, Default)]
pub struct ScenarioLoader {
    /// Applied on top of the file's `[config]` table when set
    pub seed_override: Option<u64>,
}

impl ScenarioLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed_override = Some(seed);
        self
    }

    /// Load a scenario from a TOML string
    pub fn load_from_str(&self, content: &str) -> Result<ScenarioRunner, LoadError> {
        let file: ScenarioFile = toml::from_str(content)?;
        self.build(file)
    }

    /// Load a scenario from a TOML file on disk
    pub fn load_from_file(&self, path: &Path) -> Result<ScenarioRunner, LoadError> {
        let content = std::fs::read_to_string(path)?;
        self.load_from_str(&content)
    }

    fn build(&self, file: ScenarioFile) -> Result<ScenarioRunner, LoadError> {
        let mut config = file.config;
        if let Some(seed) = self.seed_override {
            config.seed = seed;
        }
        config.validate().map_err(LoadError::InvalidConfig)?;

        let mut map = GridMap::new(file.map.width, file.map.height, file.map.border);
        for [x, y] in &file.map.blocked {
            map.block(Cell::new(*x, *y));
        }
        for wp in &file.map.waypoints {
            map.set_waypoint(WaypointId(wp.id), Cell::new(wp.cell[0], wp.cell[1]));
        }

        let mut world = World::new(map, config);

        for entry in &file.houses {
            let mut house = HouseState::new(HouseId(entry.id), entry.name.clone());
            house.is_human = entry.human;
            house.credits = entry.credits;
            house.power_output = entry.power_output;
            house.power_drain = entry.power_drain;
            house.edge = entry.edge;
            world.houses.add(house);
        }
        let known_house = |world: &World, id: u8| {
            if world.houses.get(HouseId(id)).is_some() {
                Ok(HouseId(id))
            } else {
                Err(LoadError::UnknownHouse(id))
            }
        };

        for entry in &file.object_types {
            let default = world.objects.type_info(entry.object_type);
            world.objects.register_type(
                entry.object_type,
                TypeInfo {
                    max_passengers: entry.max_passengers,
                    strength: entry.strength.unwrap_or(default.strength),
                },
            );
        }

        self.apply_scenario_section(&mut world, &file.scenario);

        if let Some(missions) = &file.missions {
            world.rules.read_ini(missions);
        }

        for entry in &file.objects {
            let house = known_house(&world, entry.house)?;
            let cell = Cell::new(entry.cell[0], entry.cell[1]);
            let describe = || format!("{:?} at {:?}", entry.object_type, cell);

            let id = world
                .objects
                .create_instance(entry.object_type, house)
                .ok_or_else(|| LoadError::PlacementFailed(describe()))?;
            let facing = entry.facing.unwrap_or(Facing::North);
            if !world.objects.unlimbo(id, cell, facing, &world.map) {
                return Err(LoadError::PlacementFailed(describe()));
            }
            if let Some(obj) = world.objects.get_mut(id) {
                if let Some(strength) = entry.strength {
                    obj.strength = strength.min(obj.max_strength);
                }
                if let Some(mission) = &entry.mission {
                    obj.mission.set_mission(MissionKind::from_name(mission));
                }
            }
        }

        for (index, entry) in file.teams.iter().enumerate() {
            let house = known_house(&world, entry.house)?;
            let id = TeamTemplateId(index as u16);
            let template = TeamTemplate {
                id,
                name: entry.name.clone(),
                house,
                members: entry
                    .members
                    .iter()
                    .map(|m| TeamMember {
                        object_type: m.object_type,
                        quantity: m.quantity,
                    })
                    .collect(),
                steps: entry
                    .steps
                    .iter()
                    .map(|s| ScriptStep {
                        mission: TeamMission::from_name(&s.mission),
                        arg: s.arg,
                    })
                    .collect(),
                origin: entry.origin.map(WaypointId),
                is_transient: entry.transient,
                is_reinforcable: entry.reinforcable,
            };
            world.teams.add_template(template);
        }

        world.tally_houses();

        let mut triggers = Vec::with_capacity(file.triggers.len());
        for entry in &file.triggers {
            let house = entry.house.map(|h| known_house(&world, h)).transpose()?;
            let event = parse_record(&entry.event, |name| {
                world.teams.template_by_name(name).map(|t| t.id)
            });
            let action = match &entry.action {
                ActionEntry::None => TriggerAction::None,
                ActionEntry::Reinforce(team) => {
                    let template = world
                        .teams
                        .template_by_name(team)
                        .ok_or_else(|| LoadError::UnknownTeam(team.clone()))?;
                    TriggerAction::Reinforce(template.id)
                }
                ActionEntry::SetGlobal(flag) => TriggerAction::SetGlobal(*flag),
                ActionEntry::ClearGlobal(flag) => TriggerAction::ClearGlobal(*flag),
                ActionEntry::StartTimer(tenths) => TriggerAction::StartTimer(*tenths),
                ActionEntry::StopTimer => TriggerAction::StopTimer,
            };
            triggers.push(Trigger {
                name: entry.name.clone(),
                house,
                event,
                action,
                repeat: entry.repeat,
            });
        }

        tracing::info!(
            "Loaded scenario: {} houses, {} objects, {} teams, {} triggers",
            world.houses.len(),
            world.objects.len(),
            file.teams.len(),
            triggers.len()
        );

        let mut runner = ScenarioRunner::new(world);
        for trigger in triggers {
            runner.add_trigger(trigger);
        }
        Ok(runner)
    }

    fn apply_scenario_section(&self, world: &mut World, section: &ScenarioSection) {
        let scenario = &mut world.scenario;
        scenario.bridge_count = section.bridges;
        if let Some(tenths) = section.mission_timer {
            scenario
                .mission_timer
                .start(tenths.saturating_mul(TICKS_PER_TENTH_MINUTE));
        }
        for flag in &section.globals {
            if !scenario.globals.set(*flag, true) {
                tracing::warn!("Global flag {} out of range, ignored", flag);
            }
        }
        scenario
            .dead_vips
            .extend(section.dead_vips.iter().map(|v| InfantryType(*v)));
    }
}
