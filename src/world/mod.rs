//! The simulation world: objects, map, houses, teams and scenario state

pub mod loader;
pub mod object_type;
pub mod objects;
pub mod snapshot;

pub use object_type::{
    AircraftType, InfantryType, ObjectKind, ObjectType, StructureType, UnitType, VesselType,
};
pub use objects::{ExitStatus, GameObject, ObjectStore, TypeInfo};
pub use snapshot::PoolSnapshot;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::ScriptConfig;
use crate::core::types::ObjectId;
use crate::house::Houses;
use crate::map::GridMap;
use crate::mission::{MissionContext, MissionRuleSet, MissionTable, TickOutcome};
use crate::reinforce::TeamRegistry;
use crate::scenario::ScenarioState;
use crate::trigger::EventContext;

/// Everything the scripting systems read and mutate
pub struct World {
    pub objects: ObjectStore,
    pub map: GridMap,
    pub houses: Houses,
    pub teams: TeamRegistry,
    pub scenario: ScenarioState,
    pub config: ScriptConfig,
    pub rules: MissionRuleSet,
    pub missions: MissionTable,
    pub rng: ChaCha8Rng,
}

impl World {
    pub fn new(map: GridMap, config: ScriptConfig) -> Self {
        Self {
            objects: ObjectStore::new(config.pool_capacity),
            map,
            houses: Houses::new(),
            teams: TeamRegistry::new(),
            scenario: ScenarioState::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            rules: MissionRuleSet::new(),
            missions: MissionTable::with_defaults(),
        }
    }

    /// Destroy an object and its cargo, dropping them from their teams
    ///
    /// Returns how many objects were removed.
    pub fn destroy_object(&mut self, id: ObjectId) -> usize {
        self.remove_object(id).len()
    }

    /// Destroy an object as a combat loss, charging its owner for everything
    /// that goes down with it
    pub fn kill_object(&mut self, id: ObjectId) -> usize {
        let removed = self.remove_object(id);
        for obj in &removed {
            if let Some(house) = self.houses.get_mut(obj.owner) {
                house.record_loss(obj.kind());
            }
        }
        removed.len()
    }

    fn remove_object(&mut self, id: ObjectId) -> Vec<GameObject> {
        let removed = self.objects.destroy(id);
        for obj in &removed {
            self.teams.remove_member(obj.id);
            tracing::debug!("Destroyed {:?} {:?}", obj.object_type, obj.id);
        }
        self.teams.retire_transient();
        removed
    }

    pub fn event_context(&self) -> EventContext<'_> {
        EventContext {
            scenario: &self.scenario,
            houses: &self.houses,
            teams: &self.teams,
            config: &self.config,
        }
    }

    /// Run one mission tick for every object; returns how many dispatched
    pub fn tick_missions(&mut self) -> usize {
        let rules = &self.rules;
        let table = &self.missions;
        let mut dispatched = 0;

        for obj in self.objects.iter_mut() {
            let ctx = MissionContext {
                object: obj.id,
                kind: obj.kind(),
                height: obj.height,
                strength: obj.strength,
                rules,
            };
            if let TickOutcome::Dispatched { .. } = table.tick(&ctx, &mut obj.mission) {
                dispatched += 1;
            }
        }

        dispatched
    }

    /// Refresh house presence masks from the object pool
    pub fn tally_houses(&mut self) {
        self.houses.tally_all(&self.objects);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GridMap::new(64, 64, 4), ScriptConfig::default())
    }
}
