//! Tick loop: trigger polling, trigger actions and mission ticks

use crate::core::constants::TICKS_PER_TENTH_MINUTE;
use crate::core::types::{HouseId, ObjectId};
use crate::house::NotificationKind;
use crate::reinforce::do_reinforcements;
use crate::trigger::{EventKind, Trigger, TriggerAction, TriggerInstance};
use crate::world::World;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub fired: Vec<String>,
    pub dispatched: usize,
}

pub struct ScenarioRunner {
    pub world: World,
    pub triggers: Vec<TriggerInstance>,
}

impl ScenarioRunner {
    pub fn new(world: World) -> Self {
        Self {
            world,
            triggers: Vec::new(),
        }
    }

    pub fn add_trigger(&mut self, trigger: Trigger) {
        self.triggers.push(TriggerInstance::new(trigger));
    }

    /// Advance the scenario by one tick
    pub fn tick(&mut self) -> TickReport {
        self.world.scenario.tick += 1;
        for instance in self.triggers.iter_mut().filter(|t| !t.retired) {
            instance.state.advance(1);
        }
        self.world.tally_houses();

        let ready = self.poll();
        let mut fired = Vec::with_capacity(ready.len());
        for index in ready {
            fired.push(self.fire(index));
        }

        let dispatched = self.world.tick_missions();

        let was_expired = self.world.scenario.mission_timer.is_expired();
        self.world.scenario.mission_timer.tick();
        if !was_expired && self.world.scenario.mission_timer.is_expired() {
            if let Some(player) = self.world.houses.player {
                if let Some(house) = self.world.houses.get_mut(player) {
                    house.notify(NotificationKind::MissionTimerExpired, None);
                }
            }
        }

        TickReport {
            tick: self.world.scenario.tick,
            fired,
            dispatched,
        }
    }

    pub fn run(&mut self, ticks: u64) -> Vec<TickReport> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Indices of house and general triggers that hold this tick
    fn poll(&mut self) -> Vec<usize> {
        let ctx = self.world.event_context();
        self.triggers
            .iter_mut()
            .enumerate()
            .filter(|(_, t)| !t.retired && t.is_polled())
            .filter_map(|(i, t)| {
                let house = t.trigger.house;
                t.state
                    .evaluate(&t.trigger.event, EventKind::None, house, None, false, &ctx)
                    .then_some(i)
            })
            .collect()
    }

    /// Report an occurrence (attack, destruction, cell entry) to every trigger
    ///
    /// Returns the names of triggers that fired.
    pub fn raise(
        &mut self,
        occurred: EventKind,
        house: Option<HouseId>,
        object: Option<ObjectId>,
    ) -> Vec<String> {
        self.world.tally_houses();

        let ready: Vec<usize> = {
            let ctx = self.world.event_context();
            let object = object.and_then(|id| self.world.objects.get(id));
            self.triggers
                .iter_mut()
                .enumerate()
                .filter(|(_, t)| !t.retired)
                .filter_map(|(i, t)| {
                    let acting = house.or(t.trigger.house);
                    t.state
                        .evaluate(&t.trigger.event, occurred, acting, object, false, &ctx)
                        .then_some(i)
                })
                .collect()
        };

        ready.into_iter().map(|i| self.fire(i)).collect()
    }

    /// An object came off its owner's production line
    ///
    /// Build triggers see it on the next poll. False if the object is gone.
    pub fn report_built(&mut self, id: ObjectId) -> bool {
        let Some((owner, object_type)) = self.world.objects.get(id).map(|o| (o.owner, o.object_type))
        else {
            return false;
        };
        match self.world.houses.get_mut(owner) {
            Some(house) => {
                house.record_built(object_type);
                true
            }
            None => false,
        }
    }

    /// Destroy an object in combat
    ///
    /// Triggers watching it see the destruction before it leaves the pool,
    /// and the owner is charged for the loss. Returns the triggers that fired.
    pub fn kill(&mut self, id: ObjectId) -> Vec<String> {
        let Some(owner) = self.world.objects.get(id).map(|o| o.owner) else {
            return Vec::new();
        };
        let fired = self.raise(EventKind::Destroyed, Some(owner), Some(id));
        self.world.kill_object(id);
        fired
    }

    /// Force a trigger by name regardless of its event
    pub fn force(&mut self, name: &str) -> bool {
        let Some(index) = self
            .triggers
            .iter()
            .position(|t| !t.retired && t.trigger.name.eq_ignore_ascii_case(name))
        else {
            return false;
        };

        let ctx = self.world.event_context();
        let instance = &mut self.triggers[index];
        instance.state.evaluate(
            &instance.trigger.event,
            EventKind::None,
            instance.trigger.house,
            None,
            true,
            &ctx,
        );
        self.fire(index);
        true
    }

    fn fire(&mut self, index: usize) -> String {
        let Some(instance) = self.triggers.get(index) else {
            return String::new();
        };
        let name = instance.trigger.name.clone();
        let action = instance.trigger.action;
        tracing::info!("Trigger {} fired ({})", name, instance.trigger.event.kind);

        match action {
            TriggerAction::None => {}
            TriggerAction::Reinforce(template) => {
                if !do_reinforcements(&mut self.world, template) {
                    tracing::warn!("Trigger {}: reinforcement {:?} failed", name, template);
                }
            }
            TriggerAction::SetGlobal(flag) => {
                self.world.scenario.globals.set(flag, true);
            }
            TriggerAction::ClearGlobal(flag) => {
                self.world.scenario.globals.set(flag, false);
            }
            TriggerAction::StartTimer(tenths) => {
                self.world
                    .scenario
                    .mission_timer
                    .start(tenths.saturating_mul(TICKS_PER_TENTH_MINUTE));
            }
            TriggerAction::StopTimer => self.world.scenario.mission_timer.stop(),
        }

        if let Some(instance) = self.triggers.get_mut(index) {
            instance.after_fire();
        }
        name
    }
}
