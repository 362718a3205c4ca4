//! Mission dispatch table and the per-tick timer discipline
//!
//! Each mission kind maps to a handler that does one slice of work and
//! returns how many ticks to wait before it runs again.

use ahash::AHashMap;

use crate::core::constants::SLEEP_DELAY;
use crate::core::types::ObjectId;
use crate::mission::kind::MissionKind;
use crate::mission::rules::MissionRuleSet;
use crate::mission::state::MissionState;
use crate::world::ObjectKind;

/// What a handler gets to see about the object it runs for
#[derive(Debug, Clone, Copy)]
pub struct MissionContext<'a> {
    pub object: ObjectId,
    pub kind: ObjectKind,
    pub height: i32,
    pub strength: u16,
    pub rules: &'a MissionRuleSet,
}

impl MissionContext<'_> {
    /// Ground objects that are still dropping (parachutes) do not think
    pub fn is_airborne_transition(&self) -> bool {
        self.kind.is_ground() && self.height > 0
    }
}

/// One mission kind's behavior
pub trait MissionHandler {
    /// Run one slice of the mission; returns the delay until the next slice
    fn run(&self, ctx: &MissionContext<'_>, state: &mut MissionState) -> u32;
}

impl<F> MissionHandler for F
where
    F: Fn(&MissionContext<'_>, &mut MissionState) -> u32,
{
    fn run(&self, ctx: &MissionContext<'_>, state: &mut MissionState) -> u32 {
        self(ctx, state)
    }
}

/// Idles with a long fixed cadence
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepHandler;

impl MissionHandler for SleepHandler {
    fn run(&self, _ctx: &MissionContext<'_>, _state: &mut MissionState) -> u32 {
        SLEEP_DELAY
    }
}

/// Re-runs at the rate the mission rules give for the current mission
#[derive(Debug, Clone, Copy, Default)]
pub struct CadenceHandler;

impl MissionHandler for CadenceHandler {
    fn run(&self, ctx: &MissionContext<'_>, state: &mut MissionState) -> u32 {
        let rules = ctx.rules.get(state.current);
        if ctx.kind == ObjectKind::Aircraft {
            rules.aa_delay()
        } else {
            rules.normal_delay()
        }
    }
}

/// Outcome of one `MissionTable::tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Object is mid-air and ground logic is paused
    Skipped,
    /// Timer still running, or the object is dead
    Waiting,
    /// Handler ran and set a new delay
    Dispatched { mission: MissionKind, delay: u32 },
}

/// Mission kind to handler lookup
pub struct MissionTable {
    handlers: AHashMap<MissionKind, Box<dyn MissionHandler>>,
    sleep: SleepHandler,
}

impl MissionTable {
    /// Empty table: every kind runs the sleep handler
    pub fn new() -> Self {
        Self {
            handlers: AHashMap::new(),
            sleep: SleepHandler,
        }
    }

    /// Sleep handler for `Sleep`, rule-driven cadence for everything else
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for kind in MissionKind::all() {
            if kind == MissionKind::Sleep {
                table.register(kind, SleepHandler);
            } else {
                table.register(kind, CadenceHandler);
            }
        }
        table
    }

    pub fn register(&mut self, kind: MissionKind, handler: impl MissionHandler + 'static) {
        self.handlers.insert(kind, Box::new(handler));
    }

    pub fn handler(&self, kind: MissionKind) -> &dyn MissionHandler {
        self.handlers
            .get(&kind)
            .map(|h| h.as_ref())
            .unwrap_or(&self.sleep)
    }

    /// Advance one object's mission by one tick
    pub fn tick(&self, ctx: &MissionContext<'_>, state: &mut MissionState) -> TickOutcome {
        if ctx.is_airborne_transition() {
            return TickOutcome::Skipped;
        }

        state.timer = state.timer.saturating_sub(1);
        if state.timer > 0 || ctx.strength == 0 {
            return TickOutcome::Waiting;
        }

        let mission = state.current;
        let delay = self.handler(mission).run(ctx, state);
        state.timer = delay;
        TickOutcome::Dispatched { mission, delay }
    }
}

impl Default for MissionTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
