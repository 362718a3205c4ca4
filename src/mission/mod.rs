//! Mission state machine - the long-running order every object follows
//!
//! Orders are queued with `assign_mission` and take effect on `commence`.
//! Each tick the dispatch table runs the current mission's handler once its
//! timer has run out.

pub mod dispatch;
pub mod kind;
pub mod rules;
pub mod state;

pub use dispatch::{
    CadenceHandler, MissionContext, MissionHandler, MissionTable, SleepHandler, TickOutcome,
};
pub use kind::MissionKind;
pub use rules::{MissionRuleSet, MissionRules};
pub use state::MissionState;
