//! Reinforcement assembly and delivery
//!
//! A team template becomes a group of new objects, which either pops out of
//! a friendly host near the team's origin waypoint or enters over the map
//! edge. Every object created here ends up placed or destroyed.

pub mod deliver;
pub mod group;
pub mod special;
pub mod team;

pub use deliver::{do_reinforcements, find_host, reinforce_with};
pub use group::{build_group, needs_confiscation, Group, GroupMember, GroupRole};
pub use special::{create_air_reinforcement, create_special_reinforcement};
pub use team::{ScriptStep, TeamInstance, TeamMember, TeamMission, TeamRegistry, TeamTemplate};
