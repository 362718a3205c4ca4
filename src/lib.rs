//! Tactical Script - scenario triggers, missions and reinforcements

pub mod core;
pub mod house;
pub mod map;
pub mod mission;
pub mod reinforce;
pub mod scenario;
pub mod trigger;
pub mod world;
