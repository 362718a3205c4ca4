//! Per-object mission state
//!
//! `current` runs, `queued` waits for the next `commence`, and `suspended`
//! holds a single overridden mission for `restore_mission`.

use serde::{Deserialize, Serialize};

use crate::core::types::Target;
use crate::mission::kind::MissionKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionState {
    pub current: MissionKind,
    pub queued: MissionKind,
    pub suspended: MissionKind,
    /// Handler-private progress marker, reset on every promotion
    pub sub_state: u8,
    /// Ticks until the handler runs again
    pub timer: u32,
    pub target: Option<Target>,
    pub nav_target: Option<Target>,
    pub suspended_target: Option<Target>,
    pub suspended_nav_target: Option<Target>,
}

impl MissionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the running mission immediately
    pub fn set_mission(&mut self, mission: MissionKind) {
        self.current = mission.normalized();
        self.queued = MissionKind::None;
    }

    /// Running mission, or the queued one when nothing runs yet
    pub fn get_mission(&self) -> MissionKind {
        if self.current.is_none() {
            self.queued
        } else {
            self.current
        }
    }

    /// Queue a mission; it takes effect on the next `commence`
    pub fn assign_mission(&mut self, order: MissionKind) {
        let order = order.normalized();
        if !order.is_none() && order != self.current {
            self.queued = order;
        }
    }

    /// Promote the queued mission. Returns whether anything changed.
    pub fn commence(&mut self) -> bool {
        if self.queued.is_none() {
            return false;
        }
        self.current = self.queued;
        self.queued = MissionKind::None;
        self.sub_state = 0;
        self.timer = 0;
        true
    }

    /// Temporarily switch missions, remembering the one being displaced
    ///
    /// Only one level is kept: a second override before a restore replaces
    /// the saved mission.
    pub fn override_mission(
        &mut self,
        mission: MissionKind,
        target: Option<Target>,
        nav_target: Option<Target>,
    ) {
        self.suspended = if self.queued.is_none() {
            self.current
        } else {
            self.queued
        };
        self.suspended_target = self.target;
        self.suspended_nav_target = self.nav_target;

        self.target = target;
        self.nav_target = nav_target;
        self.assign_mission(mission);
    }

    /// Return to the mission saved by `override_mission`
    pub fn restore_mission(&mut self) -> bool {
        if self.suspended.is_none() {
            return false;
        }
        self.assign_mission(self.suspended);
        self.target = self.suspended_target.take();
        self.nav_target = self.suspended_nav_target.take();
        self.suspended = MissionKind::None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;

    fn running(kind: MissionKind) -> MissionState {
        let mut state = MissionState::new();
        state.set_mission(kind);
        state
    }

    #[test]
    fn test_set_mission_clears_queue() {
        let mut state = MissionState::new();
        state.assign_mission(MissionKind::Hunt);
        state.set_mission(MissionKind::Guard);

        assert_eq!(state.current, MissionKind::Guard);
        assert_eq!(state.queued, MissionKind::None);
    }

    #[test]
    fn test_get_mission_prefers_current() {
        let mut state = MissionState::new();
        state.assign_mission(MissionKind::Attack);
        assert_eq!(state.get_mission(), MissionKind::Attack);

        state.commence();
        state.assign_mission(MissionKind::Retreat);
        assert_eq!(state.get_mission(), MissionKind::Attack);
    }

    #[test]
    fn test_assign_same_mission_is_ignored() {
        let mut state = running(MissionKind::Guard);
        state.assign_mission(MissionKind::Guard);
        assert_eq!(state.queued, MissionKind::None);

        state.assign_mission(MissionKind::None);
        assert_eq!(state.queued, MissionKind::None);
    }

    #[test]
    fn test_qmove_queues_move() {
        let mut a = MissionState::new();
        let mut b = MissionState::new();
        a.assign_mission(MissionKind::QMove);
        b.assign_mission(MissionKind::Move);
        assert_eq!(a, b);
    }

    #[test]
    fn test_commence_resets_timing() {
        let mut state = running(MissionKind::Guard);
        state.timer = 40;
        state.sub_state = 3;
        state.assign_mission(MissionKind::Hunt);

        assert!(state.commence());
        assert_eq!(state.current, MissionKind::Hunt);
        assert_eq!(state.queued, MissionKind::None);
        assert_eq!(state.timer, 0);
        assert_eq!(state.sub_state, 0);
    }

    #[test]
    fn test_commence_without_queue_is_noop() {
        let mut state = running(MissionKind::Guard);
        state.timer = 12;
        state.sub_state = 2;
        let before = state.clone();

        assert!(!state.commence());
        assert_eq!(state, before);
    }

    #[test]
    fn test_override_and_restore() {
        let home = Target::Cell(Cell::new(4, 4));
        let mut state = running(MissionKind::GuardArea);
        state.nav_target = Some(home);

        let threat = Target::Cell(Cell::new(9, 9));
        state.override_mission(MissionKind::Attack, Some(threat), None);
        state.commence();
        assert_eq!(state.get_mission(), MissionKind::Attack);
        assert_eq!(state.target, Some(threat));

        assert!(state.restore_mission());
        state.commence();
        assert_eq!(state.get_mission(), MissionKind::GuardArea);
        assert_eq!(state.nav_target, Some(home));
        assert_eq!(state.suspended, MissionKind::None);
        assert!(!state.restore_mission());
    }

    #[test]
    fn test_override_saves_queued_first() {
        let mut state = running(MissionKind::Guard);
        state.assign_mission(MissionKind::Hunt);
        state.override_mission(MissionKind::Retreat, None, None);
        assert_eq!(state.suspended, MissionKind::Hunt);
    }

    #[test]
    fn test_second_override_discards_first() {
        let mut state = running(MissionKind::Guard);
        state.override_mission(MissionKind::Attack, None, None);
        state.commence();
        state.override_mission(MissionKind::Retreat, None, None);
        state.commence();

        state.restore_mission();
        state.commence();
        assert_eq!(state.get_mission(), MissionKind::Attack);
    }
}
