//! Mission kinds and their persisted names

use serde::{Deserialize, Serialize};

/// A long-running order an object carries out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MissionKind {
    #[default]
    None,
    Sleep,
    Attack,
    Move,
    QMove,
    Retreat,
    Guard,
    Sticky,
    Enter,
    Capture,
    Harvest,
    GuardArea,
    Return,
    Stop,
    Ambush,
    Hunt,
    Unload,
    Sabotage,
    Construction,
    Deconstruction,
    Repair,
    Rescue,
    Missile,
}

/// Concrete kinds in persisted order, paired with their names
const MISSION_NAMES: [(MissionKind, &str); 22] = [
    (MissionKind::Sleep, "Sleep"),
    (MissionKind::Attack, "Attack"),
    (MissionKind::Move, "Move"),
    (MissionKind::QMove, "QMove"),
    (MissionKind::Retreat, "Retreat"),
    (MissionKind::Guard, "Guard"),
    (MissionKind::Sticky, "Sticky"),
    (MissionKind::Enter, "Enter"),
    (MissionKind::Capture, "Capture"),
    (MissionKind::Harvest, "Harvest"),
    (MissionKind::GuardArea, "Area Guard"),
    (MissionKind::Return, "Return"),
    (MissionKind::Stop, "Stop"),
    (MissionKind::Ambush, "Ambush"),
    (MissionKind::Hunt, "Hunt"),
    (MissionKind::Unload, "Unload"),
    (MissionKind::Sabotage, "Sabotage"),
    (MissionKind::Construction, "Construction"),
    (MissionKind::Deconstruction, "Selling"),
    (MissionKind::Repair, "Repair"),
    (MissionKind::Rescue, "Rescue"),
    (MissionKind::Missile, "Missile"),
];

impl MissionKind {
    /// Every concrete kind (excludes `None`)
    pub fn all() -> impl Iterator<Item = MissionKind> {
        MISSION_NAMES.iter().map(|(k, _)| *k)
    }

    pub fn name(&self) -> &'static str {
        MISSION_NAMES
            .iter()
            .find(|(k, _)| k == self)
            .map(|(_, n)| *n)
            .unwrap_or("None")
    }

    /// Case-insensitive lookup; unknown names give `None`
    pub fn from_name(name: &str) -> MissionKind {
        MISSION_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(k, _)| *k)
            .unwrap_or(MissionKind::None)
    }

    pub fn is_none(&self) -> bool {
        *self == MissionKind::None
    }

    /// Quick move is issued by players but executed as a plain move
    pub fn normalized(self) -> MissionKind {
        match self {
            MissionKind::QMove => MissionKind::Move,
            other => other,
        }
    }
}

impl std::fmt::Display for MissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
