//! Team templates and the live teams built from them

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{HouseId, ObjectId, TeamInstanceId, TeamTemplateId, WaypointId};
use crate::mission::MissionKind;
use crate::world::object_type::ObjectType;

/// One scripted order in a team's script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamMission {
    AttackWaypoint,
    Move,
    Guard,
    Unload,
    Loop,
    Patrol,
    /// Give every member this object mission
    Do(MissionKind),
}

impl TeamMission {
    /// Team-level names first, then any object mission name
    pub fn from_name(name: &str) -> TeamMission {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "attackwaypoint" | "attack" => TeamMission::AttackWaypoint,
            "move" => TeamMission::Move,
            "guard" => TeamMission::Guard,
            "unload" => TeamMission::Unload,
            "loop" => TeamMission::Loop,
            "patrol" => TeamMission::Patrol,
            _ => TeamMission::Do(MissionKind::from_name(name)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub mission: TeamMission,
    /// Waypoint number, step index or duration depending on the mission
    pub arg: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub object_type: ObjectType,
    pub quantity: u32,
}

/// Designer-authored team composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTemplate {
    pub id: TeamTemplateId,
    pub name: String,
    pub house: HouseId,
    pub members: Vec<TeamMember>,
    pub steps: Vec<ScriptStep>,
    pub origin: Option<WaypointId>,
    /// Single-use; dropped along with its last team once that team is empty
    pub is_transient: bool,
    /// May be sent as a reinforcement more than once
    pub is_reinforcable: bool,
}

impl TeamTemplate {
    pub fn new(id: TeamTemplateId, name: impl Into<String>, house: HouseId) -> Self {
        Self {
            id,
            name: name.into(),
            house,
            members: Vec::new(),
            steps: Vec::new(),
            origin: None,
            is_transient: false,
            is_reinforcable: true,
        }
    }

    pub fn with_member(mut self, object_type: ObjectType, quantity: u32) -> Self {
        self.members.push(TeamMember { object_type, quantity });
        self
    }

    pub fn with_step(mut self, mission: TeamMission, arg: i32) -> Self {
        self.steps.push(ScriptStep { mission, arg });
        self
    }

    pub fn with_origin(mut self, origin: WaypointId) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn has_unload_step(&self) -> bool {
        self.steps.iter().any(|s| s.mission == TeamMission::Unload)
    }

    /// Script to run; a template without steps attacks its origin waypoint
    pub fn effective_steps(&self) -> Vec<ScriptStep> {
        if self.steps.is_empty() {
            let arg = self.origin.map_or(-1, |w| w.0 as i32);
            vec![ScriptStep { mission: TeamMission::AttackWaypoint, arg }]
        } else {
            self.steps.clone()
        }
    }
}

/// A team on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInstance {
    pub id: TeamInstanceId,
    pub template: TeamTemplateId,
    pub house: HouseId,
    pub members: Vec<ObjectId>,
    pub steps: Vec<ScriptStep>,
    pub current_step: usize,
    /// Set once the team has driven off the map
    pub is_leave_map: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TeamRegistry {
    templates: AHashMap<TeamTemplateId, TeamTemplate>,
    instances: AHashMap<TeamInstanceId, TeamInstance>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_template(&mut self, template: TeamTemplate) {
        self.templates.insert(template.id, template);
    }

    pub fn template(&self, id: TeamTemplateId) -> Option<&TeamTemplate> {
        self.templates.get(&id)
    }

    pub fn template_by_name(&self, name: &str) -> Option<&TeamTemplate> {
        self.templates
            .values()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn remove_template(&mut self, id: TeamTemplateId) -> Option<TeamTemplate> {
        self.templates.remove(&id)
    }

    /// Lowest id no template uses
    pub fn next_template_id(&self) -> TeamTemplateId {
        let mut id = 0u16;
        while self.templates.contains_key(&TeamTemplateId(id)) {
            id = id.saturating_add(1);
            if id == u16::MAX {
                break;
            }
        }
        TeamTemplateId(id)
    }

    /// Start an empty team for a template
    pub fn create_instance(&mut self, template: &TeamTemplate) -> TeamInstanceId {
        let id = TeamInstanceId::new();
        self.instances.insert(
            id,
            TeamInstance {
                id,
                template: template.id,
                house: template.house,
                members: Vec::new(),
                steps: template.effective_steps(),
                current_step: 0,
                is_leave_map: false,
            },
        );
        id
    }

    pub fn instance(&self, id: TeamInstanceId) -> Option<&TeamInstance> {
        self.instances.get(&id)
    }

    pub fn instances(&self) -> impl Iterator<Item = &TeamInstance> {
        self.instances.values()
    }

    pub fn add_member(&mut self, team: TeamInstanceId, object: ObjectId) -> bool {
        match self.instances.get_mut(&team) {
            Some(instance) => {
                instance.members.push(object);
                true
            }
            None => false,
        }
    }

    /// Drop an object from whichever team holds it
    pub fn remove_member(&mut self, object: ObjectId) {
        for instance in self.instances.values_mut() {
            instance.members.retain(|m| *m != object);
        }
    }

    pub fn discard_instance(&mut self, id: TeamInstanceId) -> Option<TeamInstance> {
        self.instances.remove(&id)
    }

    /// Drop emptied teams of transient templates, and the template with its last team
    ///
    /// Teams that left the map are kept for the leaves-map event. Returns how
    /// many teams were dropped.
    pub fn retire_transient(&mut self) -> usize {
        let templates = &self.templates;
        let mut emptied = Vec::new();
        self.instances.retain(|_, team| {
            let done = team.members.is_empty()
                && !team.is_leave_map
                && templates.get(&team.template).is_some_and(|t| t.is_transient);
            if done {
                emptied.push(team.template);
            }
            !done
        });

        for template in &emptied {
            if !self.instances.values().any(|t| t.template == *template) {
                self.templates.remove(template);
            }
        }
        emptied.len()
    }

    pub fn mark_left_map(&mut self, id: TeamInstanceId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.is_leave_map = true;
        }
    }

    /// A team built from the template has left the map with nobody behind
    pub fn has_left_map(&self, template: TeamTemplateId) -> bool {
        self.instances
            .values()
            .any(|t| t.template == template && t.is_leave_map && t.members.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::object_type::InfantryType;

    fn riflemen() -> TeamTemplate {
        TeamTemplate::new(TeamTemplateId(0), "riflemen", HouseId(1))
            .with_member(ObjectType::Infantry(InfantryType(1)), 2)
            .with_origin(WaypointId(7))
    }

    #[test]
    fn test_empty_script_attacks_origin() {
        let steps = riflemen().effective_steps();
        assert_eq!(
            steps,
            vec![ScriptStep { mission: TeamMission::AttackWaypoint, arg: 7 }]
        );

        let scripted = riflemen().with_step(TeamMission::Guard, 0);
        assert_eq!(scripted.effective_steps().len(), 1);
        assert_eq!(scripted.effective_steps()[0].mission, TeamMission::Guard);
    }

    #[test]
    fn test_membership() {
        let mut registry = TeamRegistry::new();
        let template = riflemen();
        registry.add_template(template.clone());
        let team = registry.create_instance(&template);

        let a = ObjectId::new();
        assert!(registry.add_member(team, a));
        registry.remove_member(a);
        assert!(registry.instance(team).unwrap().members.is_empty());
    }

    #[test]
    fn test_leaves_map_per_template() {
        let mut registry = TeamRegistry::new();
        let template = riflemen();
        let team = registry.create_instance(&template);
        assert!(!registry.has_left_map(template.id));

        registry.mark_left_map(team);
        assert!(registry.has_left_map(template.id));
        assert!(!registry.has_left_map(TeamTemplateId(9)));
    }

    #[test]
    fn test_leaves_map_waits_for_stragglers() {
        let mut registry = TeamRegistry::new();
        let template = riflemen();
        let team = registry.create_instance(&template);
        let straggler = ObjectId::new();
        registry.add_member(team, straggler);

        registry.mark_left_map(team);
        assert!(!registry.has_left_map(template.id));

        registry.remove_member(straggler);
        assert!(registry.has_left_map(template.id));
    }

    #[test]
    fn test_transient_template_goes_with_its_team() {
        let mut registry = TeamRegistry::new();
        let mut once = riflemen();
        once.is_transient = true;
        registry.add_template(once.clone());
        let kept = TeamTemplate::new(TeamTemplateId(1), "kept", HouseId(1));
        registry.add_template(kept.clone());

        let team = registry.create_instance(&once);
        let idle = registry.create_instance(&kept);
        let a = ObjectId::new();
        registry.add_member(team, a);
        assert_eq!(registry.retire_transient(), 0);

        registry.remove_member(a);
        assert_eq!(registry.retire_transient(), 1);
        assert!(registry.instance(team).is_none());
        assert!(registry.template(once.id).is_none());
        // Ordinary templates keep their empty teams
        assert!(registry.instance(idle).is_some());
        assert!(registry.template(kept.id).is_some());
    }

    #[test]
    fn test_team_mission_names() {
        assert_eq!(TeamMission::from_name("Attack Waypoint"), TeamMission::AttackWaypoint);
        assert_eq!(TeamMission::from_name("unload"), TeamMission::Unload);
        assert_eq!(TeamMission::from_name("Hunt"), TeamMission::Do(MissionKind::Hunt));
        assert_eq!(TeamMission::from_name("Area Guard"), TeamMission::Do(MissionKind::GuardArea));
    }

    #[test]
    fn test_next_template_id_skips_used() {
        let mut registry = TeamRegistry::new();
        registry.add_template(riflemen());
        assert_eq!(registry.next_template_id(), TeamTemplateId(1));
        assert!(registry.template_by_name("RIFLEMEN").is_some());
    }
}
