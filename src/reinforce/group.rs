//! Materializing a team template into a group of objects

use crate::core::config::ScriptConfig;
use crate::core::types::{ObjectId, TeamInstanceId};
use crate::reinforce::team::TeamTemplate;
use crate::world::object_type::{AircraftType, ObjectKind, ObjectType};
use crate::world::objects::{GameObject, ObjectStore};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    /// Has passenger capacity; placed on the map
    Transport,
    /// Rides inside the lead transport
    Passenger,
    /// Placed on the map by itself
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMember {
    pub id: ObjectId,
    pub role: GroupRole,
}

/// Objects created for one reinforcement, transports first
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub team: TeamInstanceId,
    pub members: Vec<GroupMember>,
}

impl Group {
    /// Members that go onto the map themselves
    pub fn placeable(&self) -> Vec<ObjectId> {
        self.members
            .iter()
            .filter(|m| m.role != GroupRole::Passenger)
            .map(|m| m.id)
            .collect()
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.members.iter().map(|m| m.id).collect()
    }

    pub fn is_infantry_only(&self, objects: &ObjectStore) -> bool {
        !self.members.is_empty()
            && self
                .members
                .iter()
                .all(|m| objects.get(m.id).is_some_and(|o| o.kind() == ObjectKind::Infantry))
    }
}

/// Whether the house keeps this aircraft instead of it being a loaner
///
/// Only Yaks and Migs are kept, and only while the house has more airstrips
/// than planes of that kind.
pub fn needs_confiscation(objects: &ObjectStore, config: &ScriptConfig, candidate: &GameObject) -> bool {
    let Some(aircraft) = candidate.object_type.as_aircraft() else {
        return false;
    };
    if !aircraft.needs_airstrip() {
        return false;
    }

    let airstrips = objects
        .iter()
        .filter(|o| {
            o.owner == candidate.owner
                && o.is_alive()
                && o.object_type == ObjectType::Structure(config.airstrip)
        })
        .count() as i64;
    let planes = objects
        .iter()
        .filter(|o| {
            o.id != candidate.id
                && o.owner == candidate.owner
                && o.object_type == candidate.object_type
                && !o.is_loaner
        })
        .count() as i64;

    airstrips - planes > 0
}

/// Create every member of the template and link transports to passengers
///
/// Returns `None` (and discards the half-built team) when nothing could be
/// created.
pub fn build_group(world: &mut World, template: &TeamTemplate) -> Option<Group> {
    let team = world.teams.create_instance(template);
    let mut transports = Vec::new();
    let mut plain = Vec::new();

    for member in &template.members {
        for _ in 0..member.quantity {
            let Some(id) = world.objects.create_instance(member.object_type, template.house) else {
                tracing::warn!("Could not create {:?} for team {}", member.object_type, template.name);
                continue;
            };
            world.teams.add_member(team, id);

            let confiscate = world
                .objects
                .get(id)
                .is_some_and(|obj| needs_confiscation(&world.objects, &world.config, obj));
            if let Some(obj) = world.objects.get_mut(id) {
                obj.team = Some(team);
                if obj.kind() == ObjectKind::Aircraft {
                    obj.is_loaner = !confiscate;
                }
            }

            if world.objects.max_passengers(member.object_type) > 0 {
                transports.push(id);
            } else {
                plain.push(id);
            }
        }
    }

    let mut passengers = Vec::new();
    if let Some(&head) = transports.first() {
        for id in plain.drain(..) {
            if world.objects.attach(head, id) {
                passengers.push(id);
            } else {
                tracing::warn!("Transport full, destroying {:?}", id);
                world.destroy_object(id);
            }
        }

        let ferry = world
            .objects
            .get(head)
            .is_some_and(|o| matches!(o.kind(), ObjectKind::Aircraft | ObjectKind::Vessel));
        if ferry && template.has_unload_step() && !passengers.is_empty() {
            if let Some(obj) = world.objects.get_mut(head) {
                obj.is_loaner = true;
            }
        }
    }

    // An empty transport helicopter is a gift, not a ferry
    for id in &transports {
        if let Some(obj) = world.objects.get_mut(*id) {
            if obj.object_type == ObjectType::Aircraft(AircraftType::TransportHeli)
                && obj.passengers.is_empty()
            {
                obj.is_loaner = false;
            }
        }
    }

    let members: Vec<GroupMember> = transports
        .iter()
        .map(|&id| GroupMember { id, role: GroupRole::Transport })
        .chain(passengers.iter().map(|&id| GroupMember { id, role: GroupRole::Passenger }))
        .chain(plain.iter().map(|&id| GroupMember { id, role: GroupRole::Plain }))
        .collect();

    if members.is_empty() {
        world.teams.discard_instance(team);
        return None;
    }

    tracing::debug!("Built group of {} for team {}", members.len(), template.name);
    Some(Group { team, members })
}
