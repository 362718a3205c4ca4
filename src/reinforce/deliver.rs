//! Getting a reinforcement group onto the map
//!
//! Infantry with an origin waypoint pop out of a friendly host next to it
//! when one exists; everything else drives in from the house's map edge.

use rand::Rng;

use crate::core::types::{HouseId, ObjectId, TeamTemplateId, WaypointId};
use crate::house::NotificationKind;
use crate::map::{Cell, Edge, Facing, MapView};
use crate::mission::MissionKind;
use crate::reinforce::group::{build_group, Group};
use crate::reinforce::team::TeamTemplate;
use crate::world::object_type::ObjectKind;
use crate::world::objects::ExitStatus;
use crate::world::World;

/// Send the registered template as a reinforcement
pub fn do_reinforcements(world: &mut World, template: TeamTemplateId) -> bool {
    match world.teams.template(template).cloned() {
        Some(template) if !template.is_reinforcable && fielded(world, template.id) => {
            tracing::debug!("Team {} is already in the field", template.name);
            false
        }
        Some(template) => reinforce_with(world, &template),
        None => {
            tracing::warn!("Reinforcement with unknown team template {:?}", template);
            false
        }
    }
}

fn fielded(world: &World, template: TeamTemplateId) -> bool {
    world.teams.instances().any(|t| t.template == template)
}

/// Build and deliver a group for `template`
///
/// A team that fails to arrive is discarded.
pub fn reinforce_with(world: &mut World, template: &TeamTemplate) -> bool {
    if template.members.is_empty() {
        return false;
    }

    let Some(group) = build_group(world, template) else {
        return false;
    };

    let host = if group.is_infantry_only(&world.objects) {
        template
            .origin
            .and_then(|origin| find_host(world, template.house, origin))
    } else {
        None
    };

    let delivered = match host {
        Some(host) => pop_out(world, &group, host),
        None => insert_at_edge(world, template, &group),
    };
    if !delivered {
        world.teams.discard_instance(group.team);
    }
    delivered
}

/// Friendly object at or next to the waypoint that can take the group
///
/// A non-building with room wins outright; a live building is the fallback.
pub fn find_host(world: &World, house: HouseId, origin: WaypointId) -> Option<ObjectId> {
    let center = world.map.waypoint(origin)?;
    let mut fallback = None;

    for cell in std::iter::once(center).chain(center.neighbors()) {
        for id in world.objects.objects_at(cell) {
            let Some(obj) = world.objects.get(id) else {
                continue;
            };
            if obj.owner != house || !obj.is_alive() {
                continue;
            }

            if obj.kind() == ObjectKind::Building {
                fallback.get_or_insert(id);
            } else if (obj.passengers.len() as u32) < world.objects.max_passengers(obj.object_type) {
                return Some(id);
            }
        }
    }

    fallback
}

/// Deliver the group out of (or into) an existing host
///
/// Succeeds if at least one member made it.
fn pop_out(world: &mut World, group: &Group, host: ObjectId) -> bool {
    let from_building = world
        .objects
        .get(host)
        .is_some_and(|o| o.kind() == ObjectKind::Building);
    let mut popped = 0;

    for id in group.ids() {
        let ok = if from_building {
            world.objects.exit_object(host, id, &world.map) == ExitStatus::Ok
        } else {
            world.objects.attach(host, id)
        };

        if ok {
            popped += 1;
            if from_building {
                give_guard(world, id);
            }
        } else {
            tracing::warn!("{:?} could not leave host {:?}, destroying", id, host);
            world.destroy_object(id);
        }
    }

    if popped > 0 && !from_building {
        if let Some(obj) = world.objects.get_mut(host) {
            obj.mission.assign_mission(MissionKind::Unload);
            obj.mission.commence();
        }
    }

    tracing::info!("{} of {} popped out of {:?}", popped, group.members.len(), host);
    popped > 0
}

fn give_guard(world: &mut World, id: ObjectId) {
    if let Some(obj) = world.objects.get_mut(id) {
        obj.mission.assign_mission(MissionKind::Guard);
        obj.mission.commence();
    }
}

pub(crate) fn random_facing(world: &mut World) -> Facing {
    Facing::from_index(world.rng.gen_range(0..Facing::ALL.len()))
}

/// First enterable cell next to `entry` that the player cannot see
fn free_off_radar_neighbor(world: &World, kind: ObjectKind, entry: Cell) -> Option<Cell> {
    Facing::ALL
        .iter()
        .map(|f| world.map.adjacent_cell(entry, *f))
        .find(|c| !world.map.is_radar_visible(*c) && world.objects.can_occupy(kind, *c, &world.map))
}

/// Drive the group in over the house's edge
fn insert_at_edge(world: &mut World, template: &TeamTemplate, group: &Group) -> bool {
    let edge = world
        .houses
        .get(template.house)
        .map_or(Edge::North, |h| h.edge_or_default());
    let placeable = group.placeable();

    let speed = placeable
        .first()
        .and_then(|id| world.objects.get(*id))
        .map(|o| o.object_type.speed_class());
    let entry = speed.and_then(|speed| {
        world
            .map
            .resolve_entry_cell(edge, template.origin, Some(WaypointId::REINFORCEMENT), speed)
    });

    let Some(entry) = entry else {
        tracing::warn!("No entry cell for team {}, destroying group", template.name);
        for id in group.ids() {
            world.destroy_object(id);
        }
        return false;
    };

    let mut placed = 0;
    for (i, &id) in placeable.iter().enumerate() {
        let Some(kind) = world.objects.get(id).map(|o| o.kind()) else {
            continue;
        };
        let is_aircraft = kind == ObjectKind::Aircraft;
        let facing = if is_aircraft {
            random_facing(world)
        } else {
            edge.inward_facing()
        };

        let mut landed = world.objects.unlimbo(id, entry, facing, &world.map);
        if !landed {
            if let Some(cell) = free_off_radar_neighbor(world, kind, entry) {
                landed = world.objects.unlimbo(id, cell, facing, &world.map);
            }
        }

        if !landed {
            tracing::warn!(
                "No room at {:?} for team {}, destroying {} remaining",
                entry,
                template.name,
                placeable.len() - i
            );
            for rest in &placeable[i..] {
                world.destroy_object(*rest);
            }
            break;
        }

        placed += 1;
        if !is_aircraft {
            give_guard(world, id);
        }
    }

    if placed > 0 && world.houses.is_player(template.house) {
        if let Some(house) = world.houses.get_mut(template.house) {
            house.notify(NotificationKind::ReinforcementsArrived, Some(entry));
        }
    }

    tracing::info!("Team {} inserted {} of {} at {:?}", template.name, placed, placeable.len(), entry);
    placed > 0
}
