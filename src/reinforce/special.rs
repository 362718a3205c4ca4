//! One-off reinforcements requested by scripted actions

use crate::core::types::{HouseId, Target, WaypointId};
use crate::map::{Edge, MapView, SpeedClass};
use crate::mission::MissionKind;
use crate::reinforce::deliver::{random_facing, reinforce_with};
use crate::reinforce::team::{TeamMission, TeamTemplate};
use crate::world::object_type::{AircraftType, InfantryType, ObjectType};
use crate::world::World;

/// Reinforce with a single object (plus an optional escort or carrier)
///
/// Builds a throwaway template; it stays registered only if delivery worked,
/// and only until the team it produced is gone.
pub fn create_special_reinforcement(
    world: &mut World,
    house: HouseId,
    object_type: ObjectType,
    alt_type: Option<ObjectType>,
    mission: Option<TeamMission>,
    arg: i32,
) -> bool {
    let id = world.teams.next_template_id();
    let mut template = TeamTemplate::new(id, format!("special-{}", id.0), house)
        .with_member(object_type, 1);
    if let Some(alt) = alt_type {
        template = template.with_member(alt, 1);
    }
    template = match mission {
        Some(mission) => template.with_step(mission, arg),
        None => template.with_step(TeamMission::Unload, WaypointId::REINFORCEMENT.0 as i32),
    };
    template.is_transient = true;
    template.is_reinforcable = false;

    world.teams.add_template(template.clone());
    let delivered = reinforce_with(world, &template);
    if !delivered {
        world.teams.remove_template(id);
    }
    delivered
}

/// Fly in `count` loaner aircraft; returns how many made it onto the map
///
/// Stops at the first plane that cannot be placed. A dead VIP passenger
/// cancels the whole flight.
#[allow(clippy::too_many_arguments)]
pub fn create_air_reinforcement(
    world: &mut World,
    house: HouseId,
    aircraft: AircraftType,
    count: u32,
    mission: MissionKind,
    target: Option<Target>,
    nav_target: Option<Target>,
    passenger: Option<InfantryType>,
) -> u32 {
    let count = match passenger {
        Some(vip) if world.scenario.is_vip_dead(vip) => {
            tracing::info!("Passenger {:?} is dead, cancelling air reinforcement", vip);
            0
        }
        _ => count,
    };

    let edge = world
        .houses
        .get(house)
        .map_or(Edge::North, |h| h.edge_or_default());

    for created in 0..count {
        let Some(id) = world.objects.create_instance(ObjectType::Aircraft(aircraft), house) else {
            return created;
        };
        if let Some(obj) = world.objects.get_mut(id) {
            obj.is_loaner = true;
        }

        let facing = random_facing(world);
        let placed = world
            .map
            .resolve_entry_cell(edge, None, None, SpeedClass::Winged)
            .is_some_and(|cell| world.objects.unlimbo(id, cell, facing, &world.map));

        if !placed {
            tracing::warn!("Could not place {:?} for {:?}", aircraft, house);
            world.destroy_object(id);
            return created;
        }

        if let Some(obj) = world.objects.get_mut(id) {
            obj.mission.target = target;
            obj.mission.nav_target = nav_target;
            obj.mission.assign_mission(mission);
            obj.paradrop = passenger;
            obj.mission.commence();
        }
    }

    count
}
