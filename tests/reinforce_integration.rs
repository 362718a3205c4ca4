//! Integration tests for reinforcement delivery against a small map

use tactical_script::core::config::ScriptConfig;
use tactical_script::core::types::{HouseId, TeamTemplateId, WaypointId};
use tactical_script::house::{HouseState, NotificationKind};
use tactical_script::map::{Cell, Edge, Facing, GridMap, MapView};
use tactical_script::mission::MissionKind;
use tactical_script::reinforce::{
    create_air_reinforcement, create_special_reinforcement, do_reinforcements,
    needs_confiscation, TeamMission, TeamTemplate,
};
use tactical_script::world::{
    AircraftType, InfantryType, ObjectKind, ObjectType, StructureType, UnitType, World,
};

const GREECE: HouseId = HouseId(1);
const ORIGIN: WaypointId = WaypointId(3);
const RIFLE: ObjectType = ObjectType::Infantry(InfantryType(1));
const GRENADIER: ObjectType = ObjectType::Infantry(InfantryType(2));

fn world() -> World {
    let mut map = GridMap::new(24, 24, 2);
    map.set_waypoint(ORIGIN, Cell::new(12, 12));
    let mut world = World::new(map, ScriptConfig::default());
    let mut house = HouseState::new(GREECE, "Greece");
    house.is_human = true;
    world.houses.add(house);
    world
}

/// Two single-soldier members sent to the origin waypoint
fn squad(world: &mut World) -> TeamTemplateId {
    let id = world.teams.next_template_id();
    world.teams.add_template(
        TeamTemplate::new(id, "squad", GREECE)
            .with_member(RIFLE, 1)
            .with_member(GRENADIER, 1)
            .with_origin(ORIGIN),
    );
    id
}

fn infantry(world: &World) -> Vec<&tactical_script::world::GameObject> {
    world
        .objects
        .iter()
        .filter(|o| o.kind() == ObjectKind::Infantry)
        .collect()
}

#[test]
fn test_squad_walks_in_from_north_edge() {
    let mut world = world();
    let team = squad(&mut world);
    assert_eq!(world.houses.get(GREECE).unwrap().edge, None);

    assert!(do_reinforcements(&mut world, team));

    let soldiers = infantry(&world);
    assert_eq!(soldiers.len(), 2);
    for soldier in soldiers {
        let cell = soldier.cell.expect("placed on the map");
        assert!(!world.map.is_radar_visible(cell));
        assert!(cell.y < 2);
        assert_eq!(soldier.facing, Edge::North.inward_facing());
        assert_eq!(soldier.mission.current, MissionKind::Guard);
    }

    let house = world.houses.get(GREECE).unwrap();
    assert_eq!(house.notifications.len(), 1);
    assert_eq!(house.notifications[0].kind, NotificationKind::ReinforcementsArrived);
    assert_eq!(world.teams.instances().count(), 1);
}

#[test]
fn test_squad_pops_out_of_adjacent_building() {
    let mut world = world();
    let team = squad(&mut world);
    let barracks = world
        .objects
        .create_instance(ObjectType::Structure(StructureType(3)), GREECE)
        .unwrap();
    let barracks_cell = Cell::new(13, 12);
    assert!(world.objects.unlimbo(barracks, barracks_cell, Facing::North, &world.map));

    assert!(do_reinforcements(&mut world, team));

    let soldiers = infantry(&world);
    assert_eq!(soldiers.len(), 2);
    for soldier in &soldiers {
        let cell = soldier.cell.unwrap();
        assert_eq!(cell.distance(&barracks_cell), 1);
        assert!(world.map.is_radar_visible(cell));
        assert_eq!(soldier.mission.current, MissionKind::Guard);
    }
    assert_ne!(soldiers[0].cell, soldiers[1].cell);
    // Popping out of a building is not an edge arrival
    assert!(world.houses.get(GREECE).unwrap().notifications.is_empty());
}

#[test]
fn test_dead_building_is_ignored() {
    let mut world = world();
    let team = squad(&mut world);
    let barracks = world
        .objects
        .create_instance(ObjectType::Structure(StructureType(3)), GREECE)
        .unwrap();
    world.objects.unlimbo(barracks, Cell::new(12, 12), Facing::North, &world.map);
    world.objects.get_mut(barracks).unwrap().strength = 0;

    assert!(do_reinforcements(&mut world, team));
    assert!(infantry(&world).iter().all(|o| o.cell.unwrap().y < 2));
}

#[test]
fn test_house_edge_is_used() {
    let mut world = world();
    world.houses.get_mut(GREECE).unwrap().edge = Some(Edge::West);
    let tanks = TeamTemplate::new(TeamTemplateId(9), "tanks", GREECE)
        .with_member(ObjectType::Unit(UnitType(2)), 2)
        .with_origin(ORIGIN);
    world.teams.add_template(tanks);

    assert!(do_reinforcements(&mut world, TeamTemplateId(9)));
    for tank in world.objects.iter() {
        assert!(tank.cell.unwrap().x < 2);
        assert_eq!(tank.facing, Facing::East);
    }
}

#[test]
fn test_full_pool_shrinks_team() {
    let mut config = ScriptConfig::default();
    config.pool_capacity = 1;
    let mut map = GridMap::new(24, 24, 2);
    map.set_waypoint(ORIGIN, Cell::new(12, 12));
    let mut world = World::new(map, config);
    let team = squad(&mut world);

    assert!(do_reinforcements(&mut world, team));
    assert_eq!(world.objects.len(), 1);
}

#[test]
fn test_dead_vip_cancels_air_reinforcement() {
    let mut world = world();
    let vip = InfantryType(9);
    world.scenario.dead_vips.insert(vip);

    let n = create_air_reinforcement(
        &mut world,
        GREECE,
        AircraftType::Badger,
        3,
        MissionKind::Hunt,
        None,
        None,
        Some(vip),
    );
    assert_eq!(n, 0);
    assert!(world.objects.is_empty());

    let n = create_air_reinforcement(
        &mut world,
        GREECE,
        AircraftType::Badger,
        3,
        MissionKind::Hunt,
        None,
        None,
        Some(InfantryType(4)),
    );
    assert_eq!(n, 3);
}

#[test]
fn test_yaks_are_kept_while_airstrips_last() {
    let mut world = world();
    let airstrip = world
        .objects
        .create_instance(ObjectType::Structure(world.config.airstrip), GREECE)
        .unwrap();
    world.objects.unlimbo(airstrip, Cell::new(5, 5), Facing::North, &world.map);

    let yaks = TeamTemplate::new(TeamTemplateId(4), "yaks", GREECE)
        .with_member(ObjectType::Aircraft(AircraftType::Yak), 2);
    world.teams.add_template(yaks);
    assert!(do_reinforcements(&mut world, TeamTemplateId(4)));

    let mut loaners: Vec<bool> = world
        .objects
        .iter()
        .filter(|o| o.kind() == ObjectKind::Aircraft)
        .map(|o| o.is_loaner)
        .collect();
    loaners.sort();
    assert_eq!(loaners, vec![false, true]);
}

#[test]
fn test_only_yaks_and_migs_are_confiscated() {
    let mut world = world();
    world
        .objects
        .create_instance(ObjectType::Structure(world.config.airstrip), GREECE)
        .unwrap();

    for aircraft in AircraftType::ALL {
        let id = world
            .objects
            .create_instance(ObjectType::Aircraft(aircraft), GREECE)
            .unwrap();
        let plane = world.objects.get(id).unwrap();
        assert_eq!(
            needs_confiscation(&world.objects, &world.config, plane),
            aircraft.needs_airstrip(),
            "{:?}",
            aircraft
        );
        world.destroy_object(id);
    }

    let rifle = world.objects.create_instance(RIFLE, GREECE).unwrap();
    assert!(!needs_confiscation(
        &world.objects,
        &world.config,
        world.objects.get(rifle).unwrap()
    ));
}

#[test]
fn test_special_reinforcement_registers_template() {
    let mut world = world();
    let before = world.teams.next_template_id();

    assert!(create_special_reinforcement(
        &mut world,
        GREECE,
        ObjectType::Unit(UnitType(3)),
        None,
        Some(TeamMission::Guard),
        0,
    ));
    let template = world.teams.template(before).expect("kept after delivery");
    assert!(template.is_transient);
    assert_eq!(world.objects.len(), 1);

    // Gone with its only unit, and the id is free again
    let tank = world.objects.ids()[0];
    world.destroy_object(tank);
    assert!(world.teams.template(before).is_none());
    assert_eq!(world.teams.instances().count(), 0);
    assert_eq!(world.teams.next_template_id(), before);
}

#[test]
fn test_failed_special_reinforcement_leaves_no_template() {
    // No border band means no entry cell anywhere
    let mut world = World::new(GridMap::new(10, 10, 0), ScriptConfig::default());
    world.houses.add(HouseState::new(GREECE, "Greece"));
    let before = world.teams.next_template_id();

    assert!(!create_special_reinforcement(
        &mut world,
        GREECE,
        ObjectType::Unit(UnitType(3)),
        None,
        None,
        0,
    ));
    assert!(world.teams.template(before).is_none());
    assert!(world.objects.is_empty());
    assert_eq!(world.teams.instances().count(), 0);

    // The reused id starts with a clean slate
    let squad = TeamTemplate::new(before, "squad", GREECE).with_member(RIFLE, 1);
    world.teams.add_template(squad);
    assert!(world.teams.instances().all(|t| t.template != before));
}
