//! End-to-end tests running the bundled demo scenario

use tactical_script::core::error::ScriptError;
use tactical_script::core::types::HouseId;
use tactical_script::house::NotificationKind;
use tactical_script::map::Cell;
use tactical_script::mission::MissionKind;
use tactical_script::scenario::{ScenarioRunner, TickReport};
use tactical_script::trigger::{EventDefinition, EventKind, EventPayload, Trigger, TriggerAction};
use tactical_script::world::loader::ScenarioLoader;
use tactical_script::world::{
    AircraftType, ObjectKind, ObjectStore, ObjectType, PoolSnapshot, UnitType,
};

const DEMO: &str = include_str!("../scenarios/demo.toml");
const GREECE: HouseId = HouseId(1);
const USSR: HouseId = HouseId(2);

fn demo() -> ScenarioRunner {
    ScenarioLoader::new().load_from_str(DEMO).expect("demo scenario loads")
}

fn tick_of(reports: &[TickReport], trigger: &str) -> Option<u64> {
    reports
        .iter()
        .find(|r| r.fired.iter().any(|name| name == trigger))
        .map(|r| r.tick)
}

fn count_of(objects: &ObjectStore, house: HouseId, kind: ObjectKind) -> usize {
    objects
        .iter()
        .filter(|o| o.owner == house && o.kind() == kind)
        .count()
}

#[test]
fn test_demo_loads() {
    let runner = demo();
    let world = &runner.world;

    assert_eq!(world.houses.len(), 2);
    assert_eq!(world.houses.player, Some(GREECE));
    assert_eq!(world.objects.len(), 2);
    assert_eq!(world.teams.template_by_name("armor").map(|t| t.members.len()), Some(2));
    assert_eq!(runner.triggers.len(), 4);
    assert!(runner.triggers.iter().all(|t| t.trigger.event.kind != EventKind::None));
    assert!(world.scenario.mission_timer.active);
}

#[test]
fn test_house_condition_fires_first_tick() {
    let mut runner = demo();
    assert!(!runner.world.scenario.globals.get(1));

    let report = runner.tick();
    assert_eq!(report.fired, vec!["rich".to_string()]);
    assert!(runner.world.scenario.globals.get(1));

    // Non-repeating triggers retire after firing
    assert!(runner.run(5).iter().all(|r| r.fired.is_empty()));
}

#[test]
fn test_waves_arrive_on_schedule() {
    let mut runner = demo();
    let reports = runner.run(900);

    assert_eq!(tick_of(&reports, "first wave"), Some(450));
    assert_eq!(tick_of(&reports, "second wave"), Some(900));
    assert_eq!(tick_of(&reports, "air strike"), None);

    let world = &runner.world;
    // Riflemen leave the barracks next to waypoint 7
    let barracks = Cell::new(12, 21);
    let on_map: Vec<_> = world
        .objects
        .iter()
        .filter(|o| o.kind() == ObjectKind::Infantry && o.transporter.is_none())
        .collect();
    assert_eq!(on_map.len(), 3);
    for rifleman in on_map {
        assert_eq!(rifleman.cell.map(|c| c.distance(&barracks)), Some(1));
        assert_eq!(rifleman.mission.current, MissionKind::Guard);
    }

    // The armor column drives in from the north with its infantry aboard
    let apc = world
        .objects
        .iter()
        .find(|o| o.object_type == ObjectType::Unit(UnitType(4)))
        .expect("transport delivered");
    assert_eq!(apc.passengers.len(), 4);
    assert!(apc.cell.is_some_and(|c| c.y < 3));
    assert_eq!(count_of(&world.objects, GREECE, ObjectKind::Infantry), 7);

    let notes = &world.houses.get(GREECE).unwrap().notifications;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::ReinforcementsArrived);
}

#[test]
fn test_mission_timer_calls_air_strike() {
    let mut runner = demo();
    let reports = runner.run(1801);

    assert_eq!(tick_of(&reports, "air strike"), Some(1801));
    let world = &runner.world;
    assert!(world.scenario.mission_timer.is_expired());

    let mut yaks: Vec<_> = world
        .objects
        .iter()
        .filter(|o| o.object_type == ObjectType::Aircraft(AircraftType::Yak))
        .collect();
    assert_eq!(yaks.len(), 2);
    // USSR owns one airstrip, so it keeps exactly one plane
    yaks.sort_by_key(|y| y.is_loaner);
    assert!(!yaks[0].is_loaner);
    assert!(yaks[1].is_loaner);
    assert!(yaks.iter().all(|y| y.owner == USSR && y.cell.is_some_and(|c| c.x >= 45)));

    let notes = &world.houses.get(GREECE).unwrap().notifications;
    assert!(notes.iter().any(|n| n.kind == NotificationKind::MissionTimerExpired));
}

#[test]
fn test_same_seed_same_result() {
    let mut first = ScenarioLoader::new().with_seed(7).load_from_str(DEMO).unwrap();
    let mut second = ScenarioLoader::new().with_seed(7).load_from_str(DEMO).unwrap();
    first.run(1801);
    second.run(1801);

    let facings = |runner: &ScenarioRunner| {
        let mut planes: Vec<_> = runner
            .world
            .objects
            .iter()
            .filter(|o| o.kind() == ObjectKind::Aircraft)
            .map(|o| (o.is_loaner, o.facing))
            .collect();
        planes.sort_by_key(|(loaner, _)| *loaner);
        planes
    };
    assert_eq!(facings(&first), facings(&second));
}

#[test]
fn test_forced_trigger_fires_once() {
    let mut runner = demo();
    assert!(runner.force("Air Strike"));
    assert_eq!(count_of(&runner.world.objects, USSR, ObjectKind::Aircraft), 2);

    assert!(!runner.force("air strike"));
    assert!(!runner.force("no such trigger"));
}

#[test]
fn test_raised_destruction_fires_object_trigger() {
    let mut runner = demo();
    runner.add_trigger(Trigger {
        name: "barracks lost".into(),
        house: Some(GREECE),
        event: EventDefinition::new(EventKind::Destroyed, EventPayload::None),
        action: TriggerAction::StartTimer(3),
        repeat: false,
    });
    let barracks = runner
        .world
        .objects
        .iter()
        .find(|o| o.owner == GREECE && o.kind() == ObjectKind::Building)
        .map(|o| o.id)
        .unwrap();

    // Object triggers are not polled
    assert!(runner.run(3).iter().all(|r| !r.fired.iter().any(|n| n == "barracks lost")));

    let fired = runner.raise(EventKind::Destroyed, Some(GREECE), Some(barracks));
    assert_eq!(fired, vec!["barracks lost".to_string()]);
    assert_eq!(runner.world.scenario.mission_timer.remaining, 3 * 90);
}

#[test]
fn test_snapshot_restores_pool() {
    let mut runner = demo();
    runner.run(900);
    let json = PoolSnapshot::capture(&runner.world.objects).to_json().unwrap();

    let mut fresh = demo();
    PoolSnapshot::from_json(&json)
        .unwrap()
        .restore(&mut fresh.world.objects)
        .unwrap();

    assert_eq!(fresh.world.objects.len(), runner.world.objects.len());
    for obj in runner.world.objects.iter() {
        assert_eq!(fresh.world.objects.get(obj.id), Some(obj));
    }
}

#[test]
fn test_bad_snapshot_leaves_pool_alone() {
    let mut runner = demo();
    runner.run(450);
    let mut snapshot = PoolSnapshot::capture(&runner.world.objects);
    snapshot.record_count += 1;

    let mut fresh = demo();
    let err = snapshot.restore(&mut fresh.world.objects).unwrap_err();
    assert!(matches!(err, ScriptError::SnapshotMismatch { .. }));
    assert_eq!(fresh.world.objects.len(), 2);
}

#[test]
fn test_unknown_team_is_rejected() {
    let broken = DEMO.replace("reinforce = \"strike\"", "reinforce = \"bombers\"");
    assert!(ScenarioLoader::new().load_from_str(&broken).is_err());
}
