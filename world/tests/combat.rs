use std::{collections::BTreeSet, time::Duration};

use lane_defence_core::{
    AttackerId, AttackerKind, AttackerLoss, CellCoord, Command, DefenderKind, DefenderLoss, Event,
    NaturalResource, ProjectileKind, Rules,
};
use lane_defence_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(100);

fn arena() -> World {
    World::new(Rules {
        starting_balance: 10_000,
        natural_resource: NaturalResource {
            interval: Duration::ZERO,
            value: 25,
        },
        waves: Vec::new(),
        first_wave_delay: Duration::from_secs(3_600),
        ..Rules::default()
    })
}

fn place(world: &mut World, kind: DefenderKind, row: u32, column: u32) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceDefender {
            kind,
            cell: CellCoord::new(row, column),
        },
        &mut events,
    );
    assert!(
        matches!(events.as_slice(), [Event::DefenderPlaced { .. }]),
        "placement failed: {events:?}"
    );
}

fn spawn(world: &mut World, kind: AttackerKind, lane: u32) -> AttackerId {
    let mut events = Vec::new();
    world::apply(world, Command::SpawnAttacker { kind, lane }, &mut events);
    match events.as_slice() {
        [Event::AttackerSpawned { attacker, .. }] => *attacker,
        other => panic!("unexpected spawn events: {other:?}"),
    }
}

fn step(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);
    events
}

fn step_until(world: &mut World, limit: usize, done: impl Fn(&[Event]) -> bool) -> Vec<Event> {
    for _ in 0..limit {
        let events = step(world);
        if done(&events) {
            return events;
        }
    }
    panic!("condition not reached within {limit} frames");
}

fn hits(events: &[Event]) -> Vec<(AttackerId, ProjectileKind, f32)> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::AttackerHit {
                attacker,
                projectile,
                remaining_health,
            } => Some((*attacker, *projectile, *remaining_health)),
            _ => None,
        })
        .collect()
}

fn attacker_x(world: &World, id: AttackerId) -> f32 {
    query::attacker_view(world)
        .iter()
        .find(|attacker| attacker.id == id)
        .map(|attacker| attacker.position.x)
        .expect("attacker alive")
}

#[test]
fn attacker_survives_three_hits_and_falls_on_the_fourth() {
    let mut world = arena();
    place(&mut world, DefenderKind::Shooter, 2, 0);
    let walker = spawn(&mut world, AttackerKind::Walker, 2);

    let mut remaining = Vec::new();
    for _ in 0..300 {
        let events = step(&mut world);
        remaining.extend(hits(&events).into_iter().map(|(_, _, health)| health));
        let defeated = events.contains(&Event::AttackerDefeated {
            attacker: walker,
            cause: AttackerLoss::Combat,
        });
        let alive = query::attacker_view(&world).iter().any(|a| a.id == walker);

        if remaining.len() < 4 {
            assert!(!defeated);
            assert!(alive, "removed after {} hits", remaining.len());
        } else {
            assert!(defeated);
            assert!(!alive);
            break;
        }
    }

    assert_eq!(remaining, vec![75.0, 50.0, 25.0, 0.0]);
}

#[test]
fn eating_clears_the_cell_in_the_tick_the_defender_falls() {
    let mut world = arena();
    let cell = CellCoord::new(0, 8);
    place(&mut world, DefenderKind::Producer, 0, 8);
    let runner = spawn(&mut world, AttackerKind::Runner, 0);

    for _ in 0..100 {
        let _ = step(&mut world);
        if query::attacker_view(&world).iter().any(|a| a.eating) {
            break;
        }
    }
    assert!(query::attacker_view(&world).into_vec()[0].eating);
    let stalled_at = attacker_x(&world, runner);
    let _ = step(&mut world);
    assert_eq!(attacker_x(&world, runner), stalled_at, "eating attacker moved");

    let events = step_until(&mut world, 100, |events| {
        events
            .iter()
            .any(|event| matches!(event, Event::DefenderDestroyed { cause: DefenderLoss::Eaten, .. }))
    });
    assert!(!events.is_empty());
    assert_eq!(query::occupant(&world, cell), None);
    assert!(query::defender_view(&world).is_empty());

    let snapshot = query::attacker_view(&world).into_vec()[0];
    assert!(!snapshot.eating);
    assert!(snapshot.position.x < stalled_at, "speed not restored after the kill");
}

#[test]
fn bomb_damages_every_lane_within_one_cell() {
    let mut world = arena();
    let attackers: Vec<AttackerId> = (0..5)
        .map(|lane| spawn(&mut world, AttackerKind::Walker, lane))
        .collect();
    place(&mut world, DefenderKind::Bomb, 2, 8);

    let events = step(&mut world);

    let defeated: BTreeSet<AttackerId> = events
        .iter()
        .filter_map(|event| match event {
            Event::AttackerDefeated {
                attacker,
                cause: AttackerLoss::Detonation,
            } => Some(*attacker),
            _ => None,
        })
        .collect();
    let expected: BTreeSet<AttackerId> = [attackers[1], attackers[2], attackers[3]]
        .into_iter()
        .collect();
    assert_eq!(defeated, expected);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::DefenderDestroyed {
            kind: DefenderKind::Bomb,
            cause: DefenderLoss::Detonated,
            ..
        }
    )));
    assert_eq!(query::occupant(&world, CellCoord::new(2, 8)), None);

    let survivors: Vec<u32> = query::attacker_view(&world).iter().map(|a| a.lane).collect();
    assert_eq!(survivors, vec![0, 4]);
}

#[test]
fn mine_arms_after_its_delay_and_takes_the_first_attacker_with_it() {
    let mut world = arena();
    place(&mut world, DefenderKind::Mine, 0, 8);

    for _ in 0..149 {
        let _ = step(&mut world);
    }
    assert!(!query::defender_view(&world).into_vec()[0].armed);
    let _ = step(&mut world);
    assert!(query::defender_view(&world).into_vec()[0].armed);

    let first = spawn(&mut world, AttackerKind::Runner, 0);
    let events = step_until(&mut world, 100, |events| {
        events
            .iter()
            .any(|event| matches!(event, Event::AttackerDefeated { .. }))
    });
    assert!(events.contains(&Event::AttackerDefeated {
        attacker: first,
        cause: AttackerLoss::Detonation,
    }));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::DefenderDestroyed {
            kind: DefenderKind::Mine,
            cause: DefenderLoss::Detonated,
            ..
        }
    )));
    assert_eq!(query::occupant(&world, CellCoord::new(0, 8)), None);
}

#[test]
fn slowing_hit_halves_speed_permanently() {
    let mut world = arena();
    place(&mut world, DefenderKind::FrostShooter, 0, 0);
    let walker = spawn(&mut world, AttackerKind::Walker, 0);

    let _ = step_until(&mut world, 100, |events| !hits(events).is_empty());
    let snapshot = query::attacker_view(&world).into_vec()[0];
    assert!(snapshot.slowed);
    assert!(!snapshot.immobilized);

    let before = attacker_x(&world, walker);
    let _ = step(&mut world);
    let travelled = before - attacker_x(&world, walker);
    assert!((travelled - 0.6).abs() < 1e-3, "travelled {travelled}");

    let _ = step_until(&mut world, 100, |events| !hits(events).is_empty());
    let before = attacker_x(&world, walker);
    let _ = step(&mut world);
    let travelled = before - attacker_x(&world, walker);
    assert!((travelled - 0.6).abs() < 1e-3, "second slow compounded: {travelled}");
}

#[test]
fn piercing_projectile_strikes_every_overlapping_attacker() {
    let mut world = arena();
    place(&mut world, DefenderKind::Spiker, 1, 0);
    let front = spawn(&mut world, AttackerKind::Walker, 1);
    let back = spawn(&mut world, AttackerKind::Walker, 1);

    let events = step_until(&mut world, 100, |events| !hits(events).is_empty());
    let struck: Vec<AttackerId> = hits(&events).into_iter().map(|(id, _, _)| id).collect();
    assert_eq!(struck, vec![front, back]);
    assert!(!query::projectile_view(&world).is_empty());
}

#[test]
fn plain_projectile_stops_at_the_first_attacker_in_collection_order() {
    let mut world = arena();
    place(&mut world, DefenderKind::Shooter, 1, 0);
    let front = spawn(&mut world, AttackerKind::Walker, 1);
    let _back = spawn(&mut world, AttackerKind::Walker, 1);

    let events = step_until(&mut world, 100, |events| !hits(events).is_empty());
    let struck: Vec<AttackerId> = hits(&events).into_iter().map(|(id, _, _)| id).collect();
    assert_eq!(struck, vec![front]);
}

#[test]
fn splash_spills_onto_neighbouring_lanes() {
    let mut world = arena();
    place(&mut world, DefenderKind::Lobber, 2, 0);
    let above = spawn(&mut world, AttackerKind::Walker, 1);
    let target = spawn(&mut world, AttackerKind::Walker, 2);
    let below = spawn(&mut world, AttackerKind::Walker, 3);

    let events = step_until(&mut world, 100, |events| !hits(events).is_empty());
    assert_eq!(
        hits(&events),
        vec![
            (target, ProjectileKind::Splash, 60.0),
            (above, ProjectileKind::Splash, 85.0),
            (below, ProjectileKind::Splash, 85.0),
        ]
    );
}

#[test]
fn splash_strikes_each_attacker_once_when_they_share_a_lane() {
    let mut world = arena();
    place(&mut world, DefenderKind::Lobber, 2, 0);
    let front = spawn(&mut world, AttackerKind::Walker, 2);
    let back = spawn(&mut world, AttackerKind::Walker, 2);

    let events = step_until(&mut world, 100, |events| !hits(events).is_empty());
    assert_eq!(
        hits(&events),
        vec![
            (front, ProjectileKind::Splash, 60.0),
            (back, ProjectileKind::Splash, 85.0),
        ]
    );

    let next = step(&mut world);
    assert!(hits(&next).is_empty(), "same projectile struck again: {next:?}");
}

#[test]
fn immobilizing_projectile_passes_through_and_nearly_stops_its_targets() {
    let mut world = arena();
    place(&mut world, DefenderKind::Snare, 1, 0);
    let front = spawn(&mut world, AttackerKind::Walker, 1);
    let back = spawn(&mut world, AttackerKind::Walker, 1);

    let events = step_until(&mut world, 100, |events| !hits(events).is_empty());
    assert_eq!(
        hits(&events),
        vec![
            (front, ProjectileKind::Immobilizing, 90.0),
            (back, ProjectileKind::Immobilizing, 90.0),
        ]
    );
    assert!(query::attacker_view(&world).iter().all(|a| a.immobilized && !a.slowed));
    assert!(!query::projectile_view(&world).is_empty());

    let before = attacker_x(&world, front);
    let _ = step(&mut world);
    let travelled = before - attacker_x(&world, front);
    assert!((travelled - 0.06).abs() < 1e-3, "travelled {travelled}");
}

#[test]
fn slowing_and_immobilizing_both_scale_the_base_speed() {
    let mut world = arena();
    place(&mut world, DefenderKind::FrostShooter, 3, 0);
    place(&mut world, DefenderKind::Snare, 3, 1);
    let walker = spawn(&mut world, AttackerKind::Walker, 3);

    for _ in 0..200 {
        let _ = step(&mut world);
        let snapshot = query::attacker_view(&world).into_vec()[0];
        if snapshot.slowed && snapshot.immobilized {
            break;
        }
    }
    let snapshot = query::attacker_view(&world).into_vec()[0];
    assert!(snapshot.slowed && snapshot.immobilized);

    let before = attacker_x(&world, walker);
    let _ = step(&mut world);
    let travelled = before - attacker_x(&world, walker);
    assert!((travelled - 0.03).abs() < 1e-3, "travelled {travelled}");
}

#[test]
fn scatter_fires_into_adjacent_lanes_when_any_holds_a_target() {
    let mut world = arena();
    place(&mut world, DefenderKind::Scatter, 2, 0);
    let _ = spawn(&mut world, AttackerKind::Walker, 1);

    let events = step_until(&mut world, 100, |events| {
        events
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. }))
    });
    let lanes: Vec<u32> = events
        .iter()
        .filter_map(|event| match event {
            Event::ProjectileFired { kind, lane, .. } => {
                assert_eq!(*kind, ProjectileKind::Scattershot);
                Some(*lane)
            }
            _ => None,
        })
        .collect();
    assert_eq!(lanes, vec![1, 2, 3]);
}

#[test]
fn ranged_defender_holds_fire_without_a_target_ahead() {
    let mut world = arena();
    place(&mut world, DefenderKind::Shooter, 4, 3);
    let _ = spawn(&mut world, AttackerKind::Walker, 0);

    for _ in 0..100 {
        let events = step(&mut world);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. })));
    }
}
