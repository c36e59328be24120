use super::*;
use crate::domain::presets;
use crate::systems::events::DestroyReason;
use approx::assert_relative_eq;

fn world_with_floor(width: u32, height: u32, rows: i32) -> WorldCore {
    let mut world = WorldCore::new(width, height);
    for y in 0..rows {
        for x in 0..width as i32 {
            world.set_solid(x, y, true).unwrap();
        }
    }
    world
}

fn count(events: &[PhysicsEvent], pred: impl Fn(&PhysicsEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

#[test]
fn dropped_box_lands_and_claims_its_resting_cell() {
    let mut world = world_with_floor(10, 10, 1);
    let id = world
        .spawn_body(Body::new_rect(5.0, 5.0, 1, 1).with_rebound_threshold(1000.0))
        .unwrap();

    for _ in 0..30 {
        world.step(0.1);
    }

    let body = world.body(id).unwrap();
    assert_relative_eq!(body.pos.y, 1.01, epsilon = 1e-5);
    assert!(body.velocity.is_zero());
    assert_eq!(world.grid().occupant(5, 1), Some(id));
    assert_eq!(world.grid().occupant(5, 5), None);

    let events = world.drain_events();
    assert_eq!(count(&events, |e| matches!(e, PhysicsEvent::Stop { .. })), 1);
    assert_eq!(count(&events, |e| matches!(e, PhysicsEvent::Tick { .. })), 30);
    assert!(world.drain_events().is_empty());
}

#[test]
fn projectile_blows_a_crater_and_disappears() {
    let mut world = world_with_floor(20, 20, 5);
    let spec = ExplosionSpec { radius: 3, max_force: 100.0, debris_chance: 0 };
    world
        .spawn_body(presets::projectile(10.0, 10.0, 0.0, -100.0, spec))
        .unwrap();

    world.step(0.1);

    assert_eq!(world.body_count(), 0);
    assert!(!world.is_solid(10, 4));
    assert!(!world.is_solid(10, 2));
    assert!(world.is_solid(10, 1));
    assert!(world.is_solid(15, 4));
    let events = world.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, PhysicsEvent::Destroyed { reason: DestroyReason::Impact, .. })),
        1
    );
    assert_eq!(world.stats().explosions(), 1);
}

#[test]
fn explosion_pushes_worms_away_and_hurts_them() {
    let mut world = WorldCore::new(30, 30);
    let worm = world.spawn_body(presets::worm(12.0, 10.0, 2, 2)).unwrap();

    let spec = ExplosionSpec { radius: 5, max_force: 100.0, debris_chance: 0 };
    let hit = world.explode(10, 10, spec);
    assert_eq!(hit, vec![worm]);

    // worm center (13, 11) is sqrt(10) away from the blast
    let expected = 100.0 * (1.0 - 10f32.sqrt() / 5.0);
    let v = world.body(worm).unwrap().velocity;
    assert_relative_eq!(v.length(), expected, epsilon = 1e-3);
    assert!(v.x > 0.0 && v.y > 0.0);

    let events = world.drain_events();
    match events.as_slice() {
        [PhysicsEvent::ExplosionHit { body, force, damage }] => {
            assert_eq!(*body, worm);
            assert_relative_eq!(*force, expected, epsilon = 1e-3);
            assert_eq!(*damage, (expected / 4.0) as i32);
        }
        other => panic!("unexpected events {:?}", other),
    }
}

#[test]
fn certain_debris_chance_turns_every_cleared_cell_into_debris() {
    let mut world = world_with_floor(10, 10, 3);
    let spec = ExplosionSpec { radius: 1, max_force: 50.0, debris_chance: 100 };
    let hit = world.explode(5, 1, spec);

    // half-open disc of radius 1: (4, 1), (5, 0), (5, 1)
    assert_eq!(hit.len(), 3);
    assert_eq!(world.body_count(), 3);
    for id in hit {
        let body = world.body(id).unwrap();
        assert_eq!(body.kind, crate::systems::body::BodyKind::Debris { merge_on_stop: true });
    }
}

#[test]
fn resting_debris_merges_into_the_terrain() {
    let mut world = world_with_floor(8, 8, 1);
    let id = world
        .spawn_body(presets::debris(3.0, 1.0, true).with_velocity(0.0, -5.0))
        .unwrap();

    world.step(0.1);

    assert!(world.body(id).is_none());
    assert!(world.grid().is_terrain(3, 1));
    let events = world.drain_events();
    assert!(events.contains(&PhysicsEvent::Destroyed { body: id, reason: DestroyReason::Merged }));
}

#[test]
fn falling_onto_another_body_passes_half_the_speed_down() {
    let mut world = world_with_floor(10, 20, 1);
    let below = world.spawn_body(Body::new_rect(5.0, 1.0, 1, 1)).unwrap();
    let above = world
        .spawn_body(Body::new_rect(5.0, 8.0, 1, 1).with_velocity(0.0, -50.0))
        .unwrap();

    world.step(0.2);

    let pushed = world.body(below).unwrap().velocity;
    assert_relative_eq!(pushed.y, (50.0 + 9.81) / 2.0, epsilon = 1e-3);
    let events = world.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, PhysicsEvent::Bounce { body, .. } if *body == above)),
        1
    );
}

#[test]
fn body_falling_off_the_map_is_removed() {
    let mut world = WorldCore::new(10, 10);
    let id = world.spawn_body(Body::new_rect(5.0, 0.5, 1, 1)).unwrap();

    world.step(1.0);

    assert!(world.body(id).is_none());
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.grid().occupant(5, 0), None);
    assert!(world
        .drain_events()
        .contains(&PhysicsEvent::Destroyed { body: id, reason: DestroyReason::FellOut }));
}

#[test]
fn stats_cover_the_last_step_only() {
    let mut world = world_with_floor(10, 20, 1);
    world.spawn_body(Body::new_rect(2.0, 10.0, 1, 1)).unwrap();
    world.spawn_body(Body::new_rect(6.0, 10.0, 1, 1)).unwrap();

    world.step(0.1);
    let stats = world.stats();
    assert_eq!(stats.frame(), 1);
    assert_eq!(stats.bodies_ticked(), 2);
    assert_eq!(stats.body_count(), 2);
    assert!(stats.sweeps() >= 2);
    assert!(stats.path_steps() > 0);
    assert_eq!(stats.aborts(), 0);

    world.enable_perf_metrics(false);
    world.step(0.1);
    assert_eq!(world.stats(), PerfStats::default());
}

#[test]
fn rejected_config_leaves_the_old_one_in_place() {
    let mut world = WorldCore::new(4, 4);
    assert!(matches!(
        world.load_config_json(r#"{"gravity": -1}"#),
        Err(WorldError::Config(_))
    ));
    assert_relative_eq!(world.config().gravity, 9.81);

    world.load_config_json(r#"{"gravity": 20}"#).unwrap();
    assert_relative_eq!(world.config().gravity, 20.0);
    assert_relative_eq!(world.config().time_scale, 1.0);
}

#[test]
fn zero_sized_world_is_refused() {
    assert!(matches!(
        WorldCore::try_new(0, 5),
        Err(WorldError::InvalidSize { width: 0, height: 5 })
    ));
    assert!(WorldCore::try_new(3, 3).is_ok());
}

#[test]
fn apply_force_targets_live_bodies_only() {
    let mut world = WorldCore::new(8, 8);
    let id = world.spawn_body(Body::new_rect(2.0, 2.0, 1, 1)).unwrap();
    world.apply_force(id, Vec2::new(3.0, 4.0)).unwrap();
    assert_eq!(world.body(id).unwrap().velocity, Vec2::new(3.0, 4.0));
    assert!(matches!(
        world.apply_force(BodyId(99), Vec2::new(1.0, 0.0)),
        Err(WorldError::UnknownBody(BodyId(99)))
    ));
}
