use crater_engine::{PhysicsEvent, World};

#[test]
fn world_smoke_step() {
    let mut world = World::new(128, 64).unwrap();
    for x in 0..128 {
        for y in 0..16 {
            world.set_solid(x, y, true);
        }
    }
    let worm = world.spawn_worm(20.0, 30.0, 2, 3).unwrap();
    let shell = world.spawn_projectile(64.0, 40.0, 0.0, -60.0, 6, 200.0).unwrap();

    for _ in 0..60 {
        world.step(1.0 / 30.0);
    }

    // the shell hit the ground and dug a crater
    assert!(world.body_x(shell).is_nan());
    assert!(world.core().grid().solid_count() < 128 * 16);

    // the worm came to rest on top of the terrain
    assert!(world.body_y(worm) >= 16.0 && world.body_y(worm) < 16.1);
    assert_eq!(world.body_vy(worm), 0.0);

    let stats = world.get_perf_stats();
    assert_eq!(stats.frame(), 60);

    let json = world.drain_events_json();
    let events: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(events.as_array().is_some_and(|a| !a.is_empty()));
}

#[test]
fn core_events_are_serializable_and_tagged() {
    let mut world = World::new(16, 16).unwrap();
    world.set_solid(4, 0, true);
    let id = world.spawn_debris(4.0, 4.0, false).unwrap();
    world.step(0.5);

    let events = world.core_mut().drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, PhysicsEvent::Tick { body, .. } if body.0 == id)));
    let json = serde_json::to_string(&events).unwrap();
    assert!(json.contains("\"type\":\"tick\""));
}
