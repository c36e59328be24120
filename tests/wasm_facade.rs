//! Facade checks that need a real JS host (JsValue errors, NaN reads).
//! Run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use crater_engine::World;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn zero_sized_world_is_rejected_with_a_message() {
    let err = World::new(0, 16).err().expect("zero width must be refused");
    let msg = err.as_string().unwrap_or_default();
    assert!(msg.contains("invalid size"), "{}", msg);
}

#[wasm_bindgen_test]
fn blocked_spawn_surfaces_as_a_js_error() {
    let mut world = World::new(16, 16).unwrap();
    assert!(world.set_solid(4, 4, true));
    assert!(world.spawn_debris(4.0, 4.0, false).is_err());
    assert!(world.spawn_debris(4.0, 8.0, false).is_ok());
}

#[wasm_bindgen_test]
fn worm_drops_onto_painted_terrain() {
    let mut world = World::new(32, 32).unwrap();
    for x in 0..32 {
        world.set_solid(x, 0, true);
    }
    let worm = world.spawn_worm(10.0, 10.0, 1, 2).unwrap();

    for _ in 0..60 {
        world.step(1.0 / 30.0);
    }

    assert!(world.body_y(worm) >= 1.0 && world.body_y(worm) < 1.1);
    assert!(world.body_x(worm + 100).is_nan());
    assert_eq!(world.frame(), 60);

    let json = world.drain_events_json();
    assert!(json.starts_with('[') && json.contains("\"type\":\"tick\""));
}
