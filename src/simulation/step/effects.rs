use crate::systems::body::BodyId;
use crate::systems::events::TickEffects;

use super::commands;
use super::WorldCore;

/// Apply what a body's tick asked for, before the next body is swept.
///
/// Order: the ticked body is dropped if its hooks destroyed it, then impulses
/// land, then explosions go off, then resting debris merges into terrain.
pub(super) fn apply(world: &mut WorldCore, ticked: BodyId, fx: TickEffects) {
    let TickEffects { events, impulses, explosions, merges } = fx;
    world.events.extend(events);

    if world.body(ticked).is_some_and(|b| !b.active) {
        let _ = commands::remove_body(world, ticked);
    }

    for (id, impulse) in impulses {
        match world.body_mut(id) {
            Some(body) => body.apply_impulse(impulse),
            None => log::debug!("impulse for missing body {} dropped", id.0),
        }
    }

    for request in explosions {
        commands::explode(world, request.center, request.spec);
    }

    for id in merges {
        commands::merge_debris(world, id);
    }
}
