//! Ready-made bodies for the kinds the game spawns.

use crate::systems::body::{Body, BodyFlags, BodyKind, ExplosionSpec, IgnoreRule};

pub const WORM_KNOCKOUT_SPEED: f32 = 100.0;
pub const WORM_REBOUND_THRESHOLD: f32 = 100.0;
pub const WORM_FRICTION: f32 = 1.0;

/// Terrain-clearing blast used when a projectile preset is not given one
pub const DEFAULT_EXPLOSION: ExplosionSpec = ExplosionSpec {
    radius: 8,
    max_force: 300.0,
    debris_chance: 16,
};

pub fn worm(x: f32, y: f32, width: u32, height: u32) -> Body {
    let mut body = Body::new_rect(x, y, width, height)
        .with_kind(BodyKind::Worm {
            knockout_speed: WORM_KNOCKOUT_SPEED,
            default_rebound_threshold: WORM_REBOUND_THRESHOLD,
            default_friction: WORM_FRICTION,
        })
        .with_elasticity(0.2)
        .with_rebound_threshold(WORM_REBOUND_THRESHOLD);
    body.friction = WORM_FRICTION;
    body
}

/// Explodes and disappears on its first contact.
pub fn projectile(x: f32, y: f32, vx: f32, vy: f32, explosion: ExplosionSpec) -> Body {
    Body::new_rect(x, y, 1, 1)
        .with_velocity(vx, vy)
        .with_kind(BodyKind::Projectile {
            explode_on_impact: true,
            destroy_on_impact: true,
            explosion,
        })
}

/// 1x1 chunk knocked loose by a blast. Passes through worms and is
/// passed through by anything that ignores objects.
pub fn debris(x: f32, y: f32, merge_on_stop: bool) -> Body {
    let mut body = Body::new_rect(x, y, 1, 1)
        .with_kind(BodyKind::Debris { merge_on_stop })
        .with_elasticity(0.6)
        .with_flags(BodyFlags::IGNORED_BY_OBJECTS);
    body.mass = 0.9;
    body.ignore = IgnoreRule::Worms;
    body
}

/// Falls straight down and never bounces; spreads via the fluid pass instead.
pub fn fluid(x: f32, y: f32) -> Body {
    let mut body = Body::new_rect(x, y, 1, 1)
        .with_kind(BodyKind::Fluid)
        .with_elasticity(0.0)
        .with_flags(BodyFlags::DISABLE_HORIZONTAL_MOVEMENT | BodyFlags::DISABLE_UPWARD_MOVEMENT);
    body.mass = 0.9;
    body.ignore = IgnoreRule::Worms;
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debris_ignores_worms_and_is_ignored_by_objects() {
        let d = debris(1.0, 2.0, true);
        assert_eq!(d.ignore, IgnoreRule::Worms);
        assert!(d.flags.contains(BodyFlags::IGNORED_BY_OBJECTS));
        assert_eq!(d.elasticity, 0.6);
        assert_eq!(d.kind, BodyKind::Debris { merge_on_stop: true });
    }

    #[test]
    fn fluid_cannot_move_sideways_or_up() {
        let f = fluid(0.0, 0.0);
        assert!(f.flags.contains(BodyFlags::DISABLE_HORIZONTAL_MOVEMENT));
        assert!(f.flags.contains(BodyFlags::DISABLE_UPWARD_MOVEMENT));
        assert_eq!(f.elasticity, 0.0);
    }

    #[test]
    fn worm_starts_with_its_default_threshold() {
        let w = worm(3.0, 4.0, 2, 4);
        assert!(w.kind.is_worm());
        assert_eq!(w.rebound_threshold, WORM_REBOUND_THRESHOLD);
        assert_eq!((w.width, w.height), (2, 4));
    }
}
