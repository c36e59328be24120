//! Per-kind reactions to contacts.
//!
//! The resolution loop calls these at fixed points. A hook may change the
//! body itself and the blended velocity it is handed; everything else it
//! wants (impulses on other bodies, explosions, merges, notifications) goes
//! into `TickEffects`.

use crate::domain::config::PhysicsConfig;
use crate::systems::collision::CollisionRecord;
use crate::systems::events::{DestroyReason, ExplosionRequest, PhysicsEvent, TickEffects};

use super::body::{Body, BodyFlags, BodyId, OccupantInfo};
use super::kind::BodyKind;
use super::vec2::{IVec2, Vec2};

/// Share of its speed a worm hands over when it knocks another worm over
const KNOCKOUT_TRANSFER: f32 = 0.8;

/// What a bounce hook gets to see about the contact.
#[derive(Clone, Copy, Debug)]
pub struct BounceInfo {
    pub record: CollisionRecord,
    /// Solved contact position of the box origin
    pub position: Vec2,
    /// Body velocity before the contact
    pub old_velocity: Vec2,
    pub normal: Vec2,
    /// Descriptor of `record.occupant`, when the hit cell belonged to a body
    pub other: Option<OccupantInfo>,
}

impl Body {
    /// Contact above the rebound threshold. `blended` is the slide/rebound
    /// mix the loop will keep travelling with; hooks may rewrite it.
    pub fn on_bounce(
        &mut self,
        hit: &BounceInfo,
        blended: &mut Vec2,
        config: &PhysicsConfig,
        fx: &mut TickEffects,
    ) {
        match self.kind {
            BodyKind::Worm { default_rebound_threshold, .. } => {
                let speed = hit.old_velocity.length();
                if speed > default_rebound_threshold && hit.record.occupant.is_none() {
                    if hit.old_velocity.x == 0.0 {
                        self.on_stuck(hit.position, fx);
                        *blended = Vec2::zero();
                    } else {
                        fx.emit(PhysicsEvent::FallDamage {
                            body: self.id,
                            amount: (speed / config.fall_damage_factor) as i32,
                        });
                    }
                }
                self.base_bounce(hit, *blended, fx);
            }
            BodyKind::Projectile { .. } => {
                if !self.impact(hit.position, fx) {
                    self.base_bounce(hit, *blended, fx);
                }
            }
            BodyKind::Plain | BodyKind::Debris { .. } | BodyKind::Fluid => {
                self.base_bounce(hit, *blended, fx)
            }
        }
    }

    /// Contact at or below the rebound threshold. The loop zeroes the
    /// velocity right after this returns.
    pub fn on_stop(&mut self, position: Vec2, fx: &mut TickEffects) {
        match self.kind {
            BodyKind::Worm { default_rebound_threshold, default_friction, .. } => {
                self.rebound_threshold = default_rebound_threshold;
                self.friction = default_friction;
            }
            BodyKind::Projectile { .. } => {
                if self.impact(position, fx) {
                    return;
                }
            }
            BodyKind::Debris { merge_on_stop: true } => fx.merges.push(self.id),
            BodyKind::Plain | BodyKind::Debris { .. } | BodyKind::Fluid => {}
        }
        fx.emit(PhysicsEvent::Stop { body: self.id, position });
    }

    /// Landed straight down from a fall too long to walk away from.
    pub fn on_stuck(&mut self, position: Vec2, fx: &mut TickEffects) {
        if matches!(self.kind, BodyKind::Projectile { .. }) && self.impact(position, fx) {
            return;
        }
        if self.kind.is_worm() {
            self.velocity = Vec2::zero();
        }
        fx.emit(PhysicsEvent::Stuck { body: self.id, position });
    }

    /// Ran into another body. Returning `false` skips the bounce response and
    /// keeps the blended velocity as is.
    pub fn on_collide_with_object(
        &mut self,
        other: BodyId,
        info: Option<OccupantInfo>,
        fx: &mut TickEffects,
    ) -> bool {
        if let BodyKind::Worm { knockout_speed, .. } = self.kind {
            let other_is_worm = info.is_some_and(|o| o.is_worm);
            if other_is_worm && self.velocity.length() > knockout_speed {
                self.velocity = self.velocity * KNOCKOUT_TRANSFER;
                fx.impulses.push((other, self.velocity));
                fx.emit(PhysicsEvent::KnockedOut { body: other, by: self.id });
                return false;
            }
        }

        self.velocity = self.velocity / 2.0;
        fx.impulses.push((other, -self.velocity));
        true
    }

    fn base_bounce(&mut self, hit: &BounceInfo, blended: Vec2, fx: &mut TickEffects) {
        let mut damp = true;
        if let Some(other) = hit.record.occupant {
            if !self.flags.contains(BodyFlags::DISABLE_OBJECT_COLLISIONS) {
                damp = self.on_collide_with_object(other, hit.other, fx);
            }
        }

        self.velocity = if damp {
            blended - blended.scale(hit.normal) * (1.0 - self.elasticity)
        } else {
            blended
        };

        fx.emit(PhysicsEvent::Bounce {
            body: self.id,
            position: hit.position,
            old_velocity: hit.old_velocity,
            new_velocity: self.velocity,
            normal: hit.normal,
            direction: hit.record.direction,
        });
    }

    /// Projectile impact. Returns true when the projectile is gone.
    fn impact(&mut self, position: Vec2, fx: &mut TickEffects) -> bool {
        let BodyKind::Projectile { explode_on_impact, destroy_on_impact, explosion } = self.kind else {
            return false;
        };
        if explode_on_impact {
            let center = position.cell() + IVec2::new(self.w() / 2, self.h() / 2);
            fx.explosions.push(ExplosionRequest { center, spec: explosion });
        }
        if destroy_on_impact {
            self.active = false;
            fx.emit(PhysicsEvent::Destroyed { body: self.id, reason: DestroyReason::Impact });
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::body::ExplosionSpec;
    use crate::systems::collision::{Boundary, Direction};
    use approx::assert_relative_eq;

    fn floor_hit(occupant: Option<BodyId>) -> CollisionRecord {
        CollisionRecord {
            hit_cell: IVec2::new(5, 0),
            occupant,
            contact_cell: IVec2::new(5, 1),
            hit_part: IVec2::ZERO,
            boundary: Boundary::Horizontal(1),
            direction: Direction::Down,
            slide: Vec2::zero(),
        }
    }

    fn bounce_info(old: Vec2, occupant: Option<BodyId>, other: Option<OccupantInfo>) -> BounceInfo {
        BounceInfo {
            record: floor_hit(occupant),
            position: Vec2::new(5.0, 1.01),
            old_velocity: old,
            normal: Vec2::new(0.0, 1.0),
            other,
        }
    }

    fn worm() -> Body {
        Body::new_rect(5.0, 5.0, 1, 2).with_kind(BodyKind::Worm {
            knockout_speed: 100.0,
            default_rebound_threshold: 50.0,
            default_friction: 1.0,
        })
    }

    #[test]
    fn plain_bounce_damps_the_normal_component_by_elasticity() {
        let mut body = Body::new_rect(5.0, 5.0, 1, 1).with_elasticity(0.5);
        body.velocity = Vec2::new(4.0, -20.0);
        let mut fx = TickEffects::new();
        let mut blended = Vec2::new(4.0, 10.0);
        body.on_bounce(&bounce_info(body.velocity, None, None), &mut blended, &PhysicsConfig::default(), &mut fx);

        assert_relative_eq!(body.velocity.x, 4.0);
        assert_relative_eq!(body.velocity.y, 5.0);
        assert_eq!(fx.count_events(|e| matches!(e, PhysicsEvent::Bounce { .. })), 1);
    }

    #[test]
    fn hitting_a_body_pushes_it_with_half_the_speed() {
        let mut body = Body::new_rect(5.0, 5.0, 1, 1);
        body.velocity = Vec2::new(0.0, -20.0);
        let other = BodyId(3);
        let info = OccupantInfo { flags: BodyFlags::empty(), is_worm: false };
        let mut fx = TickEffects::new();
        let mut blended = Vec2::new(0.0, 10.0);
        body.on_bounce(&bounce_info(body.velocity, Some(other), Some(info)), &mut blended, &PhysicsConfig::default(), &mut fx);

        assert_eq!(fx.impulses, vec![(other, Vec2::new(0.0, 10.0))]);
    }

    #[test]
    fn fast_worm_knocks_another_worm_over_without_bouncing() {
        let mut body = worm();
        body.id = BodyId(1);
        body.velocity = Vec2::new(150.0, 0.0);
        let other = BodyId(2);
        let info = OccupantInfo { flags: BodyFlags::empty(), is_worm: true };
        let mut fx = TickEffects::new();
        let mut blended = Vec2::new(-60.0, 0.0);
        body.on_bounce(&bounce_info(body.velocity, Some(other), Some(info)), &mut blended, &PhysicsConfig::default(), &mut fx);

        assert_eq!(body.velocity, Vec2::new(-60.0, 0.0));
        assert_eq!(fx.impulses, vec![(other, Vec2::new(120.0, 0.0))]);
        assert!(fx.events.contains(&PhysicsEvent::KnockedOut { body: other, by: BodyId(1) }));
    }

    #[test]
    fn worm_landing_straight_down_gets_stuck() {
        let mut body = worm();
        body.velocity = Vec2::new(0.0, -80.0);
        let mut fx = TickEffects::new();
        let mut blended = Vec2::new(0.0, 40.0);
        body.on_bounce(&bounce_info(body.velocity, None, None), &mut blended, &PhysicsConfig::default(), &mut fx);

        assert!(blended.is_zero());
        assert!(body.velocity.is_zero());
        assert_eq!(fx.count_events(|e| matches!(e, PhysicsEvent::Stuck { .. })), 1);
        assert_eq!(fx.count_events(|e| matches!(e, PhysicsEvent::FallDamage { .. })), 0);
    }

    #[test]
    fn worm_landing_at_an_angle_takes_fall_damage() {
        let mut body = worm();
        body.velocity = Vec2::new(300.0, -400.0);
        let mut fx = TickEffects::new();
        let mut blended = Vec2::new(300.0, 0.0);
        body.on_bounce(&bounce_info(body.velocity, None, None), &mut blended, &PhysicsConfig::default(), &mut fx);

        assert!(fx.events.contains(&PhysicsEvent::FallDamage { body: body.id, amount: 2 }));
    }

    #[test]
    fn worm_stop_restores_its_defaults() {
        let mut body = worm();
        body.rebound_threshold = 999.0;
        body.friction = 0.1;
        let mut fx = TickEffects::new();
        body.on_stop(Vec2::new(5.0, 1.01), &mut fx);
        assert_eq!(body.rebound_threshold, 50.0);
        assert_eq!(body.friction, 1.0);
        assert_eq!(fx.count_events(|e| matches!(e, PhysicsEvent::Stop { .. })), 1);
    }

    #[test]
    fn projectile_impact_explodes_and_destroys() {
        let explosion = ExplosionSpec { radius: 4, max_force: 100.0, debris_chance: 0 };
        let mut body = Body::new_rect(5.0, 5.0, 1, 1).with_kind(BodyKind::Projectile {
            explode_on_impact: true,
            destroy_on_impact: true,
            explosion,
        });
        let mut fx = TickEffects::new();
        body.on_stop(Vec2::new(5.2, 1.01), &mut fx);

        assert!(!body.active);
        assert_eq!(fx.explosions, vec![ExplosionRequest { center: IVec2::new(5, 1), spec: explosion }]);
        assert_eq!(fx.count_events(|e| matches!(e, PhysicsEvent::Stop { .. })), 0);
        assert_eq!(
            fx.count_events(|e| matches!(e, PhysicsEvent::Destroyed { reason: DestroyReason::Impact, .. })),
            1
        );
    }

    #[test]
    fn debris_asks_to_merge_when_it_stops() {
        let mut body = Body::new_rect(5.0, 5.0, 1, 1).with_kind(BodyKind::Debris { merge_on_stop: true });
        body.id = BodyId(8);
        let mut fx = TickEffects::new();
        body.on_stop(body.pos, &mut fx);
        assert_eq!(fx.merges, vec![BodyId(8)]);
    }
}
