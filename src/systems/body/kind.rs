/// Terrain-destroying blast carried by projectiles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionSpec {
    pub radius: i32,
    pub max_force: f32,
    /// Percent chance (0..=100) that a destroyed solid cell turns into debris
    pub debris_chance: u8,
}

/// Closed set of gameplay body types.
///
/// The collision core only knows these; their hook behaviour lives in
/// `hooks.rs` and is dispatched by `match`, not by trait objects.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BodyKind {
    #[default]
    Plain,
    Worm {
        /// Speed above which hitting another worm knocks it over instead of bouncing
        knockout_speed: f32,
        /// Rebound threshold restored whenever the worm comes to rest
        default_rebound_threshold: f32,
        default_friction: f32,
    },
    Projectile {
        explode_on_impact: bool,
        destroy_on_impact: bool,
        explosion: ExplosionSpec,
    },
    Debris {
        merge_on_stop: bool,
    },
    /// Loose particle that trickles sideways off ledges after its tick
    Fluid,
}

impl BodyKind {
    pub fn is_worm(&self) -> bool {
        matches!(self, BodyKind::Worm { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyKind::Plain => "plain",
            BodyKind::Worm { .. } => "worm",
            BodyKind::Projectile { .. } => "projectile",
            BodyKind::Debris { .. } => "debris",
            BodyKind::Fluid => "fluid",
        }
    }
}
