/// Seed used when a world is created without one
pub(super) const DEFAULT_SEED: u32 = 12345;

/// Xorshift32 random number generator
#[inline]
pub(super) fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Zero is a fixed point of xorshift; map it to the default seed.
#[inline]
pub(super) fn sanitize_seed(seed: u32) -> u32 {
    if seed == 0 {
        DEFAULT_SEED
    } else {
        seed
    }
}

/// Uniform roll in 1..=100 compared against `chance` percent.
#[inline]
pub(super) fn roll_percent(state: &mut u32, chance: u8) -> bool {
    (xorshift32(state) % 100 + 1) <= chance as u32
}

#[inline]
pub(super) fn coin(state: &mut u32) -> bool {
    xorshift32(state) & 1 == 0
}
