pub mod xoroshiro;

use bevy_math::IVec2;
use rand_core::RngCore;

pub use crate::xoroshiro::XoroshiroRandom;

/// A seedable random source. Every gradient vector a world hands out is drawn
/// from one of these, so two worlds built from the same seed are identical.
pub trait Random: RngCore + Clone {
    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Derives an independent source keyed by a chunk position.
    fn fork_at<T>(&mut self, pos: T) -> Self
    where
        T: Into<IVec2>;
}

fn chunk_pos_seed<T>(pos: T) -> u64
where
    T: Into<IVec2>,
{
    let pos = pos.into();
    let mut l = (pos.x.wrapping_mul(3129871) as i64) ^ (pos.y.wrapping_mul(116129781) as i64);
    l = l
        .wrapping_mul(l)
        .wrapping_mul(42317861)
        .wrapping_add(l.wrapping_mul(11));
    (l >> 16) as u64
}
