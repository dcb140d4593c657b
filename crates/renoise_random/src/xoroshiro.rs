use bevy_math::IVec2;
use rand_xoshiro::Xoroshiro128PlusPlus;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};

use crate::{Random, chunk_pos_seed};

const F64_MULTIPLIER: f64 = 1.0 / (1u64 << 53) as f64;
const STAFFORD_1: u64 = 0xbf58476d1ce4e5b9;
const STAFFORD_2: u64 = 0x94d049bb133111eb;
const SILVER_RATIO: u64 = 0x6a09e667f3bcc909;
const GOLDEN_RATIO: u64 = 0x9e3779b97f4a7c15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XoroshiroRandom(Xoroshiro128PlusPlus);

impl XoroshiroRandom {
    pub fn new(seed: u64) -> Self {
        let (lo, hi) = upgrade_seed_to_u128(seed);
        Self::from_u128_seed(lo, hi)
    }

    pub fn from_u128_seed(lo: u64, hi: u64) -> Self {
        let mut array = [0u8; 16];
        array[..8].copy_from_slice(&lo.to_le_bytes());
        array[8..16].copy_from_slice(&hi.to_le_bytes());
        Self(Xoroshiro128PlusPlus::from_seed(array))
    }

    fn next_bits(&mut self, bits: usize) -> u64 {
        self.next_u64() >> (64 - bits)
    }
}

impl Random for XoroshiroRandom {
    fn next_f64(&mut self) -> f64 {
        self.next_bits(53) as f64 * F64_MULTIPLIER
    }

    fn fork_at<T>(&mut self, pos: T) -> Self
    where
        T: Into<IVec2>,
    {
        let seed = chunk_pos_seed(pos);
        let lo = self.next_u64() ^ seed;
        let hi = self.next_u64();
        XoroshiroRandom::from_u128_seed(lo, hi)
    }
}

impl RngCore for XoroshiroRandom {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

fn mix_stafford_13(mut v: u64) -> u64 {
    v = (v ^ v >> 30).wrapping_mul(STAFFORD_1);
    v = (v ^ v >> 27).wrapping_mul(STAFFORD_2);
    v ^ v >> 31
}

fn upgrade_seed_to_u128(seed: u64) -> (u64, u64) {
    let lo = seed ^ SILVER_RATIO;
    let hi = lo.wrapping_add(GOLDEN_RATIO);
    (mix_stafford_13(lo), mix_stafford_13(hi))
}

#[cfg(test)]
mod test {
    use crate::Random;
    use crate::xoroshiro::XoroshiroRandom;
    use bevy_math::IVec2;

    #[test]
    fn next_f64_stays_in_unit_interval() {
        let mut random = XoroshiroRandom::new(0xdead_beef);
        for _ in 0..10_000 {
            let v = random.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn seeds_give_distinct_streams() {
        let mut a = XoroshiroRandom::new(1);
        let mut b = XoroshiroRandom::new(2);
        let a: Vec<f64> = (0..8).map(|_| a.next_f64()).collect();
        let b: Vec<f64> = (0..8).map(|_| b.next_f64()).collect();
        assert_ne!(a, b);
        assert_eq!(XoroshiroRandom::new(1), XoroshiroRandom::new(1));
    }

    #[test]
    fn fork_at_advances_the_parent() {
        let mut parent = XoroshiroRandom::new(42);
        let untouched = parent.clone();
        let mut child = parent.fork_at(IVec2::new(1, 1));
        assert_ne!(parent, untouched);
        assert_ne!(parent.next_f64(), child.next_f64());
    }
}
