use bevy_math::DVec2;
use renoise_random::Random;
use std::f64::consts::TAU;

/// A unit-length lattice vector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientPoint {
    pub x: f64,
    pub y: f64,
}

impl GradientPoint {
    /// Draws a direction uniformly from `[0, 2π)`.
    pub fn generate<R>(random: &mut R) -> Self
    where
        R: Random,
    {
        let angle = random.next_f64() * TAU;
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    #[inline]
    pub fn dot(self, delta: DVec2) -> f64 {
        self.x * delta.x + self.y * delta.y
    }
}

impl From<GradientPoint> for DVec2 {
    fn from(point: GradientPoint) -> Self {
        DVec2::new(point.x, point.y)
    }
}
