use crate::error::NoiseError;
use crate::gradient::GradientPoint;
use crate::lattice::{AxisLattice, CHUNK_SIZE, check_frequency};
use crate::pos::ChunkPos;
use bevy_math::DVec2;
use renoise_random::Random;

/// Noise values of one chunk, indexed `[local_y][local_x]`.
pub type SampleGrid = [[f64; CHUNK_SIZE]; CHUNK_SIZE];

/// A square tile of the world.
///
/// A chunk owns the gradient vectors of the lattice columns and rows that
/// start inside it. Lattice points past its far edges belong to the
/// neighbouring chunks and are looked up through the [`World`](crate::World),
/// never copied.
#[derive(Clone, Debug)]
pub struct Chunk {
    pos: ChunkPos,
    frequency: f64,
    lattice_x: AxisLattice,
    lattice_y: AxisLattice,
    grad_points: Vec<GradientPoint>,
    samples: Option<Box<SampleGrid>>,
}

impl Chunk {
    /// Lays out the chunk's part of the lattice and fills it with random
    /// gradients. Samples are left unset until the neighbours exist.
    pub fn generate<R>(pos: ChunkPos, frequency: f64, random: &mut R) -> Result<Self, NoiseError>
    where
        R: Random,
    {
        check_frequency(frequency)?;
        let lattice_x = AxisLattice::new(pos.x, frequency);
        let lattice_y = AxisLattice::new(pos.y, frequency);
        let grad_points = (0..lattice_x.count * lattice_y.count)
            .map(|_| GradientPoint::generate(random))
            .collect();
        Ok(Self {
            pos,
            frequency,
            lattice_x,
            lattice_y,
            grad_points,
            samples: None,
        })
    }

    #[inline]
    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    #[inline]
    pub fn lattice_x(&self) -> AxisLattice {
        self.lattice_x
    }

    #[inline]
    pub fn lattice_y(&self) -> AxisLattice {
        self.lattice_y
    }

    #[inline]
    pub fn grad_offset(&self) -> DVec2 {
        DVec2::new(self.lattice_x.offset, self.lattice_y.offset)
    }

    #[inline]
    pub fn grad_point_count_x(&self) -> i64 {
        self.lattice_x.count
    }

    #[inline]
    pub fn grad_point_count_y(&self) -> i64 {
        self.lattice_y.count
    }

    /// Row-major owned gradients, `grad_point_count_x` per row.
    #[inline]
    pub fn gradients(&self) -> &[GradientPoint] {
        &self.grad_points
    }

    fn gradient_index(&self, gx: i64, gy: i64) -> Option<usize> {
        if self.lattice_x.contains(gx) && self.lattice_y.contains(gy) {
            Some((gx + gy * self.lattice_x.count) as usize)
        } else {
            None
        }
    }

    /// The owned gradient at a local lattice coordinate.
    pub fn gradient(&self, gx: i64, gy: i64) -> Option<GradientPoint> {
        self.gradient_index(gx, gy).map(|i| self.grad_points[i])
    }

    /// Replaces one owned gradient with a fresh random one.
    pub(crate) fn reroll_gradient<R>(&mut self, gx: i64, gy: i64, random: &mut R)
    where
        R: Random,
    {
        if let Some(i) = self.gradient_index(gx, gy) {
            self.grad_points[i] = GradientPoint::generate(random);
        }
    }

    /// Maps an in-chunk sample cell onto this chunk's phase-shifted lattice.
    #[inline]
    pub fn local_to_lattice(&self, local_x: u8, local_y: u8) -> DVec2 {
        DVec2::new(
            local_x as f64 * self.frequency - self.lattice_x.offset,
            local_y as f64 * self.frequency - self.lattice_y.offset,
        )
    }

    /// World-unit position of an owned lattice point.
    pub fn gradient_world_position(&self, gx: i64, gy: i64) -> DVec2 {
        let (origin_x, origin_y) = self.pos.origin();
        DVec2::new(
            origin_x as f64 + (gx as f64 + self.lattice_x.offset) / self.frequency,
            origin_y as f64 + (gy as f64 + self.lattice_y.offset) / self.frequency,
        )
    }

    #[inline]
    pub fn is_sampled(&self) -> bool {
        self.samples.is_some()
    }

    /// `None` until the world has computed this chunk's samples. Border chunks
    /// of a world stay unsampled for their whole life.
    #[inline]
    pub fn samples(&self) -> Option<&SampleGrid> {
        self.samples.as_deref()
    }

    pub fn sample(&self, local_x: u8, local_y: u8) -> Option<f64> {
        self.samples
            .as_ref()
            .and_then(|grid| grid.get(local_y as usize)?.get(local_x as usize).copied())
    }

    pub(crate) fn set_sample(&mut self, local_x: u8, local_y: u8, value: f64) {
        let grid = self
            .samples
            .get_or_insert_with(|| Box::new([[0.0; CHUNK_SIZE]; CHUNK_SIZE]));
        grid[local_y as usize][local_x as usize] = value;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use renoise_random::XoroshiroRandom;

    #[test]
    fn generate_fills_owned_lattice() {
        let mut random = XoroshiroRandom::new(5);
        let chunk = Chunk::generate(ChunkPos::new(1, 4), 0.2, &mut random).unwrap();
        assert_eq!(chunk.grad_point_count_x(), 3);
        assert_eq!(chunk.grad_point_count_y(), 3);
        assert_eq!(chunk.gradients().len(), 9);
        assert!((chunk.grad_offset().x - 0.8).abs() < 1e-12);
        assert!((chunk.grad_offset().y - 0.2).abs() < 1e-12);
        assert!(!chunk.is_sampled());
        assert_eq!(chunk.sample(0, 0), None);
    }

    #[test]
    fn generate_rejects_low_frequency() {
        let mut random = XoroshiroRandom::new(5);
        let err = Chunk::generate(ChunkPos::new(0, 0), 0.05, &mut random).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn gradient_lookup_is_row_major_and_bounded() {
        let mut random = XoroshiroRandom::new(9);
        let chunk = Chunk::generate(ChunkPos::new(0, 1), 0.2, &mut random).unwrap();
        let width = chunk.grad_point_count_x();
        assert_eq!(chunk.gradient(1, 2), Some(chunk.gradients()[(1 + 2 * width) as usize]));
        assert_eq!(chunk.gradient(width, 0), None);
        assert_eq!(chunk.gradient(0, -1), None);
    }

    #[test]
    fn lattice_coordinates_follow_offset() {
        let mut random = XoroshiroRandom::new(1);
        let chunk = Chunk::generate(ChunkPos::new(1, 0), 0.25, &mut random).unwrap();
        assert_eq!(chunk.local_to_lattice(0, 0), DVec2::new(0.0, 0.0));
        assert_eq!(chunk.local_to_lattice(4, 8), DVec2::new(1.0, 2.0));

        let chunk = Chunk::generate(ChunkPos::new(1, 0), 0.2, &mut random).unwrap();
        let lattice = chunk.local_to_lattice(4, 0);
        assert!((lattice.x - 0.0).abs() < 1e-12);
        // Sample 4 of chunk 1 is world x = 20, exactly on lattice point 4.
        let world = chunk.gradient_world_position(0, 0);
        assert!((world.x - 20.0).abs() < 1e-9);
        assert!((world.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn samples_are_allocated_on_first_write() {
        let mut random = XoroshiroRandom::new(1);
        let mut chunk = Chunk::generate(ChunkPos::new(2, 2), 0.2, &mut random).unwrap();
        chunk.set_sample(3, 7, 0.5);
        assert!(chunk.is_sampled());
        assert_eq!(chunk.sample(3, 7), Some(0.5));
        assert_eq!(chunk.samples().unwrap()[7][3], 0.5);
        assert_eq!(chunk.sample(0, 0), Some(0.0));
    }
}
