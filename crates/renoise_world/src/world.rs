use crate::chunk::Chunk;
use crate::error::NoiseError;
use crate::gradient::GradientPoint;
use crate::lattice::{AxisLattice, CHUNK_SIZE, check_frequency, fade, resolve_axis};
use crate::pos::{ChunkPos, ChunkRect};
use crate::settings::WorldSettings;
use bevy_math::DVec2;
use renoise_random::{Random, XoroshiroRandom};
use tracing::debug;

pub const MIN_WORLD_SIZE: i32 = 3;

/// A square grid of chunks sharing one gradient lattice.
///
/// Chunks are stored contiguously in row-major order and live exactly as long
/// as the world. The outer ring of chunks only carries gradients: it gives the
/// interior chunks real neighbours to interpolate against and never gets
/// samples of its own.
#[derive(Clone, Debug)]
pub struct World<R = XoroshiroRandom> {
    chunks: Vec<Chunk>,
    axes: Vec<AxisLattice>,
    size: i32,
    frequency: f64,
    random: R,
}

impl World<XoroshiroRandom> {
    pub fn new(size: i32, frequency: f64, seed: u64) -> Result<Self, NoiseError> {
        Self::with_random(size, frequency, XoroshiroRandom::new(seed))
    }

    /// Builds a world from settings. Without a seed, one is drawn from the
    /// thread-local entropy source.
    pub fn from_settings(settings: &WorldSettings) -> Result<Self, NoiseError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        debug!(seed, "seeding world");
        Self::new(settings.size, settings.frequency, seed)
    }
}

impl<R> World<R>
where
    R: Random,
{
    /// Generates every chunk's gradients, then samples every interior chunk.
    pub fn with_random(size: i32, frequency: f64, mut random: R) -> Result<Self, NoiseError> {
        check_frequency(frequency)?;
        if size < MIN_WORLD_SIZE {
            return Err(NoiseError::WorldTooSmall(size));
        }

        let axes = (0..size).map(|c| AxisLattice::new(c, frequency)).collect();
        let mut chunks = Vec::with_capacity(size as usize * size as usize);
        for pos in ChunkRect::new(0, 0, size, size).iter() {
            let mut chunk_random = random.fork_at(pos);
            chunks.push(Chunk::generate(pos, frequency, &mut chunk_random)?);
        }

        let mut world = Self {
            chunks,
            axes,
            size,
            frequency,
            random,
        };
        world.generate_samples()?;
        debug!(size, frequency, "generated world");
        Ok(world)
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Whole world in chunk coordinates.
    pub fn bounds(&self) -> ChunkRect {
        ChunkRect::new(0, 0, self.size, self.size)
    }

    /// The chunks that carry samples.
    pub fn interior(&self) -> ChunkRect {
        ChunkRect::new(1, 1, self.size - 2, self.size - 2)
    }

    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.bounds().contains(pos)
    }

    pub fn is_interior(&self, pos: ChunkPos) -> bool {
        self.interior().contains(pos)
    }

    #[inline]
    fn index(&self, pos: ChunkPos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.x as usize + pos.y as usize * self.size as usize)
    }

    pub(crate) fn check_chunk(&self, pos: ChunkPos) -> Result<usize, NoiseError> {
        self.index(pos).ok_or(NoiseError::ChunkOutOfBounds {
            pos,
            size: self.size,
        })
    }

    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.index(pos).map(|i| &self.chunks[i])
    }

    pub(crate) fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.index(pos).map(|i| &mut self.chunks[i])
    }

    /// A chunk together with the world's random source, for re-rolling.
    pub(crate) fn chunk_with_random(&mut self, pos: ChunkPos) -> Option<(&mut Chunk, &mut R)> {
        let i = self.index(pos)?;
        Some((&mut self.chunks[i], &mut self.random))
    }

    /// Every chunk in row-major order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    fn count_of(&self, c: i32) -> Option<i64> {
        usize::try_from(c)
            .ok()
            .and_then(|c| self.axes.get(c))
            .map(|axis| axis.count)
    }

    /// Looks up a lattice point given in `pos`'s local lattice coordinates,
    /// following it into whichever chunk actually owns it. `None` when the
    /// point lies past the edge of the world.
    pub fn gradient_at(&self, pos: ChunkPos, gx: i64, gy: i64) -> Option<GradientPoint> {
        let (owner_x, local_x) = resolve_axis(pos.x, gx, |c| self.count_of(c))?;
        let (owner_y, local_y) = resolve_axis(pos.y, gy, |c| self.count_of(c))?;
        self.chunk(ChunkPos::new(owner_x, owner_y))?
            .gradient(local_x, local_y)
    }

    /// Noise value of one sample cell, blending the four surrounding lattice
    /// corners by falloff-weighted dot products.
    pub fn evaluate(&self, pos: ChunkPos, local_x: u8, local_y: u8) -> Result<f64, NoiseError> {
        check_cell(local_x, local_y)?;
        let chunk = self.chunk(pos).ok_or(NoiseError::ChunkOutOfBounds {
            pos,
            size: self.size,
        })?;
        let lattice = chunk.local_to_lattice(local_x, local_y);
        let cell_x = lattice.x.floor() as i64;
        let cell_y = lattice.y.floor() as i64;

        let mut value = 0.0;
        for dy in 0..2 {
            for dx in 0..2 {
                let corner_x = cell_x + dx;
                let corner_y = cell_y + dy;
                let gradient = self
                    .gradient_at(pos, corner_x, corner_y)
                    .ok_or(NoiseError::NotInterior(pos))?;
                let delta = DVec2::new(lattice.x - corner_x as f64, lattice.y - corner_y as f64);
                value += fade(delta.x) * fade(delta.y) * gradient.dot(delta);
            }
        }
        Ok(value)
    }

    /// Computes and stores one sample of an interior chunk.
    pub fn compute_sample(
        &mut self,
        pos: ChunkPos,
        local_x: u8,
        local_y: u8,
    ) -> Result<(), NoiseError> {
        check_cell(local_x, local_y)?;
        self.check_chunk(pos)?;
        if !self.is_interior(pos) {
            return Err(NoiseError::NotInterior(pos));
        }
        let value = self.evaluate(pos, local_x, local_y)?;
        if let Some(chunk) = self.chunk_mut(pos) {
            chunk.set_sample(local_x, local_y, value);
        }
        Ok(())
    }

    /// Recomputes every sample of an interior chunk.
    pub fn compute_chunk_samples(&mut self, pos: ChunkPos) -> Result<(), NoiseError> {
        for local_y in 0..CHUNK_SIZE as u8 {
            for local_x in 0..CHUNK_SIZE as u8 {
                self.compute_sample(pos, local_x, local_y)?;
            }
        }
        Ok(())
    }

    /// Full sampling pass over the interior.
    pub fn generate_samples(&mut self) -> Result<(), NoiseError> {
        for pos in self.interior().iter() {
            self.compute_chunk_samples(pos)?;
        }
        Ok(())
    }

    /// Reads the sample at a world-unit coordinate.
    pub fn sample(&self, x: i64, y: i64) -> Result<f64, NoiseError> {
        let out_of_bounds = NoiseError::SampleOutOfBounds { x, y };
        let Some((pos, local_x, local_y)) = ChunkPos::from_world(x, y) else {
            return Err(out_of_bounds);
        };
        let chunk = self.chunk(pos).ok_or(out_of_bounds)?;
        chunk
            .sample(local_x, local_y)
            .ok_or(NoiseError::NotInterior(pos))
    }

    /// Chunk holding a world-unit coordinate, if it is inside the world.
    pub fn chunk_pos_of(&self, x: i64, y: i64) -> Option<ChunkPos> {
        let (pos, _, _) = ChunkPos::from_world(x, y)?;
        self.contains(pos).then_some(pos)
    }
}

fn check_cell(local_x: u8, local_y: u8) -> Result<(), NoiseError> {
    if usize::from(local_x) < CHUNK_SIZE && usize::from(local_y) < CHUNK_SIZE {
        Ok(())
    } else {
        Err(NoiseError::CellOutOfBounds {
            x: local_x,
            y: local_y,
        })
    }
}
