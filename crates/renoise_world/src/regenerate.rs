//! Partial regeneration of the gradient lattice.
//!
//! Re-rolling a lattice vector changes every sample whose interpolation cell
//! touches it, including samples in neighbouring chunks. Rectangle
//! regeneration therefore keeps the lattice vectors that chunks outside the
//! rectangle interpolate against, and only recomputes samples inside it.

use crate::error::NoiseError;
use crate::pos::{ChunkPos, ChunkRect};
use crate::world::World;
use renoise_random::Random;
use tracing::{debug, trace};

impl<R> World<R>
where
    R: Random,
{
    /// Re-rolls the gradients of every chunk in
    /// `[chunk_x, chunk_x + width) x [chunk_y, chunk_y + height)` and
    /// recomputes the samples of the rectangle's interior chunks.
    ///
    /// Lattice vectors shared with chunks outside the rectangle keep their
    /// value: the first column of the left edge chunks, the last column of
    /// the right edge chunks, and likewise the first and last rows of the top
    /// and bottom edge chunks. Nothing outside the rectangle changes.
    pub fn regenerate_rect(
        &mut self,
        chunk_x: i32,
        chunk_y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), NoiseError> {
        let rect = ChunkRect::new(chunk_x, chunk_y, width, height);
        let size = i64::from(self.size());
        let fits = |start: i32, len: i32| {
            start >= 0 && len > 0 && i64::from(start) + i64::from(len) <= size
        };
        if !fits(chunk_x, width) || !fits(chunk_y, height) {
            return Err(NoiseError::RectOutOfBounds {
                rect,
                size: self.size(),
            });
        }

        let last = rect.max() - 1;
        for pos in rect.iter() {
            let Some((chunk, random)) = self.chunk_with_random(pos) else {
                continue;
            };
            let count_x = chunk.grad_point_count_x();
            let count_y = chunk.grad_point_count_y();
            let mut rerolled = 0;
            for gy in 0..count_y {
                for gx in 0..count_x {
                    let shared = (pos.x == rect.min.x && gx == 0)
                        || (pos.x == last.x && gx == count_x - 1)
                        || (pos.y == rect.min.y && gy == 0)
                        || (pos.y == last.y && gy == count_y - 1);
                    if shared {
                        continue;
                    }
                    chunk.reroll_gradient(gx, gy, random);
                    rerolled += 1;
                }
            }
            trace!(%pos, rerolled, "re-rolled chunk gradients");
        }

        self.resample(rect)?;
        debug!(%rect, "regenerated chunk rectangle");
        Ok(())
    }

    /// Re-rolls every gradient owned by one chunk, then recomputes the samples
    /// of the chunk and its eight neighbours, all of which may interpolate
    /// against the changed lattice.
    pub fn regenerate_full_chunk(&mut self, chunk_x: i32, chunk_y: i32) -> Result<(), NoiseError> {
        let pos = ChunkPos::new(chunk_x, chunk_y);
        self.check_chunk(pos)?;
        if let Some((chunk, random)) = self.chunk_with_random(pos) {
            for gy in 0..chunk.grad_point_count_y() {
                for gx in 0..chunk.grad_point_count_x() {
                    chunk.reroll_gradient(gx, gy, random);
                }
            }
        }

        self.resample(ChunkRect::around(pos, 1))?;
        debug!(%pos, "regenerated full chunk");
        Ok(())
    }

    /// Recomputes the samples of every interior chunk inside `rect`.
    fn resample(&mut self, rect: ChunkRect) -> Result<(), NoiseError> {
        let Some(stale) = rect.intersect(&self.interior()) else {
            return Ok(());
        };
        for pos in stale.iter() {
            self.compute_chunk_samples(pos)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::error::NoiseError;
    use crate::pos::ChunkPos;
    use crate::world::World;

    #[test]
    fn rect_must_fit_the_world() {
        let mut world = World::new(6, 0.2, 1).unwrap();
        for (x, y, w, h) in [(-1, 0, 2, 2), (5, 5, 2, 1), (0, 0, 0, 3), (2, 2, 3, -1)] {
            assert!(matches!(
                world.regenerate_rect(x, y, w, h),
                Err(NoiseError::RectOutOfBounds { .. })
            ));
        }
        assert!(world.regenerate_rect(0, 0, 6, 6).is_ok());
    }

    #[test]
    fn rect_near_integer_limits_is_rejected() {
        let mut world = World::new(6, 0.2, 1).unwrap();
        let cases = [
            (i32::MAX, 0, 2, 1),
            (0, i32::MAX, 1, i32::MAX),
            (1, 1, i32::MAX, 1),
            (i32::MIN, 0, i32::MAX, 1),
        ];
        for (x, y, w, h) in cases {
            assert!(matches!(
                world.regenerate_rect(x, y, w, h),
                Err(NoiseError::RectOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn full_chunk_must_be_in_the_world() {
        let mut world = World::new(6, 0.2, 1).unwrap();
        assert!(matches!(
            world.regenerate_full_chunk(6, 0),
            Err(NoiseError::ChunkOutOfBounds { .. })
        ));
        assert!(world.regenerate_full_chunk(0, 0).is_ok());
    }

    #[test]
    fn rect_keeps_shared_edge_gradients() {
        let mut world = World::new(8, 0.2, 7).unwrap();
        let pos = ChunkPos::new(3, 3);
        let before = world.chunk(pos).unwrap().clone();
        world.regenerate_rect(3, 3, 1, 1).unwrap();
        let after = world.chunk(pos).unwrap();

        let count_x = before.grad_point_count_x();
        let count_y = before.grad_point_count_y();
        for gy in 0..count_y {
            for gx in 0..count_x {
                let edge = gx == 0 || gy == 0 || gx == count_x - 1 || gy == count_y - 1;
                if edge {
                    assert_eq!(before.gradient(gx, gy), after.gradient(gx, gy));
                } else {
                    assert_ne!(before.gradient(gx, gy), after.gradient(gx, gy));
                }
            }
        }
    }

    #[test]
    fn full_chunk_rerolls_everything() {
        let mut world = World::new(8, 0.2, 7).unwrap();
        let pos = ChunkPos::new(2, 5);
        let before = world.chunk(pos).unwrap().gradients().to_vec();
        world.regenerate_full_chunk(2, 5).unwrap();
        let after = world.chunk(pos).unwrap().gradients();
        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(after) {
            assert_ne!(old, new);
        }
    }
}
