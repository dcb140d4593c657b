use crate::lattice::CHUNK_SIZE;
use bevy_derive::{Deref, DerefMut};
use bevy_math::IVec2;
use std::fmt::Display;

/// Position of a chunk in the world grid, in chunks.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deref, DerefMut)]
pub struct ChunkPos(pub IVec2);

impl Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}:{})", self.x, self.y)
    }
}

impl ChunkPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    /// World-unit coordinate of the chunk's first sample.
    pub fn origin(self) -> (i64, i64) {
        (
            self.x as i64 * CHUNK_SIZE as i64,
            self.y as i64 * CHUNK_SIZE as i64,
        )
    }

    /// Splits a world-unit sample coordinate into its chunk and in-chunk cell.
    /// `None` when the chunk coordinate does not fit an `i32`.
    pub fn from_world(x: i64, y: i64) -> Option<(Self, u8, u8)> {
        let size = CHUNK_SIZE as i64;
        let pos = Self::new(
            i32::try_from(x.div_euclid(size)).ok()?,
            i32::try_from(y.div_euclid(size)).ok()?,
        );
        Some((pos, x.rem_euclid(size) as u8, y.rem_euclid(size) as u8))
    }
}

impl From<IVec2> for ChunkPos {
    fn from(pos: IVec2) -> Self {
        Self(pos)
    }
}

impl From<ChunkPos> for IVec2 {
    fn from(pos: ChunkPos) -> Self {
        pos.0
    }
}

/// A half-open rectangle of chunks: `[min, min + size)` on both axes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ChunkRect {
    pub min: IVec2,
    pub size: IVec2,
}

impl Display for ChunkRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}:{}) {}x{}",
            self.min.x, self.min.y, self.size.x, self.size.y
        )
    }
}

impl ChunkRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            min: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// The chunks within `radius` of `center`, including `center` itself.
    pub fn around(center: ChunkPos, radius: i32) -> Self {
        let side = radius * 2 + 1;
        Self::new(center.x - radius, center.y - radius, side, side)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Exclusive upper corner.
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    pub fn contains(&self, pos: ChunkPos) -> bool {
        let max = self.max();
        pos.x >= self.min.x && pos.y >= self.min.y && pos.x < max.x && pos.y < max.y
    }

    /// Overlap of two rectangles, `None` when they do not touch.
    pub fn intersect(&self, other: &ChunkRect) -> Option<ChunkRect> {
        let min = self.min.max(other.min);
        let max = self.max().min(other.max());
        let rect = ChunkRect { min, size: max - min };
        (!rect.is_empty()).then_some(rect)
    }

    /// Row-major walk over every chunk in the rectangle.
    pub fn iter(&self) -> impl Iterator<Item = ChunkPos> + use<> {
        let ChunkRect { min, size } = *self;
        let (width, height) = (size.x.max(0), size.y.max(0));
        (0..height).flat_map(move |dy| {
            (0..width).map(move |dx| ChunkPos::new(min.x + dx, min.y + dy))
        })
    }
}
