//! Per-axis layout of the gradient lattice.
//!
//! Chunks are `CHUNK_SIZE` samples wide while lattice cells are `1 / frequency`
//! samples wide, so a chunk generally spans a non-integer number of cells. Each
//! chunk owns the lattice columns whose position falls inside
//! `[chunk start, chunk end)`; the first of them sits `offset` cells past the
//! chunk start. Offsets and counts only depend on the chunk coordinate along one
//! axis, so the same [`AxisLattice`] describes both a column and a row.

use crate::error::NoiseError;

/// Samples per chunk side.
pub const CHUNK_SIZE: usize = 16;

const _: () = assert!(
    CHUNK_SIZE >= 1 && CHUNK_SIZE < 256,
    "CHUNK_SIZE must fit in an unsigned 8-bit integer"
);

/// Tolerance used to snap values that floating-point error pushed just past
/// an exact lattice position.
const DRIFT: f64 = 1e-9;

/// Number of lattice cells spanned by one chunk.
#[inline]
pub fn lattice_size(frequency: f64) -> f64 {
    CHUNK_SIZE as f64 * frequency
}

/// Rejects frequencies that would leave a chunk with less than one lattice
/// cell. Those are not supported.
pub fn check_frequency(frequency: f64) -> Result<(), NoiseError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(NoiseError::InvalidFrequency(frequency));
    }
    let lattice_size = lattice_size(frequency);
    if lattice_size < 1.0 {
        return Err(NoiseError::FrequencyTooLow {
            frequency,
            lattice_size,
        });
    }
    Ok(())
}

/// Influence falloff of a lattice corner at distance `t` along one axis.
#[inline]
pub fn fade(t: f64) -> f64 {
    let t = t.abs();
    if t < 1.0 {
        1.0 - (3.0 - 2.0 * t) * t * t
    } else {
        0.0
    }
}

/// Phase of a chunk's first owned lattice column relative to the chunk start,
/// in lattice cells, within `[0, 1)`.
///
/// The raw phase is snapped to a multiple of `frequency` only when that snap
/// is within floating-point drift; an unconditional snap misaligns the
/// lattices of neighbouring chunks for frequencies such as `0.3`.
pub fn grad_offset(chunk: i32, frequency: f64) -> f64 {
    let fraction = lattice_size(frequency).rem_euclid(1.0);
    let raw = chunk as f64 * (1.0 - fraction);
    let snapped = (raw / frequency).round() * frequency;
    let offset = if (snapped - raw).abs() < DRIFT {
        snapped
    } else {
        raw
    }
    .rem_euclid(1.0);
    if offset < DRIFT || offset > 1.0 - DRIFT {
        0.0
    } else {
        offset
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisLattice {
    /// See [`grad_offset`].
    pub offset: f64,
    /// Lattice columns owned by the chunk, always `ceil(lattice_size - offset)`.
    pub count: i64,
}

impl AxisLattice {
    pub fn new(chunk: i32, frequency: f64) -> Self {
        let size = lattice_size(frequency);
        let mut offset = grad_offset(chunk, frequency);
        // A span that should be a whole number of cells must not round up to
        // an extra column that the next chunk owns as well.
        let span = size - offset;
        let whole = span.round();
        if (span - whole).abs() < DRIFT {
            let exact = size - whole;
            if (0.0..1.0).contains(&exact) {
                offset = exact;
            }
        }
        Self {
            offset,
            count: (size - offset).ceil() as i64,
        }
    }

    #[inline]
    pub fn contains(&self, local: i64) -> bool {
        (0..self.count).contains(&local)
    }
}

/// Resolves a lattice index given relative to `chunk` to the chunk that owns
/// it along one axis and the index inside that owner.
///
/// `count_of` yields the owned lattice count of a chunk coordinate, or `None`
/// past the edge of the world, in which case the lattice point has no owner.
pub fn resolve_axis<F>(mut chunk: i32, mut local: i64, count_of: F) -> Option<(i32, i64)>
where
    F: Fn(i32) -> Option<i64>,
{
    let mut count = count_of(chunk)?;
    while local < 0 {
        chunk -= 1;
        count = count_of(chunk)?;
        local += count;
    }
    while local >= count {
        local -= count;
        chunk += 1;
        count = count_of(chunk)?;
    }
    Some((chunk, local))
}
