use crate::pos::{ChunkPos, ChunkRect};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("frequency {frequency} gives {lattice_size} cells per chunk, at least 1 needed")]
    FrequencyTooLow { frequency: f64, lattice_size: f64 },
    #[error("frequency {0} must be finite and positive")]
    InvalidFrequency(f64),
    #[error("world size {0} is too small, at least 3 chunks per side are required")]
    WorldTooSmall(i32),
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Settings(#[from] serde_json::Error),
    #[error("chunk {pos} is outside of a world of size {size}")]
    ChunkOutOfBounds { pos: ChunkPos, size: i32 },
    #[error("chunk rectangle {rect} is empty or leaves a world of size {size}")]
    RectOutOfBounds { rect: ChunkRect, size: i32 },
    #[error("cell ({x}, {y}) lies outside of its chunk")]
    CellOutOfBounds { x: u8, y: u8 },
    #[error("sample position ({x}, {y}) is outside of the world")]
    SampleOutOfBounds { x: i64, y: i64 },
    #[error("chunk {0} lies on the world border and carries no samples")]
    NotInterior(ChunkPos),
}

impl NoiseError {
    /// The world could not be built with the requested parameters.
    pub fn is_configuration(&self) -> bool {
        match self {
            NoiseError::FrequencyTooLow { .. }
            | NoiseError::InvalidFrequency(_)
            | NoiseError::WorldTooSmall(_) => true,
            #[cfg(feature = "serde")]
            NoiseError::Settings(_) => true,
            _ => false,
        }
    }

    /// A coordinate handed to an existing world was out of range.
    pub fn is_bounds(&self) -> bool {
        matches!(
            self,
            NoiseError::ChunkOutOfBounds { .. }
                | NoiseError::RectOutOfBounds { .. }
                | NoiseError::CellOutOfBounds { .. }
                | NoiseError::SampleOutOfBounds { .. }
                | NoiseError::NotInterior(_)
        )
    }
}
