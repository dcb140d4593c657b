//! Chunked gradient noise over a square world, with regeneration of
//! sub-regions that leaves the surrounding terrain untouched.

pub mod chunk;
pub mod error;
pub mod gradient;
pub mod lattice;
pub mod pos;
mod regenerate;
pub mod settings;
pub mod world;

#[cfg(feature = "bevy")]
pub mod bevy;

pub use chunk::{Chunk, SampleGrid};
pub use error::NoiseError;
pub use gradient::GradientPoint;
pub use lattice::CHUNK_SIZE;
pub use pos::{ChunkPos, ChunkRect};
pub use settings::WorldSettings;
pub use world::World;
