//! Voxel shell enumeration: which unit cubes sit in a thin band around a
//! sphere surface, computed in resumable chunks.
#![forbid(unsafe_code)]

mod generator;
mod index;
mod params;

pub use generator::{
    CancelToken, DEFAULT_CHUNK_BUDGET, GenerationState, Progress, ShellGenerator, StepOutcome,
    enumerate_chunk,
};
pub use index::ShellIndex;
pub use params::{Radius, ShellError, ShellParams};
pub use pixsphere_geom::Voxel;
