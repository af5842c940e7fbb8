//! CPU-side merged cube geometry for voxel batches (engine-only).
#![forbid(unsafe_code)]

mod batch;
mod face;
mod mesh_build;

pub use batch::{BatchMeshCPU, build_batch};
pub use face::Face;
pub use mesh_build::MeshBuild;
