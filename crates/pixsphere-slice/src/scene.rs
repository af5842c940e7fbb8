use pixsphere_mesh_cpu::BatchMeshCPU;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("batch upload failed: {0}")]
    Upload(String),
}

/// Where merged batches live while they are drawn.
///
/// `attach_batch` turns CPU geometry into whatever the backend draws;
/// `detach_batch` releases it. Dropping a batch without detaching must also
/// release it.
pub trait Scene {
    type Batch;

    fn attach_batch(&mut self, mesh: &BatchMeshCPU) -> Result<Self::Batch, SceneError>;

    fn detach_batch(&mut self, batch: Self::Batch);
}
