use pixsphere_mesh_cpu::BatchMeshCPU;
use pixsphere_slice::{Scene, SceneError};
use raylib::prelude::*;

use crate::upload::{BatchRender, upload_batch_mesh};

/// Owns the raylib context. Batches attached here must be dropped before the
/// scene itself, since dropping the handle closes the window.
pub struct RaylibScene {
    pub rl: RaylibHandle,
    pub thread: RaylibThread,
    uploads: usize,
}

impl RaylibScene {
    pub fn new(rl: RaylibHandle, thread: RaylibThread) -> Self {
        Self {
            rl,
            thread,
            uploads: 0,
        }
    }

    /// Batches uploaded since the window opened.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl Scene for RaylibScene {
    type Batch = BatchRender;

    fn attach_batch(&mut self, mesh: &BatchMeshCPU) -> Result<BatchRender, SceneError> {
        let render = upload_batch_mesh(&mut self.rl, &self.thread, mesh)?;
        self.uploads += 1;
        Ok(render)
    }

    fn detach_batch(&mut self, batch: BatchRender) {
        log::trace!("releasing batch of {} parts", batch.parts.len());
        drop(batch);
    }
}
