use pixsphere_geom::Voxel;
use pixsphere_mesh_cpu::{BatchMeshCPU, build_batch};
use pixsphere_shell::{Radius, ShellIndex};
use thiserror::Error;

use crate::scene::{Scene, SceneError};

#[derive(Debug, Error)]
pub enum SliceError {
    #[error("shell generation for radius {radius} has not finished")]
    GenerationInProgress { radius: u32 },
    #[error("slice position {value} is out of range [1, {max}]")]
    SliceOutOfRange { value: u32, max: u32 },
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Converts a 1-based slice position in `[1, 2·radius]` to a signed y.
pub fn signed_slice(display: u32, radius: Radius) -> Result<i32, SliceError> {
    let max = radius.get() * 2;
    if display == 0 || display > max {
        return Err(SliceError::SliceOutOfRange {
            value: display,
            max,
        });
    }
    Ok(display as i32 - radius.get() as i32)
}

fn ensure_complete(index: &ShellIndex) -> Result<(), SliceError> {
    if index.is_complete() {
        Ok(())
    } else {
        Err(SliceError::GenerationInProgress {
            radius: index.radius().get(),
        })
    }
}

/// Owns the single merged batch in a scene plus the outline set drawn on
/// the cut plane.
pub struct SliceView<S: Scene> {
    batch: Option<S::Batch>,
    outlines: Vec<Voxel>,
    cut: Option<i32>,
    visible_voxels: usize,
}

impl<S: Scene> Default for SliceView<S> {
    fn default() -> Self {
        Self {
            batch: None,
            outlines: Vec::new(),
            cut: None,
            visible_voxels: 0,
        }
    }
}

impl<S: Scene> SliceView<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges every bucket of `index` into one batch and makes it the only
    /// batch in the scene.
    pub fn rebuild_full(&mut self, scene: &mut S, index: &ShellIndex) -> Result<(), SliceError> {
        ensure_complete(index)?;
        let mesh = build_batch(index.voxels());
        self.swap_batch(scene, mesh)?;
        self.clear_outlines();
        self.cut = None;
        log::debug!(
            "full view: {} voxels in {} buckets",
            self.visible_voxels,
            index.buckets().count()
        );
        Ok(())
    }

    /// Shows buckets with `y <= display - radius`; the bucket at exactly that
    /// y is also outlined. Returns the signed y of the cut.
    pub fn reveal_up_to(
        &mut self,
        scene: &mut S,
        index: &ShellIndex,
        display: u32,
    ) -> Result<i32, SliceError> {
        ensure_complete(index)?;
        let y = signed_slice(display, index.radius())?;
        let mesh = build_batch(index.up_to(y).flat_map(|(_, bucket)| bucket.iter()));
        let outlines = index.bucket(y).to_vec();
        self.swap_batch(scene, mesh)?;
        self.outlines = outlines;
        self.cut = Some(y);
        log::debug!(
            "cut at y={} (slice {}): {} voxels, {} outlined",
            y,
            display,
            self.visible_voxels,
            self.outlines.len()
        );
        Ok(y)
    }

    /// Replaces the current batch. The new batch is attached before the old
    /// one is detached, so a failed upload keeps the old batch in place.
    pub fn swap_batch(&mut self, scene: &mut S, mesh: BatchMeshCPU) -> Result<(), SliceError> {
        let fresh = scene.attach_batch(&mesh)?;
        if let Some(old) = self.batch.replace(fresh) {
            scene.detach_batch(old);
        }
        self.visible_voxels = mesh.voxel_count();
        Ok(())
    }

    pub fn clear_outlines(&mut self) {
        self.outlines.clear();
    }

    /// Drops batch and outlines, e.g. when the radius changes.
    pub fn discard(&mut self, scene: &mut S) {
        self.clear_outlines();
        if let Some(old) = self.batch.take() {
            scene.detach_batch(old);
        }
        self.cut = None;
        self.visible_voxels = 0;
    }

    #[inline]
    pub fn batch(&self) -> Option<&S::Batch> {
        self.batch.as_ref()
    }

    #[inline]
    pub fn has_batch(&self) -> bool {
        self.batch.is_some()
    }

    #[inline]
    pub fn outlines(&self) -> &[Voxel] {
        &self.outlines
    }

    /// Signed y of the current cut, `None` for the full view.
    #[inline]
    pub fn cut(&self) -> Option<i32> {
        self.cut
    }

    #[inline]
    pub fn visible_voxels(&self) -> usize {
        self.visible_voxels
    }
}
