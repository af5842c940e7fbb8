use pixsphere_mesh_cpu::BatchMeshCPU;
use pixsphere_slice::SceneError;
use raylib::prelude::*;

/// Vertex cap per uploaded part; raylib meshes index with `u16`.
pub const MAX_PART_VERTS: usize = 65000;

pub struct BatchPart {
    pub model: raylib::core::models::Model,
    pub v_count: usize,
}

/// GPU copy of one merged batch. Dropping it unloads every part.
pub struct BatchRender {
    pub parts: Vec<BatchPart>,
    pub voxel_count: usize,
    pub quad_count: usize,
}

impl BatchRender {
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.v_count).sum()
    }
}

pub fn upload_batch_mesh(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    cpu: &BatchMeshCPU,
) -> Result<BatchRender, SceneError> {
    let mb = &cpu.mesh;
    let total_quads = mb.quad_count();
    let max_quads = MAX_PART_VERTS / 4;
    let mut parts: Vec<BatchPart> = Vec::new();
    let mut q = 0usize;
    while q < total_quads {
        let take_q = (total_quads - q).min(max_quads);
        let v_start = q * 4;
        let v_count = take_q * 4;
        let mut raw: raylib::ffi::Mesh = unsafe { std::mem::zeroed() };
        raw.vertexCount = v_count as i32;
        raw.triangleCount = (take_q * 2) as i32;
        unsafe {
            let pos_start = v_start * 3;
            let pos_end = pos_start + v_count * 3;
            let col_start = v_start * 4;
            let col_end = col_start + v_count * 4;
            let vbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
            let tbytes = (v_count * 2 * std::mem::size_of::<f32>()) as u32;
            let cbytes = (v_count * 4 * std::mem::size_of::<u8>()) as u32;
            let ibytes = (take_q * 6 * std::mem::size_of::<u16>()) as u32;
            raw.vertices = raylib::ffi::MemAlloc(vbytes) as *mut f32;
            raw.normals = raylib::ffi::MemAlloc(vbytes) as *mut f32;
            raw.texcoords = raylib::ffi::MemAlloc(tbytes) as *mut f32;
            raw.colors = raylib::ffi::MemAlloc(cbytes) as *mut u8;
            raw.indices = raylib::ffi::MemAlloc(ibytes) as *mut u16;
            std::ptr::copy_nonoverlapping(
                mb.positions()[pos_start..pos_end].as_ptr(),
                raw.vertices,
                v_count * 3,
            );
            std::ptr::copy_nonoverlapping(
                mb.normals()[pos_start..pos_end].as_ptr(),
                raw.normals,
                v_count * 3,
            );
            // Untextured: the default material samples its white texel.
            std::ptr::write_bytes(raw.texcoords, 0, v_count * 2);
            std::ptr::copy_nonoverlapping(
                mb.colors()[col_start..col_end].as_ptr(),
                raw.colors,
                v_count * 4,
            );
            let idx_ptr = raw.indices;
            let mut write = 0usize;
            for i in 0..take_q {
                let base = (i * 4) as u16;
                let tri = [base, base + 1, base + 2, base, base + 2, base + 3];
                let dst = idx_ptr.add(write);
                std::ptr::copy_nonoverlapping(tri.as_ptr(), dst, 6);
                write += 6;
            }
        }
        let mut mesh = unsafe { raylib::core::models::Mesh::from_raw(raw) };
        unsafe {
            mesh.upload(false);
        }
        let model = rl
            .load_model_from_mesh(thread, unsafe { mesh.make_weak() })
            .map_err(|e| SceneError::Upload(format!("part at vertex {v_start}: {e:?}")))?;
        parts.push(BatchPart { model, v_count });
        q += take_q;
    }
    let extent = cpu.bbox.extent();
    log::debug!(
        "uploaded batch: {} voxels, {} quads in {} parts, extent {}x{}x{}",
        cpu.voxel_count(),
        total_quads,
        parts.len(),
        extent.x,
        extent.y,
        extent.z
    );
    Ok(BatchRender {
        parts,
        voxel_count: cpu.voxel_count(),
        quad_count: total_quads,
    })
}
