use hashbrown::HashSet;
use pixsphere_geom::{Aabb, Voxel};

use crate::face::Face;
use crate::mesh_build::MeshBuild;

/// One merged mesh covering a set of unit cubes.
#[derive(Clone, Debug)]
pub struct BatchMeshCPU {
    pub mesh: MeshBuild,
    pub bbox: Aabb,
    /// Distinct source voxels in merge order.
    pub voxels: Vec<Voxel>,
}

impl BatchMeshCPU {
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.mesh.quad_count()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

/// Merges the cubes of `voxels` into one mesh. Faces between two cubes of the
/// same set are skipped; repeated voxels are merged once.
pub fn build_batch<'a, I>(voxels: I) -> BatchMeshCPU
where
    I: IntoIterator<Item = &'a Voxel>,
{
    let mut order: Vec<Voxel> = Vec::new();
    let mut present: HashSet<Voxel> = HashSet::new();
    for v in voxels {
        if present.insert(*v) {
            order.push(*v);
        }
    }

    let mut mesh = MeshBuild::default();
    // Shell cubes rarely expose more than half their faces.
    mesh.reserve_quads(order.len() * 3);
    let mut bbox = Aabb::EMPTY;
    for v in &order {
        let bb = v.bounds();
        bbox.include(bb);
        for face in Face::ALL {
            let (dx, dy, dz) = face.delta();
            if present.contains(&v.offset(dx, dy, dz)) {
                continue;
            }
            let [a, b, c, d] = face.corners(&bb);
            mesh.add_quad(a, b, c, d, face.normal(), face.normal_rgba());
        }
    }
    if order.is_empty() {
        bbox = Aabb::default();
    }
    log::trace!(
        "batch built: {} voxels -> {} quads",
        order.len(),
        mesh.quad_count()
    );
    BatchMeshCPU {
        mesh,
        bbox,
        voxels: order,
    }
}
