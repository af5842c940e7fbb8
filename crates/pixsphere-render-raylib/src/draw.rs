use pixsphere_geom::Voxel;
use raylib::prelude::*;

use crate::conv::vec3_to_rl;
use crate::upload::BatchRender;

pub const OUTLINE_COLOR: Color = Color::BLACK;
// Slightly larger than a cell so the wires sit outside the faces.
const OUTLINE_SIZE: f32 = 1.02;

/// Draws every part of the batch. Returns the number of draw calls issued.
pub fn draw_batch<D: RaylibDraw3D>(d3: &mut D, batch: &BatchRender, wireframe: bool) -> usize {
    for part in &batch.parts {
        if wireframe {
            d3.draw_model_wires(&part.model, Vector3::zero(), 1.0, Color::WHITE);
        } else {
            d3.draw_model(&part.model, Vector3::zero(), 1.0, Color::WHITE);
        }
    }
    batch.parts.len()
}

pub fn draw_outlines<D: RaylibDraw3D>(d3: &mut D, voxels: &[Voxel]) {
    for v in voxels {
        let center = vec3_to_rl(v.center());
        d3.draw_cube_wires(center, OUTLINE_SIZE, OUTLINE_SIZE, OUTLINE_SIZE, OUTLINE_COLOR);
    }
}
