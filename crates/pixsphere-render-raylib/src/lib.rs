//! Raylib-based GPU side: window bootstrap, batch upload, scene, drawing.
// Unsafe is required for Raylib mesh/model upload operations in this crate.

mod draw;
mod scene;
mod upload;
mod window;

pub use draw::{OUTLINE_COLOR, draw_batch, draw_outlines};
pub use scene::RaylibScene;
pub use upload::{BatchPart, BatchRender, MAX_PART_VERTS, upload_batch_mesh};
pub use window::{WindowSpec, open_window};

pub mod conv {
    use pixsphere_geom::Vec3;

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }
}
