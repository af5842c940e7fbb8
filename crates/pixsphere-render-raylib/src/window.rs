use std::panic::{AssertUnwindSafe, catch_unwind};

use pixsphere_slice::SceneError;

use crate::scene::RaylibScene;

#[derive(Clone, Debug)]
pub struct WindowSpec {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "pixsphere".to_string(),
            target_fps: 60,
        }
    }
}

/// Opens the native window and GL context.
///
/// Raylib aborts window creation by panicking when no display or GL driver is
/// available; that panic is caught and reported as `SurfaceUnavailable`.
pub fn open_window(spec: &WindowSpec) -> Result<RaylibScene, SceneError> {
    let built = catch_unwind(AssertUnwindSafe(|| {
        raylib::init()
            .size(spec.width, spec.height)
            .title(&spec.title)
            .resizable()
            .msaa_4x()
            .build()
    }));
    let (mut rl, thread) = built.map_err(|p| {
        let msg = p
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| p.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "window creation failed".to_string());
        SceneError::SurfaceUnavailable(msg)
    })?;
    if !rl.is_window_ready() {
        return Err(SceneError::SurfaceUnavailable(
            "window reported not ready".to_string(),
        ));
    }
    rl.set_target_fps(spec.target_fps);
    log::info!(
        "window {}x{} ready (target {} fps)",
        spec.width,
        spec.height,
        spec.target_fps
    );
    Ok(RaylibScene::new(rl, thread))
}
