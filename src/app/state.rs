use std::collections::HashMap;

use pixsphere_render_raylib::RaylibScene;
use pixsphere_runtime::Runtime;
use pixsphere_slice::SliceView;
use pixsphere_ui::ControlPanel;

use crate::camera::OrbitCamera;
use crate::event::EventQueue;

pub struct App {
    // Field order matters: the view's GPU batches drop before the scene
    // closes the window.
    pub view: SliceView<RaylibScene>,
    pub scene: RaylibScene,
    pub runtime: Runtime,
    pub panel: ControlPanel,
    pub queue: EventQueue,
    pub cam: OrbitCamera,
    pub toggles: ViewToggles,
    pub stats: SessionStats,
    // pointer went down on the panel; camera ignores it until release
    pub(crate) ui_grab: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ViewToggles {
    pub wireframe: bool,
    pub grid: bool,
    pub debug_overlay: bool,
}

#[derive(Default)]
pub struct SessionStats {
    pub passes: u32,
    pub last_pass_ms: Option<u64>,
    pub last_total: usize,
    /// Voxels indexed so far while a pass is running.
    pub progress: Option<usize>,
    pub draw_calls: usize,
    pub evt_processed_total: usize,
    pub evt_processed_by: HashMap<&'static str, usize>,
}
