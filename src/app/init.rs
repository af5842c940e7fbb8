use pixsphere_render_raylib::RaylibScene;
use pixsphere_runtime::Runtime;
use pixsphere_slice::SliceView;
use pixsphere_ui::ControlPanel;

use super::{App, SessionStats, ViewToggles};
use crate::camera::OrbitCamera;
use crate::config::PixsphereConfig;
use crate::event::EventQueue;

impl App {
    pub fn new(scene: RaylibScene, runtime: Runtime, cfg: &PixsphereConfig) -> Self {
        let limits = runtime.limits();
        let panel = ControlPanel::new(runtime.radius().get(), limits.min, limits.max);
        let cam = OrbitCamera::new(&cfg.camera);
        log::info!(
            "app ready: radius={} slice range=[1, {}] camera distance={} fov={}",
            runtime.radius(),
            runtime.slice_max(),
            cam.distance,
            cam.fov
        );
        Self {
            view: SliceView::new(),
            scene,
            runtime,
            panel,
            queue: EventQueue::new(),
            cam,
            toggles: ViewToggles::default(),
            stats: SessionStats::default(),
            ui_grab: false,
        }
    }

    pub fn run(&mut self) {
        while !self.scene.rl.window_should_close() {
            self.step();
            self.render();
        }
        log::info!(
            "window closed after {} passes, {} events",
            self.stats.passes,
            self.stats.evt_processed_total
        );
    }
}
