use pixsphere_render_raylib::{draw_batch, draw_outlines};
use pixsphere_ui::StatusBanner;
use raylib::prelude::*;

use super::App;

impl App {
    pub fn render(&mut self) {
        let camera3d = self.cam.to_camera3d();
        let screen = (
            self.scene.rl.get_screen_width(),
            self.scene.rl.get_screen_height(),
        );
        let mouse = self.scene.rl.get_mouse_position();
        let uploads = self.scene.uploads();
        let mut d = self.scene.rl.begin_drawing(&self.scene.thread);
        d.clear_background(Color::WHITE);

        let mut draw_calls = 0usize;
        {
            let mut d3 = d.begin_mode3D(camera3d);
            if self.toggles.grid {
                d3.draw_grid(64, 1.0);
            }
            // Nothing is drawn until the first pass has completed.
            if self.runtime.is_ready() {
                if let Some(batch) = self.view.batch() {
                    draw_calls += draw_batch(&mut d3, batch, self.toggles.wireframe);
                }
                draw_outlines(&mut d3, self.view.outlines());
            }
        }
        self.stats.draw_calls = draw_calls;

        // HUD
        let cut = match self.view.cut() {
            Some(y) => format!("y <= {}", y),
            None => "full".to_string(),
        };
        let hud = format!(
            "radius {} | {} voxels indexed | {} shown | cut {}",
            self.runtime.radius(),
            self.runtime.index().len(),
            self.view.visible_voxels(),
            cut
        );
        d.draw_text(&hud, 12, 12, 18, Color::DARKGRAY);
        d.draw_text(
            "drag rotate, wheel zoom | +/- radius, [/] slice, R full view | F wireframe, G grid, F3 stats",
            12,
            34,
            16,
            Color::GRAY,
        );
        if self.toggles.debug_overlay {
            let quads = self.view.batch().map_or(0, |b| b.quad_count);
            let verts = self.view.batch().map_or(0, |b| b.vertex_count());
            let last = match self.stats.last_pass_ms {
                Some(ms) => format!("{} ms", ms),
                None => "-".to_string(),
            };
            let progress = match self.stats.progress {
                Some(n) => format!("generating ({} so far)", n),
                None => "idle".to_string(),
            };
            let busiest = self
                .stats
                .evt_processed_by
                .iter()
                .max_by_key(|(_, n)| **n)
                .map(|(k, n)| format!("{} x{}", k, n))
                .unwrap_or_default();
            let lines = [
                format!(
                    "quads {} | vertices {} | draw calls {}",
                    quads, verts, self.stats.draw_calls
                ),
                format!(
                    "passes {} | last pass {} ({} voxels) | {}",
                    self.stats.passes, last, self.stats.last_total, progress
                ),
                format!(
                    "uploads {} | events {} processed, {} queued | most {}",
                    uploads,
                    self.stats.evt_processed_total,
                    self.queue.pending(),
                    busiest
                ),
            ];
            let mut y = 58;
            for line in &lines {
                d.draw_text(line, 12, y, 16, Color::DARKBLUE);
                y += 20;
            }
            d.draw_fps(12, y);
        }

        self.panel.draw(&mut d, screen.0, mouse);
        StatusBanner::draw(
            &mut d,
            &self.panel.theme,
            self.runtime.status().message(),
            screen,
        );
    }
}
