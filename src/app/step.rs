use pixsphere_runtime::PumpOutcome;
use pixsphere_ui::{PanelEvent, PointerInput};
use raylib::prelude::*;

use super::App;
use crate::camera::OrbitCamera;
use crate::event::Event;

impl App {
    pub fn step(&mut self) {
        let screen_w = self.scene.rl.get_screen_width();
        let rl = &self.scene.rl;
        let pointer = PointerInput {
            pos: rl.get_mouse_position(),
            pressed: rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
            down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
            released: rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT),
        };

        let over_panel = self.panel.captures_pointer(pointer.pos, screen_w);
        if pointer.pressed {
            self.ui_grab = over_panel;
        }
        for ev in self.panel.handle_pointer(&pointer, screen_w) {
            self.emit_panel_event(ev);
        }
        self.collect_keyboard();

        let orbit = OrbitCamera::input_from(&self.scene.rl, over_panel || self.ui_grab);
        self.cam.update(orbit);
        if pointer.released {
            self.ui_grab = false;
        }

        // Commands first so a new radius is configured before the chunk runs.
        self.process_events();
        self.pump_generation();
        self.process_events();

        self.queue.advance_tick();
        let stale = self.queue.count_stale_events();
        if stale > 0 {
            log::error!(
                target: "events",
                "Detected {} stale event(s) in past tick buckets",
                stale
            );
        }
    }

    fn emit_panel_event(&mut self, ev: PanelEvent) {
        let kind = match ev {
            PanelEvent::RadiusChanged(value) => Event::RadiusPreviewed { value },
            PanelEvent::RadiusCommitted(value) => Event::RadiusCommitted { value },
            PanelEvent::SliceChanged(display) => {
                log::trace!("slice slider at {}", display);
                return;
            }
            PanelEvent::SliceCommitted(display) => Event::SliceCommitted { display },
            PanelEvent::ShowFull => Event::ViewResetRequested,
        };
        self.queue.emit_now(kind);
    }

    fn collect_keyboard(&mut self) {
        let rl = &self.scene.rl;
        let mut out: Vec<PanelEvent> = Vec::new();
        if rl.is_key_pressed(KeyboardKey::KEY_EQUAL) || rl.is_key_pressed(KeyboardKey::KEY_KP_ADD) {
            out.extend(self.panel.step_radius(1));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_MINUS)
            || rl.is_key_pressed(KeyboardKey::KEY_KP_SUBTRACT)
        {
            out.extend(self.panel.step_radius(-1));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT_BRACKET) {
            out.extend(self.panel.step_slice(1));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT_BRACKET) {
            out.extend(self.panel.step_slice(-1));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            out.push(PanelEvent::ShowFull);
        }
        let toggles = [
            (KeyboardKey::KEY_F, Event::WireframeToggled),
            (KeyboardKey::KEY_G, Event::GridToggled),
            (KeyboardKey::KEY_F3, Event::DebugOverlayToggled),
        ];
        for (key, ev) in toggles {
            if rl.is_key_pressed(key) {
                self.queue.emit_now(ev);
            }
        }
        for ev in out {
            self.emit_panel_event(ev);
        }
    }

    fn pump_generation(&mut self) {
        match self.runtime.pump(&mut self.view, &mut self.scene) {
            Ok(PumpOutcome::Progressed { emitted, total }) => {
                self.queue
                    .emit_now(Event::GenerationProgressed { emitted, total });
            }
            Ok(PumpOutcome::Completed {
                total,
                elapsed_ms,
                cut,
            }) => {
                self.queue.emit_now(Event::GenerationCompleted {
                    total,
                    elapsed_ms,
                    cut,
                });
            }
            Ok(PumpOutcome::Idle) | Ok(PumpOutcome::Cancelled) => {}
            Err(e) => {
                log::error!("generation finished but could not be shown: {}", e);
                self.stats.progress = None;
            }
        }
    }

    fn process_events(&mut self) {
        while let Some(env) = self.queue.pop_ready() {
            self.handle_event(env);
        }
    }
}
