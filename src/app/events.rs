use pixsphere_runtime::SliceRequest;

use super::App;
use crate::event::{Event, EventEnvelope};

impl App {
    pub(super) fn handle_event(&mut self, env: EventEnvelope) {
        // Log a concise line for the processed event
        Self::log_event(env.tick, env.id, &env.kind);
        self.stats.evt_processed_total = self.stats.evt_processed_total.saturating_add(1);
        *self
            .stats
            .evt_processed_by
            .entry(env.kind.label())
            .or_insert(0) += 1;

        match env.kind {
            Event::RadiusPreviewed { .. } => {
                self.runtime.preview_radius();
            }
            Event::RadiusCommitted { value } => {
                self.handle_radius_committed(value);
            }
            Event::SliceCommitted { display } => {
                match self
                    .runtime
                    .commit_slice(display, &mut self.view, &mut self.scene)
                {
                    Ok(SliceRequest::Applied { y }) => {
                        log::debug!("slice {} revealed up to y={}", display, y);
                    }
                    Ok(SliceRequest::Deferred { display }) => {
                        log::debug!("slice {} queued behind generation", display);
                    }
                    Err(e) => log::warn!("slice {} not applied: {}", display, e),
                }
            }
            Event::ViewResetRequested => {
                match self.runtime.show_full(&mut self.view, &mut self.scene) {
                    Ok(applied) => {
                        if !applied {
                            log::debug!("full view follows when generation completes");
                        }
                        self.panel.reset_slice(self.runtime.slice_max());
                    }
                    Err(e) => log::warn!("full view failed: {}", e),
                }
            }
            Event::WireframeToggled => {
                self.toggles.wireframe = !self.toggles.wireframe;
            }
            Event::GridToggled => {
                self.toggles.grid = !self.toggles.grid;
            }
            Event::DebugOverlayToggled => {
                self.toggles.debug_overlay = !self.toggles.debug_overlay;
            }
            Event::GenerationProgressed { total, .. } => {
                self.stats.progress = Some(total);
            }
            Event::GenerationCompleted {
                total, elapsed_ms, ..
            } => {
                self.stats.passes += 1;
                self.stats.last_pass_ms = Some(elapsed_ms);
                self.stats.last_total = total;
                self.stats.progress = None;
            }
        }
    }

    fn handle_radius_committed(&mut self, value: u32) {
        match self
            .runtime
            .commit_radius(value, &mut self.view, &mut self.scene)
        {
            Ok(slice_max) => {
                self.panel.reset_slice(slice_max);
                self.stats.progress = Some(0);
            }
            Err(e) => {
                log::warn!("radius {} rejected: {}", value, e);
                // A preview may have cancelled the running pass; restart the
                // current radius so the view does not stay empty.
                let current = self.runtime.radius().get();
                self.panel.radius.set_value(current);
                if let Err(e) = self
                    .runtime
                    .commit_radius(current, &mut self.view, &mut self.scene)
                {
                    log::error!("restarting radius {} failed: {}", current, e);
                }
            }
        }
    }

    fn log_event(tick: u64, id: u64, ev: &Event) {
        use crate::event::Event as E;
        match ev {
            E::RadiusPreviewed { value } => {
                log::debug!(target: "events", "[tick {}] RadiusPreviewed value={}", tick, value);
            }
            E::RadiusCommitted { value } => {
                log::info!(target: "events", "[tick {}] RadiusCommitted value={}", tick, value);
            }
            E::SliceCommitted { display } => {
                log::info!(target: "events", "[tick {}] SliceCommitted display={}", tick, display);
            }
            E::ViewResetRequested => {
                log::info!(target: "events", "[tick {}] ViewResetRequested", tick);
            }
            E::WireframeToggled => {
                log::info!(target: "events", "[tick {}] WireframeToggled", tick);
            }
            E::GridToggled => {
                log::info!(target: "events", "[tick {}] GridToggled", tick);
            }
            E::DebugOverlayToggled => {
                log::info!(target: "events", "[tick {}] DebugOverlayToggled", tick);
            }
            E::GenerationProgressed { emitted, total } => {
                log::trace!(
                    target: "events",
                    "[tick {}] #{} GenerationProgressed emitted={} total={}",
                    tick,
                    id,
                    emitted,
                    total
                );
            }
            E::GenerationCompleted {
                total,
                elapsed_ms,
                cut,
            } => {
                log::info!(
                    target: "events",
                    "[tick {}] GenerationCompleted total={} elapsed={}ms cut={}",
                    tick,
                    total,
                    elapsed_ms,
                    match cut {
                        Some(y) => format!("y<={}", y),
                        None => "full".to_string(),
                    }
                );
            }
        }
    }
}
