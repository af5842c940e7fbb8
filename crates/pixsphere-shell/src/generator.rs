use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use pixsphere_geom::Voxel;

use crate::index::ShellIndex;
use crate::params::{Radius, ShellParams};

/// Voxels emitted per chunk before the pass yields back to the frame loop.
pub const DEFAULT_CHUNK_BUDGET: usize = 2000;

/// Resume cursor of an in-progress pass over the positive octant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationState {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Suspended { next: GenerationState, emitted: usize },
    Finished { emitted: usize },
}

/// Runs the octant loops from `state` until more than `budget` voxels were
/// emitted or every `(x, y, z)` in `[0, radius]³` was visited.
///
/// For fixed `x, y >= 0` the distance grows with `z`, so the `z` loop stops at
/// the first point outside the sphere.
pub fn enumerate_chunk(
    params: &ShellParams,
    state: GenerationState,
    budget: usize,
    index: &mut ShellIndex,
) -> Progress {
    let r = params.radius;
    let GenerationState { mut x, mut y, mut z } = state;
    let mut emitted = 0usize;
    while x <= r {
        while y <= r {
            while z <= r {
                let dst = x * x + y * y + z * z;
                if params.in_band(dst) {
                    emitted += index.insert_reflections(Voxel::new(x, y, z));
                    if emitted > budget {
                        return Progress::Suspended {
                            next: GenerationState { x, y, z: z + 1 },
                            emitted,
                        };
                    }
                }
                if dst > params.squared_radius {
                    break;
                }
                z += 1;
            }
            z = 0;
            y += 1;
        }
        y = 0;
        x += 1;
    }
    Progress::Finished { emitted }
}

/// Shared cancellation flag for one generation pass.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// No pass in flight.
    Idle,
    Yielded { emitted: usize, total: usize },
    Completed { emitted: usize, total: usize },
    Cancelled,
}

struct Pass {
    state: GenerationState,
    token: CancelToken,
    chunks: u32,
    started: Instant,
}

/// Owns the shell index of one sphere and drives chunked passes over it.
pub struct ShellGenerator {
    radius: Radius,
    params: ShellParams,
    budget: usize,
    index: ShellIndex,
    pass: Option<Pass>,
}

impl ShellGenerator {
    pub fn new(radius: Radius) -> Self {
        Self {
            radius,
            params: ShellParams::new(radius),
            budget: DEFAULT_CHUNK_BUDGET,
            index: ShellIndex::new(radius),
            pass: None,
        }
    }

    pub fn with_chunk_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Sets radius and derived constants. Cancels an in-flight pass; the
    /// index is only replaced by the next `generate`.
    pub fn configure(&mut self, radius: Radius) {
        self.cancel();
        self.radius = radius;
        self.params = ShellParams::new(radius);
    }

    #[inline]
    pub fn radius(&self) -> Radius {
        self.radius
    }

    #[inline]
    pub fn params(&self) -> &ShellParams {
        &self.params
    }

    #[inline]
    pub fn chunk_budget(&self) -> usize {
        self.budget
    }

    #[inline]
    pub fn index(&self) -> &ShellIndex {
        &self.index
    }

    pub fn is_generating(&self) -> bool {
        self.pass.as_ref().is_some_and(|p| !p.token.is_cancelled())
    }

    /// Clears the index and starts a new pass at the origin. Any previous
    /// pass is cancelled first. The returned token cancels the new pass.
    pub fn generate(&mut self) -> CancelToken {
        self.cancel();
        self.index.reset(self.radius);
        let token = CancelToken::new();
        self.pass = Some(Pass {
            state: GenerationState::default(),
            token: token.clone(),
            chunks: 0,
            started: Instant::now(),
        });
        log::debug!(
            "shell pass started: radius={} budget={}",
            self.params.radius,
            self.budget
        );
        token
    }

    pub fn cancel(&mut self) {
        if let Some(pass) = self.pass.take() {
            pass.token.cancel();
            log::debug!(
                "shell pass cancelled after {} chunks ({} voxels)",
                pass.chunks,
                self.index.len()
            );
        }
    }

    /// Processes one chunk of the current pass.
    pub fn step(&mut self) -> StepOutcome {
        let Some(pass) = self.pass.as_mut() else {
            return StepOutcome::Idle;
        };
        if pass.token.is_cancelled() {
            self.pass = None;
            return StepOutcome::Cancelled;
        }
        pass.chunks += 1;
        match enumerate_chunk(&self.params, pass.state, self.budget, &mut self.index) {
            Progress::Suspended { next, emitted } => {
                pass.state = next;
                log::trace!(
                    "shell chunk {} yielded at ({},{},{}) emitted={}",
                    pass.chunks,
                    next.x,
                    next.y,
                    next.z,
                    emitted
                );
                StepOutcome::Yielded {
                    emitted,
                    total: self.index.len(),
                }
            }
            Progress::Finished { emitted } => {
                self.index.mark_complete();
                log::info!(
                    "shell radius={} complete: {} voxels in {} buckets, {} chunks, {} ms",
                    self.params.radius,
                    self.index.len(),
                    self.index.buckets().count(),
                    pass.chunks,
                    pass.started.elapsed().as_millis()
                );
                self.pass = None;
                StepOutcome::Completed {
                    emitted,
                    total: self.index.len(),
                }
            }
        }
    }

    /// Runs a fresh pass to the end; returns the voxel count.
    pub fn generate_blocking(&mut self) -> usize {
        self.generate();
        loop {
            match self.step() {
                StepOutcome::Completed { total, .. } => return total,
                StepOutcome::Yielded { .. } => {}
                StepOutcome::Idle | StepOutcome::Cancelled => return self.index.len(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen_for(r: u32) -> ShellGenerator {
        ShellGenerator::new(Radius::new(r).unwrap())
    }

    #[test]
    fn radius_four_contains_poles_and_excludes_inner_points() {
        let mut g = gen_for(4);
        g.generate_blocking();
        let idx = g.index();
        assert!(idx.is_complete());
        for v in Voxel::new(0, 0, 4).reflections() {
            assert!(idx.contains(v), "{v:?} missing");
        }
        for v in Voxel::new(0, 0, 3).reflections() {
            assert!(idx.contains(v), "{v:?} missing");
        }
        for v in Voxel::new(0, 0, 2).reflections() {
            assert!(!idx.contains(v), "{v:?} should be inside the shell");
        }
        assert!(!idx.contains(Voxel::new(0, 0, 5)));
    }

    #[test]
    fn chunked_pass_yields_then_completes() {
        let mut g = gen_for(20).with_chunk_budget(100);
        g.generate();
        assert!(g.is_generating());
        let mut yields = 0;
        loop {
            match g.step() {
                StepOutcome::Yielded { emitted, .. } => {
                    assert!(emitted > 100);
                    assert!(!g.index().is_complete());
                    yields += 1;
                }
                StepOutcome::Completed { total, .. } => {
                    assert_eq!(total, g.index().len());
                    break;
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(yields > 0);
        assert!(!g.is_generating());
        assert_eq!(g.step(), StepOutcome::Idle);
    }

    #[test]
    fn cancelled_token_stops_the_pass() {
        let mut g = gen_for(30).with_chunk_budget(50);
        let token = g.generate();
        assert!(matches!(g.step(), StepOutcome::Yielded { .. }));
        let before = g.index().len();
        token.cancel();
        assert!(!g.is_generating());
        assert_eq!(g.step(), StepOutcome::Cancelled);
        assert_eq!(g.step(), StepOutcome::Idle);
        assert_eq!(g.index().len(), before);
        assert!(!g.index().is_complete());
    }

    #[test]
    fn new_generate_cancels_previous_token() {
        let mut g = gen_for(10).with_chunk_budget(10);
        let first = g.generate();
        g.step();
        let second = g.generate();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(g.index().is_empty());
    }

    #[test]
    fn configure_cancels_and_keeps_old_index_until_generate() {
        let mut g = gen_for(6);
        g.generate_blocking();
        let old = g.index().len();
        let token = g.generate();
        g.configure(Radius::new(9).unwrap());
        assert!(token.is_cancelled());
        assert_eq!(g.params().radius, 9);
        g.generate_blocking();
        assert_eq!(g.index().radius().get(), 9);
        assert!(g.index().len() > old);
    }
}
