//! Cooperative driver for one sphere session: radius and slice commands,
//! chunked generation pumped once per frame, status text.
#![forbid(unsafe_code)]

use std::time::Instant;

use pixsphere_shell::{
    DEFAULT_CHUNK_BUDGET, Radius, ShellError, ShellGenerator, ShellIndex, StepOutcome,
};
use pixsphere_slice::{Scene, SliceError, SliceView};
use thiserror::Error;

pub const GENERATING_MESSAGE: &str = "Generating ...";
pub const SLOW_MESSAGE: &str = "This may take a while...";
pub const FAILED_MESSAGE: &str = "Could not display the sphere";

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("radius {value} is outside the control range [{min}, {max}]")]
    RadiusOutOfRange { value: u32, min: u32, max: u32 },
    #[error(transparent)]
    Shell(#[from] ShellError),
    #[error(transparent)]
    Slice(#[from] SliceError),
}

/// Hidden, or visible with a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusText {
    #[default]
    Hidden,
    Visible(String),
}

impl StatusText {
    pub fn message(&self) -> Option<&str> {
        match self {
            StatusText::Hidden => None,
            StatusText::Visible(m) => Some(m.as_str()),
        }
    }
}

/// Radius range accepted from the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadiusLimits {
    pub min: u32,
    pub max: u32,
    /// Radii at or above this show the slow-generation warning.
    pub warn_at: u32,
}

impl Default for RadiusLimits {
    fn default() -> Self {
        Self {
            min: 4,
            max: 75,
            warn_at: 50,
        }
    }
}

impl RadiusLimits {
    pub fn check(&self, value: u32) -> Result<Radius, RuntimeError> {
        if value < self.min || value > self.max {
            return Err(RuntimeError::RadiusOutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(Radius::new(value)?)
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceRequest {
    Applied { y: i32 },
    /// Generation still running; applied when it completes.
    Deferred { display: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpOutcome {
    Idle,
    Progressed { emitted: usize, total: usize },
    Completed { total: usize, elapsed_ms: u64, cut: Option<i32> },
    Cancelled,
}

pub struct Runtime {
    generator: ShellGenerator,
    limits: RadiusLimits,
    pending_slice: Option<u32>,
    status: StatusText,
    ready: bool,
    // Last completion could not be shown; the next successful view hides the status.
    show_failed: bool,
    pass_started: Instant,
}

impl Runtime {
    /// Validates `initial` and starts the first generation pass.
    pub fn new(
        initial: u32,
        limits: RadiusLimits,
        chunk_budget: usize,
    ) -> Result<Self, RuntimeError> {
        let radius = limits.check(initial)?;
        let mut generator = ShellGenerator::new(radius).with_chunk_budget(chunk_budget);
        generator.generate();
        log::info!(
            "runtime started: radius={} range=[{}, {}] chunk_budget={}",
            radius,
            limits.min,
            limits.max,
            chunk_budget
        );
        Ok(Self {
            generator,
            limits,
            pending_slice: None,
            status: StatusText::Visible(GENERATING_MESSAGE.to_string()),
            ready: false,
            show_failed: false,
            pass_started: Instant::now(),
        })
    }

    pub fn with_defaults(initial: u32) -> Result<Self, RuntimeError> {
        Self::new(initial, RadiusLimits::default(), DEFAULT_CHUNK_BUDGET)
    }

    /// Radius slider moved but not released: stop the running pass.
    pub fn preview_radius(&mut self) {
        if self.generator.is_generating() {
            self.generator.cancel();
        }
        self.status = StatusText::Visible(GENERATING_MESSAGE.to_string());
    }

    /// Radius slider released. Returns the new slice maximum (`2·radius`).
    pub fn commit_radius<S: Scene>(
        &mut self,
        value: u32,
        view: &mut SliceView<S>,
        scene: &mut S,
    ) -> Result<u32, RuntimeError> {
        let radius = self.limits.check(value)?;
        let message = if value >= self.limits.warn_at {
            SLOW_MESSAGE
        } else {
            GENERATING_MESSAGE
        };
        self.status = StatusText::Visible(message.to_string());
        self.show_failed = false;
        view.discard(scene);
        self.pending_slice = None;
        self.generator.configure(radius);
        self.generator.generate();
        self.pass_started = Instant::now();
        log::info!("radius committed: {}", radius);
        Ok(self.slice_max())
    }

    /// Slice slider released. Applied now, or queued while the index is
    /// incomplete so a partial shell is never shown.
    pub fn commit_slice<S: Scene>(
        &mut self,
        display: u32,
        view: &mut SliceView<S>,
        scene: &mut S,
    ) -> Result<SliceRequest, RuntimeError> {
        if !self.generator.index().is_complete() {
            let max = self.slice_max();
            if display == 0 || display > max {
                return Err(SliceError::SliceOutOfRange {
                    value: display,
                    max,
                }
                .into());
            }
            self.pending_slice = Some(display);
            log::debug!("slice {} deferred until generation completes", display);
            return Ok(SliceRequest::Deferred { display });
        }
        let y = view.reveal_up_to(scene, self.generator.index(), display)?;
        self.clear_failure();
        Ok(SliceRequest::Applied { y })
    }

    /// Back to the uncut sphere. Returns false when deferred to completion.
    pub fn show_full<S: Scene>(
        &mut self,
        view: &mut SliceView<S>,
        scene: &mut S,
    ) -> Result<bool, RuntimeError> {
        self.pending_slice = None;
        if !self.generator.index().is_complete() {
            return Ok(false);
        }
        view.rebuild_full(scene, self.generator.index())?;
        self.clear_failure();
        Ok(true)
    }

    fn clear_failure(&mut self) {
        if std::mem::take(&mut self.show_failed) {
            self.status = StatusText::Hidden;
        }
    }

    /// Runs one chunk of the current pass. On completion the queued slice,
    /// or else the full sphere, is uploaded and the status is hidden. The
    /// session is ready even when that upload fails; the status then shows
    /// [`FAILED_MESSAGE`] until a later view succeeds.
    pub fn pump<S: Scene>(
        &mut self,
        view: &mut SliceView<S>,
        scene: &mut S,
    ) -> Result<PumpOutcome, RuntimeError> {
        match self.generator.step() {
            StepOutcome::Idle => Ok(PumpOutcome::Idle),
            StepOutcome::Cancelled => Ok(PumpOutcome::Cancelled),
            StepOutcome::Yielded { emitted, total } => {
                Ok(PumpOutcome::Progressed { emitted, total })
            }
            StepOutcome::Completed { total, .. } => {
                if !self.ready {
                    log::info!("first shell ready; render loop active");
                }
                self.ready = true;
                let elapsed_ms = self.pass_started.elapsed().as_millis() as u64;
                let index = self.generator.index();
                let shown = match self.pending_slice.take() {
                    Some(display) => view.reveal_up_to(scene, index, display).map(Some),
                    None => view.rebuild_full(scene, index).map(|()| None),
                };
                match shown {
                    Ok(cut) => {
                        self.show_failed = false;
                        self.status = StatusText::Hidden;
                        Ok(PumpOutcome::Completed {
                            total,
                            elapsed_ms,
                            cut,
                        })
                    }
                    Err(e) => {
                        self.show_failed = true;
                        self.status = StatusText::Visible(FAILED_MESSAGE.to_string());
                        Err(e.into())
                    }
                }
            }
        }
    }

    #[inline]
    pub fn status(&self) -> &StatusText {
        &self.status
    }

    /// True after the first pass completed.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn is_generating(&self) -> bool {
        self.generator.is_generating()
    }

    #[inline]
    pub fn radius(&self) -> Radius {
        self.generator.radius()
    }

    #[inline]
    pub fn slice_max(&self) -> u32 {
        self.generator.params().slice_max()
    }

    #[inline]
    pub fn index(&self) -> &ShellIndex {
        self.generator.index()
    }

    #[inline]
    pub fn pending_slice(&self) -> Option<u32> {
        self.pending_slice
    }

    #[inline]
    pub fn limits(&self) -> RadiusLimits {
        self.limits
    }
}
