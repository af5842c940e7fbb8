use std::collections::{BTreeMap, VecDeque};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    // Control panel and keyboard intents
    RadiusPreviewed { value: u32 },
    RadiusCommitted { value: u32 },
    SliceCommitted { display: u32 },
    ViewResetRequested,

    // View toggles
    WireframeToggled,
    GridToggled,
    DebugOverlayToggled,

    // Generation
    GenerationProgressed { emitted: usize, total: usize },
    GenerationCompleted {
        total: usize,
        elapsed_ms: u64,
        cut: Option<i32>,
    },
}

impl Event {
    pub fn label(&self) -> &'static str {
        match self {
            Event::RadiusPreviewed { .. } => "RadiusPreviewed",
            Event::RadiusCommitted { .. } => "RadiusCommitted",
            Event::SliceCommitted { .. } => "SliceCommitted",
            Event::ViewResetRequested => "ViewResetRequested",
            Event::WireframeToggled => "WireframeToggled",
            Event::GridToggled => "GridToggled",
            Event::DebugOverlayToggled => "DebugOverlayToggled",
            Event::GenerationProgressed { .. } => "GenerationProgressed",
            Event::GenerationCompleted { .. } => "GenerationCompleted",
        }
    }
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

pub struct EventQueue {
    // map of tick -> FIFO queue of events
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        self.emit_at(self.now, kind)
    }

    pub fn emit_at(&mut self, tick: u64, kind: Event) -> u64 {
        let id = self.alloc_id();
        let env = EventEnvelope { id, tick, kind };
        self.by_tick.entry(tick).or_default().push_back(env);
        id
    }

    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        let q = self.by_tick.get_mut(&self.now)?;
        q.pop_front()
    }

    pub fn advance_tick(&mut self) {
        if self.by_tick.get(&self.now).is_some_and(|q| q.is_empty()) {
            self.by_tick.remove(&self.now);
        }
        self.now = self.now.wrapping_add(1);
    }

    /// Events still sitting in buckets older than `now`; these never run.
    pub fn count_stale_events(&self) -> usize {
        self.by_tick.range(..self.now).map(|(_, q)| q.len()).sum()
    }

    pub fn pending(&self) -> usize {
        self.by_tick.values().map(|q| q.len()).sum()
    }
}
