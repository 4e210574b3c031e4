#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stats {
    callbacks_served: u64,
    callbacks_rejected: u64,
    callbacks_abandoned: u64,
    deadline_misses: u64,
    unexpected_events: u64,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_served(&mut self) {
        self.callbacks_served += 1;
    }

    pub(crate) fn record_rejected(&mut self) {
        self.callbacks_rejected += 1;
    }

    pub(crate) fn record_abandoned(&mut self) {
        self.callbacks_abandoned += 1;
    }

    pub(crate) fn record_deadline_miss(&mut self) {
        self.deadline_misses += 1;
    }

    pub(crate) fn record_unexpected(&mut self) {
        self.unexpected_events += 1;
    }

    /// Callbacks answered by the router.
    pub fn callbacks_served(&self) -> u64 {
        self.callbacks_served
    }

    /// Callbacks answered fail-closed because the backend was not connected.
    pub fn callbacks_rejected(&self) -> u64 {
        self.callbacks_rejected
    }

    /// Callbacks skipped because the caller had stopped waiting.
    pub fn callbacks_abandoned(&self) -> u64 {
        self.callbacks_abandoned
    }

    pub fn deadline_misses(&self) -> u64 {
        self.deadline_misses
    }

    pub fn unexpected_events(&self) -> u64 {
        self.unexpected_events
    }
}
