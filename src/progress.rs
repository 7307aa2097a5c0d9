use std::sync::Arc;

/// Where the filler episode numbers came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillerOrigin {
    /// Fetched from the given URL
    Remote { url: String },
    /// Supplied directly through configuration
    Precomputed,
}

/// Events emitted during collection synchronization for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Filler list is being fetched from URL
    FetchingFillerList { url: String },

    /// Filler episode numbers are known
    FillerListLoaded {
        origin: FillerOrigin,
        filler_count: usize,
    },

    /// Episode listing for the series is being requested
    FetchingInventory { series_id: String },

    /// An episode yielded no absolute episode number or has no
    /// identifier and is left out
    EpisodeUnmatched {
        item_id: Option<String>,
        /// Path or name the extraction was attempted on
        source: Option<String>,
    },

    /// A later episode claimed an absolute number already seen
    DuplicateAbsoluteNumber {
        absolute_number: u32,
        replaced_id: String,
        item_id: String,
    },

    /// Inventory mapping has been built
    InventoryLoaded {
        total_items: usize,
        matched_episodes: usize,
    },

    /// No episode could be mapped, nothing will be published
    InventoryEmpty { series_id: String },

    /// Episodes have been split into buckets
    BucketsReady {
        canon_count: usize,
        filler_count: usize,
        all_count: usize,
    },

    /// A create-collection request is about to be sent
    CreatingCollection { name: String, item_count: usize },

    /// A bucket was empty so no collection was created
    CollectionSkipped { name: String },

    /// The media server created a collection
    CollectionCreated {
        name: String,
        collection_id: Option<String>,
    },

    /// Sync operation completed
    SyncCompleted {
        created_count: usize,
        skipped_count: usize,
    },
}

/// Trait for reporting progress events during synchronization.
///
/// Implementations can use this to display progress, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

/// Reporter that keeps every event, for asserting on reported progress
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    events: std::sync::Mutex<Vec<ProgressEvent>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub(crate) fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ProgressReporter for RecordingReporter {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
