use std::sync::Arc;
use std::time::Instant;

use crate::analysis::cashflow::FinancingInputs;
use crate::config::DEFAULT_CARD_COUNT;
use crate::data::cache::{DatasetCache, DatasetSource, Snapshot};
use crate::data::filter::{filtered_indices, summarize, FilterCriteria, Summary};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub cache: DatasetCache,

    /// Snapshot the current view was computed from.
    pub snapshot: Option<Arc<Snapshot>>,

    /// Set when the cache could not produce a snapshot.
    pub load_error: Option<LoadError>,

    pub filters: FilterCriteria,

    pub financing: FinancingInputs,

    /// How many listing cards are rendered.
    pub max_cards: usize,

    /// Indices of listings passing the current filters, best yield first.
    pub visible_indices: Vec<usize>,

    pub summary: Summary,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(cache: DatasetCache) -> Self {
        Self {
            cache,
            snapshot: None,
            load_error: None,
            filters: FilterCriteria::default(),
            financing: FinancingInputs::default(),
            max_cards: DEFAULT_CARD_COUNT,
            visible_indices: Vec::new(),
            summary: summarize(&Default::default(), &[]),
            status_message: None,
        }
    }

    /// Ask the cache for the current snapshot; recompute the view if the
    /// cache handed out a different one.
    pub fn poll(&mut self) {
        self.poll_at(Instant::now());
    }

    pub fn poll_at(&mut self, now: Instant) {
        match self.cache.get_at(now) {
            Ok(snapshot) => {
                self.load_error = None;
                let unchanged = self
                    .snapshot
                    .as_ref()
                    .is_some_and(|current| Arc::ptr_eq(current, &snapshot));
                if !unchanged {
                    self.set_snapshot(snapshot);
                }
            }
            Err(e) => {
                if self.load_error.as_ref() != Some(&e) {
                    log::error!("{e}");
                }
                self.snapshot = None;
                self.visible_indices.clear();
                self.summary = summarize(&Default::default(), &[]);
                self.load_error = Some(e);
            }
        }
    }

    /// Ingest a freshly loaded snapshot. City selections that no longer
    /// exist in the new data are dropped.
    pub fn set_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        let localities = &snapshot.dataset.localities;
        self.filters.cities.retain(|c| localities.contains(c));
        self.snapshot = Some(snapshot);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        if let Some(snap) = &self.snapshot {
            self.visible_indices = filtered_indices(&snap.dataset, &self.filters);
            self.summary = summarize(&snap.dataset, &self.visible_indices);
        }
    }

    /// Drop the cached snapshot; the next poll re-reads the source.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.poll();
    }

    /// Switch to an explicitly chosen file.
    pub fn open_file(&mut self, source: DatasetSource) {
        self.cache.set_source(source);
        self.poll();
        if let Some(e) = &self.load_error {
            self.status_message = Some(format!("Error: {e}"));
        }
    }

    pub fn toggle_city(&mut self, city: &str) {
        if !self.filters.cities.remove(city) {
            self.filters.cities.insert(city.to_string());
        }
        self.refilter();
    }
}
