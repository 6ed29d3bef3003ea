/// The prefetch coordinator
///
/// Owns the readiness cache for the whole book and enforces the loading
/// policy: the pages of the first visible spread resolve first, behind a
/// one-way gate; everything else fills in from a background batch. The
/// navigator only ever reads the cache — it never writes it.
///
/// The cache keys on locator value, not page index, so a book that reuses
/// the same filler image on ten pages fetches it once.

use iced::futures::future::BoxFuture;
use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::prefetch::fetcher::PageFetcher;
use crate::state::catalog::PageLocator;

/// Outcome of one page resolution.
///
/// `Failed` still counts as settled: the page renders a broken-image
/// placeholder, but it never blocks the gate and never disables
/// navigation. No automatic retries.
#[derive(Debug, Clone)]
pub enum Resolution {
    Ready(Handle),
    Failed(String),
}

/// De-duplicating page prefetcher with a priority gate.
///
/// Settled entries are monotonic: once a locator is recorded it is never
/// removed or replaced, so readiness only ever grows.
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    /// Locator -> final resolution, success or failure
    settled: HashMap<PageLocator, Resolution>,
    /// Locators with an outstanding fetch
    in_flight: HashSet<PageLocator>,
    /// Priority-batch members that have not settled yet
    gate_pending: HashSet<PageLocator>,
    /// One-way: flips to true when the priority batch has fully settled
    gate_open: bool,
}

impl Coordinator {
    /// Create a coordinator whose gate waits on `priority` — the locators
    /// of the initially visible pages. The gate opens once every one of
    /// them has settled (ready or failed), and never closes again.
    pub fn new(fetcher: Arc<dyn PageFetcher>, priority: Vec<PageLocator>) -> Self {
        let gate_pending: HashSet<PageLocator> = priority.into_iter().collect();
        let gate_open = gate_pending.is_empty();

        Coordinator {
            fetcher,
            settled: HashMap::new(),
            in_flight: HashSet::new(),
            gate_pending,
            gate_open,
        }
    }

    /// Whether the first visible spread may render real imagery yet
    pub fn initial_batch_ready(&self) -> bool {
        self.gate_open
    }

    /// The recorded resolution for a locator, if it has settled
    pub fn resolution(&self, locator: &PageLocator) -> Option<&Resolution> {
        self.settled.get(locator)
    }

    pub fn is_settled(&self, locator: &PageLocator) -> bool {
        self.settled.contains_key(locator)
    }

    /// Number of settled pages (covers duplicates once)
    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// Start resolving one locator.
    ///
    /// Returns a future yielding the locator and its resolution, to be
    /// fed back through `record`. Returns `None` when the locator is
    /// already settled or already in flight — two resolves never issue
    /// two underlying fetches.
    pub fn resolve(
        &mut self,
        locator: &PageLocator,
    ) -> Option<BoxFuture<'static, (PageLocator, Resolution)>> {
        if self.settled.contains_key(locator) || self.in_flight.contains(locator) {
            return None;
        }

        self.in_flight.insert(locator.clone());

        let fetch = self.fetcher.fetch(locator);
        let locator = locator.clone();
        Some(Box::pin(async move {
            let resolution = match fetch.await {
                Ok(handle) => Resolution::Ready(handle),
                // Swallowed here: a fetch error becomes a displayable
                // per-page state, never a component-level error.
                Err(err) => Resolution::Failed(err.to_string()),
            };
            (locator, resolution)
        }))
    }

    /// Start resolving many locators, de-duplicated, issued in iteration
    /// order. Each item settles independently — one failure never aborts
    /// the rest of the batch.
    pub fn batch(
        &mut self,
        locators: impl IntoIterator<Item = PageLocator>,
    ) -> Vec<BoxFuture<'static, (PageLocator, Resolution)>> {
        locators
            .into_iter()
            .filter_map(|locator| self.resolve(&locator))
            .collect()
    }

    /// Record a settlement.
    ///
    /// Returns `true` for the single settlement that opens the gate, so
    /// the caller knows when to kick off the background batch.
    pub fn record(&mut self, locator: PageLocator, resolution: Resolution) -> bool {
        self.in_flight.remove(&locator);
        self.gate_pending.remove(&locator);
        // or_insert keeps the set monotonic if a stray duplicate arrives
        self.settled.entry(locator).or_insert(resolution);

        if !self.gate_open && self.gate_pending.is_empty() {
            self.gate_open = true;
            return true;
        }
        false
    }
}
