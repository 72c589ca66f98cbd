//! View state for the home screen.
//!
//! Lifecycle:
//!
//! - `Loading`: initial phase, nothing fetched yet. Sections show a placeholder.
//! - `Loaded`: both lists arrived together.
//! - `Failed(reason)`: the latest fetch failed. Any lists from an earlier
//!   success stay visible; `retry` issues a new fetch.
//!
//! Re-entering the screen refetches without going back to `Loading`, so the
//! previous lists stay on screen until the new ones replace them. The
//! selected product is independent of all of this.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use verdant_types::{Effect, Modal, Product, ProductCollections};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeSection {
    #[default]
    Popular,
    Sustainable,
}

impl HomeSection {
    fn other(self) -> Self {
        match self {
            HomeSection::Popular => HomeSection::Sustainable,
            HomeSection::Sustainable => HomeSection::Popular,
        }
    }
}

/// Handle given to the task performing one fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub generation: u64,
    pub cancel: CancellationToken,
}

#[derive(Debug)]
pub struct HomeState {
    phase: LoadPhase,
    collections: ProductCollections,
    has_data: bool,
    selected_barcode: Option<String>,
    cursor_section: HomeSection,
    cursor_index: usize,
    mounted: bool,
    generation: u64,
    in_flight: Option<CancellationToken>,
    lifecycle: CancellationToken,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            collections: ProductCollections::default(),
            has_data: false,
            selected_barcode: None,
            cursor_section: HomeSection::Popular,
            cursor_index: 0,
            mounted: false,
            generation: 0,
            in_flight: None,
            lifecycle: CancellationToken::new(),
        }
    }

    /// First appearance. Requests the initial fetch exactly once.
    pub fn mount(&mut self) -> Vec<Effect> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        vec![Effect::FetchProducts]
    }

    /// The screen became visible again. Mounts on first call, refetches afterwards.
    pub fn on_focus(&mut self) -> Vec<Effect> {
        if !self.mounted {
            return self.mount();
        }
        vec![Effect::FetchProducts]
    }

    /// Tear down: cancels any in-flight fetch. Results arriving later are ignored.
    pub fn unmount(&mut self) {
        self.lifecycle.cancel();
        self.in_flight = None;
        self.mounted = false;
    }

    /// Start a fetch and hand out its ticket.
    ///
    /// A fetch already in flight is cancelled and its result will be ignored.
    /// The phase drops back to `Loading` only when there is nothing to show.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.generation += 1;
        let cancel = self.lifecycle.child_token();
        self.in_flight = Some(cancel.clone());
        if !self.has_data {
            self.phase = LoadPhase::Loading;
        }
        debug!(generation = self.generation, "home fetch started");
        FetchTicket {
            generation: self.generation,
            cancel,
        }
    }

    /// Apply a finished fetch. Returns `false` when the result was stale and dropped.
    pub fn apply_fetch(&mut self, generation: u64, result: Result<ProductCollections, String>) -> bool {
        if generation != self.generation || self.lifecycle.is_cancelled() {
            debug!(generation, current = self.generation, "dropping stale home fetch result");
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(collections) => {
                self.collections = collections;
                self.has_data = true;
                self.phase = LoadPhase::Loaded;
                self.clamp_cursor();
            }
            Err(reason) => {
                warn!(%reason, "home fetch failed");
                self.phase = LoadPhase::Failed(reason);
            }
        }
        true
    }

    /// A fetch task observed its cancellation.
    pub fn apply_cancelled(&mut self, generation: u64) {
        if generation == self.generation {
            self.in_flight = None;
        }
    }

    /// Re-issue the fetch after a failure. No-op while a fetch is running.
    pub fn retry(&mut self) -> Vec<Effect> {
        if !self.mounted || self.in_flight.is_some() {
            return Vec::new();
        }
        vec![Effect::FetchProducts]
    }

    pub fn select_product(&mut self, barcode: impl Into<String>) -> Vec<Effect> {
        let barcode = barcode.into();
        self.selected_barcode = Some(barcode.clone());
        vec![Effect::ShowModal(Modal::Product(barcode))]
    }

    /// Select whatever is under the cursor.
    pub fn select_at_cursor(&mut self) -> Vec<Effect> {
        match self.product_at_cursor().map(|product| product.barcode.clone()) {
            Some(barcode) => self.select_product(barcode),
            None => Vec::new(),
        }
    }

    pub fn close_modal(&mut self) {
        self.selected_barcode = None;
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }

    /// Placeholder copy replaces the lists only before anything has loaded.
    pub fn shows_placeholder(&self) -> bool {
        self.is_loading() && !self.has_data
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn popular_products(&self) -> &[Product] {
        &self.collections.popular
    }

    pub fn sustainable_products(&self) -> &[Product] {
        &self.collections.sustainable
    }

    pub fn selected_barcode(&self) -> Option<&str> {
        self.selected_barcode.as_deref()
    }

    pub fn find_product(&self, barcode: &str) -> Option<&Product> {
        self.collections.find(barcode)
    }

    pub fn cursor(&self) -> (HomeSection, usize) {
        (self.cursor_section, self.cursor_index)
    }

    pub fn products_in(&self, section: HomeSection) -> &[Product] {
        match section {
            HomeSection::Popular => self.popular_products(),
            HomeSection::Sustainable => self.sustainable_products(),
        }
    }

    pub fn product_at_cursor(&self) -> Option<&Product> {
        self.products_in(self.cursor_section).get(self.cursor_index)
    }

    /// Move within the focused section, wrapping at either end.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.products_in(self.cursor_section).len();
        if len == 0 {
            self.cursor_index = 0;
            return;
        }
        let len = len as isize;
        self.cursor_index = (self.cursor_index as isize + delta).rem_euclid(len) as usize;
    }

    pub fn switch_section(&mut self) {
        self.cursor_section = self.cursor_section.other();
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.products_in(self.cursor_section).len();
        self.cursor_index = self.cursor_index.min(len.saturating_sub(1));
    }
}
