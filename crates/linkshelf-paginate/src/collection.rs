//! The growable list behind a paginated view.
//!
//! A [`Collection`] is seeded with the first page (usually during server
//! rendering) and then grows one page at a time. It only ever appends:
//! items already on screen never move or disappear because of paging.
//!
//! ```text
//!   initial()           load_more()            load_more()
//!  skip=0, got 20  ──→  skip=20, got 20  ──→  skip=40, got 7  ──→ exhausted
//!   has_more ✓            has_more ✓            has_more ✗
//! ```

use serde::{Deserialize, Serialize};

use crate::PageSource;

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// One page worth of cursor: "give me `limit` items starting at `skip`".
///
/// Serializes as the `{ "skip": .., "limit": .. }` body every list endpoint
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub skip: usize,
    pub limit: usize,
}

impl PageRequest {
    /// The request for the first page of a list.
    pub fn first(limit: usize) -> Self {
        Self { skip: 0, limit }
    }

    /// The request that follows this one.
    pub fn next(self) -> Self {
        Self {
            skip: self.skip + self.limit,
            limit: self.limit,
        }
    }
}

// ---------------------------------------------------------------------------
// LoadOutcome
// ---------------------------------------------------------------------------

/// What a call to [`Collection::load_more`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and this many items were appended (may be 0 when
    /// the backend runs out exactly on a page boundary).
    Appended(usize),

    /// The previous page was short, so nothing was fetched.
    Exhausted,
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// An append-only, skip/limit paginated list of `T`.
///
/// `load_more` takes `&mut self`, so the borrow checker already rules out
/// two loads racing on the same collection. Views that receive triggers from
/// shared event handlers should wrap the collection in a
/// [`Feed`](crate::Feed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
    limit: usize,
    /// Offset of the most recently fetched page.
    skip: usize,
    /// Item count returned by the most recent fetch.
    last_fetched: usize,
}

impl<T> Collection<T> {
    /// Hydrates a collection from a first page that was already fetched,
    /// e.g. during server rendering.
    pub fn from_first_page(items: Vec<T>, limit: usize) -> Self {
        let last_fetched = items.len();
        Self {
            items,
            limit,
            skip: 0,
            last_fetched,
        }
    }

    /// Fetches the first page (`skip = 0`) and seeds a new collection.
    ///
    /// Always builds a fresh collection, so calling it twice with the same
    /// source gives the same result as calling it once.
    ///
    /// # Errors
    /// Whatever the source returns; nothing is retried.
    pub async fn initial<S>(limit: usize, source: &S) -> Result<Self, S::Error>
    where
        S: PageSource<T>,
    {
        let request = PageRequest::first(limit);
        let items = source.fetch_page(request).await?;
        tracing::debug!(limit, fetched = items.len(), "first page loaded");
        Ok(Self::from_first_page(items, limit))
    }

    /// Fetches the next page and appends it.
    ///
    /// When [`has_more`](Self::has_more) is false this is a no-op that
    /// returns [`LoadOutcome::Exhausted`] without calling the source.
    ///
    /// # Errors
    /// Whatever the source returns. On error the collection is left exactly
    /// as it was: no partial append, `skip` unchanged.
    pub async fn load_more<S>(
        &mut self,
        source: &S,
    ) -> Result<LoadOutcome, S::Error>
    where
        S: PageSource<T>,
    {
        let Some(request) = self.next_request() else {
            tracing::trace!(skip = self.skip, "load_more ignored, list exhausted");
            return Ok(LoadOutcome::Exhausted);
        };

        let page = source.fetch_page(request).await?;
        // `&mut self` pins the cursor across the fetch, so the page always fits.
        Ok(self.append(request, page).map_or(LoadOutcome::Exhausted, LoadOutcome::Appended))
    }

    /// The request `load_more` would send, or `None` if the list is
    /// exhausted.
    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_more().then(|| self.current_request().next())
    }

    /// Records a fetched page for `request`.
    ///
    /// Returns `None` and leaves the collection untouched if `request` is
    /// not the one [`next_request`](Self::next_request) would send now,
    /// i.e. the page was fetched against a different state of the list.
    pub(crate) fn append(&mut self, request: PageRequest, page: Vec<T>) -> Option<usize> {
        if self.next_request() != Some(request) {
            tracing::debug!(
                skip = request.skip,
                expected = ?self.next_request(),
                "rejecting page fetched for another cursor"
            );
            return None;
        }

        let fetched = page.len();
        self.items.extend(page);
        self.skip = request.skip;
        self.last_fetched = fetched;

        tracing::debug!(
            skip = self.skip,
            limit = self.limit,
            fetched,
            total = self.items.len(),
            "page appended"
        );
        Some(fetched)
    }

    /// `true` if the most recent page was full, meaning more items may exist.
    ///
    /// A page of zero items, or fewer than `limit`, ends the list. A
    /// zero `limit` never has more.
    pub fn has_more(&self) -> bool {
        self.limit > 0 && self.last_fetched > 0 && self.last_fetched >= self.limit
    }

    /// All items loaded so far, in fetch order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the collection, returning its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of items loaded so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if no items have been loaded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Offset of the most recently fetched page.
    pub fn skip(&self) -> usize {
        self.skip
    }

    /// How many items the most recent fetch returned.
    pub fn last_fetched(&self) -> usize {
        self.last_fetched
    }

    fn current_request(&self) -> PageRequest {
        PageRequest {
            skip: self.skip,
            limit: self.limit,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
