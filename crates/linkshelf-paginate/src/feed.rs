//! Scroll-driven "load more" handling.
//!
//! In a live view, "load more" isn't called by straight-line code; it's
//! fired by an intersection observer every time the sentinel at the bottom
//! of the list scrolls into view. Those signals can arrive while the previous
//! page is still on its way. A [`Feed`] makes that safe:
//!
//! - At most one fetch is in flight. A trigger that arrives while one is
//!   pending is ignored ([`Trigger::Busy`]), because the next offset is read
//!   before the fetch and written after it.
//! - A trigger while the list is exhausted is a no-op ([`Trigger::Exhausted`]).
//! - If the view reloads or navigates away ([`Feed::abandon`]) while a fetch
//!   is pending, the late result is thrown away ([`Trigger::Discarded`]).
//! - A trigger while a reload is pending is ignored ([`Trigger::Busy`]); the
//!   cursor it would read is about to be replaced.
//!
//! # Locking
//!
//! The collection sits behind a `tokio::sync::Mutex`, but the lock is only
//! held to read the next request and to append the result, never across the
//! network call. The in-flight flag is a separate atomic so a dropped
//! trigger future still releases it.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{Collection, PageSource};

/// What happened to a single "load more" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A page was fetched and this many items were appended.
    Loaded(usize),

    /// Another load is still in flight; this signal was ignored.
    Busy,

    /// The list is exhausted; nothing was fetched.
    Exhausted,

    /// The feed was reloaded or abandoned before the fetch finished, so the
    /// result was dropped without touching the collection.
    Discarded,
}

struct Shared<T> {
    collection: Mutex<Collection<T>>,
    in_flight: AtomicBool,
    /// Bumped on every reload/abandon. A fetch only lands if the generation
    /// it started under is still current.
    generation: AtomicU64,
    abandoned: AtomicBool,
    /// Reloads currently fetching their first page.
    reloading: AtomicUsize,
}

/// A cloneable handle to one view's paginated collection.
///
/// Clones share the same collection, so the scroll handler and the render
/// loop can each hold one.
pub struct Feed<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Releases the in-flight flag when the trigger finishes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Counts a pending reload until it finishes or is dropped.
struct Reloading<'a>(&'a AtomicUsize);

impl<'a> Reloading<'a> {
    fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::AcqRel);
        Self(count)
    }
}

impl Drop for Reloading<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<T: Send> Feed<T> {
    /// Wraps an already-seeded collection.
    pub fn new(collection: Collection<T>) -> Self {
        Self {
            shared: Arc::new(Shared {
                collection: Mutex::new(collection),
                in_flight: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                abandoned: AtomicBool::new(false),
                reloading: AtomicUsize::new(0),
            }),
        }
    }

    /// Handles one "load more" signal.
    ///
    /// # Errors
    /// Whatever the source returns for a live feed. Errors for a feed that
    /// was reloaded or abandoned mid-fetch are swallowed as
    /// [`Trigger::Discarded`]; nobody is listening for them.
    pub async fn trigger<S>(&self, source: &S) -> Result<Trigger, S::Error>
    where
        S: PageSource<T>,
    {
        if self.is_abandoned() {
            return Ok(Trigger::Discarded);
        }

        if self
            .shared
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::trace!("load more ignored, fetch already in flight");
            return Ok(Trigger::Busy);
        }
        let _guard = InFlight(&self.shared.in_flight);

        if self.shared.reloading.load(Ordering::Acquire) > 0 {
            tracing::trace!("load more ignored, reload in flight");
            return Ok(Trigger::Busy);
        }

        let (request, generation) = {
            let collection = self.shared.collection.lock().await;
            let Some(request) = collection.next_request() else {
                return Ok(Trigger::Exhausted);
            };
            (request, self.shared.generation.load(Ordering::Acquire))
        };

        let result = source.fetch_page(request).await;

        let mut collection = self.shared.collection.lock().await;
        if self.is_stale(generation) {
            tracing::debug!(
                skip = request.skip,
                "discarding page for a reloaded or abandoned feed"
            );
            return Ok(Trigger::Discarded);
        }

        let page = result?;
        match collection.append(request, page) {
            Some(appended) => Ok(Trigger::Loaded(appended)),
            None => Ok(Trigger::Discarded),
        }
    }

    /// Replaces the collection with a freshly fetched first page.
    ///
    /// Any load still in flight is discarded when it lands. Returns `false`
    /// if the feed was abandoned (or reloaded again) while this reload was
    /// fetching, in which case nothing was replaced.
    ///
    /// # Errors
    /// Whatever the source returns; the old collection is kept on error.
    pub async fn reload<S>(&self, source: &S) -> Result<bool, S::Error>
    where
        S: PageSource<T>,
    {
        let _reloading = Reloading::enter(&self.shared.reloading);
        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let limit = self.shared.collection.lock().await.limit();

        let fresh = Collection::initial(limit, source).await?;

        let mut collection = self.shared.collection.lock().await;
        if self.is_stale(generation) {
            return Ok(false);
        }
        *collection = fresh;
        Ok(true)
    }

    /// Detaches the feed from its view (e.g. on navigation away).
    ///
    /// Pending fetches are discarded when they land and later triggers are
    /// no-ops. The items loaded so far stay readable.
    pub fn abandon(&self) {
        self.shared.abandoned.store(true, Ordering::Release);
        self.shared.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// `true` once [`abandon`](Self::abandon) has been called.
    pub fn is_abandoned(&self) -> bool {
        self.shared.abandoned.load(Ordering::Acquire)
    }

    /// `true` while a trigger or a reload is waiting on its fetch.
    pub fn is_loading(&self) -> bool {
        self.shared.in_flight.load(Ordering::Acquire)
            || self.shared.reloading.load(Ordering::Acquire) > 0
    }

    /// Whether another trigger could fetch anything.
    pub async fn has_more(&self) -> bool {
        !self.is_abandoned() && self.shared.collection.lock().await.has_more()
    }

    /// Number of items loaded so far.
    pub async fn len(&self) -> usize {
        self.shared.collection.lock().await.len()
    }

    /// Runs `f` against the current collection.
    pub async fn with_collection<R>(&self, f: impl FnOnce(&Collection<T>) -> R) -> R {
        f(&*self.shared.collection.lock().await)
    }

    /// A copy of every item loaded so far.
    pub async fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.shared.collection.lock().await.items().to_vec()
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.is_abandoned() || self.shared.generation.load(Ordering::Acquire) != generation
    }
}
