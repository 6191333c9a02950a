//! Where pages come from.
//!
//! The collection doesn't know which endpoint it is paging through. Each
//! list view hands it a [`PageSource`] that turns a [`PageRequest`] into one
//! page of items. The skip/limit bookkeeping stays in one place; only the
//! query differs per view.

use std::future::Future;

use crate::PageRequest;

/// Fetches one page of items for a list view.
///
/// # Trait bounds
///
/// - `Send + Sync` → a source can be shared by the page loader that seeds
///   the first page and the scroll handler that loads the rest.
/// - The returned future is `Send` so feeds can be driven from any Tokio
///   worker thread.
///
/// # Example
///
/// ```rust
/// use linkshelf_paginate::{PageRequest, PageSource};
///
/// /// Serves the numbers 0..total, one page at a time.
/// struct Numbers {
///     total: usize,
/// }
///
/// impl PageSource<usize> for Numbers {
///     type Error = std::convert::Infallible;
///
///     async fn fetch_page(
///         &self,
///         request: PageRequest,
///     ) -> Result<Vec<usize>, Self::Error> {
///         let end = (request.skip + request.limit).min(self.total);
///         Ok((request.skip.min(end)..end).collect())
///     }
/// }
/// ```
pub trait PageSource<T>: Send + Sync {
    /// The error a failed fetch produces. Passed through to the caller
    /// untouched; the collection never retries.
    type Error: Send;

    /// Fetches the items at `request.skip .. request.skip + request.limit`.
    ///
    /// Returning fewer than `request.limit` items (including none) tells the
    /// collection that the end of the list has been reached.
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send;
}

/// Adapts an async closure into a [`PageSource`].
///
/// Created by [`page_fn`].
#[derive(Clone, Copy)]
pub struct FnSource<F>(F);

/// Wraps `f` so it can be used anywhere a [`PageSource`] is expected.
///
/// ```rust
/// use linkshelf_paginate::{page_fn, Collection, PageRequest};
///
/// # tokio_test(async {
/// let source = page_fn(|request: PageRequest| async move {
///     Ok::<_, String>((request.skip..request.skip + 3).collect::<Vec<_>>())
/// });
/// let collection = Collection::initial(5, &source).await.unwrap();
/// assert_eq!(collection.items(), &[0, 1, 2]);
/// assert!(!collection.has_more());
/// # });
/// # fn tokio_test<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
pub fn page_fn<F>(f: F) -> FnSource<F> {
    FnSource(f)
}

impl<T, E, F, Fut> PageSource<T> for FnSource<F>
where
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, E>> + Send,
    E: Send,
{
    type Error = E;

    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Vec<T>, E>> + Send {
        (self.0)(request)
    }
}
