//! Background request with a pollable result.
//!
//! A `Query<T>` runs its fetcher on the tokio runtime and hands the outcome
//! back to the event loop through a channel, so the UI never blocks on I/O.
//!
//! # Example
//!
//! ```ignore
//! let client = joke_client.clone();
//! let mut query = Query::new(move || {
//!     let client = client.clone();
//!     async move { client.random_joke().await.map_err(|e| e.to_string()) }
//! });
//!
//! query.fetch();
//!
//! // In event loop tick
//! if let Some(result) = query.poll() {
//!     // apply result, trigger re-render
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use tokio::sync::oneshot;

/// A boxed future that returns a Result<T, String>
type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;

/// A factory function that creates futures for fetching data
type FetcherFn<T> = Box<dyn Fn() -> BoxFuture<T> + Send + Sync>;

pub struct Query<T> {
  fetcher: FetcherFn<T>,
  receiver: Option<oneshot::Receiver<Result<T, String>>>,
}

impl<T: Send + 'static> Query<T> {
  /// Create a new query with the given fetcher function.
  ///
  /// The fetcher is called each time `fetch()` starts a request.
  pub fn new<F, Fut>(fetcher: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    Self {
      fetcher: Box::new(move || Box::pin(fetcher())),
      receiver: None,
    }
  }

  /// Whether a request is in flight.
  pub fn is_loading(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start a request unless one is already in flight.
  ///
  /// Returns `false` if the call was ignored.
  pub fn fetch(&mut self) -> bool {
    if self.is_loading() {
      return false;
    }
    self.start_fetch();
    true
  }

  /// Take the result of the in-flight request if it has finished.
  ///
  /// Call this in your event loop tick handler.
  pub fn poll(&mut self) -> Option<Result<T, String>> {
    let receiver = self.receiver.as_mut()?;

    match receiver.try_recv() {
      Ok(result) => {
        self.receiver = None;
        Some(result)
      }
      Err(oneshot::error::TryRecvError::Empty) => None,
      Err(oneshot::error::TryRecvError::Closed) => {
        // Task ended without sending (panicked or aborted)
        self.receiver = None;
        Some(Err("Request was cancelled".to_string()))
      }
    }
  }

  fn start_fetch(&mut self) {
    let (tx, rx) = oneshot::channel();
    self.receiver = Some(rx);

    let future = (self.fetcher)();
    tokio::spawn(async move {
      let result = future.await;
      // Receiver is gone once the app has exited
      let _ = tx.send(result);
    });
  }
}

impl<T> std::fmt::Debug for Query<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("loading", &self.receiver.is_some())
      .finish_non_exhaustive()
  }
}
