//! Application state container.
//!
//! The [`Store`] owns one [`Slot`] per feature. It is created once and
//! shared (usually behind an `Arc`) with whatever needs to read or drive
//! state; there is no global instance.
//!
//! Each slot fences its requests: [`Slot::begin`] hands out a [`Ticket`]
//! for the request it starts, and [`Slot::settle`] only applies the outcome
//! if no newer request (or clear) has happened since. Responses from
//! superseded requests are dropped instead of overwriting newer state.

pub mod library;
pub mod qa;
pub mod search;
pub mod uploader;

use tokio::sync::RwLock;
use tracing::debug;

pub use library::{LibraryEvent, LibraryState, LibraryUpdate};
pub use qa::{QaEvent, QaState};
pub use search::{Pagination, SearchEvent, SearchState};
pub use uploader::{UploaderEvent, UploaderState};

/// Error stored when a failure arrives without a message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A feature's state and the closed set of events that change it.
pub trait Reducer: Clone + Default + Send + Sync + 'static {
    type Event: std::fmt::Debug + Send;

    /// Slice name used in logs.
    const NAME: &'static str;

    fn reduce(&mut self, event: Self::Event);

    /// Whether applying `event` invalidates requests already in flight.
    fn supersedes_in_flight(event: &Self::Event) -> bool;
}

/// Identifies the request a slot is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

#[derive(Default)]
struct Fenced<S> {
    state: S,
    generation: u64,
}

/// One feature's state behind a lock, with request fencing.
pub struct Slot<S: Reducer> {
    inner: RwLock<Fenced<S>>,
}

impl<S: Reducer> Default for Slot<S> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Fenced::default()),
        }
    }
}

impl<S: Reducer> Slot<S> {
    /// Apply a synchronous mutator such as a query change or clear.
    pub async fn dispatch(&self, event: S::Event) {
        let mut inner = self.inner.write().await;
        if S::supersedes_in_flight(&event) {
            inner.generation += 1;
        }
        inner.state.reduce(event);
    }

    /// Apply a start event and return the ticket for the new request.
    pub async fn begin(&self, event: S::Event) -> Ticket {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.state.reduce(event);
        Ticket {
            generation: inner.generation,
        }
    }

    /// Apply a request's outcome if its ticket is still current.
    ///
    /// Returns `false` when the outcome was dropped as stale.
    pub async fn settle(&self, ticket: Ticket, event: S::Event) -> bool {
        let mut inner = self.inner.write().await;
        if inner.generation != ticket.generation {
            debug!(
                "{}: dropping outcome of request {} (current is {})",
                S::NAME,
                ticket.generation,
                inner.generation
            );
            return false;
        }
        inner.state.reduce(event);
        true
    }

    /// Whether `ticket` still identifies the latest request.
    pub async fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.read().await.generation == ticket.generation
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> S {
        self.inner.read().await.state.clone()
    }

    /// Run a read accessor against the current state.
    pub async fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.read().await.state)
    }
}

/// Every feature's state.
#[derive(Default)]
pub struct Store {
    pub search: Slot<SearchState>,
    pub qa: Slot<QaState>,
    pub uploader: Slot<UploaderState>,
    pub library: Slot<LibraryState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Error text for a failure, never empty.
pub(crate) fn failure_text(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}
