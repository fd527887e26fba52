//! Background search execution with Idle/Searching tracking.
//!
//! A submission spawns a worker thread that waits out the simulated latency,
//! queries the flight source, and reports back over a message channel. The
//! event loop picks results up with [`SearchState::poll`].

use anyhow::{bail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::source::FlightSource;
use crate::models::{FlightRecord, SearchCriteria};

/// Slice the worker sleeps for between cancellation checks.
const CANCEL_CHECK_INTERVAL: Duration = Duration::from_millis(25);

/// Search lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No search in flight
    Idle,
    /// Waiting for the flight source
    Searching,
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStatus::Idle => write!(f, "Idle"),
            SearchStatus::Searching => write!(f, "Searching..."),
        }
    }
}

/// Message sent from the worker thread to the event loop.
#[derive(Debug)]
pub struct SearchMessage {
    /// Submission this result belongs to
    pub generation: u64,
    /// Records from the source, or the failure description
    pub outcome: Result<Vec<FlightRecord>, String>,
}

/// Search state owned by the UI.
pub struct SearchState {
    /// Current status
    pub status: SearchStatus,
    /// Records from the most recent successful search
    pub flights: Vec<FlightRecord>,
    /// Failure description of the most recent search, if it failed
    pub last_error: Option<String>,
    /// Number of completed searches
    pub completed: u64,
    source: Arc<dyn FlightSource>,
    latency: Duration,
    generation: u64,
    receiver: Option<Receiver<SearchMessage>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchState {
    /// Creates an idle search state over a flight source.
    ///
    /// The source's records are loaded eagerly so results show before the first search.
    pub fn new(source: Arc<dyn FlightSource>, latency: Duration) -> Self {
        let flights = match source.query(&SearchCriteria::default()) {
            Ok(flights) => flights,
            Err(e) => {
                warn!("Initial flight load from {} failed: {e:#}", source.describe());
                Vec::new()
            }
        };

        Self {
            status: SearchStatus::Idle,
            flights,
            last_error: None,
            completed: 0,
            source,
            latency,
            generation: 0,
            receiver: None,
            cancel: None,
        }
    }

    /// Whether a search is in flight.
    pub fn is_searching(&self) -> bool {
        self.status == SearchStatus::Searching
    }

    /// Generation of the most recent submission (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Description of the configured flight source.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Submits a search.
    ///
    /// Refused with the validation message when required fields are missing.
    /// A submission while searching replaces the in-flight search; the older
    /// worker is cancelled and its result, if any, is discarded.
    pub fn submit(&mut self, criteria: &SearchCriteria) -> Result<u64> {
        if let Err(reason) = criteria.validate() {
            bail!(reason);
        }

        if self.is_searching() {
            info!("Replacing in-flight search #{}", self.generation);
        }
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        let (sender, receiver) = channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.receiver = Some(receiver);
        self.cancel = Some(Arc::clone(&cancel));
        self.status = SearchStatus::Searching;
        self.last_error = None;

        info!(
            "Search #{generation} submitted: {} -> {} on {} ({})",
            criteria.departure, criteria.destination, criteria.departure_date, criteria.cabin_class
        );

        let source = Arc::clone(&self.source);
        let latency = self.latency;
        let criteria = criteria.clone();
        thread::spawn(move || {
            run_search(&sender, &cancel, source.as_ref(), &criteria, latency, generation);
        });

        Ok(generation)
    }

    /// Polls the channel for a completed search.
    ///
    /// Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };

        match receiver.try_recv() {
            Ok(message) => self.handle_message(message),
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Worker exited without reporting (cancelled or panicked)
                self.receiver = None;
                self.cancel = None;
                if self.is_searching() {
                    self.status = SearchStatus::Idle;
                    self.last_error = Some("Search ended without a result".to_string());
                    return true;
                }
                false
            }
        }
    }

    /// Blocks until the in-flight search completes or `timeout` elapses.
    ///
    /// Used by the headless CLI. Returns true if the search completed.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_searching() {
            if Instant::now() >= deadline {
                return false;
            }
            if !self.poll() {
                thread::sleep(CANCEL_CHECK_INTERVAL);
            }
        }
        true
    }

    /// Applies a worker message. Stale generations are ignored.
    fn handle_message(&mut self, message: SearchMessage) -> bool {
        if message.generation != self.generation {
            debug!(
                "Discarding result of superseded search #{} (current #{})",
                message.generation, self.generation
            );
            return false;
        }

        match message.outcome {
            Ok(flights) => {
                info!("Search #{} returned {} flights", message.generation, flights.len());
                self.flights = flights;
                self.last_error = None;
            }
            Err(error) => {
                warn!("Search #{} failed: {error}", message.generation);
                self.last_error = Some(error);
            }
        }

        self.status = SearchStatus::Idle;
        self.completed += 1;
        self.receiver = None;
        self.cancel = None;
        true
    }

    /// Cancels any in-flight search and returns to Idle.
    ///
    /// After this no message from an earlier worker can reach the state.
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.store(true, Ordering::SeqCst);
            debug!("Cancelled search #{}", self.generation);
        }
        self.receiver = None;
        self.status = SearchStatus::Idle;
    }
}

impl Drop for SearchState {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchState")
            .field("status", &self.status)
            .field("flights", &self.flights.len())
            .field("last_error", &self.last_error)
            .field("generation", &self.generation)
            .field("source", &self.source.describe())
            .finish_non_exhaustive()
    }
}

/// Worker body: simulated latency, then the source query.
fn run_search(
    sender: &Sender<SearchMessage>,
    cancel: &AtomicBool,
    source: &dyn FlightSource,
    criteria: &SearchCriteria,
    latency: Duration,
    generation: u64,
) {
    let deadline = Instant::now() + latency;
    loop {
        if cancel.load(Ordering::SeqCst) {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(CANCEL_CHECK_INTERVAL.min(deadline - now));
    }

    let outcome = source.query(criteria).map_err(|e| format!("{e:#}"));
    if cancel.load(Ordering::SeqCst) {
        return;
    }
    // Receiver is gone after cancel or teardown
    let _ = sender.send(SearchMessage {
        generation,
        outcome,
    });
}
