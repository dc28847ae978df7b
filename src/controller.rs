//! Query orchestration: `Idle -> Loading -> {Display, Error}`.
//!
//! Every search takes a fresh token from a monotonically increasing
//! counter. A finished search only publishes its result if no newer search
//! has started since, so the last triggered search wins regardless of
//! which response arrives last.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::OpenMeteoClient;
use crate::constants::DEFAULT_CITY;
use crate::models::ViewModel;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Loading { city: String },
    Display(ViewModel),
    Error { message: String },
}

/// What happened to a single search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank input, or a retry with nothing to retry; no request was sent
    Ignored,
    /// A newer search started before this one finished; its result was dropped
    Superseded,
    /// The result became the visible state
    Committed(QueryState),
}

pub struct QueryController {
    client: OpenMeteoClient,
    latest_token: AtomicU64,
    last_query: Mutex<Option<String>>,
    state: watch::Sender<QueryState>,
}

impl QueryController {
    pub fn new(client: OpenMeteoClient) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self {
            client,
            latest_token: AtomicU64::new(0),
            last_query: Mutex::new(None),
            state,
        }
    }

    /// Current visible state
    pub fn current(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    /// Search for a city. Blank input is filtered here and never reaches
    /// the network.
    pub async fn search(&self, input: &str) -> SearchOutcome {
        let city = input.trim();
        if city.is_empty() {
            debug!("Ignoring blank search input");
            return SearchOutcome::Ignored;
        }

        *self
            .last_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(city.to_string());

        // Token and Loading are written under the same channel lock as the
        // commit below, so an older search can never publish Loading over a
        // newer search's result.
        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
            *state = QueryState::Loading {
                city: city.to_string(),
            };
        });
        info!("Search #{} for {}", token, city);

        let next = match self.client.lookup(city).await {
            Ok(view) => QueryState::Display(view),
            Err(e) => {
                warn!("Weather lookup for {} failed: {}", city, e);
                QueryState::Error {
                    message: e.user_message(),
                }
            }
        };

        // Only the latest token may commit.
        let committed = self.state.send_if_modified(|state| {
            if self.latest_token.load(Ordering::SeqCst) != token {
                return false;
            }
            *state = next.clone();
            true
        });

        if committed {
            SearchOutcome::Committed(next)
        } else {
            debug!("Discarding stale result of search #{} for {}", token, city);
            SearchOutcome::Superseded
        }
    }

    /// Re-run the most recent search
    pub async fn retry(&self) -> SearchOutcome {
        let last = self
            .last_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match last {
            Some(city) => self.search(&city).await,
            None => {
                debug!("Nothing to retry");
                SearchOutcome::Ignored
            }
        }
    }

    /// Search for the default city, as done once at startup
    pub async fn load_default(&self) -> SearchOutcome {
        self.search(DEFAULT_CITY).await
    }
}
