//! Debounced search worker.
//!
//! Query updates arrive on a channel. Each update restarts the quiet window;
//! when the window elapses the latest query is filtered once and the outcome
//! is published. A query equal to the last filtered one is not re-run.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};

use super::filter::{SearchFilter, SearchState};
use crate::builder::SettingsTree;
use crate::core::errors::{Result, SbrError};
use crate::model::entry::Entry;

/// One filter pass result.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: String,
    pub state: SearchState,
    pub entries: Vec<Arc<Entry>>,
}

/// Handle to a running debounce worker. Dropping it stops the worker.
#[derive(Debug)]
pub struct DebouncedSearch {
    queries: Option<Sender<String>>,
    results: Receiver<SearchOutcome>,
    join: Option<thread::JoinHandle<()>>,
}

impl DebouncedSearch {
    /// Start a worker filtering `tree` after `window` of quiet.
    pub fn spawn(tree: Arc<SettingsTree>, filter: SearchFilter, window: Duration) -> Result<Self> {
        let (query_tx, query_rx) = unbounded::<String>();
        let (result_tx, result_rx) = unbounded::<SearchOutcome>();

        let join = thread::Builder::new()
            .name("sbr-search".to_string())
            .spawn(move || {
                search_thread_main(&query_rx, &result_tx, &tree, filter, window);
            })
            .map_err(|source| SbrError::Runtime {
                details: format!("failed to spawn search thread: {source}"),
            })?;

        Ok(Self {
            queries: Some(query_tx),
            results: result_rx,
            join: Some(join),
        })
    }

    /// Replace the pending query and restart the quiet window.
    pub fn update(&self, query: impl Into<String>) -> Result<()> {
        let closed = SbrError::ChannelClosed {
            component: "search",
        };
        let Some(tx) = &self.queries else {
            return Err(closed);
        };
        tx.send(query.into()).map_err(|_| closed)
    }

    /// Outcomes, in the order they were produced.
    #[must_use]
    pub const fn results(&self) -> &Receiver<SearchOutcome> {
        &self.results
    }

    /// Wait up to `timeout` for the next outcome.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SearchOutcome> {
        self.results.recv_timeout(timeout).ok()
    }

    /// Stop accepting queries and wait for the worker to exit.
    ///
    /// A query still inside its window is dropped unfiltered.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        drop(self.queries.take());
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            log::error!("search thread panicked");
        }
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.stop();
    }
}

fn search_thread_main(
    queries: &Receiver<String>,
    results: &Sender<SearchOutcome>,
    tree: &SettingsTree,
    filter: SearchFilter,
    window: Duration,
) {
    let mut pending: Option<String> = None;
    let mut last_filtered: Option<String> = None;

    loop {
        let next = if pending.is_some() {
            queries.recv_timeout(window)
        } else {
            queries.recv().map_err(|_| RecvTimeoutError::Disconnected)
        };

        match next {
            Ok(query) => pending = Some(query),
            Err(RecvTimeoutError::Timeout) => {
                let Some(query) = pending.take() else {
                    continue;
                };
                if last_filtered.as_deref() == Some(query.as_str()) {
                    log::trace!("query {query:?} unchanged, skipping filter");
                    continue;
                }
                let outcome = SearchOutcome {
                    state: filter.state(&query),
                    entries: filter.filter(tree, &query),
                    query: query.clone(),
                };
                log::debug!(
                    "query {query:?}: {:?}, {} visible",
                    outcome.state,
                    outcome.entries.len()
                );
                last_filtered = Some(query);
                if results.send(outcome).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::source::MemorySource;
    use crate::store::MemoryStore;
    use serde_json::json;

    const WINDOW: Duration = Duration::from_millis(80);
    const WAIT: Duration = Duration::from_secs(2);

    fn tree() -> Arc<SettingsTree> {
        let source = MemorySource::new().with_file(
            "Root",
            vec![
                json!({"Type": "PSToggleSwitchSpecifier", "Title": "Wifi", "Key": "wifi"}),
                json!({"Type": "PSToggleSwitchSpecifier", "Title": "Bluetooth", "Key": "bt"}),
            ],
        );
        Arc::new(
            TreeBuilder::new(&source, Arc::new(MemoryStore::new()))
                .build("Root")
                .unwrap(),
        )
    }

    #[test]
    fn burst_collapses_to_last_query() {
        let search = DebouncedSearch::spawn(tree(), SearchFilter::default(), WINDOW).unwrap();
        for partial in ["b", "bl", "blu", "blue"] {
            search.update(partial).unwrap();
        }
        let outcome = search.recv_timeout(WAIT).expect("outcome");
        assert_eq!(outcome.query, "blue");
        assert_eq!(outcome.state, SearchState::Searching);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].key(), Some("bt"));
        assert!(search.recv_timeout(WINDOW * 3).is_none());
    }

    #[test]
    fn identical_query_is_not_refiltered() {
        let search = DebouncedSearch::spawn(tree(), SearchFilter::default(), WINDOW).unwrap();
        search.update("wifi").unwrap();
        assert!(search.recv_timeout(WAIT).is_some());
        search.update("wifi").unwrap();
        assert!(search.recv_timeout(WINDOW * 4).is_none());
        search.update("").unwrap();
        let outcome = search.recv_timeout(WAIT).expect("outcome");
        assert_eq!(outcome.state, SearchState::NotSearching);
        assert_eq!(outcome.entries.len(), 2);
    }

    #[test]
    fn shutdown_joins_and_closes_results() {
        let search = DebouncedSearch::spawn(tree(), SearchFilter::default(), WINDOW).unwrap();
        let results = search.results().clone();
        search.shutdown();
        assert!(results.recv_timeout(WAIT).is_err());
    }
}
