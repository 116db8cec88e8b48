//! Distributes eligible matches over a fixed pool of workers.
//!
//! A single producer polls the catalog and feeds a bounded queue, the workers share its
//! receiving end. Matches that are queued or currently being processed are never queued a
//! second time.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use analysis::ParserConfig;
use common::MatchId;
use tokio::sync::{mpsc, Mutex};

use crate::catalog::{self, MatchCatalog, MatchRef};
use crate::results::ResultStore;
use crate::storage::RecordingStorage;
use crate::{worker, Config, IngestError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub processed: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
struct Counters {
    processed: AtomicUsize,
    failed: AtomicUsize,
}

impl Counters {
    fn stats(&self) -> Stats {
        Stats {
            processed: self.processed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}

pub struct Scheduler {
    catalog: Arc<dyn MatchCatalog>,
    storage: Box<dyn RecordingStorage>,
    results: Arc<dyn ResultStore>,
    parser: ParserConfig,
    workers: usize,
    queue_depth: usize,
    poll_interval: Duration,
    parse_timeout: Duration,
}

impl Scheduler {
    pub fn new(
        config: &Config,
        catalog: Arc<dyn MatchCatalog>,
        storage: Box<dyn RecordingStorage>,
        results: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            catalog,
            storage,
            results,
            parser: config.parser_config(),
            workers: usize::from(config.workers).max(1),
            queue_depth: usize::from(config.queue_depth).max(1),
            poll_interval: config.poll_interval(),
            parse_timeout: config.parse_timeout(),
        }
    }

    /// Polls the catalog until `shutdown` completes, or only once if `once` is set. Returns
    /// after every queued match was handled.
    pub async fn run<F>(&self, once: bool, shutdown: F) -> Stats
    where
        F: Future<Output = ()>,
    {
        let (tx, rx) = mpsc::channel::<MatchRef>(self.queue_depth);
        let rx = Arc::new(Mutex::new(rx));
        let in_flight = Arc::new(Mutex::new(HashSet::<MatchId>::new()));
        let counters = Arc::new(Counters::default());

        let mut workers = tokio::task::JoinSet::new();
        for worker_id in 0..self.workers {
            let ctx = WorkerContext {
                storage: self.storage.duplicate(),
                results: self.results.clone(),
                catalog: self.catalog.clone(),
                parser: self.parser.clone(),
                parse_timeout: self.parse_timeout,
                in_flight: in_flight.clone(),
                counters: counters.clone(),
            };
            workers.spawn(ctx.run(worker_id, rx.clone()));
        }

        tokio::pin!(shutdown);

        'poll: loop {
            let eligible = match catalog::parseable(
                self.catalog.as_ref(),
                self.results.as_ref(),
                self.parser.parser_version,
            )
            .await
            {
                Ok(e) => e,
                Err(e) => {
                    tracing::error!(%e, "Listing recordings");
                    Vec::new()
                }
            };

            let mut queued = 0;
            for recording in eligible {
                if !in_flight.lock().await.insert(recording.id) {
                    continue;
                }

                tokio::select! {
                    res = tx.send(recording) => {
                        if let Err(e) = res {
                            tracing::error!(match_id = %e.0.id, "Workers stopped accepting matches");
                            break 'poll;
                        }
                        queued += 1;
                    }
                    _ = &mut shutdown => {
                        tracing::info!("Shutting down, no more matches are queued");
                        break 'poll;
                    }
                };
            }
            tracing::debug!(queued, "Polled recordings");

            if once {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = &mut shutdown => {
                    tracing::info!("Shutting down");
                    break;
                }
            };
        }

        drop(tx);

        while let Some(res) = workers.join_next().await {
            if let Err(e) = res {
                tracing::error!(%e, "Worker task failed");
            }
        }

        let stats = counters.stats();
        tracing::info!(processed = stats.processed, failed = stats.failed, "Workers finished");
        stats
    }
}

struct WorkerContext {
    storage: Box<dyn RecordingStorage>,
    results: Arc<dyn ResultStore>,
    catalog: Arc<dyn MatchCatalog>,
    parser: ParserConfig,
    parse_timeout: Duration,
    in_flight: Arc<Mutex<HashSet<MatchId>>>,
    counters: Arc<Counters>,
}

impl WorkerContext {
    #[tracing::instrument(name = "worker", skip(self, rx))]
    async fn run(self, worker_id: usize, rx: Arc<Mutex<mpsc::Receiver<MatchRef>>>) {
        loop {
            let next = rx.lock().await.recv().await;
            let recording = match next {
                Some(r) => r,
                None => break,
            };

            let result = worker::process(
                self.storage.as_ref(),
                self.results.as_ref(),
                &self.parser,
                &recording,
                self.parse_timeout,
            )
            .await;

            match result {
                Ok(_) => {
                    self.counters.processed.fetch_add(1, Ordering::SeqCst);
                }
                Err(e) => {
                    self.counters.failed.fetch_add(1, Ordering::SeqCst);
                    self.failed(&recording, e).await;
                }
            };

            self.in_flight.lock().await.remove(&recording.id);
        }

        tracing::debug!("Queue closed");
    }

    async fn failed(&self, recording: &MatchRef, error: IngestError) {
        match error {
            // The store might recover, the match is retried on the next poll
            IngestError::Store(e) => {
                tracing::error!(match_id = %recording.id, %e, "Storing result");
            }
            // A later copy of the recording might be complete
            IngestError::Parse(e @ analysis::ParseError::IncompleteStream { .. }) => {
                tracing::warn!(match_id = %recording.id, %e, "Recording is incomplete");
            }
            other => {
                tracing::error!(match_id = %recording.id, e = %other, "Processing match");
                self.catalog.mark_unavailable(recording).await;
            }
        };
    }
}
