//! Run coordination across tenants.
//!
//! The coordinator fans tenant collection out with bounded concurrency and
//! puts the records back into credential order. One record comes out for
//! every credential that goes in.

use futures::stream::{self, StreamExt};
use sglimits_core::{CallFailure, Operation, RunResult, StatsWindow, TenantCredential, TenantRecord};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::collector::TenantCollector;
use crate::context::CollectSettings;
use crate::error::FetchError;
use crate::provider::QuotaAndStatsProvider;

// ============================================================================
// Run Coordinator
// ============================================================================

/// Runs tenant collection for every configured credential.
#[derive(Debug, Clone)]
pub struct RunCoordinator {
    collector: TenantCollector,
}

impl RunCoordinator {
    /// Creates a coordinator over the given provider.
    pub fn new(provider: Arc<dyn QuotaAndStatsProvider>, settings: CollectSettings) -> Self {
        Self {
            collector: TenantCollector::new(provider, settings),
        }
    }

    /// Returns the collection settings.
    pub fn settings(&self) -> &CollectSettings {
        self.collector.settings()
    }

    /// Collects all tenants over `window`.
    ///
    /// Records come back in credential order. If the run deadline elapses,
    /// in-flight calls are dropped and unfinished tenants get all-sentinel
    /// records.
    #[instrument(skip(self, credentials, window), fields(tenants = credentials.len()))]
    pub async fn run(&self, credentials: &[TenantCredential], window: StatsWindow) -> RunResult {
        let start = Instant::now();
        let settings = self.collector.settings();

        info!(
            start = %window.start_param(),
            end = %window.end_param(),
            concurrency = settings.tenant_concurrency,
            "Starting collection run"
        );

        let mut slots: Vec<Option<TenantRecord>> = credentials.iter().map(|_| None).collect();

        {
            let collector = &self.collector;
            let window = &window;
            let mut pending = stream::iter(credentials.iter().enumerate())
                .map(|(index, credential)| async move {
                    (index, collector.collect(credential, window).await)
                })
                .buffer_unordered(settings.tenant_concurrency.max(1));

            let drain = async {
                while let Some((index, record)) = pending.next().await {
                    slots[index] = Some(record);
                }
            };

            match settings.deadline {
                Some(deadline) => {
                    if tokio::time::timeout(deadline, drain).await.is_err() {
                        warn!(
                            deadline = ?deadline,
                            "Run deadline exceeded, cancelling in-flight calls"
                        );
                    }
                }
                None => drain.await,
            }
        }

        let deadline = settings.deadline.unwrap_or_default();
        let tenants: Vec<TenantRecord> = slots
            .into_iter()
            .zip(credentials)
            .map(|(slot, credential)| {
                slot.unwrap_or_else(|| {
                    TenantRecord::unavailable(
                        credential.name(),
                        CallFailure::new(
                            Operation::Deadline,
                            FetchError::DeadlineExceeded(deadline).to_string(),
                        ),
                    )
                })
            })
            .collect();

        let result = RunResult::new(tenants);
        info!(
            tenants = result.len(),
            failed_calls = result.failure_count(),
            duration = ?start.elapsed(),
            "Collection run finished"
        );
        result
    }
}
