use std::{
    ops::ControlFlow,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use tracing::{debug, info, warn};

use crate::{
    feed::{error::FeedError, source::StreamSource},
    reconcile::diff::reconcile_snapshot,
    stream::stream_model::LiveStream,
    trace::{logger::TraceLogger, trace::RefreshEvent},
};

/// Default auto-refresh period of the live list.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Granularity at which a sleeping poll loop notices the stop flag.
const STOP_CHECK: Duration = Duration::from_millis(250);

/// What one refresh did to the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSummary {
    pub ticket: u64,
    pub cycle: u64,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
    pub total: usize,
}

impl RefreshSummary {
    pub fn changed(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied(RefreshSummary),

    /// A fetch that started later was applied first; this one was dropped.
    Stale { ticket: u64 },
}

struct FeedState {
    streams: Vec<LiveStream>,
    last_applied: u64,
    cycle: u64,
}

/// The displayed live list, folded over fetched snapshots.
///
/// Each refresh takes a ticket before fetching. A fetch result is merged
/// only if no later ticket has been merged yet, so overlapping refreshes
/// can never move the list back to an older snapshot. A failed fetch
/// leaves the list untouched.
pub struct LiveFeed<S: StreamSource> {
    source: S,
    state: Mutex<FeedState>,
    tickets: AtomicU64,
    tracer: TraceLogger,
}

impl<S: StreamSource> LiveFeed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(FeedState {
                streams: vec![],
                last_applied: 0,
                cycle: 0,
            }),
            tickets: AtomicU64::new(0),
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    /// Snapshot of the displayed list.
    pub fn streams(&self) -> Vec<LiveStream> {
        self.lock_state().streams.clone()
    }

    /// Number of applied refreshes.
    pub fn cycles(&self) -> u64 {
        self.lock_state().cycle
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn refresh(&self) -> Result<RefreshOutcome, FeedError> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;

        let fetched = match self.source.fetch() {
            Ok(streams) => streams,
            Err(e) => {
                warn!(ticket, error = %e, "fetch failed, keeping current list");
                self.tracer
                    .log(&RefreshEvent::now(ticket, "failed").with_error(&e));
                return Err(e);
            }
        };

        let mut state = self.lock_state();

        if ticket < state.last_applied {
            debug!(ticket, applied = state.last_applied, "discarding stale snapshot");
            self.tracer.log(&RefreshEvent::now(ticket, "stale"));
            return Ok(RefreshOutcome::Stale { ticket });
        }

        let merged = reconcile_snapshot(&state.streams, &fetched);
        state.streams = merged.records;
        state.last_applied = ticket;
        state.cycle += 1;

        let summary = RefreshSummary {
            ticket,
            cycle: state.cycle,
            added: merged.added,
            removed: merged.removed,
            updated: merged.updated,
            total: state.streams.len(),
        };
        drop(state);

        info!(
            cycle = summary.cycle,
            added = summary.added.len(),
            removed = summary.removed.len(),
            updated = summary.updated.len(),
            total = summary.total,
            "live list refreshed"
        );
        self.tracer.log(
            &RefreshEvent::now(ticket, "applied")
                .with_cycle(summary.cycle)
                .with_changes(&summary.added, &summary.removed, &summary.updated)
                .with_total(summary.total),
        );

        Ok(RefreshOutcome::Applied(summary))
    }

    /// Refresh now, then every `interval`, until `stop` is raised or
    /// `on_cycle` breaks. Returns the number of refreshes attempted.
    pub fn poll<F>(&self, interval: Duration, stop: &AtomicBool, mut on_cycle: F) -> u64
    where
        F: FnMut(&Self, &Result<RefreshOutcome, FeedError>) -> ControlFlow<()>,
    {
        let mut attempts = 0;

        while !stop.load(Ordering::SeqCst) {
            let result = self.refresh();
            attempts += 1;

            if on_cycle(self, &result).is_break() {
                break;
            }

            let deadline = Instant::now() + interval;
            while !stop.load(Ordering::SeqCst) {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                std::thread::sleep(remaining.min(STOP_CHECK));
            }
        }

        debug!(attempts, "polling stopped");
        attempts
    }
}
