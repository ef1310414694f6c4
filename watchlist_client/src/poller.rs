//! Periodic refresh of the watchlist on a background thread.
//!
//! The worker owns the watchlist and the updater, so row state is only ever
//! touched from one thread. It runs a cycle immediately, then one per interval,
//! and publishes a snapshot of every row after each cycle.
//!
//! Shutdown:
//! - `PollerHandle::stop` signals the worker and joins it, handing the watchlist back.
//! - Dropping the handle signals the worker without waiting for it.
//! - The signal is observed between cycles; a cycle in progress always completes.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use log::{debug, info};
use watchlist_common::{Result, WatchlistError};

use crate::row::{RowSnapshot, Watchlist};
use crate::source::QuoteSource;
use crate::updater::WatchlistUpdater;

/// Starts polling loops.
pub struct Poller;

impl Poller {
    /// Spawn the polling worker.
    ///
    /// Returns `None` without spawning anything when `watchlist` has no rows.
    /// Snapshots are sent on `snapshot_tx`; a dropped receiver does not stop polling.
    pub fn start<S>(
        watchlist: Watchlist,
        updater: WatchlistUpdater<S>,
        interval: Duration,
        snapshot_tx: Sender<Vec<RowSnapshot>>,
    ) -> Option<PollerHandle>
    where
        S: QuoteSource + Send + 'static,
    {
        if watchlist.is_empty() {
            info!("Watchlist has no rows; polling not started");
            return None;
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let worker = thread::spawn(move || {
            run_loop(watchlist, updater, interval, stop_rx, snapshot_tx)
        });
        Some(PollerHandle {
            stop_tx,
            worker: Some(worker),
        })
    }
}

/// Handle to a running polling worker.
pub struct PollerHandle {
    stop_tx: Sender<()>,
    worker: Option<JoinHandle<Watchlist>>,
}

impl PollerHandle {
    /// Stop the worker, wait for it to exit and return the final watchlist.
    pub fn stop(mut self) -> Result<Watchlist> {
        let _ = self.stop_tx.try_send(());
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| WatchlistError::WorkerPanicked),
            None => Err(WatchlistError::WorkerPanicked),
        }
    }
}

/// Signals the worker without joining it. The signal is seen between cycles, so a
/// worker blocked on a slow request can outlive the handle until that request ends.
impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.try_send(());
    }
}

fn run_loop<S: QuoteSource>(
    mut watchlist: Watchlist,
    mut updater: WatchlistUpdater<S>,
    interval: Duration,
    stop_rx: Receiver<()>,
    snapshot_tx: Sender<Vec<RowSnapshot>>,
) -> Watchlist {
    info!(
        "Polling {} rows every {} ms",
        watchlist.len(),
        interval.as_millis()
    );
    let ticker = tick(interval);
    run_cycle(&mut watchlist, &mut updater, &snapshot_tx);

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => run_cycle(&mut watchlist, &mut updater, &snapshot_tx),
        }
    }
    info!("Polling loop stopping...");
    watchlist
}

fn run_cycle<S: QuoteSource>(
    watchlist: &mut Watchlist,
    updater: &mut WatchlistUpdater<S>,
    snapshot_tx: &Sender<Vec<RowSnapshot>>,
) {
    let report = updater.refresh_all(watchlist);
    debug!(
        "Cycle done: {} live, {} simulated, {} unavailable",
        report.live, report.simulated, report.unavailable
    );
    if snapshot_tx.send(watchlist.snapshot(Instant::now())).is_err() {
        debug!("Snapshot receiver dropped");
    }
}
