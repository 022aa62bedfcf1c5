//! Long-lived background loops under one shutdown signal.
//!
//! Each [`Periodic`] job runs on its own interval timer. Every cycle runs as a
//! separate task so a panic ends only that cycle; the loop logs it and waits
//! for the next tick. Shutdown aborts a cycle in flight.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::error::EngineError;

/// A job the supervisor runs on a fixed period.
#[async_trait]
pub trait Periodic: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn period(&self) -> Duration;

    /// One full cycle. Failures are logged inside; nothing propagates.
    async fn run_once(&self);
}

/// Handle over the spawned loops.
pub struct Supervisor {
    shutdown_tx: broadcast::Sender<()>,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    #[must_use]
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            shutdown_tx,
            tasks: Vec::new(),
        }
    }

    /// Start `job` on its own loop.
    pub fn spawn(&mut self, job: Arc<dyn Periodic>) {
        let name = job.name();
        let shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(run_loop(job, shutdown_rx));
        tracing::info!(job = name, "background loop started");
        self.tasks.push((name, handle));
    }

    /// True while every spawned loop is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|(_, h)| !h.is_finished())
    }

    /// Signal shutdown and wait for every loop to exit.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Panicked` if a loop task itself did not exit
    /// cleanly.
    pub async fn stop(&mut self) -> Result<(), EngineError> {
        let _ = self.shutdown_tx.send(());
        let mut failure = None;
        for (name, handle) in self.tasks.drain(..) {
            if let Err(e) = handle.await {
                tracing::error!(job = name, error = %e, "background loop did not stop cleanly");
                failure = Some(EngineError::Panicked(format!("{name}: {e}")));
            }
        }
        tracing::info!("background loops stopped");
        failure.map_or(Ok(()), Err)
    }
}

async fn run_loop(job: Arc<dyn Periodic>, mut shutdown_rx: broadcast::Receiver<()>) {
    let name = job.name();
    let mut timer = interval(job.period());
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = timer.tick() => {}
        }

        let cycle_job = Arc::clone(&job);
        let mut cycle = tokio::spawn(async move { cycle_job.run_once().await });
        tokio::select! {
            _ = shutdown_rx.recv() => {
                cycle.abort();
                break;
            }
            joined = &mut cycle => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        tracing::error!(job = name, "cycle panicked, continuing on next tick");
                    }
                }
            }
        }
    }
    tracing::debug!(job = name, "background loop exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        runs: AtomicUsize,
        panic_on_first: bool,
    }

    #[async_trait]
    impl Periodic for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn period(&self) -> Duration {
            Duration::from_millis(10)
        }

        async fn run_once(&self) {
            let run = self.runs.fetch_add(1, Ordering::SeqCst);
            assert!(!(self.panic_on_first && run == 0), "first cycle blows up");
        }
    }

    async fn wait_for_runs(job: &Counter, at_least: usize) {
        for _ in 0..200 {
            if job.runs.load(Ordering::SeqCst) >= at_least {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job ran fewer than {at_least} times");
    }

    #[tokio::test]
    async fn loop_runs_until_stopped() {
        let job = Arc::new(Counter {
            runs: AtomicUsize::new(0),
            panic_on_first: false,
        });
        let mut supervisor = Supervisor::new();
        supervisor.spawn(job.clone());
        assert!(supervisor.is_running());

        wait_for_runs(&job, 3).await;
        supervisor.stop().await.unwrap();
        assert!(!supervisor.is_running());

        let after_stop = job.runs.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(job.runs.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn panicking_cycle_does_not_kill_loop() {
        let job = Arc::new(Counter {
            runs: AtomicUsize::new(0),
            panic_on_first: true,
        });
        let mut supervisor = Supervisor::new();
        supervisor.spawn(job.clone());

        wait_for_runs(&job, 3).await;
        assert!(supervisor.is_running());
        supervisor.stop().await.unwrap();
    }

    #[tokio::test]
    async fn stop_twice_is_harmless() {
        let mut supervisor = Supervisor::new();
        supervisor.stop().await.unwrap();
        supervisor.stop().await.unwrap();
    }
}
