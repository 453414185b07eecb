//! Dispatch boundary for fire-and-forget work.
//!
//! Persistence mirroring, broadcasts, analytics and statistics all run off
//! the critical path. Routing them through one spawner keeps that work
//! observable: failures increment a counter tests can read, and shutdown can
//! drain outstanding tasks instead of abandoning them mid-write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

/// Outcome of draining outstanding background work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    /// Tasks that finished inside the drain window
    pub completed: usize,

    /// Tasks still running when the window closed
    pub abandoned: usize,
}

/// Tracked spawner for best-effort background tasks.
#[derive(Debug, Default)]
pub struct TaskSpawner {
    handles: Mutex<Vec<(&'static str, JoinHandle<()>)>>,
    dispatched: AtomicU64,
    failed: Arc<AtomicU64>,
}

impl TaskSpawner {
    /// Creates a spawner with no outstanding work.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatches a background task.
    ///
    /// The future's error, if any, is logged under `label` and counted; it
    /// never propagates to the caller.
    pub async fn dispatch<F>(&self, label: &'static str, future: F)
    where
        F: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.dispatched.fetch_add(1, Ordering::SeqCst);

        let failed = Arc::clone(&self.failed);
        let handle = tokio::spawn(async move {
            if let Err(err) = future.await {
                warn!(task = label, error = %err, "background task failed");
                failed.fetch_add(1, Ordering::SeqCst);
            }
        });

        let mut handles = self.handles.lock().await;
        handles.retain(|(_, h)| !h.is_finished());
        handles.push((label, handle));
    }

    /// Waits up to `window` for all outstanding tasks, abandoning stragglers.
    pub async fn drain(&self, window: Duration) -> DrainReport {
        let mut handles = self.handles.lock().await;
        let outstanding: Vec<_> = handles.drain(..).collect();
        drop(handles);

        let mut completed = 0;
        let mut abandoned = 0;
        for (label, handle) in outstanding {
            match tokio::time::timeout(window, handle).await {
                Ok(_) => completed += 1,
                Err(_) => {
                    warn!(task = label, "background task abandoned at drain");
                    abandoned += 1;
                }
            }
        }

        DrainReport {
            completed,
            abandoned,
        }
    }

    /// Total tasks dispatched since construction.
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Total tasks that completed with an error.
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }
}
