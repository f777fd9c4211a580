use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{task::JoinHandle, time::Instant};

use crate::compose::DownloadMode;

pub const STATUS_TTL: Duration = Duration::from_millis(3000);
pub const COPIED_TTL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StatusKind {
    #[display("info")]
    Info,
    #[display("success")]
    Success,
    #[display("error")]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{message}")]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

struct Slot<T> {
    value: Option<T>,
    // Bumped on every set/clear so a superseded timer can tell it is stale
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

// A value that clears itself a fixed time after it was last set.
//
// Setting a new value cancels the pending timer and starts a fresh one.  Timers
// run as tokio tasks, so `set` must be called from within a runtime.
pub struct Expiring<T> {
    slot: Arc<Mutex<Slot<T>>>,
    ttl: Duration,
}

impl<T: Clone + Send + 'static> Expiring<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                value: None,
                generation: 0,
                timer: None,
            })),
            ttl,
        }
    }

    pub fn set(&self, value: T) {
        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        slot.generation += 1;
        slot.value = Some(value);

        // The window counts from here, not from when the timer task first runs
        let deadline = Instant::now() + self.ttl;
        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            // `abort` only takes effect at the next await point, so an aborted
            // timer may still get here; the generation check catches that
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.value = None;
                slot.timer = None;
                tracing::trace!(generation, "expired");
            }
        }));
    }

    pub fn get(&self) -> Option<T> {
        lock(&self.slot).value.clone()
    }

    pub fn clear(&self) {
        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation += 1;
        slot.value = None;
    }
}

impl<T> Drop for Expiring<T> {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.slot).timer.take() {
            timer.abort();
        }
    }
}

// The slot holds plain data, so a panic elsewhere cannot leave it half-written
fn lock<T>(slot: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

// Transient feedback shown after an action: the status line and the
// "copied" marker on the button that produced it.
pub struct Feedback {
    status: Expiring<Status>,
    copied: Expiring<DownloadMode>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::with_ttls(STATUS_TTL, COPIED_TTL)
    }

    fn with_ttls(status_ttl: Duration, copied_ttl: Duration) -> Self {
        Self {
            status: Expiring::new(status_ttl),
            copied: Expiring::new(copied_ttl),
        }
    }

    pub fn show_status(&self, message: impl Into<String>, kind: StatusKind) {
        let status = Status::new(message, kind);
        tracing::debug!(kind = %status.kind, message = %status.message, "status");
        self.status.set(status);
    }

    pub fn mark_copied(&self, mode: DownloadMode) {
        self.copied.set(mode);
    }

    pub fn status(&self) -> Option<Status> {
        self.status.get()
    }

    pub fn copied(&self) -> Option<DownloadMode> {
        self.copied.get()
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new()
    }
}
