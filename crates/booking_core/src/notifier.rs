use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use shared::domain::NoticeKind;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

use crate::ui::StatusRegion;

#[derive(Default)]
struct PendingClear {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Owns the status region. A success notice clears itself after a delay;
/// any later notice cancels that pending clear before it is shown.
pub struct StatusNotifier {
    region: Arc<dyn StatusRegion>,
    clear_after: Duration,
    pending: Arc<Mutex<PendingClear>>,
}

impl StatusNotifier {
    pub fn new(region: Arc<dyn StatusRegion>, clear_after: Duration) -> Self {
        Self {
            region,
            clear_after,
            pending: Arc::new(Mutex::new(PendingClear::default())),
        }
    }

    pub fn notify(&self, kind: NoticeKind, text: &str) {
        let mut pending = lock(&self.pending);
        pending.generation += 1;
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }

        self.region.render(Some(kind), text);
        debug!(kind = kind.as_str(), text, "status notice shown");

        if kind != NoticeKind::Success {
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime; success notice will not clear itself");
            return;
        };

        let generation = pending.generation;
        let region = Arc::clone(&self.region);
        let shared = Arc::clone(&self.pending);
        let delay = self.clear_after;
        pending.handle = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut pending = lock(&shared);
            // Superseded notices must not be wiped by an older timer.
            if pending.generation == generation {
                region.render(None, "");
                pending.handle = None;
                debug!("success notice cleared");
            }
        }));
    }

    pub fn clear(&self) {
        let mut pending = lock(&self.pending);
        pending.generation += 1;
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        self.region.render(None, "");
    }

    pub fn has_pending_clear(&self) -> bool {
        lock(&self.pending)
            .handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for StatusNotifier {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.pending).handle.take() {
            handle.abort();
        }
    }
}

fn lock(pending: &Mutex<PendingClear>) -> MutexGuard<'_, PendingClear> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "tests/notifier_tests.rs"]
mod tests;
