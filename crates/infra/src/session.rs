use power_schedule_domain::{QueueRefreshState, ResolvedSchedule, ID};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::warn;

/// State that lives as long as the process: per queue refresh bookkeeping
/// and whether reminders may be created at all.
pub struct Session {
    refresh_states: Mutex<HashMap<ID, QueueRefreshState>>,
    reminders_disabled: AtomicBool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            refresh_states: Mutex::new(HashMap::new()),
            reminders_disabled: AtomicBool::new(false),
        }
    }

    pub fn refresh_state(&self, queue_id: &ID) -> QueueRefreshState {
        self.refresh_states
            .lock()
            .unwrap()
            .get(queue_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Moves the queue into `Fetching`. Gives `None` while another refresh
    /// of the queue is in flight.
    pub fn try_begin_refresh(&self, queue_id: &ID) -> Option<RefreshGuard<'_>> {
        let mut states = self.refresh_states.lock().unwrap();
        let state = states.entry(queue_id.clone()).or_default();
        let previous = state.clone();
        if !state.begin_fetch() {
            return None;
        }
        Some(RefreshGuard {
            session: self,
            queue_id: queue_id.clone(),
            previous: Some(previous),
        })
    }

    pub fn forget_queue(&self, queue_id: &ID) {
        self.refresh_states.lock().unwrap().remove(queue_id);
    }

    pub fn disable_reminders(&self) {
        if !self.reminders_disabled.swap(true, Ordering::SeqCst) {
            warn!("Notification permission denied. Reminders are disabled for this session");
        }
    }

    pub fn reminders_disabled(&self) -> bool {
        self.reminders_disabled.load(Ordering::SeqCst)
    }

    /// A queue forgotten while its refresh was in flight stays forgotten
    fn update(&self, queue_id: &ID, f: impl FnOnce(&mut QueueRefreshState)) {
        if let Some(state) = self.refresh_states.lock().unwrap().get_mut(queue_id) {
            f(state);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight refresh of one queue. Dropping the guard without
/// finishing it puts the queue back into the state it had before.
pub struct RefreshGuard<'a> {
    session: &'a Session,
    queue_id: ID,
    previous: Option<QueueRefreshState>,
}

impl<'a> RefreshGuard<'a> {
    pub fn resolve(mut self, schedule: ResolvedSchedule) {
        self.previous = None;
        self.session
            .update(&self.queue_id, |state| state.resolve(schedule));
    }

    pub fn fail(mut self, error: String) {
        self.previous = None;
        self.session.update(&self.queue_id, |state| state.fail(error));
    }
}

impl<'a> Drop for RefreshGuard<'a> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.session
                .update(&self.queue_id, |state| *state = previous);
        }
    }
}
