use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Sentinel is a one-shot completion barrier shared between the caller which refreshes a key and
/// every caller which waits for that refresh.
///
/// A Sentinel starts `Pending` and moves to `Done` exactly once, on the first invocation of `done`.
/// The payload of the first `done` is retained and handed (cloned) to every `wait`, including the
/// ones which arrive after completion; those return without blocking.
/// Later invocations of `done` are ignored.
pub struct Sentinel<Value, Error> {
    state: Mutex<State<Value, Error>>,
    completed: Condvar,
}

enum State<Value, Error> {
    Pending,
    Done(Option<Value>, Option<Error>),
}

impl<Value, Error> Sentinel<Value, Error> {
    pub fn new() -> Arc<Sentinel<Value, Error>> {
        Arc::new(Sentinel {
            state: Mutex::new(State::Pending),
            completed: Condvar::new(),
        })
    }

    /// Completes the Sentinel and wakes all the waiters. Returns false if the Sentinel was already done,
    /// in which case the supplied payload is dropped.
    pub fn done(&self, value: Option<Value>, error: Option<Error>) -> bool {
        let mut guard = self.state.lock();
        if let State::Done(_, _) = *guard {
            return false;
        }
        *guard = State::Done(value, error);
        drop(guard);

        self.completed.notify_all();
        true
    }

    pub fn is_done(&self) -> bool {
        matches!(*self.state.lock(), State::Done(_, _))
    }

    /// Drops a Sentinel which lost the race to become the canonical one for its key.
    /// It was never published, so nobody waits on it and it never needs to be completed.
    pub fn discard(self: Arc<Self>) {}
}

impl<Value, Error> Sentinel<Value, Error>
    where Value: Clone,
          Error: Clone {
    /// Blocks until the Sentinel is done and returns its payload.
    pub fn wait(&self) -> (Option<Value>, Option<Error>) {
        let mut guard = self.state.lock();
        loop {
            if let State::Done(value, error) = &*guard {
                return (value.clone(), error.clone());
            }
            self.completed.wait(&mut guard);
        }
    }

    /// Blocks for at most `timeout`. Returns None if the Sentinel is still pending after that.
    /// Giving up only affects the current caller. A timeout too large for a deadline waits without one.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<(Option<Value>, Option<Error>)> {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return Some(self.wait()),
        };
        let mut guard = self.state.lock();
        loop {
            if let State::Done(value, error) = &*guard {
                return Some((value.clone(), error.clone()));
            }
            if self.completed.wait_until(&mut guard, deadline).timed_out() {
                return match &*guard {
                    State::Done(value, error) => Some((value.clone(), error.clone())),
                    State::Pending => None,
                };
            }
        }
    }
}
