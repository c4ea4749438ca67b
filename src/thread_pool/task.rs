use crate::{Result, SearchErrorKind};
use std::sync::{Arc, Condvar, Mutex};

struct Shared<T> {
    slot: Mutex<Option<Result<T>>>,
    done: Condvar,
}

/// Handle for observing the eventual outcome of one submitted task
pub struct TaskHandle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> TaskHandle<T> {
    /// check whether the task has finished, without blocking
    pub fn is_complete(&self) -> bool {
        self.shared.slot.lock().unwrap().is_some()
    }

    /// block until the task finishes and take its result
    pub fn wait(self) -> Result<T> {
        let mut slot = self.shared.slot.lock().unwrap();
        loop {
            match slot.take() {
                Some(result) => return result,
                None => slot = self.shared.done.wait(slot).unwrap(),
            }
        }
    }
}

/// Fulfilling half of a handle, held by the wrapped task. Fulfilled
/// exactly once; dropping an unfulfilled promise reports the task as
/// lost so a waiting observer never hangs.
pub(super) struct TaskPromise<T> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T> TaskPromise<T> {
    pub(super) fn fulfill(mut self, result: Result<T>) {
        if let Some(shared) = self.shared.take() {
            *shared.slot.lock().unwrap() = Some(result);
            shared.done.notify_all();
        }
    }
}

impl<T> Drop for TaskPromise<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            *shared.slot.lock().unwrap() = Some(Err(SearchErrorKind::TaskDropped.into()));
            shared.done.notify_all();
        }
    }
}

pub(super) fn task_pair<T>() -> (TaskPromise<T>, TaskHandle<T>) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(None),
        done: Condvar::new(),
    });

    (
        TaskPromise {
            shared: Some(Arc::clone(&shared)),
        },
        TaskHandle { shared },
    )
}
