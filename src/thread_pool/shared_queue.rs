use super::task::{task_pair, TaskHandle};
use crate::{Result, SearchError, SearchErrorKind};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use tracing::error;

type Task = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

enum Message {
    NewTask(Task),
    Terminate,
}

struct Worker {
    _id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<mpsc::Receiver<Message>>>) -> Self {
        let handle = thread::spawn(move || {
            loop {
                // the guard is released before the task runs
                let received = receiver.lock().unwrap().recv();
                match received {
                    Ok(Message::NewTask(task)) => {
                        if let Err(error) = task() {
                            error!("Worker: {}, Error: {}", id, error);
                        }
                    }
                    Ok(Message::Terminate) => break,
                    Err(_) => break,
                }
            }
        });

        Self {
            _id: id,
            handle: Some(handle),
        }
    }
}

/// Fixed-size worker pool draining one shared FIFO task queue
pub struct WorkerPool {
    workers: Vec<Worker>,
    sender: Mutex<mpsc::Sender<Message>>,
    stopping: AtomicBool,
}

impl WorkerPool {
    /// spawn a pool of `num_workers` threads; zero workers is rejected
    pub fn new(num_workers: usize) -> Result<Self> {
        if num_workers == 0 {
            return Err(SearchErrorKind::InvalidPoolSize.into());
        }

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            workers.push(Worker::new(id, Arc::clone(&receiver)));
        }

        Ok(Self {
            workers,
            sender: Mutex::new(sender),
            stopping: AtomicBool::new(false),
        })
    }

    /// Enqueue a job and hand back the handle observing its outcome.
    ///
    /// Non-blocking and safe to call from multiple threads. Fails with
    /// `PoolClosed` once shutdown has begun. A panic inside `job` is
    /// captured into the handle, never onto the worker thread.
    pub fn submit<F, T>(&self, job: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (promise, handle) = task_pair();
        let task: Task = Box::new(move || match catch_unwind(AssertUnwindSafe(job)) {
            Ok(value) => {
                promise.fulfill(Ok(value));
                Ok(())
            }
            Err(_) => {
                promise.fulfill(Err(SearchErrorKind::TaskPanic.into()));
                Err(SearchErrorKind::TaskPanic.into())
            }
        });

        // the stopping check and the send happen under one lock, so no
        // task can land in the queue behind the terminate messages
        let sender = self.sender.lock().unwrap();
        if self.stopping.load(Ordering::SeqCst) {
            return Err(SearchErrorKind::PoolClosed.into());
        }
        sender
            .send(Message::NewTask(task))
            .map_err(|_| SearchError::from(SearchErrorKind::PoolClosed))?;

        Ok(handle)
    }

    /// Stop intake, drain every queued task and join all workers.
    ///
    /// Idempotent; also run on drop. Tasks queued before shutdown still
    /// execute, the terminate messages sit behind them in FIFO order.
    pub fn shutdown(&mut self) {
        {
            let _sender = self.sender.lock().unwrap();
            self.stopping.store(true, Ordering::SeqCst);
        }

        for _ in 0..self.workers.len() {
            self.sender.lock().unwrap().send(Message::Terminate).unwrap();
        }

        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                handle.join().unwrap();
            }
        }
        self.workers.clear();
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
