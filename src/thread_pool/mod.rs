//! This module contains the crate's worker pool and the
//! task handles used to observe submitted task results.

mod shared_queue;
mod task;

pub use shared_queue::WorkerPool;
pub use task::TaskHandle;
