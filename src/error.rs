use failure::{Backtrace, Context, Fail};
use std::fmt;
use std::io;

/// Error Type for the Search Project
#[derive(Debug)]
pub struct SearchError {
    inner: Context<SearchErrorKind>,
}

/// Kinds of possible Errors in the Search Project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum SearchErrorKind {
    /// IoError triggered by enumerating the root directory
    #[fail(display = "Io Error")]
    IoError,
    /// Pool constructed with zero workers
    #[fail(display = "Worker pool needs at least one worker")]
    InvalidPoolSize,
    /// Task submitted after the pool began shutting down
    #[fail(display = "Worker pool is shut down")]
    PoolClosed,
    /// A task panicked on a worker thread
    #[fail(display = "Task panicked on a worker thread")]
    TaskPanic,
    /// A task was destroyed before a worker could run it
    #[fail(display = "Task dropped before completion")]
    TaskDropped,
    /// PlaceHolder for Unknown Error
    #[fail(display = "Unknown Error")]
    UnknownError,
}

impl SearchError {
    /// get the kind of the error
    pub fn kind(&self) -> SearchErrorKind {
        *self.inner.get_context()
    }
}

impl Fail for SearchError {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<SearchErrorKind> for SearchError {
    fn from(kind: SearchErrorKind) -> SearchError {
        SearchError {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<SearchErrorKind>> for SearchError {
    fn from(context: Context<SearchErrorKind>) -> SearchError {
        SearchError { inner: context }
    }
}

impl From<io::Error> for SearchError {
    fn from(error: io::Error) -> SearchError {
        error.context(SearchErrorKind::IoError).into()
    }
}
