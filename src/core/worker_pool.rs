use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Shared worker pool used to continue processing after the broker has
/// acknowledged an asynchronous send.
///
/// Borrowed, not owned: the handle only points at a runtime the caller built.
/// Nothing in this crate sizes, starts or shuts that runtime down, so whoever
/// supplied it must keep it alive for as long as endpoints submit work. Work
/// submitted after shutdown is dropped by tokio and surfaces as a cancelled
/// `JoinHandle`.
///
/// Cloning shares the same pool. Equality is identity of the supplied handle,
/// not of the underlying runtime.
#[derive(Clone)]
pub struct WorkerPoolHandle {
    runtime: Arc<Handle>,
}

impl WorkerPoolHandle {
    pub fn new(runtime: Handle) -> Self {
        WorkerPoolHandle {
            runtime: Arc::new(runtime),
        }
    }

    /// Captures the runtime the caller is running on, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    pub fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.runtime.spawn(task)
    }

    pub fn ptr_eq(&self, other: &WorkerPoolHandle) -> bool {
        Arc::ptr_eq(&self.runtime, &other.runtime)
    }
}

impl PartialEq for WorkerPoolHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for WorkerPoolHandle {}

impl fmt::Debug for WorkerPoolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkerPoolHandle({:p})", Arc::as_ptr(&self.runtime))
    }
}
