//! A single serial lane of the [`Pool`](super::Pool).
//!
//! Every lane owns a tokio task draining an unbounded channel, so the jobs of
//! one lane run strictly one after the other while distinct lanes run
//! concurrently.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, trace};

/// Type-erased unit of work queued on a lane.
pub(crate) type Job = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), String>> + Send>;

/// A job together with the weight it holds on its lane.
struct Assignment {
    weight: u64,
    job: Job,
}

pub(crate) struct Lane {
    /// 1-based identifier, used in log lines.
    id: usize,
    /// Sum of the weights of queued and running jobs.
    weight: Arc<AtomicU64>,
    sender: mpsc::UnboundedSender<Assignment>,
}

impl Lane {
    /// Creates the lane and starts its worker on the given runtime.
    pub(crate) fn spawn(id: usize, handle: &Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let weight = Arc::new(AtomicU64::new(0));
        handle.spawn(work(id, weight.clone(), receiver));
        Self { id, weight, sender }
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn weight(&self) -> u64 {
        self.weight.load(Ordering::SeqCst)
    }

    /// Charges `weight` to the lane right away, then queues the job.
    pub(crate) fn push(&self, weight: u64, job: Job) {
        self.weight.fetch_add(weight, Ordering::SeqCst);
        if let Err(mpsc::error::SendError(assignment)) = self.sender.send(Assignment { weight, job }) {
            // Only happens once the runtime driving the worker has shut down.
            error!("Lane #{}: worker is gone, dropping task.", self.id);
            self.weight.fetch_sub(assignment.weight, Ordering::SeqCst);
        }
    }
}

/// Worker loop of a lane.
///
/// Failures and panics of a job are logged and swallowed; the lane always
/// moves on to the next job and always releases the job's weight.
async fn work(id: usize, weight: Arc<AtomicU64>, mut receiver: mpsc::UnboundedReceiver<Assignment>) {
    while let Some(Assignment { weight: held, job }) = receiver.recv().await {
        trace!("Lane #{}: task is started.", id);

        match AssertUnwindSafe(async move { job().await }).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Lane #{}: task failed: {}", id, e),
            Err(panic) => error!("Lane #{}: task panicked: {}", id, panic_message(panic.as_ref())),
        }

        weight.fetch_sub(held, Ordering::SeqCst);
        trace!("Lane #{}: task is finished.", id);
    }
    trace!("Lane #{}: closed.", id);
}

/// Text of a panic payload, for log lines.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}
