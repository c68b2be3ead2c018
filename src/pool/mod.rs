//! Pool of serial lanes.
//!
//! A [`Pool`] owns a fixed set of lanes created at construction time. Each
//! lane runs its tasks strictly in submission order, one at a time, while the
//! lanes themselves run concurrently. A new task always goes to the lane that
//! currently carries the least outstanding weight.
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::pool::Pool;
//! use std::num::NonZeroU32;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), lanefetch::Error> {
//! let pool = Pool::new(4)?;
//!
//! pool.submit(|| async {
//!     println!("light task");
//!     Ok::<(), lanefetch::Error>(())
//! });
//!
//! let heavy = NonZeroU32::new(5).unwrap();
//! pool.submit_weighted(heavy, || async {
//!     println!("heavy task");
//!     Ok::<(), lanefetch::Error>(())
//! });
//! # Ok(())
//! # }
//! ```
//!
//! Tasks never hand a value back to the submitter. Anything a task needs to
//! report has to go through state it captures, for instance an
//! `Arc<Mutex<_>>` or a channel.

mod lane;

use crate::error::{Error, Result};
use futures::FutureExt;
use lane::{Job, Lane};
pub(crate) use lane::panic_message;
use std::fmt;
use std::future::Future;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tracing::{debug, trace};

/// A fixed-size pool of serial lanes with least-loaded assignment.
///
/// Cloning a pool is cheap and yields another handle to the same lanes, so a
/// running task can capture a clone and resubmit work into its own pool.
/// Lane workers stop once every handle is dropped and their queues are empty.
#[derive(Clone)]
pub struct Pool {
    inner: Arc<Inner>,
}

struct Inner {
    lanes: Vec<Lane>,
    /// Serialises lane selection so concurrent submitters see each other's load.
    select: Mutex<()>,
}

impl Pool {
    /// Creates a pool of `count` lanes, each starting with a weight of 0.
    ///
    /// Must be called from within a tokio runtime, which will drive the lanes.
    pub fn new(count: usize) -> Result<Self> {
        if count < 1 {
            return Err(Error::InvalidArgument(format!(
                "a pool needs at least one lane, got {}",
                count
            )));
        }
        let handle = Handle::try_current()
            .map_err(|e| Error::Internal(format!("a pool needs a tokio runtime: {}", e)))?;

        let lanes = (1..=count).map(|id| Lane::spawn(id, &handle)).collect();
        debug!("Created a pool of {} lanes", count);

        Ok(Self {
            inner: Arc::new(Inner {
                lanes,
                select: Mutex::new(()),
            }),
        })
    }

    /// Number of lanes in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lanes.len()
    }

    /// Always `false`: a pool has at least one lane.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lanes.is_empty()
    }

    /// Current weight of every lane, in lane creation order.
    pub fn weights(&self) -> Vec<u64> {
        self.inner.lanes.iter().map(Lane::weight).collect()
    }

    /// Sum of the weights of all queued and running tasks.
    pub fn total_weight(&self) -> u64 {
        self.inner.lanes.iter().map(Lane::weight).sum()
    }

    /// Returns `true` when no task is queued or running on any lane.
    pub fn is_idle(&self) -> bool {
        self.inner.lanes.iter().all(|lane| lane.weight() == 0)
    }

    /// Submits a task with a weight of 1.
    ///
    /// See [`Pool::submit_weighted`].
    pub fn submit<F, Fut, E>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        self.submit_weighted(NonZeroU32::MIN, task)
    }

    /// Submits a task to the least loaded lane.
    ///
    /// The weight is charged to the chosen lane before this call returns and
    /// is released once the task has finished, whatever its outcome. An `Err`
    /// returned by the task, or a panic inside it, is logged and the lane moves
    /// on to its next task.
    pub fn submit_weighted<F, Fut, E>(&self, weight: NonZeroU32, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let job: Job = Box::new(move || {
            async move { task().await.map_err(|e| e.to_string()) }.boxed()
        });

        let _guard = self
            .inner
            .select
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let lane = self.least_loaded();
        trace!("Lane #{}: task is queued with weight {}.", lane.id(), weight);
        lane.push(u64::from(weight.get()), job);
    }

    /// Picks the lane with the smallest weight.
    ///
    /// Lanes are scanned in creation order and the first strictly lighter lane
    /// wins. The scan stops as soon as the current choice has no weight, since
    /// nothing can be lighter than an empty lane.
    fn least_loaded(&self) -> &Lane {
        let lanes = &self.inner.lanes;
        let mut chosen = &lanes[0];
        for lane in lanes {
            if chosen.weight() == 0 {
                break;
            }
            if lane.weight() < chosen.weight() {
                chosen = lane;
            }
        }
        chosen
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("lanes", &self.len())
            .field("weights", &self.weights())
            .finish()
    }
}
