//! Single-producer/single-consumer streams backed by a rendezvous channel.
//!
//! A [`Stream`] is the receiving end of a zero-capacity crossbeam channel
//! together with the thread that feeds it. The stream is closed when that
//! thread drops its sender; there is no end-of-stream marker element.

use crossbeam::channel::{bounded, Receiver, Sender};
use std::fmt;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::DEFAULT_THREAD_PREFIX;
use crate::error::{Error, Result};

static NEXT_WORKER_ID: AtomicUsize = AtomicUsize::new(0);

// =============================================================================
// Worker lifecycle
// =============================================================================

/// Lifecycle of the thread producing a stream.
///
/// States only move forward: `Open -> Closing -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum WorkerState {
    /// Relaying elements.
    Open = 0,
    /// Stopped reading; the output is about to be closed.
    Closing = 1,
    /// Output closed and the worker has returned.
    Closed = 2,
}

impl WorkerState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => WorkerState::Open,
            1 => WorkerState::Closing,
            _ => WorkerState::Closed,
        }
    }
}

/// Shared view of a worker's [`WorkerState`]. Cheap to clone; stays valid
/// after the stream itself has been consumed by a downstream stage.
#[derive(Debug, Clone)]
pub struct WorkerStatus {
    state: Arc<AtomicU8>,
}

impl WorkerStatus {
    fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(WorkerState::Open as u8)),
        }
    }

    pub fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Moves to `next` unless the worker is already there or beyond.
    /// Returns `true` if this call performed the transition.
    pub(crate) fn advance(&self, next: WorkerState) -> bool {
        let previous = self.state.fetch_max(next as u8, Ordering::AcqRel);
        previous < next as u8
    }
}

enum Worker {
    Running(JoinHandle<Result<()>>),
    Failed(Error),
    Joined,
}

// =============================================================================
// Stream
// =============================================================================

pub struct Stream<T> {
    rx: Receiver<T>,
    worker: Worker,
    name: String,
    prefix: Arc<str>,
    status: WorkerStatus,
}

impl<T> Stream<T> {
    /// Name of the thread producing this stream.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> WorkerStatus {
        self.status.clone()
    }

    /// Blocks for the next element. `None` once the stream is closed and
    /// every element has been taken.
    pub fn recv(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Drains the stream. See [`from_stream`].
    pub fn collect(mut self) -> Result<Vec<T>> {
        from_stream(&mut self)
    }

    pub(crate) fn prefix(&self) -> Arc<str> {
        Arc::clone(&self.prefix)
    }

    /// Waits for the producing thread and returns how it ended. Only the
    /// first call reports anything; later calls return `Ok(())`.
    pub(crate) fn join_worker(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.worker, Worker::Joined) {
            Worker::Running(handle) => match handle.join() {
                Ok(outcome) => outcome,
                Err(_) => Err(Error::WorkerLost {
                    worker: self.name.clone(),
                }),
            },
            Worker::Failed(err) => Err(err),
            Worker::Joined => Ok(()),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("name", &self.name)
            .field("state", &self.status.state())
            .finish()
    }
}

/// Starts a named worker thread that owns the sending half of a new stream.
///
/// `body` gets the sender by value; the stream closes when `body` returns and
/// the sender is dropped, after which the worker is marked `Closed`.
pub(crate) fn spawn_worker<T, F>(prefix: Arc<str>, kind: &str, body: F) -> Stream<T>
where
    T: Send + 'static,
    F: FnOnce(Sender<T>, &WorkerStatus, &str) -> Result<()> + Send + 'static,
{
    let (tx, rx) = bounded(0);
    let id = NEXT_WORKER_ID.fetch_add(1, Ordering::Relaxed);
    let name = format!("{}-{}-{}", prefix, kind, id);
    let status = WorkerStatus::new();

    let worker_status = status.clone();
    let worker_name = name.clone();
    let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
        let outcome = body(tx, &worker_status, &worker_name);
        worker_status.advance(WorkerState::Closing);
        worker_status.advance(WorkerState::Closed);
        outcome
    });

    let worker = match spawned {
        Ok(handle) => Worker::Running(handle),
        Err(source) => {
            // The closure, and the sender with it, is already gone, so the
            // stream reads as closed.
            tracing::error!("failed to spawn worker '{}': {}", name, source);
            status.advance(WorkerState::Closed);
            Worker::Failed(Error::Spawn {
                worker: name.clone(),
                source,
            })
        }
    };

    Stream {
        rx,
        worker,
        name,
        prefix,
        status,
    }
}

// =============================================================================
// Adapters
// =============================================================================

/// Lifts a sequence into a stream. Returns at once; a dedicated producer
/// thread hands the elements over one at a time and then closes the stream.
pub fn to_stream<T: Send + 'static>(seq: Vec<T>) -> Stream<T> {
    source(Arc::from(DEFAULT_THREAD_PREFIX), seq)
}

pub(crate) fn source<T: Send + 'static>(prefix: Arc<str>, seq: Vec<T>) -> Stream<T> {
    spawn_worker(prefix, "source", move |tx, status, name| {
        tracing::debug!("source '{}' started with {} elements", name, seq.len());
        let mut sent = 0usize;
        for item in seq {
            if tx.send(item).is_err() {
                tracing::warn!("source '{}': downstream receiver dropped", name);
                status.advance(WorkerState::Closing);
                return Ok(());
            }
            sent += 1;
        }
        status.advance(WorkerState::Closing);
        tracing::debug!("source '{}' finished after {} elements", name, sent);
        Ok(())
    })
}

/// Drains `stream` into a `Vec`, blocking until it closes.
///
/// Once the stream is closed the producing worker is joined; if it, or any
/// stage upstream of it, failed, that failure is returned instead of the
/// partial data. Draining an already drained stream returns an empty `Vec`
/// without blocking.
pub fn from_stream<T>(stream: &mut Stream<T>) -> Result<Vec<T>> {
    let items: Vec<T> = stream.rx.iter().collect();
    stream.join_worker()?;
    tracing::trace!("drained {} elements from '{}'", items.len(), stream.name);
    Ok(items)
}
