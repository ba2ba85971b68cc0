//! Streaming map/filter/remove stages.
//!
//! Each stage consumes one [`Stream`] and returns a new one right away. A
//! dedicated thread relays elements from input to output, in order, until the
//! input closes, then closes the output.

use std::panic::{self, AssertUnwindSafe};

use crate::error::{panic_message, Error};
use crate::stream::{spawn_worker, Stream, WorkerState};

/// Spawns the worker behind a stage. `relay` turns one input element into at
/// most one output element.
fn spawn_stage<T, U, R>(kind: &'static str, mut input: Stream<T>, mut relay: R) -> Stream<U>
where
    T: Send + 'static,
    U: Send + 'static,
    R: FnMut(T) -> Option<U> + Send + 'static,
{
    spawn_worker(input.prefix(), kind, move |tx, status, name| {
        tracing::debug!("stage '{}' started, reading from '{}'", name, input.name());
        let mut received: u64 = 0;
        let mut relayed: u64 = 0;

        while let Some(item) = input.recv() {
            received += 1;
            let output = match panic::catch_unwind(AssertUnwindSafe(|| relay(item))) {
                Ok(output) => output,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::error!("stage '{}' panicked: {}", name, message);
                    status.advance(WorkerState::Closing);
                    // Returning drops `input` as well, which stops upstream.
                    return Err(Error::StagePanicked {
                        stage: name.to_string(),
                        message,
                    });
                }
            };

            let Some(output) = output else {
                tracing::trace!("stage '{}' dropped element {}", name, received);
                continue;
            };
            if tx.send(output).is_err() {
                tracing::warn!("stage '{}': downstream receiver dropped", name);
                status.advance(WorkerState::Closing);
                return Ok(());
            }
            relayed += 1;
            tracing::trace!("stage '{}' relayed element {}", name, received);
        }

        status.advance(WorkerState::Closing);
        tracing::debug!(
            "stage '{}' observed input closed after {} elements",
            name,
            received
        );
        // Upstream failures become this stage's outcome so they reach the
        // final consumer.
        input.join_worker()?;
        tracing::debug!("stage '{}' finished, relayed {} elements", name, relayed);
        Ok(())
    })
}

/// Applies `f` to every element of `input`. Order and count are preserved.
pub fn map_stream<T, U, F>(mut f: F, input: Stream<T>) -> Stream<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> U + Send + 'static,
{
    spawn_stage("map", input, move |item| Some(f(item)))
}

/// Forwards the elements for which `pred` holds.
pub fn filter_stream<T, P>(mut pred: P, input: Stream<T>) -> Stream<T>
where
    T: Send + 'static,
    P: FnMut(&T) -> bool + Send + 'static,
{
    spawn_stage("filter", input, move |item| pred(&item).then_some(item))
}

/// Forwards the elements for which `pred` does not hold.
pub fn remove_stream<T, P>(mut pred: P, input: Stream<T>) -> Stream<T>
where
    T: Send + 'static,
    P: FnMut(&T) -> bool + Send + 'static,
{
    spawn_stage("remove", input, move |item| (!pred(&item)).then_some(item))
}

impl<T: Send + 'static> Stream<T> {
    pub fn map<U, F>(self, f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        map_stream(f, self)
    }

    pub fn filter<P>(self, pred: P) -> Stream<T>
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        filter_stream(pred, self)
    }

    pub fn remove<P>(self, pred: P) -> Stream<T>
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        remove_stream(pred, self)
    }
}
