//! Fan-out map over a slice.
//!
//! Up to a configurable limit every element gets its own scoped thread and
//! the caller waits for all of them. Larger inputs are spread over a bounded
//! rayon pool instead of one OS thread per element.

use rayon::prelude::*;
use std::panic;
use std::thread;

use crate::config::DEFAULT_FAN_OUT_LIMIT;

/// Maps `f` over `seq` concurrently; `result[i] == f(&seq[i])`.
///
/// Blocks until every worker has finished. An empty slice returns at once
/// without spawning anything. If `f` panics, the panic is re-raised here
/// once all workers are done.
pub fn pmap<T, U, F>(f: F, seq: &[T]) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    if seq.len() <= DEFAULT_FAN_OUT_LIMIT {
        fan_out(&f, seq)
    } else {
        pooled(&f, seq)
    }
}

/// One scoped thread per element, joined in index order.
pub(crate) fn fan_out<T, U, F>(f: &F, seq: &[T]) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    if seq.is_empty() {
        return Vec::new();
    }

    tracing::trace!("fan-out map over {} elements", seq.len());
    thread::scope(|s| {
        let handles: Vec<_> = seq.iter().map(|item| s.spawn(move || f(item))).collect();

        let mut results = Vec::with_capacity(handles.len());
        let mut first_panic = None;
        for handle in handles {
            match handle.join() {
                Ok(value) => results.push(value),
                Err(payload) => {
                    first_panic.get_or_insert(payload);
                }
            }
        }

        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
        results
    })
}

/// Runs on whichever rayon pool is current; callers pick one with
/// `ThreadPool::install`.
pub(crate) fn pooled<T, U, F>(f: &F, seq: &[T]) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    tracing::trace!(
        "pooled map over {} elements on {} threads",
        seq.len(),
        rayon::current_num_threads()
    );
    seq.par_iter().map(f).collect()
}
