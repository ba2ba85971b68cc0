//! # seqflow
//!
//! Higher-order sequence transformations with three ways of running them:
//!
//! 1. **Sequential** over slices: [`map`], [`filter`], [`remove`],
//!    [`reverse`], [`take`], [`drop`], [`foldl`], [`foldr`].
//! 2. **Streaming**: [`to_stream`] lifts a `Vec` into a [`Stream`] fed by its
//!    own thread, [`map_stream`], [`filter_stream`] and [`remove_stream`]
//!    chain one worker thread per stage, and [`from_stream`] drains the result.
//! 3. **Fan-out**: [`pmap`] maps every element on its own thread and waits for
//!    all of them.
//!
//! ```
//! use seqflow::{filter, foldl, from_stream, pmap, to_stream};
//!
//! let data: Vec<i32> = (1..=10).collect();
//! assert_eq!(filter(|x| x % 2 == 0, &data), vec![2, 4, 6, 8, 10]);
//! assert_eq!(foldl(|acc, &x| acc - x, 0, &[1, 2, 3, 4, 5]), -15);
//! assert_eq!(pmap(|x| x * 2, &data)[9], 20);
//!
//! let mut evens = to_stream(data).filter(|x| x % 2 == 0).map(|x| x * 10);
//! assert_eq!(from_stream(&mut evens).unwrap(), vec![20, 40, 60, 80, 100]);
//! ```
//!
//! A panic inside a stage's function does not abort the process: the stage
//! closes its output, and the failure surfaces as [`Error::StagePanicked`]
//! from the final [`from_stream`].

pub mod config;
pub mod error;
pub mod executor;
pub mod parallel;
pub mod seq;
pub mod stage;
pub mod stream;

pub use config::Config;
pub use error::{Error, Result};
pub use executor::Executor;
pub use parallel::pmap;
pub use seq::{drop, filter, foldl, foldr, map, remove, reverse, take};
pub use stage::{filter_stream, map_stream, remove_stream};
pub use stream::{from_stream, to_stream, Stream, WorkerState, WorkerStatus};
