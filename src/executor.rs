use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::parallel::{fan_out, pooled};
use crate::stream::{self, Stream};

/// Runs fan-out maps and stream sources according to a [`Config`].
///
/// Owns a dedicated rayon pool sized by `parallel.pool_threads`, used for
/// inputs larger than `parallel.fan_out_limit`.
pub struct Executor {
    config: Config,
    pool: rayon::ThreadPool,
    prefix: Arc<str>,
}

impl Executor {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let pool_prefix = config.pipeline.thread_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel.pool_threads)
            .thread_name(move |i| format!("{}-pool-{}", pool_prefix, i))
            .build()?;

        tracing::debug!(
            "executor ready: fan_out_limit={}, pool_threads={}",
            config.parallel.fan_out_limit,
            config.parallel.pool_threads
        );

        let prefix = Arc::from(config.pipeline.thread_prefix.as_str());
        Ok(Self {
            config,
            pool,
            prefix,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Same contract as [`crate::pmap`], with the configured fan-out limit
    /// and pool.
    pub fn pmap<T, U, F>(&self, f: F, seq: &[T]) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        if seq.len() <= self.config.parallel.fan_out_limit {
            fan_out(&f, seq)
        } else {
            self.pool.install(|| pooled(&f, seq))
        }
    }

    /// Like [`crate::to_stream`], but workers are named with the configured
    /// prefix. Stages chained onto the result inherit it.
    pub fn to_stream<T: Send + 'static>(&self, seq: Vec<T>) -> Stream<T> {
        stream::source(Arc::clone(&self.prefix), seq)
    }
}
