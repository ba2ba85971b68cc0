use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_FAN_OUT_LIMIT: usize = 1024;
pub const DEFAULT_THREAD_PREFIX: &str = "seqflow";

// =============================================================================
// Config sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Largest input mapped with one dedicated thread per element.
    /// Bigger inputs are spread over a pool of `pool_threads` workers.
    pub fan_out_limit: usize,
    pub pool_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            fan_out_limit: DEFAULT_FAN_OUT_LIMIT,
            pool_threads: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Prefix for the names of stream producer and stage threads.
    pub thread_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            thread_prefix: DEFAULT_THREAD_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parallel: ParallelConfig,
    pub pipeline: PipelineConfig,
}

// =============================================================================
// Loading and validation
// =============================================================================

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel.fan_out_limit == 0 {
            return Err(Error::config_invalid(
                "parallel.fan_out_limit",
                "must be at least 1",
            ));
        }
        if self.parallel.pool_threads == 0 {
            return Err(Error::config_invalid(
                "parallel.pool_threads",
                "must be at least 1",
            ));
        }
        if self.pipeline.thread_prefix.trim().is_empty() {
            return Err(Error::config_invalid(
                "pipeline.thread_prefix",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.parallel.fan_out_limit, DEFAULT_FAN_OUT_LIMIT);
        assert!(config.parallel.pool_threads >= 1);
        assert_eq!(config.pipeline.thread_prefix, "seqflow");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [parallel]
            fan_out_limit = 16

            [pipeline]
            thread_prefix = "etl"
            "#,
        )
        .unwrap();

        assert_eq!(config.parallel.fan_out_limit, 16);
        assert_eq!(config.parallel.pool_threads, num_cpus::get());
        assert_eq!(config.pipeline.thread_prefix, "etl");
    }

    #[test]
    fn test_zero_fan_out_limit_rejected() {
        let err = Config::from_toml_str("[parallel]\nfan_out_limit = 0\n").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref field, .. } if field == "parallel.fan_out_limit"));
    }

    #[test]
    fn test_zero_pool_threads_rejected() {
        let err = Config::from_toml_str("[parallel]\npool_threads = 0\n").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref field, .. } if field == "parallel.pool_threads"));
    }

    #[test]
    fn test_blank_prefix_rejected() {
        let err = Config::from_toml_str("[pipeline]\nthread_prefix = \"  \"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = Config::from_toml_str("[parallel]\nbuffer = 4\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parallel]\npool_threads = 2").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.parallel.pool_threads, 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigIo(_)));
    }
}
