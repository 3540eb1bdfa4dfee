//! Run configuration

use crate::error::{TriangleError, TriangleResult};
use crate::schedule::Backend;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one counting run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountConfig {
    /// Number of partitions, and threads for the threaded backends
    pub workers: usize,
    /// Scheduling backend
    pub backend: Backend,
    /// Keep per-vertex triangle counts in the report
    pub per_vertex: bool,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            backend: Backend::Rayon,
            per_vertex: false,
        }
    }
}

impl CountConfig {
    pub fn new(workers: usize, backend: Backend) -> Self {
        Self {
            workers,
            backend,
            ..Default::default()
        }
    }

    pub fn with_per_vertex(mut self, per_vertex: bool) -> Self {
        self.per_vertex = per_vertex;
        self
    }

    /// Load from a YAML file. Missing keys take their default values.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> TriangleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TriangleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> TriangleResult<Self> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| TriangleError::Config(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TriangleResult<()> {
        if self.workers == 0 {
            return Err(TriangleError::Config(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
