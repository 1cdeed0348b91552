//! Configuration System
//!
//! Layered configuration for the fingerprint pipeline. Sources, lowest to
//! highest precedence: built-in defaults, the global config file, the project
//! `chunkroot.toml`, then `CHUNKROOT_*` environment variables.

use crate::chunk::{validate_chunk_size, DEFAULT_CHUNK_SIZE};
use crate::error::MerkleError;
use crate::logging::LoggingConfig;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;
pub use sources::project_file::{project_config_path, PROJECT_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkrootConfig {
    /// Chunking parameters
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in bytes; 1 MiB and 4 MiB are the usual choices
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

impl ChunkrootConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), MerkleError> {
        validate_chunk_size(self.chunking.chunk_size)
            .map_err(|e| MerkleError::Config(format!("chunking.chunk_size: {}", e)))?;
        self.logging.validate()
    }
}

/// Values that take precedence over every configuration source
///
/// Applied after the sources are merged and before validation, so an invalid
/// value in a file does not fail a load that overrides it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub chunk_size: Option<usize>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut ChunkrootConfig) {
        if let Some(chunk_size) = self.chunk_size {
            config.chunking.chunk_size = chunk_size;
        }
    }
}

/// Loads [`ChunkrootConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project directory
    pub fn load(project_root: &Path) -> Result<ChunkrootConfig, MerkleError> {
        Self::load_with_overrides(project_root, &ConfigOverrides::default())
    }

    /// Load configuration for a project directory, then apply `overrides`
    pub fn load_with_overrides(
        project_root: &Path,
        overrides: &ConfigOverrides,
    ) -> Result<ChunkrootConfig, MerkleError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::project_file::add_to_builder(builder, project_root)?;
        let builder = sources::environment::add_to_builder(builder);

        Self::finish(builder.build()?, overrides)
    }

    /// Load configuration from one explicit file layered over the defaults
    ///
    /// Unlike [`ConfigLoader::load`], the file must exist.
    pub fn load_from_file(path: &Path) -> Result<ChunkrootConfig, MerkleError> {
        Self::load_from_file_with_overrides(path, &ConfigOverrides::default())
    }

    /// Load one explicit file over the defaults, then apply `overrides`
    pub fn load_from_file_with_overrides(
        path: &Path,
        overrides: &ConfigOverrides,
    ) -> Result<ChunkrootConfig, MerkleError> {
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));

        Self::finish(builder.build()?, overrides)
    }

    fn finish(raw: Config, overrides: &ConfigOverrides) -> Result<ChunkrootConfig, MerkleError> {
        let mut config: ChunkrootConfig = raw.try_deserialize()?;
        overrides.apply(&mut config);
        config.validate()?;
        debug!(chunk_size = config.chunking.chunk_size, "Configuration loaded");
        Ok(config)
    }
}
