//! Project config file source: <dir>/chunkroot.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the project directory
pub const PROJECT_CONFIG_FILE: &str = "chunkroot.toml";

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

/// Add the project config file to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = project_config_path(project_root);
    if !path.exists() {
        return Ok(builder);
    }
    debug!(config_path = %path.display(), "Loading project configuration");
    Ok(builder.add_source(File::from(path).required(false)))
}
