//! Environment source: CHUNKROOT_* variables, `__` separates nested keys.
//!
//! `CHUNKROOT_CHUNKING__CHUNK_SIZE=4194304` sets `chunking.chunk_size`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "CHUNKROOT";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
