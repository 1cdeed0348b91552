//! Command-line front end
//!
//! Thin wiring over the library: argument parsing, input selection, and
//! output rendering. All hashing semantics live in [`crate::api`],
//! [`crate::chunk`], and [`crate::tree`].

use crate::api::{fingerprint, Fingerprint};
use crate::chunk::collect_leaves;
use crate::config::{ChunkrootConfig, ConfigLoader, ConfigOverrides};
use crate::digest::Digest;
use crate::error::MerkleError;
use crate::tree::build_root_hex;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "chunkroot")]
#[command(about = "Fixed-size chunk hashing and Merkle root computation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Chunk size in bytes (overrides configuration)
    #[arg(long, short = 'c', global = true)]
    pub chunk_size: Option<usize>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the Merkle root of a file ("-" reads stdin)
    Root {
        path: PathBuf,
    },
    /// Print the leaf digest of every chunk of a file ("-" reads stdin)
    Leaves {
        path: PathBuf,
    },
    /// Reduce already computed leaf digests (hex) to a root
    Combine {
        #[arg(required = true)]
        digests: Vec<String>,
    },
}

/// Per-invocation context: resolved configuration plus output mode
pub struct RunContext {
    config: ChunkrootConfig,
    json: bool,
}

#[derive(Serialize)]
struct LeafListing {
    chunk_size: usize,
    leaves: Vec<Digest>,
}

#[derive(Serialize)]
struct CombinedRoot {
    root: Digest,
    leaf_count: usize,
}

impl RunContext {
    /// Resolve configuration for this invocation
    ///
    /// An explicit `--config` file must exist; otherwise the layered sources
    /// rooted at the current directory are used. `--chunk-size` wins over both
    /// and is applied before the merged configuration is validated.
    pub fn new(cli: &Cli) -> Result<Self, MerkleError> {
        let overrides = ConfigOverrides {
            chunk_size: cli.chunk_size,
        };
        let config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file_with_overrides(path, &overrides)?,
            None => ConfigLoader::load_with_overrides(Path::new("."), &overrides)?,
        };

        Ok(Self {
            config,
            json: cli.json,
        })
    }

    pub fn config(&self) -> &ChunkrootConfig {
        &self.config
    }

    /// Execute a command and return the text to print
    pub fn execute(&self, command: &Commands) -> Result<String, MerkleError> {
        let chunk_size = self.config.chunking.chunk_size;
        debug!(?command, chunk_size, "Executing command");

        match command {
            Commands::Root { path } => {
                let fp = fingerprint(open_input(path)?, chunk_size)?;
                self.render_fingerprint(&fp)
            }
            Commands::Leaves { path } => {
                let leaves = collect_leaves(open_input(path)?, chunk_size)?;
                if self.json {
                    render_json(&LeafListing { chunk_size, leaves })
                } else {
                    Ok(leaves
                        .iter()
                        .map(Digest::to_hex)
                        .collect::<Vec<_>>()
                        .join("\n"))
                }
            }
            Commands::Combine { digests } => {
                let root = build_root_hex(digests.as_slice())?;
                if self.json {
                    render_json(&CombinedRoot {
                        root,
                        leaf_count: digests.len(),
                    })
                } else {
                    Ok(root.to_hex())
                }
            }
        }
    }

    fn render_fingerprint(&self, fp: &Fingerprint) -> Result<String, MerkleError> {
        if self.json {
            render_json(fp)
        } else {
            Ok(fp.root.to_hex())
        }
    }
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, MerkleError> {
    if path == Path::new("-") {
        return Ok(Box::new(std::io::stdin().lock()));
    }
    Ok(Box::new(File::open(path)?))
}

fn render_json<T: Serialize>(value: &T) -> Result<String, MerkleError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| MerkleError::InvalidArgument(format!("Failed to render JSON: {}", e)))
}

/// Map an error to the message shown to the user
pub fn map_error(err: &MerkleError) -> String {
    match err {
        MerkleError::SourceUnavailable(e) => format!("error: cannot read input: {}", e),
        MerkleError::InvalidArgument(msg) => format!("error: {}", msg),
        MerkleError::Format(msg) => format!("error: malformed digest: {}", msg),
        MerkleError::Config(msg) => format!("error: configuration: {}", msg),
    }
}
