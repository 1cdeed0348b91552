//! Configuration layering for a project directory
//!
//! Every test here takes `ENV_MUTEX`: the loader reads process-wide
//! environment variables, and some tests set them.

use chunkroot::config::{ConfigLoader, PROJECT_CONFIG_FILE};
use chunkroot::{MerkleError, FOUR_MIB};
use std::fs;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

const CHUNK_SIZE_VAR: &str = "CHUNKROOT_CHUNKING__CHUNK_SIZE";

/// Serialises access to the environment and restores the touched variables on drop
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn lock() -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved = ["XDG_CONFIG_HOME", CHUNK_SIZE_VAR]
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();
        // Start every test from a clean slate.
        std::env::remove_var(CHUNK_SIZE_VAR);
        Self { saved, _lock: lock }
    }

    fn set(&self, key: &str, value: impl AsRef<std::ffi::OsStr>) {
        std::env::set_var(key, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in &self.saved {
            match original {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn write_project_config(dir: &TempDir, chunk_size: usize) {
    fs::write(
        dir.path().join(PROJECT_CONFIG_FILE),
        format!("[chunking]\nchunk_size = {}\n", chunk_size),
    )
    .unwrap();
}

#[test]
fn test_project_file_overrides_default_chunk_size() {
    let env = EnvGuard::lock();
    let xdg_dir = TempDir::new().unwrap();
    env.set("XDG_CONFIG_HOME", xdg_dir.path());

    let temp_dir = TempDir::new().unwrap();
    write_project_config(&temp_dir, FOUR_MIB);

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.chunking.chunk_size, FOUR_MIB);
}

#[test]
fn test_invalid_logging_format_rejected() {
    let env = EnvGuard::lock();
    let xdg_dir = TempDir::new().unwrap();
    env.set("XDG_CONFIG_HOME", xdg_dir.path());

    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(PROJECT_CONFIG_FILE),
        "[logging]\nformat = \"xml\"\n",
    )
    .unwrap();

    assert!(matches!(
        ConfigLoader::load(temp_dir.path()),
        Err(MerkleError::Config(_))
    ));
}

#[test]
fn test_env_var_overrides_project_file() {
    let env = EnvGuard::lock();
    let xdg_dir = TempDir::new().unwrap();
    env.set("XDG_CONFIG_HOME", xdg_dir.path());

    let temp_dir = TempDir::new().unwrap();
    write_project_config(&temp_dir, FOUR_MIB);
    env.set(CHUNK_SIZE_VAR, "8192");

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.chunking.chunk_size, 8192);
}

#[test]
fn test_global_file_applies_below_project_file() {
    let env = EnvGuard::lock();
    let xdg_dir = TempDir::new().unwrap();
    let global_dir = xdg_dir.path().join("chunkroot");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("config.toml"),
        "[chunking]\nchunk_size = 2048\n",
    )
    .unwrap();
    env.set("XDG_CONFIG_HOME", xdg_dir.path());

    // Global file alone applies over the defaults.
    let bare_project = TempDir::new().unwrap();
    let config = ConfigLoader::load(bare_project.path()).unwrap();
    assert_eq!(config.chunking.chunk_size, 2048);

    // The project file wins over the global file.
    let project = TempDir::new().unwrap();
    write_project_config(&project, 4096);
    let config = ConfigLoader::load(project.path()).unwrap();
    assert_eq!(config.chunking.chunk_size, 4096);
}
