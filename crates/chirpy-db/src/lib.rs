pub mod error;
pub mod models;
pub mod queries;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{error, info, warn};

pub use crate::error::{DbError, Result};
use crate::models::DbStructure;

/// Behavior switches for the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Reject creating or updating a user to an email another user already has.
    pub unique_emails: bool,
}

/// Single-file JSON datastore with an authoritative in-memory mirror.
///
/// Reads are served from memory. Every write holds the write lock across
/// the whole draft-persist-swap sequence, so chirp and user writes are
/// serialized against each other and ids within a kind are totally ordered.
pub struct Database {
    path: PathBuf,
    options: StoreOptions,
    state: RwLock<DbStructure>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with(path, StoreOptions::default())
    }

    pub fn open_with(path: &Path, options: StoreOptions) -> Result<Self> {
        let init_err = |reason: String| DbError::Init {
            path: path.to_path_buf(),
            reason,
        };

        let state = match fs::read(path) {
            Ok(bytes) => serde_json::from_slice::<DbStructure>(&bytes)
                .map_err(|e| init_err(format!("malformed store file: {}", e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty = DbStructure::default();
                write_atomic(path, &empty).map_err(|e| init_err(e.to_string()))?;
                info!("Created empty store at {}", path.display());
                empty
            }
            Err(e) => return Err(init_err(e.to_string())),
        };

        info!(
            "Store opened at {} ({} chirps, {} users)",
            path.display(),
            state.chirps.len(),
            state.users.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            options,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn with_state<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DbStructure) -> Result<T>,
    {
        let state = self.state.read().map_err(|_| DbError::LockPoisoned)?;
        f(&state)
    }

    /// Apply `f` to a draft of the current state, persist the draft, then
    /// make it the live state. If `f` or the persist step fails, the live
    /// state is left exactly as it was.
    pub fn with_state_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DbStructure) -> Result<T>,
    {
        let mut state = self.state.write().map_err(|_| DbError::LockPoisoned)?;
        let mut draft = state.clone();
        let out = f(&mut draft)?;

        write_atomic(&self.path, &draft).map_err(|e| {
            error!("Failed to persist store to {}: {}", self.path.display(), e);
            DbError::Persistence(e.to_string())
        })?;

        *state = draft;
        Ok(out)
    }
}

/// Serialize the whole document to a sibling temp file, fsync it and rename
/// it over `path`, then fsync the directory so the rename itself is durable.
/// A crash mid-write leaves the previous file intact.
fn write_atomic(path: &Path, state: &DbStructure) -> std::io::Result<()> {
    let bytes = serde_json::to_vec_pretty(state)?;

    let tmp = tmp_path(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
        return result;
    }

    // The new file is already in place; failing now would leave memory
    // behind the disk.
    if let Err(e) = sync_dir(parent_dir(path)) {
        warn!("Failed to sync directory of {}: {}", path.display(), e);
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

// Directories cannot be opened for fsync on other platforms.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".tmp");
    path.with_file_name(name)
}
