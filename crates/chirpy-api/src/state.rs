use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chirpy_auth::{PasswordHasher, TokenSigner};
use chirpy_db::Database;

pub type AppState = Arc<AppStateInner>;

/// Everything a handler may touch. Built once at startup and shared.
pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenSigner,
    pub hasher: PasswordHasher,
    pub fileserver_root: PathBuf,
    hits: AtomicU64,
}

impl AppStateInner {
    pub fn new(
        db: Database,
        tokens: TokenSigner,
        hasher: PasswordHasher,
        fileserver_root: PathBuf,
    ) -> Self {
        Self {
            db,
            tokens,
            hasher,
            fileserver_root,
            hits: AtomicU64::new(0),
        }
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset_hits(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}
