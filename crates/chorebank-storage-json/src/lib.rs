//! chorebank-storage-json
//!
//! Durable stores for the points ledger. [`MemoryLedgerStore`] keeps the
//! whole ledger behind a mutex and commits transactions by swapping in a
//! mutated clone, so a failed operation rolls back completely.
//! [`JsonLedgerStore`] adds snapshot persistence: the committed state is
//! written to a temp file and renamed into place before the in-memory swap,
//! making the disk write part of the commit.

mod state;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chorebank_core::{CoreError, LedgerStore, LedgerTx, Result};

pub use state::LedgerState;

const TMP_SUFFIX: &str = "tmp";

/// Transactional in-memory store. The mutex serializes transactions, which
/// makes concurrent re-scoring last-write-wins: each closure observes the
/// state left by the previous commit.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    state: Mutex<LedgerState>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Direct state access for fixtures and administrative seeding. Runs
    /// outside the transactional path.
    pub fn seed(&self, f: impl FnOnce(&mut LedgerState)) -> Result<()> {
        let mut guard = lock(&self.state)?;
        f(&mut guard);
        Ok(())
    }

    /// Copy of the current committed state.
    pub fn snapshot(&self) -> Result<LedgerState> {
        Ok(lock(&self.state)?.clone())
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn transact<T>(&self, op: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T> {
        let mut guard = lock(&self.state)?;
        let mut working = guard.clone();
        let value = op(&mut working)?;
        *guard = working;
        Ok(value)
    }
}

/// File-backed store: every committed transaction is flushed to one JSON
/// snapshot with a temp-file + rename write, and existing snapshots load at
/// open.
#[derive(Debug)]
pub struct JsonLedgerStore {
    state: Mutex<LedgerState>,
    path: PathBuf,
}

impl JsonLedgerStore {
    /// Opens the store at `path`, loading the existing snapshot or starting
    /// empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let data = fs::read_to_string(&path).map_err(storage_err)?;
            serde_json::from_str(&data).map_err(storage_err)?
        } else {
            LedgerState::default()
        };
        Ok(Self {
            state: Mutex::new(state),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seeds state outside the transactional path and persists it.
    pub fn seed(&self, f: impl FnOnce(&mut LedgerState)) -> Result<()> {
        let mut guard = lock(&self.state)?;
        let mut working = guard.clone();
        f(&mut working);
        persist(&self.path, &working)?;
        *guard = working;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<LedgerState> {
        Ok(lock(&self.state)?.clone())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn transact<T>(&self, op: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T> {
        let mut guard = lock(&self.state)?;
        let mut working = guard.clone();
        let value = op(&mut working)?;
        persist(&self.path, &working)?;
        *guard = working;
        Ok(value)
    }
}

fn lock<'a>(
    state: &'a Mutex<LedgerState>,
) -> Result<std::sync::MutexGuard<'a, LedgerState>> {
    state
        .lock()
        .map_err(|_| CoreError::Storage("ledger state mutex poisoned".into()))
}

fn storage_err(err: impl std::fmt::Display) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn persist(path: &Path, state: &LedgerState) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(storage_err)?;
    }
    let json = serde_json::to_string_pretty(state).map_err(storage_err)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path).map_err(storage_err)?;
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut file = fs::File::create(path).map_err(storage_err)?;
    file.write_all(contents.as_bytes()).map_err(storage_err)?;
    file.sync_all().map_err(storage_err)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}", TMP_SUFFIX));
    path.with_file_name(name)
}
