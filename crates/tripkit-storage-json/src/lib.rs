//! tripkit-storage-json
//!
//! JSON persistence backend for the trip store: atomic writes staged
//! through a temporary file, plus timestamped backups pruned to a retention
//! count. Persisted state is a pure function of the in-memory store, so
//! repeated saves of the same state are idempotent.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use tripkit_core::{CoreError, StoreBackupInfo, StoreStorage, TripStore};

const STORE_FILE: &str = "store.json";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed storage rooted at one application directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    store_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: PathBuf, retention: Option<usize>) -> Result<Self, CoreError> {
        ensure_dir(&root)?;
        let backups_dir = root.join("backups");
        ensure_dir(&backups_dir)?;
        let store_file = root.join(STORE_FILE);
        Ok(Self {
            root,
            store_file,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn store_path(&self) -> &Path {
        &self.store_file
    }

    fn backup_path(&self, name: &str) -> PathBuf {
        self.backups_dir.join(name)
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let backups = self.list_backups()?;
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(&entry.path);
        }
        Ok(())
    }
}

impl StoreStorage for JsonStorage {
    fn save_store(&self, store: &TripStore) -> Result<(), CoreError> {
        save_store_to_path(store, &self.store_file)
    }

    /// A missing store file loads as a fresh default store (one trip); the
    /// store is never empty.
    fn load_store(&self) -> Result<TripStore, CoreError> {
        if !self.store_file.exists() {
            tracing::debug!(path = %self.store_file.display(), "no store file, starting fresh");
            return Ok(TripStore::new());
        }
        load_store_from_path(&self.store_file)
    }

    fn save_store_to_path(&self, store: &TripStore, path: &Path) -> Result<(), CoreError> {
        save_store_to_path(store, path)
    }

    fn load_store_from_path(&self, path: &Path) -> Result<TripStore, CoreError> {
        load_store_from_path(path)
    }

    fn backup_store(
        &self,
        store: &TripStore,
        note: Option<&str>,
    ) -> Result<StoreBackupInfo, CoreError> {
        ensure_dir(&self.backups_dir)?;
        let created_at = Utc::now();
        let timestamp = created_at.format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("store_{timestamp}");
        if let Some(label) = sanitize_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let name = format!("{stem}.{BACKUP_EXTENSION}");
        let path = self.backup_path(&name);
        let json = to_json(store)?;
        write_atomic(&path, &json)?;
        self.prune_backups()?;
        Ok(StoreBackupInfo {
            id: name,
            created_at: created_at.to_rfc3339(),
            path,
        })
    }

    fn list_backups(&self) -> Result<Vec<StoreBackupInfo>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let created_at = parse_backup_timestamp(&name)
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_default();
            entries.push(StoreBackupInfo {
                id: name,
                created_at,
                path,
            });
        }
        entries.sort_by_key(|entry| Reverse(entry.created_at.clone()));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &StoreBackupInfo) -> Result<TripStore, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let store = load_store_from_path(&backup.path)?;
        save_store_to_path(&store, &self.store_file)?;
        Ok(store)
    }
}

/// Writes the store atomically by staging to a temporary file.
pub fn save_store_to_path(store: &TripStore, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = to_json(store)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

pub fn load_store_from_path(path: &Path) -> Result<TripStore, CoreError> {
    let data = fs::read_to_string(path).map_err(io_err)?;
    serde_json::from_str(&data).map_err(serde_err)
}

fn to_json(store: &TripStore) -> Result<String, CoreError> {
    serde_json::to_string_pretty(store).map_err(serde_err)
}

fn io_err(err: std::io::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn serde_err(err: serde_json::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(io_err)
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{BACKUP_EXTENSION}"))?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    if segments.len() < 3 {
        return None;
    }
    let date_part = segments.get(1)?;
    let time_part = segments.get(2)?;
    if date_part.len() != 8 || time_part.len() != 4 {
        return None;
    }
    let raw = format!("{date_part}{time_part}");
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(data.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(())
}
