use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{IndexFile, Note};

/// Storage collaborator contract required by the command layer and the
/// session. Implementations own identifier assignment.
pub trait NoteStore: Send + Sync {
    /// Reserves the identifier the next new note will be saved under.
    fn allocate_id(&self) -> Result<i64>;

    /// Upserts by identifier. Notes must carry a storage-assigned id.
    fn insert_or_replace(&self, note: &Note) -> Result<()>;

    /// Removes by identifier. Deleting an id that is no longer present
    /// is a no-op, which keeps undo/redo replay idempotent.
    fn delete(&self, note: &Note) -> Result<()>;

    /// Snapshot of all notes, newest identifier first.
    fn get_all(&self) -> Vec<Note>;

    /// Watch channel receiving a fresh snapshot after every mutation.
    fn subscribe(&self) -> watch::Receiver<Vec<Note>>;
}

/// File-backed store: a JSON index under `meta/index.json` plus image
/// payloads under `images/`.
pub struct JsonNoteStore {
    root: PathBuf,
    index: Mutex<IndexFile>,
    snapshots: watch::Sender<Vec<Note>>,
}

impl JsonNoteStore {
    /// Opens (or initializes) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(meta_dir(&root))?;
        fs::create_dir_all(root.join("images"))?;
        let index = read_index(&root)?;
        let (snapshots, _) = watch::channel(ordered_snapshot(&index));
        Ok(Self {
            root,
            index: Mutex::new(index),
            snapshots,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decodes a base64 image payload and writes it under `images/` with
    /// a sanitized, timestamped filename. Returns the relative path the
    /// editor stores on the note.
    pub fn save_image(&self, suggested_name: &str, base64_data: &str) -> Result<String> {
        let data = BASE64.decode(base64_data.trim())?;
        if data.is_empty() {
            return Err(StoreError::EmptyImage);
        }
        let path = Path::new(suggested_name);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .unwrap_or("png");
        let stored_name = format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(stem),
            ext.to_lowercase()
        );
        let dest = self.root.join("images").join(&stored_name);
        fs::write(&dest, &data)?;
        debug!(name = %stored_name, bytes = data.len(), "saved image payload");
        Ok(format!("images/{}", stored_name))
    }

    /// Resolves a relative image path under the storage root, refusing
    /// traversal and absolute paths.
    pub fn resolve_image_path(&self, relative_path: &str) -> Result<PathBuf> {
        if relative_path.contains("..") || relative_path.starts_with('/') {
            return Err(StoreError::InvalidPath);
        }
        let full = self.root.join(relative_path);
        if !full.starts_with(&self.root) {
            return Err(StoreError::InvalidPath);
        }
        Ok(full)
    }

    /// A poisoned guard still holds a structurally valid index, so the
    /// lock is recovered instead of propagating the panic.
    fn index(&self) -> MutexGuard<'_, IndexFile> {
        self.index.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, index: &IndexFile) {
        self.snapshots.send_replace(ordered_snapshot(index));
    }
}

impl NoteStore for JsonNoteStore {
    fn allocate_id(&self) -> Result<i64> {
        let mut index = self.index();
        let id = index.next_id;
        index.next_id += 1;
        write_index(&self.root, &index)?;
        Ok(id)
    }

    fn insert_or_replace(&self, note: &Note) -> Result<()> {
        if note.id.is_none() {
            return Err(StoreError::MissingId);
        }
        let mut index = self.index();
        match index.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => index.notes.push(note.clone()),
        }
        // The in-memory index is updated ahead of the file; if the write
        // fails, no snapshot is published and disk catches up on the next
        // successful write.
        write_index(&self.root, &index)?;
        debug!(id = ?note.id, "upserted note");
        self.publish(&index);
        Ok(())
    }

    fn delete(&self, note: &Note) -> Result<()> {
        let Some(id) = note.id else {
            return Ok(());
        };
        let mut index = self.index();
        let before = index.notes.len();
        index.notes.retain(|n| n.id != Some(id));
        if index.notes.len() == before {
            return Ok(());
        }
        // Same write ordering as insert_or_replace: memory first, then the
        // index file, snapshot only after a successful write.
        write_index(&self.root, &index)?;
        debug!(id, "deleted note");
        self.publish(&index);
        Ok(())
    }

    fn get_all(&self) -> Vec<Note> {
        ordered_snapshot(&self.index())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Note>> {
        self.snapshots.subscribe()
    }
}

/// Notes ordered newest identifier first, the order the list screen shows.
fn ordered_snapshot(index: &IndexFile) -> Vec<Note> {
    let mut notes = index.notes.clone();
    notes.sort_by(|a, b| b.id.cmp(&a.id));
    notes
}

fn meta_dir(root: &Path) -> PathBuf {
    root.join("meta")
}

fn index_path(root: &Path) -> PathBuf {
    meta_dir(root).join("index.json")
}

/// Sanitize a filename: remove path separators and other dangerous chars.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
        .chars()
        .take(200)
        .collect()
}

/// Atomic write: write to temp file then rename.
fn write_index(root: &Path, index: &IndexFile) -> Result<()> {
    let path = index_path(root);
    let temp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(index)?;
    let mut f = fs::File::create(&temp_path)?;
    f.write_all(json.as_bytes())?;
    f.sync_all()?;
    drop(f);
    fs::rename(&temp_path, &path)?;
    Ok(())
}

fn read_index(root: &Path) -> Result<IndexFile> {
    let path = index_path(root);
    if !path.exists() {
        return Ok(IndexFile::default());
    }
    let s = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn poisoned_index_lock_is_recovered() {
        let tmp = tempdir().unwrap();
        let store = JsonNoteStore::open(tmp.path()).unwrap();
        let note = Note::builder()
            .id(store.allocate_id().unwrap())
            .title("survivor")
            .note_text("body")
            .build()
            .unwrap();
        store.insert_or_replace(&note).unwrap();

        // Panic while holding the guard to poison the mutex.
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.index.lock().unwrap();
            panic!("poison");
        }));
        assert!(store.index.is_poisoned());

        assert_eq!(store.get_all().len(), 1);
        let id = store.allocate_id().unwrap();
        let another = Note::builder()
            .id(id)
            .title("after")
            .note_text("body")
            .build()
            .unwrap();
        store.insert_or_replace(&another).unwrap();
        assert_eq!(store.get_all().len(), 2);
    }
}
