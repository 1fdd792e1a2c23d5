// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Raw byte storage for the dimensions document. Backends know nothing
/// about the JSON shape; decoding lives in [`crate::decode_document`].
pub trait DimensionBackend: Send + Sync {
    /// Returns `None` when no document has been written yet.
    fn read_raw(&self) -> Result<Option<Vec<u8>>, StoreError>;
    fn write_raw(&self, bytes: &[u8]) -> Result<(), StoreError>;
    fn describe(&self) -> String;
}

pub struct JsonFileBackend {
    pub path: PathBuf,
}

impl JsonFileBackend {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "dimensions".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!("{name}.tmp"))
    }
}

impl DimensionBackend for JsonFileBackend {
    fn read_raw(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write_raw(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError(e.to_string()))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)
            .map_err(|e| StoreError(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError(format!("failed to replace {}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-process backend holding the raw document, so legacy and malformed
/// payloads can be exercised without a filesystem.
#[derive(Default)]
pub struct MemoryBackend {
    document: Mutex<Option<Vec<u8>>>,
    writes: AtomicU64,
}

impl MemoryBackend {
    #[must_use]
    pub fn with_document(raw: &str) -> Self {
        Self {
            document: Mutex::new(Some(raw.as_bytes().to_vec())),
            writes: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .ok()
            .and_then(|doc| doc.as_ref().map(|b| String::from_utf8_lossy(b).into_owned()))
    }

    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

impl DimensionBackend for MemoryBackend {
    fn read_raw(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let doc = self
            .document
            .lock()
            .map_err(|_| StoreError("memory backend lock poisoned".to_string()))?;
        Ok(doc.clone())
    }

    fn write_raw(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let mut doc = self
            .document
            .lock()
            .map_err(|_| StoreError("memory backend lock poisoned".to_string()))?;
        *doc = Some(bytes.to_vec());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
