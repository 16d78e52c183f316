use super::backend::StorageBackend;
use crate::error::{CopyError, Result};
use crate::model::{PersistedRecord, Scope};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const COLLECTION_FILENAME: &str = "records.json";

/// File backend: one JSON collection per scope under
/// `<root>/<site>/<user>/records.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Directory holding a scope's collection.
    pub fn scope_dir(&self, scope: &Scope) -> PathBuf {
        self.root
            .join(encode_segment(&scope.site_id))
            .join(encode_segment(&scope.user_id))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CopyError::Io)?;
        }
        Ok(())
    }
}

/// Percent-encode everything but ASCII alphanumerics, `-` and `_`, so ids
/// can never escape the root (`..`, `/`) and distinct ids never share a directory.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

impl StorageBackend for FsBackend {
    fn load_collection(&self, scope: &Scope) -> Result<HashMap<Uuid, PersistedRecord>> {
        let data_file = self.scope_dir(scope).join(COLLECTION_FILENAME);
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(CopyError::Io)?;
        let records: HashMap<Uuid, PersistedRecord> =
            serde_json::from_str(&content).map_err(CopyError::Serialization)?;
        Ok(records)
    }

    fn save_collection(
        &self,
        scope: &Scope,
        records: &HashMap<Uuid, PersistedRecord>,
    ) -> Result<()> {
        let dir = self.scope_dir(scope);
        self.ensure_dir(&dir)?;

        let data_file = dir.join(COLLECTION_FILENAME);
        let content = serde_json::to_string_pretty(records).map_err(CopyError::Serialization)?;

        let tmp_file = dir.join(format!(".records-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(CopyError::Io)?;
        fs::rename(&tmp_file, &data_file).map_err(CopyError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_segment_keeps_safe_ids() {
        assert_eq!(encode_segment("site-42_a"), "site-42_a");
    }

    #[test]
    fn encode_segment_escapes_path_characters() {
        assert_eq!(encode_segment(".."), "%2E%2E");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_ne!(encode_segment("a/b"), encode_segment("a_b"));
    }

    #[test]
    fn scope_dir_nests_user_under_site() {
        let backend = FsBackend::new(PathBuf::from("/data"));
        let dir = backend.scope_dir(&Scope::new("acme", "jo"));
        assert_eq!(dir, PathBuf::from("/data/acme/jo"));
    }
}
