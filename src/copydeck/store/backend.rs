use crate::error::Result;
use crate::model::{PersistedRecord, Scope};
use std::collections::HashMap;
use uuid::Uuid;

/// Abstract interface for raw collection I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (ids, timestamps, not-found rules).
pub trait StorageBackend {
    /// Load every record of a scope. A scope never written to is empty, not an error.
    fn load_collection(&self, scope: &Scope) -> Result<HashMap<Uuid, PersistedRecord>>;

    /// Replace the stored collection of a scope.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_collection(&self, scope: &Scope, records: &HashMap<Uuid, PersistedRecord>)
        -> Result<()>;
}
