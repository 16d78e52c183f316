use super::resolve::ResolvedPair;
use crate::error::ValidationError;
use crate::model::{DraftItem, IdentityKey, PersistedRecord, RecordPatch, Scope};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// A matched draft whose content differs from its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedUpdate {
    pub id: Uuid,
    pub draft: DraftItem,
    /// Only the fields that change.
    pub patch: RecordPatch,
}

/// What a run will do. The four lists are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationPlan {
    pub to_create: Vec<DraftItem>,
    pub to_update: Vec<PlannedUpdate>,
    /// Matched records left as they are: the draft is empty or unchanged.
    pub to_preserve: Vec<Uuid>,
    pub to_delete: Vec<Uuid>,
}

impl ReconciliationPlan {
    /// True when executing the plan would not issue a single write.
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Bucket resolved pairs into a plan.
///
/// Rejects the plan when a draft to create shares its [`IdentityKey`] with
/// another draft to create or with a snapshot record no draft claimed.
/// Unclaimed records are scheduled for deletion only when `authoritative`.
pub fn classify(
    pairs: Vec<ResolvedPair>,
    snapshot: &[PersistedRecord],
    scope: &Scope,
    authoritative: bool,
) -> Result<ReconciliationPlan, ValidationError> {
    let claimed: HashSet<Uuid> = pairs
        .iter()
        .filter_map(|p| p.matched.as_ref().map(|r| r.id))
        .collect();
    let unclaimed_keys: HashSet<IdentityKey> = snapshot
        .iter()
        .filter(|r| !claimed.contains(&r.id))
        .map(PersistedRecord::identity_key)
        .collect();

    let mut plan = ReconciliationPlan::default();
    let mut new_keys: HashSet<IdentityKey> = HashSet::new();
    let mut dropped = 0usize;

    for ResolvedPair { draft, matched } in pairs {
        match matched {
            None if draft.is_empty() => dropped += 1,
            None => {
                let key = draft.identity_key(scope);
                if unclaimed_keys.contains(&key) || !new_keys.insert(key.clone()) {
                    warn!(title = %key.title, "duplicate title among new drafts");
                    return Err(ValidationError::DuplicateTitle(key.title));
                }
                plan.to_create.push(draft);
            }
            Some(record) if draft.is_empty() => plan.to_preserve.push(record.id),
            Some(record) => {
                let patch = draft.diff(&record);
                if patch.is_empty() {
                    plan.to_preserve.push(record.id);
                } else {
                    plan.to_update.push(PlannedUpdate {
                        id: record.id,
                        draft,
                        patch,
                    });
                }
            }
        }
    }

    if authoritative {
        plan.to_delete = snapshot
            .iter()
            .filter(|r| !claimed.contains(&r.id))
            .map(|r| r.id)
            .collect();
    }

    debug!(dropped, "empty new drafts dropped");
    Ok(plan)
}
