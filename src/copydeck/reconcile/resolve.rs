use crate::model::{DraftItem, IdentityKey, PersistedRecord, Scope};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

/// A draft and the snapshot record it stands for, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPair {
    pub draft: DraftItem,
    pub matched: Option<PersistedRecord>,
}

/// Match every draft to at most one snapshot record, and every record to at
/// most one draft.
///
/// Explicit ids are resolved for all drafts before any title is looked at, so
/// a draft that kept its id always claims its record, even when another
/// draft carries the record's title. Drafts left over (no id, an id the
/// snapshot no longer has, or an id an earlier draft already claimed) then
/// fall back to their [`IdentityKey`] when `match_titles` is set, taking the
/// first unclaimed record with that key in snapshot order.
///
/// Pairs come back in draft order.
pub fn resolve(
    drafts: Vec<DraftItem>,
    snapshot: &[PersistedRecord],
    scope: &Scope,
    match_titles: bool,
) -> Vec<ResolvedPair> {
    let by_id: HashMap<_, usize> = snapshot
        .iter()
        .enumerate()
        .map(|(i, record)| (record.id, i))
        .collect();

    let mut claimed = vec![false; snapshot.len()];
    let mut matches: Vec<Option<usize>> = vec![None; drafts.len()];

    // 1. Explicit ids
    for (slot, draft) in matches.iter_mut().zip(&drafts) {
        let Some(id) = draft.id else { continue };
        match by_id.get(&id) {
            Some(&i) if !claimed[i] => {
                claimed[i] = true;
                *slot = Some(i);
            }
            Some(_) => trace!(%id, "id already claimed by an earlier draft"),
            None => trace!(%id, "id not in snapshot, falling back to title"),
        }
    }

    // 2. Title fallback
    if match_titles {
        let mut by_key: HashMap<IdentityKey, VecDeque<usize>> = HashMap::new();
        for (i, record) in snapshot.iter().enumerate() {
            if !claimed[i] {
                by_key.entry(record.identity_key()).or_default().push_back(i);
            }
        }

        for (slot, draft) in matches.iter_mut().zip(&drafts) {
            if slot.is_some() {
                continue;
            }
            let Some(candidates) = by_key.get_mut(&draft.identity_key(scope)) else {
                continue;
            };
            if let Some(i) = candidates.pop_front() {
                claimed[i] = true;
                *slot = Some(i);
                trace!(title = draft.title(), "matched by title");
            }
        }
    }

    let matched_count = matches.iter().filter(|m| m.is_some()).count();
    debug!(
        drafts = drafts.len(),
        matched = matched_count,
        "drafts resolved"
    );

    drafts
        .into_iter()
        .zip(matches)
        .map(|(draft, i)| ResolvedPair {
            draft,
            matched: i.map(|i| snapshot[i].clone()),
        })
        .collect()
}
