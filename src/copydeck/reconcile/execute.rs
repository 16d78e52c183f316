use super::classify::ReconciliationPlan;
use crate::error::{CopyError, Result};
use crate::model::{NewRecord, PersistedRecord, Scope};
use crate::store::CopyStore;
use tracing::{debug, warn};
use uuid::Uuid;

/// What the executor actually wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub created: Vec<PersistedRecord>,
    pub updated: Vec<Uuid>,
    pub deleted: Vec<Uuid>,
    pub preserved: usize,
}

impl ExecutionReport {
    pub fn has_writes(&self) -> bool {
        !self.created.is_empty() || !self.updated.is_empty() || !self.deleted.is_empty()
    }
}

/// Apply `plan` to `store`: one batch insert, then one update per entry in
/// plan order, then one batch delete.
///
/// Stops at the first failure. When earlier steps already wrote something the
/// error is wrapped in [`CopyError::PartiallyApplied`]; nothing is rolled back.
pub fn execute<S: CopyStore>(
    store: &mut S,
    plan: &ReconciliationPlan,
    scope: &Scope,
) -> Result<ExecutionReport> {
    let mut report = ExecutionReport {
        preserved: plan.to_preserve.len(),
        ..Default::default()
    };

    if !plan.to_create.is_empty() {
        let records = plan
            .to_create
            .iter()
            .map(|draft| NewRecord::from_draft(scope, draft))
            .collect();
        report.created = store.insert_many(records).map_err(|e| fail(&report, e))?;
        debug!(count = report.created.len(), "records inserted");
    }

    for update in &plan.to_update {
        store
            .update_one(scope, &update.id, &update.patch)
            .map_err(|e| fail(&report, e))?;
        report.updated.push(update.id);
    }
    if !report.updated.is_empty() {
        debug!(count = report.updated.len(), "records updated");
    }

    if !plan.to_delete.is_empty() {
        store
            .delete_many(scope, &plan.to_delete)
            .map_err(|e| fail(&report, e))?;
        report.deleted = plan.to_delete.clone();
        debug!(count = report.deleted.len(), "records deleted");
    }

    Ok(report)
}

fn fail(report: &ExecutionReport, err: CopyError) -> CopyError {
    if report.has_writes() {
        warn!(
            created = report.created.len(),
            updated = report.updated.len(),
            error = %err,
            "store failed after partial application"
        );
        CopyError::PartiallyApplied(Box::new(err))
    } else {
        err
    }
}
