use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{DraftItem, Scope};
use crate::reconcile::{self, SyncOptions};
use crate::store::CopyStore;

/// Dry run: compute what a sync would do without writing anything.
pub fn run<S: CopyStore>(
    store: &S,
    scope: &Scope,
    drafts: Vec<DraftItem>,
    options: SyncOptions,
) -> Result<CmdResult> {
    let plan = reconcile::prepare(store, scope, drafts, options)?;
    let mut result = CmdResult::default();

    for draft in &plan.to_create {
        result.add_message(CmdMessage::info(format!("would create: {}", draft.title())));
    }
    for update in &plan.to_update {
        result.add_message(CmdMessage::info(format!(
            "would update: {}",
            update.draft.title()
        )));
    }
    for id in &plan.to_delete {
        result.add_message(CmdMessage::warning(format!("would delete: {}", id)));
    }
    result.add_message(CmdMessage::info(format!(
        "{} to create, {} to update, {} to delete, {} untouched",
        plan.to_create.len(),
        plan.to_update.len(),
        plan.to_delete.len(),
        plan.to_preserve.len()
    )));

    Ok(result.with_plan(plan))
}
