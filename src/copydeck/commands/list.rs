use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Scope;
use crate::reconcile::snapshot;
use crate::store::CopyStore;

/// Records of a scope, oldest first.
pub fn run<S: CopyStore>(store: &S, scope: &Scope) -> Result<CmdResult> {
    let records = snapshot::load(store, scope)?;
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info(format!("No copy found for {}", scope)));
    }
    Ok(result.with_records(records))
}
