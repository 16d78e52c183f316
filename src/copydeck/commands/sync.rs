use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{DraftItem, Scope};
use crate::reconcile::{self, SyncOptions, SyncOutcome};
use crate::store::CopyStore;

pub fn run<S: CopyStore>(
    store: &mut S,
    scope: &Scope,
    drafts: Vec<DraftItem>,
    options: SyncOptions,
) -> Result<CmdResult> {
    let outcome = reconcile::run(store, scope, drafts, options)?;
    let report = &outcome.report;
    let mut result = CmdResult::default();

    for record in &report.created {
        result.add_message(CmdMessage::success(format!(
            "Copy created: {}",
            record.content.title
        )));
    }
    for update in &outcome.plan.to_update {
        result.add_message(CmdMessage::success(format!(
            "Copy updated: {}",
            update.draft.title()
        )));
    }
    if !report.deleted.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "Copy deleted: {} record(s)",
            report.deleted.len()
        )));
    }
    if !report.has_writes() {
        result.add_message(CmdMessage::info("Nothing to change"));
    } else if report.preserved > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} record(s) left untouched",
            report.preserved
        )));
    }

    let SyncOutcome { plan, report } = outcome;
    Ok(result
        .with_records(report.created.clone())
        .with_plan(plan)
        .with_report(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    fn scope() -> Scope {
        Scope::new("site-1", "user-1")
    }

    #[test]
    fn reports_created_and_deleted_copy() {
        let mut fixture = StoreFixture::new().with_record("Old", "gone", &scope());
        let result = run(
            &mut fixture.store,
            &scope(),
            vec![DraftItem::new("Hello", "World")],
            SyncOptions::authoritative(),
        )
        .unwrap();

        assert_eq!(result.records.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "Copy created: Hello"));
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "Copy deleted: 1 record(s)"));
        assert_eq!(fixture.records(&scope()).len(), 1);
    }

    #[test]
    fn unchanged_drafts_report_nothing_to_change() {
        let mut fixture = StoreFixture::new().with_record("Same", "body", &scope());
        let result = run(
            &mut fixture.store,
            &scope(),
            vec![DraftItem::new("Same", "body")],
            SyncOptions::authoritative(),
        )
        .unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(result.report.unwrap().preserved, 1);
    }

    #[test]
    fn rename_reports_an_update() {
        let mut fixture = StoreFixture::new().with_record("X", "body", &scope());
        let id = fixture.record_titled("X", &scope()).id;

        let result = run(
            &mut fixture.store,
            &scope(),
            vec![DraftItem::new("Y", "body").with_id(id)],
            SyncOptions::authoritative(),
        )
        .unwrap();

        assert!(result.messages.iter().any(|m| m.content == "Copy updated: Y"));
        let records = fixture.records(&scope());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].content.title, "Y");
    }
}
