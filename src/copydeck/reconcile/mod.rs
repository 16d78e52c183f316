//! # Collection Reconciliation
//!
//! Synchronizes a client-held list of [`DraftItem`]s against the records a
//! store holds for one [`Scope`], issuing the fewest writes that make the
//! store reflect the drafts.
//!
//! ## Pipeline
//!
//! ```text
//! snapshot::load ──▶ resolve::resolve ──▶ classify::classify ──▶ execute::execute
//!   (fetch_all)       (id, then title)     (plan + guard)         (insert/update/delete)
//! ```
//!
//! Each stage returns a `Result`; the first failure ends the run. The first
//! three stages never write, so a [`ReconciliationPlan`] can be inspected
//! (see `commands::plan`) before anything is applied.
//!
//! ## Identity
//!
//! A draft matches a record by explicit id first. Only drafts whose id is
//! missing or stale fall back to the trimmed title (see [`IdentityKey`]).
//! Renaming a draft that kept its id is therefore an update, never a
//! delete followed by a create.
//!
//! ## Buckets
//!
//! | Draft | Matched record | Bucket |
//! |-------|----------------|--------|
//! | empty | none | dropped |
//! | non-empty | none | `to_create` (duplicate keys rejected) |
//! | empty | some | `to_preserve` |
//! | unchanged | some | `to_preserve` |
//! | changed | some | `to_update` |
//! | (none) | unclaimed | `to_delete`, only when the run is authoritative |
//!
//! ## Authoritative Runs
//!
//! Deletion is opt-in per call through [`SyncOptions::authoritative`]. A
//! non-authoritative run only upserts; with an empty draft list it does
//! nothing at all, not even the snapshot fetch.
//!
//! ## Failure Model
//!
//! Execution is not transactional. Creates go first, then updates in draft
//! order, then deletes. A store failure after an earlier step succeeded is
//! reported as `CopyError::PartiallyApplied`; whatever was written stays written.
//! There is no locking either: two runs against the same scope may interleave.
//!
//! [`IdentityKey`]: crate::model::IdentityKey

use crate::error::Result;
use crate::model::{DraftItem, Scope};
use crate::store::CopyStore;
use tracing::{debug, info, info_span};

pub mod classify;
pub mod execute;
pub mod resolve;
pub mod snapshot;

pub use classify::{classify, PlannedUpdate, ReconciliationPlan};
pub use execute::{execute, ExecutionReport};
pub use resolve::{resolve, ResolvedPair};

/// Per-call switches for a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// The drafts are the complete, final state of the scope: unmatched records get deleted.
    pub authoritative: bool,
    /// Match id-less drafts to records by trimmed title.
    pub match_titles: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            authoritative: false,
            match_titles: true,
        }
    }
}

impl SyncOptions {
    pub fn authoritative() -> Self {
        Self {
            authoritative: true,
            ..Default::default()
        }
    }

    pub fn upsert_only() -> Self {
        Self::default()
    }
}

/// Plan and report of a completed run.
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    pub plan: ReconciliationPlan,
    pub report: ExecutionReport,
}

/// Load, resolve and classify without writing anything.
pub fn prepare<S: CopyStore>(
    store: &S,
    scope: &Scope,
    drafts: Vec<DraftItem>,
    options: SyncOptions,
) -> Result<ReconciliationPlan> {
    scope.validate()?;

    if drafts.is_empty() && !options.authoritative {
        debug!("no drafts and scope not authoritative, nothing to reconcile");
        return Ok(ReconciliationPlan::default());
    }

    let snapshot = snapshot::load(store, scope)?;
    let pairs = resolve(drafts, &snapshot, scope, options.match_titles);
    let plan = classify(pairs, &snapshot, scope, options.authoritative)?;

    debug!(
        create = plan.to_create.len(),
        update = plan.to_update.len(),
        preserve = plan.to_preserve.len(),
        delete = plan.to_delete.len(),
        "plan ready"
    );
    Ok(plan)
}

/// Run the whole pipeline against `store`.
pub fn run<S: CopyStore>(
    store: &mut S,
    scope: &Scope,
    drafts: Vec<DraftItem>,
    options: SyncOptions,
) -> Result<SyncOutcome> {
    let span = info_span!("sync", site = %scope.site_id, user = %scope.user_id);
    let _guard = span.enter();

    let plan = prepare(store, scope, drafts, options)?;
    if plan.is_noop() {
        debug!("plan has no writes");
        return Ok(SyncOutcome {
            report: ExecutionReport {
                preserved: plan.to_preserve.len(),
                ..Default::default()
            },
            plan,
        });
    }

    let report = execute(store, &plan, scope)?;
    info!(
        created = report.created.len(),
        updated = report.updated.len(),
        deleted = report.deleted.len(),
        preserved = report.preserved,
        "sync applied"
    );
    Ok(SyncOutcome { plan, report })
}
