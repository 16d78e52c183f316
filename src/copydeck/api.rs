//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every copydeck operation, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Applies configuration** (e.g. title matching) to per-call options
//! - **Shapes results** for callers: `Result<CmdResult>` for rich clients,
//!   [`SyncResponse`] for the presentation layer contract
//!
//! ## The Sync Contract
//!
//! [`CopyApi::sync`] never returns an error. Every failure becomes
//!
//! ```json
//! { "success": false, "error": "Validation error: duplicate title: \"Launch Tweet\"" }
//! ```
//!
//! and success is `{ "success": true }`. Store failures are prefixed with a
//! generic message; when some writes already landed the message says so.
//!
//! ## Generic Over CopyStore
//!
//! `CopyApi<S: CopyStore>` is generic over the storage collaborator:
//! - Production: `CopyApi<RecordStore<FsBackend>>`
//! - Testing: `CopyApi<InMemoryStore>`

use crate::commands::{self, CmdResult, CopydeckPaths};
use crate::config::CopydeckConfig;
use crate::error::{CopyError, Result};
use crate::model::{DraftItem, Scope};
use crate::reconcile::{ExecutionReport, SyncOptions};
use crate::store::CopyStore;
use serde::Serialize;

/// Outcome of [`CopyApi::sync`] as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub report: Option<ExecutionReport>,
}

impl SyncResponse {
    pub fn success(report: ExecutionReport) -> Self {
        Self {
            success: true,
            error: None,
            report: Some(report),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            report: None,
        }
    }

    fn from_error(err: &CopyError) -> Self {
        Self::failure(err.user_message())
    }
}

/// The main API facade for copydeck operations.
///
/// Generic over `CopyStore` to allow different storage collaborators.
/// All UI clients (CLI, web, etc.) should interact through this API.
pub struct CopyApi<S: CopyStore> {
    store: S,
    paths: CopydeckPaths,
    config: CopydeckConfig,
}

impl<S: CopyStore> CopyApi<S> {
    pub fn new(store: S, paths: CopydeckPaths, config: CopydeckConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    /// Options for a call. Deletion is the caller's choice; title matching
    /// comes from configuration.
    pub fn options(&self, authoritative: bool) -> SyncOptions {
        SyncOptions {
            authoritative,
            match_titles: self.config.match_titles,
        }
    }

    /// Reconcile `drafts` into the scope, folding any failure into the response.
    pub fn sync(
        &mut self,
        scope: &Scope,
        drafts: Vec<DraftItem>,
        options: SyncOptions,
    ) -> SyncResponse {
        match commands::sync::run(&mut self.store, scope, drafts, options) {
            Ok(result) => SyncResponse::success(result.report.unwrap_or_default()),
            Err(err) => SyncResponse::from_error(&err),
        }
    }

    pub fn sync_copy(
        &mut self,
        scope: &Scope,
        drafts: Vec<DraftItem>,
        options: SyncOptions,
    ) -> Result<CmdResult> {
        commands::sync::run(&mut self.store, scope, drafts, options)
    }

    pub fn plan_copy(
        &self,
        scope: &Scope,
        drafts: Vec<DraftItem>,
        options: SyncOptions,
    ) -> Result<CmdResult> {
        commands::plan::run(&self.store, scope, drafts, options)
    }

    pub fn list_copy(&self, scope: &Scope) -> Result<CmdResult> {
        commands::list::run(&self.store, scope)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

// Re-export types needed by CLI
pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, MessageLevel};
