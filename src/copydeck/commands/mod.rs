use crate::config::CopydeckConfig;
use crate::model::PersistedRecord;
use crate::reconcile::{ExecutionReport, ReconciliationPlan};
use std::path::PathBuf;

pub mod config;
pub mod list;
pub mod plan;
pub mod sync;

#[derive(Debug, Clone)]
pub struct CopydeckPaths {
    /// Root of the record store and home of `config.json`.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub records: Vec<PersistedRecord>,
    pub plan: Option<ReconciliationPlan>,
    pub report: Option<ExecutionReport>,
    pub config: Option<CopydeckConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, records: Vec<PersistedRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_plan(mut self, plan: ReconciliationPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn with_report(mut self, report: ExecutionReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_config(mut self, config: CopydeckConfig) -> Self {
        self.config = Some(config);
        self
    }
}
