use thiserror::Error;
use uuid::Uuid;

/// Problems detected before any write is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate title: \"{0}\"")]
    DuplicateTitle(String),

    #[error("scope is missing a site id")]
    MissingSiteId,

    #[error("scope is missing a user id")]
    MissingUserId,
}

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0} (some changes may have been saved)")]
    PartiallyApplied(Box<CopyError>),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CopyError {
    /// True for errors raised by the storage collaborator, as opposed to
    /// local validation or caller misuse.
    pub fn is_store_error(&self) -> bool {
        match self {
            CopyError::NotFound(_)
            | CopyError::Io(_)
            | CopyError::Serialization(_)
            | CopyError::Store(_) => true,
            CopyError::PartiallyApplied(inner) => inner.is_store_error(),
            CopyError::Validation(_) | CopyError::Api(_) => false,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, CopyError::PartiallyApplied(_))
    }

    /// Text shown to users: store failures get a generic lead, everything
    /// else is shown as is.
    pub fn user_message(&self) -> String {
        if self.is_store_error() {
            format!("Could not save changes: {}", self)
        } else {
            self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, CopyError>;
