//! Error handling for the approval workflow.
//!
//! The pure decision functions never fail. Only operations that touch the
//! member store can, and they distinguish a missing member from a storage
//! failure so the dashboard can tell the two apart.

use async_graphql::{ErrorExtensions, FieldError};

use crate::db::StoreError;
use crate::models::member::MemberId;

/// The failure cases of a persisted status change.
///
/// The `Display` text of each variant is safe to show to users; storage
/// details are only reachable through `source()`.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// No member has the given ID.
    #[error("member not found")]
    NotFound(MemberId),
    /// The member store failed to read or write.
    #[error("failed to update status, try again")]
    Storage(#[from] StoreError),
}

/// The return type for all status-changing operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

impl ApprovalError {
    pub fn code(&self) -> &'static str {
        match self {
            ApprovalError::NotFound(_) => "NOT_FOUND",
            ApprovalError::Storage(_) => "STORAGE",
        }
    }
}

impl ErrorExtensions for ApprovalError {
    fn extend(&self) -> FieldError {
        FieldError::new(self.to_string()).extend_with(|_err, ext| ext.set("code", self.code()))
    }
}

/// A caller tried an action the visibility rules don't allow.
pub fn forbidden(action: &str) -> FieldError {
    FieldError::new(format!("Not allowed to {} this member", action))
        .extend_with(|_err, ext| ext.set("code", "FORBIDDEN"))
}

/// The request carried a value that couldn't be parsed.
pub fn bad_request(reason: impl std::fmt::Display) -> FieldError {
    FieldError::new(reason.to_string()).extend_with(|_err, ext| ext.set("code", "BAD_REQUEST"))
}
