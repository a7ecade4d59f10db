//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.
//! - Map repository failures onto the caller-facing error taxonomy.

use crate::model::child::{ChildId, ChildValidationError};
use crate::model::chore::{ChoreId, ChoreValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod child_service;
pub mod chore_service;
pub mod due_state;
pub mod history_service;
pub mod ledger;
pub mod lifecycle;
pub mod pin_service;

pub use pin_service::PinError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing error for every service operation.
#[derive(Debug)]
pub enum ServiceError {
    InvalidChore(ChoreValidationError),
    InvalidChild(ChildValidationError),
    Pin(PinError),
    ChildNotFound(ChildId),
    /// Chore is absent, or inactive where an active chore is required.
    ChoreNotFound(ChoreId),
    Repo(RepoError),
}

/// Coarse classification used by transport layers to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Internal,
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::InvalidChore(_) | Self::InvalidChild(_) => ServiceErrorKind::Validation,
            Self::Pin(PinError::Hash(_)) => ServiceErrorKind::Internal,
            Self::Pin(err) if err.is_unauthorized() => ServiceErrorKind::Unauthorized,
            Self::Pin(_) => ServiceErrorKind::Validation,
            Self::ChildNotFound(_) | Self::ChoreNotFound(_) => ServiceErrorKind::NotFound,
            Self::Repo(_) => ServiceErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChore(err) => write!(f, "{err}"),
            Self::InvalidChild(err) => write!(f, "{err}"),
            Self::Pin(err) => write!(f, "{err}"),
            Self::ChildNotFound(_) => f.write_str("Child not found"),
            Self::ChoreNotFound(_) => f.write_str("Chore not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidChore(err) => Some(err),
            Self::InvalidChild(err) => Some(err),
            Self::Pin(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::ChildNotFound(_) | Self::ChoreNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "chore",
                id,
            } => Self::ChoreNotFound(id),
            RepoError::NotFound {
                entity: "child",
                id,
            } => Self::ChildNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ChoreValidationError> for ServiceError {
    fn from(value: ChoreValidationError) -> Self {
        Self::InvalidChore(value)
    }
}

impl From<ChildValidationError> for ServiceError {
    fn from(value: ChildValidationError) -> Self {
        Self::InvalidChild(value)
    }
}

impl From<PinError> for ServiceError {
    fn from(value: PinError) -> Self {
        Self::Pin(value)
    }
}
