//! Error types for the director.

use crate::domain::foundation::StageId;

/// Director errors.
///
/// Both variants mean the analyzer and the script disagree, which a
/// validated script rules out. Callers treat them as programming errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DirectorError {
    #[error("Stage lookup failed: '{0}' is not part of the script")]
    StageLookup(StageId),

    #[error("Stage not found: '{0}'")]
    StageNotFound(StageId),
}
