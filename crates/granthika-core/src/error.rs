//! Client-side validation errors.
//!
//! These never reach the network: they gate a user action before any
//! request is issued, and the views render the message as-is.

use thiserror::Error;

/// A user action blocked by missing selection or input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Batch start requested with no files selected.
    #[error("Select at least one file before starting a batch run")]
    NoFilesSelected,
    /// Save requested with no generated rows selected.
    #[error("Select at least one generated row before saving")]
    NoRowsSelected,
    /// Generation requested for a row missing one of its source texts.
    #[error("Both the Sanskrit and English source texts are required to generate")]
    MissingSourceText,
}
