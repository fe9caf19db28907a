//! # Granthika Core
//!
//! Platform-independent curation logic for the Granthika dataset studio.
//!
//! This crate holds everything the UI does not: the wire types exchanged
//! with the generation backend, progress arithmetic for batch runs, row
//! filtering, selection bookkeeping, save-payload construction, and the
//! cancellable polling controller. No networking, no rendering — the app
//! crate wires these pieces to Dioxus and reqwest.
//!
//! ## Modules
//!
//! - [`types`] - serde records for files, rows, generated Q&A, and process status
//! - [`progress`] - completion percentages and remaining-time estimation
//! - [`filter`] - client-side text filtering over row summaries
//! - [`selection`] - batch-result row selection and per-row pair selection
//! - [`qa`] - tag lists, Q&A column collection, and pair assembly
//! - [`payload`] - request bodies for the row-save and batch-save endpoints
//! - [`poll`] - stop signal + monotonic tickets for the status poll loop
//! - [`error`] - client-side validation errors

#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod payload;
pub mod poll;
pub mod progress;
pub mod qa;
pub mod selection;
pub mod types;

pub use error::SelectionError;
pub use poll::{DebounceGate, PollController};
pub use selection::{PairSelection, RowSelection};
pub use types::{
    BatchStarted, DetailedProcessStatus, FileInfo, FileProgress, FileStatus, GeneratedQa,
    ProcessStatus, ResultRow, RowDetail, RowSummary, RunStatus, SaveOutcome,
};
