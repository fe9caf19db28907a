//! Granthika - dataset-curation studio for Sanskrit/English Q&A generation.
//!
//! A cross-platform Dioxus client for the generation backend: upload CSV
//! files of Sanskrit/English text pairs, run single-row or batch Q&A
//! generation, review and edit the produced multilingual pairs, and save
//! the selection back to per-file storage.
//!
//! # Architecture
//!
//! - **API boundary**: one thin reqwest client ([`api::ApiClient`]); the
//!   backend owns file storage, CSV persistence, schema migration, and
//!   batch-job execution
//! - **Views**: library (files + rows), row editor, batch runs
//!   (simple and detailed), composed by [`components::App`]
//! - **Domain logic**: progress, filtering, selection, payloads, and the
//!   poll controller live in `granthika-core`
//!
//! # Platform Support
//!
//! - **Web (WASM)**: runs in the browser against a configurable base URL
//! - **Desktop**: macOS/Windows/Linux webview build of the same UI

#![forbid(unsafe_code)]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod platform;
pub mod utils;
