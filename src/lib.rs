#![doc(hidden)]

//! Core library for repo-rank
//!
//! This library scores open-source repositories against a fixed trustworthiness
//! rubric using metadata from their hosting platform, and emits one
//! newline-delimited JSON record per input URL.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and run orchestration
//! - [`hosting`]: Repository URL resolution and the hosting API client
//! - [`metrics`]: Metric probes and score aggregation
//! - [`reports`]: NDJSON record emission

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod hosting;
#[cfg(not(any(debug_assertions, test)))]
mod hosting;

#[cfg(any(debug_assertions, test))]
pub mod metrics;
#[cfg(not(any(debug_assertions, test)))]
mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
