//! Record emission
//!
//! Serializes scored repositories as newline-delimited JSON, one record per
//! input URL, in input order. The field set and order are fixed per rubric
//! version; downstream consumers parse positionally by name.

mod ndjson;

pub use ndjson::{ScoreRow, write_record};
