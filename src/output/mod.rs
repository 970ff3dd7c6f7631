//! Output formatting
//!
//! Per-run text lines and a summary table on stdout, plus optional JSON and
//! CSV report files.

pub mod csv;
pub mod json;
pub mod text;
