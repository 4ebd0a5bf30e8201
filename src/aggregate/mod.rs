//! Stage 1: sub-daily observations to per-date min/mean/max.
//!
//! Discovers the timestamp and metric columns of a raw export, drops rows
//! whose timestamp cannot be parsed, and groups the rest by calendar date.

pub mod daily;
pub mod types;
