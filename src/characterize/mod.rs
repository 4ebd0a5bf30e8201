//! Stage 2: daily aggregates to risk categories and an exposure summary.
//!
//! Finds the daily-mean column of each heat-stress index, categorizes every
//! day against fixed WBGT/THI bands, derives ranges and outdoor WBGT
//! threshold exceedances, and summarizes the whole period.

pub mod category;
pub mod exposure;
pub mod summary;
pub mod types;

use crate::characterize::exposure::categorize_daily;
use crate::characterize::summary::summarize;
use crate::characterize::types::Characterization;
use crate::input::RawTable;
use crate::model::Diagnostics;

/// Runs both halves of stage 2 over a table with normalized headers.
pub fn characterize(raw: &RawTable) -> Characterization {
    let mut diagnostics = Diagnostics::new();
    let table = categorize_daily(raw, &mut diagnostics);
    let summary = summarize(raw, &table);
    Characterization {
        table,
        summary,
        diagnostics,
    }
}
