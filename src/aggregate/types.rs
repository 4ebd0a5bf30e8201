//! Data types produced by the daily aggregator.

use chrono::NaiveDate;

use crate::columns::{ColumnRef, MetricColumn};
use crate::model::Diagnostics;
use crate::stats::StatTriple;

/// Statistic suffixes, in output order.
pub const STAT_SUFFIXES: [&str; 3] = ["min", "mean", "max"];

/// One calendar date of aggregated observations.
///
/// `stats` is aligned with [`DailyTable::metrics`]; an entry is `None` when
/// that metric had no observation on this date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub stats: Vec<Option<StatTriple>>,
}

/// Per-date statistics for every discovered metric, sorted by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyTable {
    pub metrics: Vec<MetricColumn>,
    pub rows: Vec<DailyAggregate>,
}

impl DailyTable {
    /// `date` followed by `<column>_min,<column>_mean,<column>_max` per metric.
    pub fn header(&self) -> Vec<String> {
        let mut header = vec!["date".to_string()];
        for metric in &self.metrics {
            for suffix in STAT_SUFFIXES {
                header.push(format!("{}_{}", metric.column.name, suffix));
            }
        }
        header
    }
}

/// Everything stage 1 produces besides the file itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutcome {
    pub table: DailyTable,
    pub timestamp_column: ColumnRef,
    pub diagnostics: Diagnostics,
}
