use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::aggregate::types::{AggregateOutcome, DailyAggregate, DailyTable};
use crate::columns::{find_metric_columns, find_timestamp_column};
use crate::error::{PipelineError, Result};
use crate::input::RawTable;
use crate::model::{Diagnostic, Diagnostics};
use crate::stats::RunningStats;
use crate::timestamp::{DateOrder, parse_column};

/// Aggregates a raw sub-daily table (headers already normalized) to one row
/// per calendar date.
///
/// Fails only when no timestamp column can be found. Unparseable timestamps,
/// non-numeric cells and the absence of metric columns are reported through
/// the returned diagnostics.
pub fn aggregate_daily(raw: &RawTable, order: DateOrder) -> Result<AggregateOutcome> {
    let timestamp_column =
        find_timestamp_column(&raw.columns).ok_or_else(|| PipelineError::NoTimestampColumn {
            columns: raw.columns.clone(),
        })?;

    let mut diagnostics = Diagnostics::new();

    let parsed = parse_column(&raw.column(timestamp_column.index), order);
    if parsed.inferred {
        diagnostics.push(Diagnostic::TimestampInferenceFallback {
            column: timestamp_column.name.clone(),
        });
    }
    let dropped = parsed.invalid_count();
    if dropped > 0 {
        diagnostics.push(Diagnostic::InvalidTimestamps {
            column: timestamp_column.name.clone(),
            dropped,
        });
    }

    let metrics = find_metric_columns(&raw.columns);
    if metrics.is_empty() {
        diagnostics.push(Diagnostic::NoMetricColumns);
    }

    let columns: Vec<_> = metrics
        .iter()
        .map(|m| raw.numeric_column(m.column.index))
        .collect();
    for (metric, column) in metrics.iter().zip(&columns) {
        if column.non_numeric > 0 {
            diagnostics.push(Diagnostic::NonNumericValues {
                column: metric.column.name.clone(),
                count: column.non_numeric,
            });
        }
    }

    // BTreeMap keeps dates ascending; rows are folded in file order.
    let mut groups: BTreeMap<NaiveDate, Vec<RunningStats>> = BTreeMap::new();
    for (row, timestamp) in parsed.values.iter().enumerate() {
        let Some(timestamp) = timestamp else {
            continue;
        };
        let accumulators = groups
            .entry(timestamp.date())
            .or_insert_with(|| vec![RunningStats::default(); metrics.len()]);
        for (acc, column) in accumulators.iter_mut().zip(&columns) {
            if let Some(v) = column.values[row] {
                acc.push(v);
            }
        }
    }

    let rows: Vec<DailyAggregate> = groups
        .into_iter()
        .map(|(date, accumulators)| DailyAggregate {
            date,
            stats: accumulators.iter().map(RunningStats::summary).collect(),
        })
        .collect();

    debug!(
        timestamp_column = %timestamp_column.name,
        metrics = metrics.len(),
        days = rows.len(),
        dropped,
        "Aggregated observations to daily rows"
    );

    Ok(AggregateOutcome {
        table: DailyTable { metrics, rows },
        timestamp_column,
        diagnostics,
    })
}
