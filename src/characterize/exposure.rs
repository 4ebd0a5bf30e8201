use tracing::debug;

use crate::characterize::category::{RiskCategory, ThiCategory, WbgtCategory};
use crate::characterize::types::{CategorizedDay, CategorizedTable, Exceedance, MeanColumn};
use crate::columns::{find_date_column, find_exact, find_mean_column};
use crate::input::RawTable;
use crate::model::{Diagnostic, Diagnostics, Metric};

/// Categorizes one value on the scale of `metric`.
pub fn categorize(metric: Metric, value: Option<f64>) -> RiskCategory {
    if metric.is_wbgt() {
        RiskCategory::Wbgt(WbgtCategory::from_value(value))
    } else {
        RiskCategory::Thi(ThiCategory::from_value(value))
    }
}

/// Builds the categorized daily table from a daily-aggregate table whose
/// headers are already normalized.
pub fn categorize_daily(raw: &RawTable, diagnostics: &mut Diagnostics) -> CategorizedTable {
    let date_column = find_date_column(&raw.columns);

    let categorized: Vec<MeanColumn> = Metric::INDICES
        .iter()
        .filter_map(|metric| {
            find_mean_column(&raw.columns, *metric).map(|column| MeanColumn {
                metric: *metric,
                column,
            })
        })
        .collect();
    if categorized.is_empty() {
        diagnostics.push(Diagnostic::NoMetricColumns);
    }

    let mean_values: Vec<_> = categorized
        .iter()
        .map(|m| {
            let column = raw.numeric_column(m.column.index);
            if column.non_numeric > 0 {
                diagnostics.push(Diagnostic::NonNumericValues {
                    column: m.column.name.clone(),
                    count: column.non_numeric,
                });
            }
            column.values
        })
        .collect();

    // A range needs both bounds, whether or not the mean was found.
    let ranged: Vec<(Metric, Vec<Option<f64>>, Vec<Option<f64>>)> = Metric::INDICES
        .iter()
        .filter_map(|metric| {
            let min = find_exact(&raw.columns, &format!("{}_min", metric.key()))?;
            let max = find_exact(&raw.columns, &format!("{}_max", metric.key()))?;
            Some((
                *metric,
                raw.numeric_column(min.index).values,
                raw.numeric_column(max.index).values,
            ))
        })
        .collect();

    let outdoor = categorized
        .iter()
        .position(|m| m.metric == Metric::WbgtOut);

    let rows = raw
        .rows
        .iter()
        .enumerate()
        .map(|(i, fields)| {
            let means: Vec<Option<f64>> = mean_values.iter().map(|values| values[i]).collect();
            let categories = categorized
                .iter()
                .zip(&means)
                .map(|(m, value)| categorize(m.metric, *value))
                .collect();
            let ranges = ranged
                .iter()
                .map(|(_, min, max)| match (min[i], max[i]) {
                    (Some(lo), Some(hi)) => Some(hi - lo),
                    _ => None,
                })
                .collect();
            let exceedance = outdoor.map(|idx| Exceedance::from_mean(means[idx]));

            CategorizedDay {
                fields: fields.clone(),
                means,
                categories,
                ranges,
                exceedance,
            }
        })
        .collect();

    let table = CategorizedTable {
        columns: raw.columns.clone(),
        date_column,
        categorized,
        ranged: ranged.into_iter().map(|(metric, _, _)| metric).collect(),
        rows,
    };

    debug!(
        days = table.rows.len(),
        categorized = table.categorized.len(),
        ranged = table.ranged.len(),
        exceedance = table.has_exceedance(),
        "Categorized daily table"
    );
    table
}
