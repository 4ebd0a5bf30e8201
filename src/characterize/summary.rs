use crate::characterize::category::RiskCategory;
use crate::characterize::types::{CategorizedTable, ExposureSummary, MetricSummary};
use crate::columns::find_exact;
use crate::input::RawTable;
use crate::model::Metric;
use crate::stats;

/// Computes the whole-period summary of a categorized table.
///
/// The overall max (min) comes from the metric's `_max` (`_min`) column when
/// the input has one, otherwise from the mean column itself.
pub fn summarize(raw: &RawTable, table: &CategorizedTable) -> ExposureSummary {
    let mut summary = ExposureSummary::default();

    for (idx, mean) in table.categorized.iter().enumerate() {
        let means: Vec<Option<f64>> = table.rows.iter().map(|r| r.means[idx]).collect();
        let prefix = mean.column.name.replace("_mean", "");

        let bound = |suffix: &str, reduce: fn(&[Option<f64>]) -> Option<f64>| {
            match find_exact(&raw.columns, &format!("{prefix}_{suffix}")) {
                Some(column) => reduce(&raw.numeric_column(column.index).values),
                None => reduce(&means),
            }
        };

        summary.set_metric(
            mean.metric,
            MetricSummary {
                mean: stats::mean(&means),
                max: bound("max", stats::max),
                min: bound("min", stats::min),
            },
        );
    }

    summary.days_danger_or_worse_wbgtout = danger_days(table, Metric::WbgtOut);
    summary.days_danger_or_worse_wbgtin = danger_days(table, Metric::WbgtIn);
    summary
}

/// Days whose WBGT category is Danger or Extreme Danger, or `None` when the
/// metric was not categorized at all.
fn danger_days(table: &CategorizedTable, metric: Metric) -> Option<usize> {
    let idx = table.categorized.iter().position(|m| m.metric == metric)?;
    Some(
        table
            .rows
            .iter()
            .filter(|r| match r.categories[idx] {
                RiskCategory::Wbgt(c) => c.is_danger_or_worse(),
                RiskCategory::Thi(_) => false,
            })
            .count(),
    )
}
