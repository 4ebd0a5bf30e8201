//! Data types produced by the exposure characterizer.

use serde::Serialize;

use crate::characterize::category::RiskCategory;
use crate::columns::ColumnRef;
use crate::model::{Diagnostics, Metric};

/// Outdoor WBGT exceedance thresholds (°C), in column order.
pub const WBGT_THRESHOLDS: [u32; 5] = [25, 27, 28, 30, 32];

/// A heat-stress index whose daily-mean column was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeanColumn {
    pub metric: Metric,
    pub column: ColumnRef,
}

/// Which of [`WBGT_THRESHOLDS`] a day's outdoor WBGT mean strictly exceeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exceedance {
    pub above: [bool; WBGT_THRESHOLDS.len()],
}

impl Exceedance {
    pub fn from_mean(mean: Option<f64>) -> Self {
        let mut above = [false; WBGT_THRESHOLDS.len()];
        if let Some(v) = mean {
            for (flag, threshold) in above.iter_mut().zip(WBGT_THRESHOLDS) {
                *flag = v > f64::from(threshold);
            }
        }
        Self { above }
    }

    /// Number of thresholds exceeded.
    pub fn count(&self) -> usize {
        self.above.iter().filter(|a| **a).count()
    }
}

/// One input day plus its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedDay {
    /// Input cells, unchanged.
    pub fields: Vec<String>,
    /// Parsed mean value per entry of [`CategorizedTable::categorized`].
    pub means: Vec<Option<f64>>,
    /// Category per entry of [`CategorizedTable::categorized`].
    pub categories: Vec<RiskCategory>,
    /// `max - min` per entry of [`CategorizedTable::ranged`].
    pub ranges: Vec<Option<f64>>,
    /// Present exactly when the outdoor WBGT mean column was found.
    pub exceedance: Option<Exceedance>,
}

/// The daily table augmented with categories, ranges and exceedances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedTable {
    /// Normalized input column names.
    pub columns: Vec<String>,
    pub date_column: Option<ColumnRef>,
    pub categorized: Vec<MeanColumn>,
    pub ranged: Vec<Metric>,
    pub rows: Vec<CategorizedDay>,
}

impl CategorizedTable {
    pub fn mean_column(&self, metric: Metric) -> Option<&MeanColumn> {
        self.categorized.iter().find(|m| m.metric == metric)
    }

    pub fn has_exceedance(&self) -> bool {
        self.mean_column(Metric::WbgtOut).is_some()
    }

    /// Input columns, then `<key>_category`, `<key>_range`,
    /// `wbgtout_above_<t>` and `num_thresholds_exceeded`.
    pub fn header(&self) -> Vec<String> {
        let mut header = self.columns.clone();
        for mean in &self.categorized {
            header.push(format!("{}_category", mean.metric.key()));
        }
        for metric in &self.ranged {
            header.push(format!("{}_range", metric.key()));
        }
        if self.has_exceedance() {
            for threshold in WBGT_THRESHOLDS {
                header.push(format!("wbgtout_above_{threshold}"));
            }
            header.push("num_thresholds_exceeded".to_string());
        }
        header
    }
}

/// Overall statistics of one index across the whole period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    pub mean: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

/// Single-row summary of the period. Every field is always present; an index
/// without a mean column has all three scalars set to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExposureSummary {
    #[serde(rename = "WBGTout_mean_overall")]
    pub wbgtout_mean: Option<f64>,
    #[serde(rename = "WBGTout_max_overall")]
    pub wbgtout_max: Option<f64>,
    #[serde(rename = "WBGTout_min_overall")]
    pub wbgtout_min: Option<f64>,
    #[serde(rename = "WBGTin_mean_overall")]
    pub wbgtin_mean: Option<f64>,
    #[serde(rename = "WBGTin_max_overall")]
    pub wbgtin_max: Option<f64>,
    #[serde(rename = "WBGTin_min_overall")]
    pub wbgtin_min: Option<f64>,
    #[serde(rename = "THI_mean_overall")]
    pub thi_mean: Option<f64>,
    #[serde(rename = "THI_max_overall")]
    pub thi_max: Option<f64>,
    #[serde(rename = "THI_min_overall")]
    pub thi_min: Option<f64>,
    #[serde(rename = "Days_in_Danger_or_Worse_WBGTout")]
    pub days_danger_or_worse_wbgtout: Option<usize>,
    #[serde(rename = "Days_in_Danger_or_Worse_WBGTin")]
    pub days_danger_or_worse_wbgtin: Option<usize>,
}

impl ExposureSummary {
    pub fn metric(&self, metric: Metric) -> MetricSummary {
        match metric {
            Metric::WbgtOut => MetricSummary {
                mean: self.wbgtout_mean,
                max: self.wbgtout_max,
                min: self.wbgtout_min,
            },
            Metric::WbgtIn => MetricSummary {
                mean: self.wbgtin_mean,
                max: self.wbgtin_max,
                min: self.wbgtin_min,
            },
            Metric::Thi => MetricSummary {
                mean: self.thi_mean,
                max: self.thi_max,
                min: self.thi_min,
            },
            Metric::Temperature | Metric::Humidity => MetricSummary::default(),
        }
    }

    pub fn set_metric(&mut self, metric: Metric, summary: MetricSummary) {
        let (mean, max, min) = match metric {
            Metric::WbgtOut => (
                &mut self.wbgtout_mean,
                &mut self.wbgtout_max,
                &mut self.wbgtout_min,
            ),
            Metric::WbgtIn => (
                &mut self.wbgtin_mean,
                &mut self.wbgtin_max,
                &mut self.wbgtin_min,
            ),
            Metric::Thi => (&mut self.thi_mean, &mut self.thi_max, &mut self.thi_min),
            Metric::Temperature | Metric::Humidity => return,
        };
        *mean = summary.mean;
        *max = summary.max;
        *min = summary.min;
    }
}

/// Everything stage 2 produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Characterization {
    pub table: CategorizedTable,
    pub summary: ExposureSummary,
    pub diagnostics: Diagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceedance_strictly_greater() {
        assert_eq!(Exceedance::from_mean(Some(25.0)).count(), 0);
        assert_eq!(Exceedance::from_mean(Some(27.25)).count(), 2);
        assert_eq!(Exceedance::from_mean(Some(26.0)).count(), 1);
        assert_eq!(Exceedance::from_mean(Some(30.0)).count(), 3);
        assert_eq!(Exceedance::from_mean(Some(34.0)).count(), 5);
        assert_eq!(Exceedance::from_mean(None).count(), 0);
    }

    #[test]
    fn test_summary_metric_roundtrip() {
        let mut summary = ExposureSummary::default();
        let thi = MetricSummary {
            mean: Some(75.0),
            max: Some(90.0),
            min: Some(60.0),
        };
        summary.set_metric(Metric::Thi, thi);
        assert_eq!(summary.metric(Metric::Thi), thi);
        assert_eq!(summary.metric(Metric::WbgtOut), MetricSummary::default());
    }
}
