//! Shared metric keys and the diagnostic log returned by each stage.

use std::fmt;

/// Metrics the daily aggregator looks for, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    WbgtOut,
    WbgtIn,
    Thi,
    Temperature,
    Humidity,
}

impl Metric {
    /// The heat-stress indices that get categorized and summarized.
    pub const INDICES: [Metric; 3] = [Metric::WbgtOut, Metric::WbgtIn, Metric::Thi];

    /// Lower-case key used as the prefix of derived column names.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::WbgtOut => "wbgtout",
            Metric::WbgtIn => "wbgtin",
            Metric::Thi => "thi",
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
        }
    }

    pub fn is_wbgt(&self) -> bool {
        matches!(self, Metric::WbgtOut | Metric::WbgtIn)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A soft, non-fatal condition noticed while processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Rows dropped because their timestamp could not be parsed.
    InvalidTimestamps { column: String, dropped: usize },
    /// The preferred day/month order parsed nothing, so inference was used.
    TimestampInferenceFallback { column: String },
    /// No WBGT/THI/temperature/humidity column was detected.
    NoMetricColumns,
    /// Cells in a metric column that were present but not numeric.
    NonNumericValues { column: String, count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidTimestamps { column, dropped } => write!(
                f,
                "{dropped} rows have invalid datetimes in '{column}' and will be dropped"
            ),
            Diagnostic::TimestampInferenceFallback { column } => write!(
                f,
                "no value in '{column}' parsed with the requested day/month order; inferred formats instead"
            ),
            Diagnostic::NoMetricColumns => write!(
                f,
                "no WBGT/THI/temperature/humidity columns detected; the output will contain only dates"
            ),
            Diagnostic::NonNumericValues { column, count } => {
                write!(f, "{count} non-numeric values in '{column}' treated as missing")
            }
        }
    }
}

/// Ordered log of diagnostics produced by a stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Total rows dropped for unparseable timestamps.
    pub fn dropped_rows(&self) -> usize {
        self.0
            .iter()
            .map(|d| match d {
                Diagnostic::InvalidTimestamps { dropped, .. } => *dropped,
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_keys() {
        let keys: Vec<_> = Metric::INDICES.iter().map(Metric::key).collect();
        assert_eq!(keys, ["wbgtout", "wbgtin", "thi"]);
        assert_eq!(Metric::Humidity.to_string(), "humidity");
    }

    #[test]
    fn test_dropped_rows_sums_timestamp_diagnostics() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::NoMetricColumns);
        diags.push(Diagnostic::InvalidTimestamps {
            column: "datetime".to_string(),
            dropped: 3,
        });
        assert_eq!(diags.dropped_rows(), 3);
        assert!(!diags.is_empty());
    }
}
