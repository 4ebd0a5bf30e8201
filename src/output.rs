//! CSV persistence for the daily, categorized and summary tables.
//!
//! Floats are written in shortest round-trip form with at least one decimal
//! (`24.0`, `27.25`); missing values are written as empty fields.

use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::{debug, info};

use crate::aggregate::types::DailyTable;
use crate::characterize::types::{CategorizedTable, ExposureSummary};
use crate::error::{PipelineError, Result};

/// Formats a float the way it appears in every output file.
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

fn format_opt(value: Option<f64>) -> String {
    value.map(format_float).unwrap_or_default()
}

/// Writes a [`DailyTable`] as CSV.
pub fn write_daily<W: Write>(writer: W, table: &DailyTable) -> csv::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(table.header())?;

    for row in &table.rows {
        let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
        for stat in &row.stats {
            match stat {
                Some(s) => {
                    record.push(format_float(s.min));
                    record.push(format_float(s.mean));
                    record.push(format_float(s.max));
                }
                None => record.extend(std::iter::repeat_n(String::new(), 3)),
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a [`CategorizedTable`] as CSV. Input cells are copied verbatim.
pub fn write_categorized<W: Write>(writer: W, table: &CategorizedTable) -> csv::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(table.header())?;

    for row in &table.rows {
        let mut record = row.fields.clone();
        record.extend(row.categories.iter().map(|c| c.label().to_string()));
        record.extend(row.ranges.iter().map(|r| format_opt(*r)));
        if let Some(exceedance) = &row.exceedance {
            record.extend(exceedance.above.iter().map(|a| u8::from(*a).to_string()));
            record.push(exceedance.count().to_string());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the one-row [`ExposureSummary`] as CSV.
pub fn write_summary<W: Write>(writer: W, summary: &ExposureSummary) -> csv::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.serialize(summary)?;
    wtr.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes to it with `write`.
pub fn save<T: ?Sized>(
    path: &Path,
    value: &T,
    write: fn(std::fs::File, &T) -> csv::Result<()>,
) -> Result<()> {
    debug!(path = %path.display(), "Writing CSV");
    let file = std::fs::File::create(path).map_err(|e| PipelineError::WriteOutput {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write(file, value).map_err(|source| PipelineError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &ExposureSummary) {
    debug!("{:#?}", summary);
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &ExposureSummary) -> anyhow::Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::types::DailyAggregate;
    use crate::characterize::characterize;
    use crate::columns::{ColumnRef, MetricColumn, normalize_daily};
    use crate::input::read_table;
    use crate::model::Metric;
    use crate::stats::StatTriple;
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    fn to_string<T: ?Sized>(value: &T, write: fn(&mut Vec<u8>, &T) -> csv::Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn daily_table() -> DailyTable {
        DailyTable {
            metrics: vec![MetricColumn {
                metric: Metric::WbgtOut,
                column: ColumnRef {
                    index: 1,
                    name: "wbgtout".to_string(),
                },
            }],
            rows: vec![
                DailyAggregate {
                    date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                    stats: vec![Some(StatTriple {
                        min: 24.0,
                        mean: 27.25,
                        max: 30.5,
                    })],
                },
                DailyAggregate {
                    date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
                    stats: vec![None],
                },
            ],
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(24.0), "24.0");
        assert_eq!(format_float(27.25), "27.25");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_write_daily() {
        let csv = to_string(&daily_table(), |w, t| write_daily(w, t));
        assert_eq!(
            csv,
            "date,wbgtout_min,wbgtout_mean,wbgtout_max\n\
             2020-01-01,24.0,27.25,30.5\n\
             2020-01-02,,,\n"
        );
    }

    #[test]
    fn test_write_categorized() {
        let raw = read_table(
            "date,wbgtout_mean\n2020-01-01,27.25\n2020-01-02,34.0\n".as_bytes(),
            normalize_daily,
        )
        .unwrap();
        let result = characterize(&raw);
        let csv = to_string(&result.table, |w, t| write_categorized(w, t));
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "date,wbgtout_mean,wbgtout_category,wbgtout_above_25,wbgtout_above_27,\
             wbgtout_above_28,wbgtout_above_30,wbgtout_above_32,num_thresholds_exceeded"
        );
        assert_eq!(lines[1], "2020-01-01,27.25,Caution,1,1,0,0,0,2");
        assert_eq!(lines[2], "2020-01-02,34.0,Extreme Danger,1,1,1,1,1,5");
    }

    #[test]
    fn test_write_summary_empty_fields_for_missing() {
        let summary = ExposureSummary {
            thi_mean: Some(80.0),
            thi_max: Some(90.0),
            thi_min: Some(70.0),
            ..Default::default()
        };
        let csv = to_string(&summary, |w, s| write_summary(w, s));
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "WBGTout_mean_overall,WBGTout_max_overall,WBGTout_min_overall,\
             WBGTin_mean_overall,WBGTin_max_overall,WBGTin_min_overall,\
             THI_mean_overall,THI_max_overall,THI_min_overall,\
             Days_in_Danger_or_Worse_WBGTout,Days_in_Danger_or_Worse_WBGTin"
        );
        assert_eq!(lines[1], ",,,,,,80.0,90.0,70.0,,");
    }

    #[test]
    fn test_save_creates_file() {
        let path = temp_path("heat_stress_test_save_daily.csv");
        let _ = fs::remove_file(&path);

        save(&path, &daily_table(), |f, t| write_daily(f, t)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("date,"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_reports_unwritable_path() {
        let path = Path::new("/nonexistent-dir/heat_stress/out.csv");
        let err = save(path, &daily_table(), |f, t| write_daily(f, t)).unwrap_err();
        assert!(matches!(err, PipelineError::WriteOutput { .. }));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_pretty(&ExposureSummary::default());
        print_json(&ExposureSummary::default()).unwrap();
    }
}
