//! File-level drivers for the two stages.
//!
//! These read the input, run the pure stage function, report diagnostics
//! through `tracing`, and persist the results.

use std::path::Path;

use tracing::{error, info, warn};

use crate::aggregate::daily::aggregate_daily;
use crate::aggregate::types::AggregateOutcome;
use crate::characterize::characterize;
use crate::characterize::types::Characterization;
use crate::columns::{normalize_daily, normalize_raw};
use crate::config::OutputLayout;
use crate::error::Result;
use crate::input::load_table;
use crate::model::Diagnostics;
use crate::output::{save, write_categorized, write_daily, write_summary};
use crate::plot::{PlotRenderer, plot_requests, render_all};
use crate::timestamp::DateOrder;

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        warn!("{diagnostic}");
    }
}

/// Stage 1: reads `input`, aggregates it to daily rows and writes
/// [`OutputLayout::daily`].
#[tracing::instrument(skip(layout), fields(outdir = %layout.root().display()))]
pub fn run_aggregate(
    input: &Path,
    layout: &OutputLayout,
    order: DateOrder,
) -> Result<AggregateOutcome> {
    let raw = load_table(input, normalize_raw)?;
    let outcome = aggregate_daily(&raw, order)?;
    report(&outcome.diagnostics);

    layout.ensure_root()?;
    let path = layout.daily();
    save(&path, &outcome.table, |f, t| write_daily(f, t))?;
    info!(
        path = %path.display(),
        days = outcome.table.rows.len(),
        metrics = outcome.table.metrics.len(),
        "Daily stats written"
    );

    Ok(outcome)
}

/// Stage 2: reads a daily table, writes the categorized table and the
/// summary, then hands the plot requests to `renderer`.
///
/// The summary is written even when the categorized table could not be;
/// the first write failure is returned afterwards.
#[tracing::instrument(skip(layout, renderer), fields(outdir = %layout.root().display()))]
pub fn run_characterize<R: PlotRenderer>(
    input: &Path,
    layout: &OutputLayout,
    renderer: &mut R,
) -> Result<Characterization> {
    let raw = load_table(input, normalize_daily)?;
    let result = characterize(&raw);
    report(&result.diagnostics);

    layout.ensure_with_plots()?;

    let categorized_path = layout.categorized();
    let categorized = save(&categorized_path, &result.table, |f, t| {
        write_categorized(f, t)
    });
    match &categorized {
        Ok(()) => info!(path = %categorized_path.display(), "Categorized CSV saved"),
        Err(e) => error!(error = %e, "Failed to save categorized CSV"),
    }

    let summary_path = layout.summary();
    let summary = save(&summary_path, &result.summary, |f, s| write_summary(f, s));
    match &summary {
        Ok(()) => info!(path = %summary_path.display(), "Summary saved"),
        Err(e) => error!(error = %e, "Failed to save summary CSV"),
    }

    let requests = plot_requests(&result.table, &layout.plots());
    let rendered = render_all(renderer, &requests);
    info!(rendered, requested = requests.len(), "Plots handed to renderer");

    categorized?;
    summary?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::plot::LoggingRenderer;
    use std::env;
    use std::fs;

    #[test]
    fn test_run_aggregate_missing_input() {
        let layout = OutputLayout::new(env::temp_dir().join("heat_stress_test_missing"));
        let err = run_aggregate(
            Path::new("/nonexistent/input.csv"),
            &layout,
            DateOrder::MonthFirst,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::ReadInput { .. }));
        assert!(!layout.daily().exists());
    }

    #[test]
    fn test_no_timestamp_column_writes_nothing() {
        let dir = env::temp_dir().join("heat_stress_test_no_ts");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("raw.csv");
        fs::write(&input, "station,wbgtout\na,24\n").unwrap();

        let layout = OutputLayout::new(dir.join("out"));
        let err = run_aggregate(&input, &layout, DateOrder::MonthFirst).unwrap_err();
        assert!(matches!(err, PipelineError::NoTimestampColumn { .. }));
        assert!(!layout.daily().exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_characterize_writes_both_files() {
        let dir = env::temp_dir().join("heat_stress_test_characterize");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("daily.csv");
        fs::write(&input, "date,thi_min,thi_mean,thi_max\n2020-01-01,70,80,90\n").unwrap();

        let layout = OutputLayout::new(dir.join("out"));
        let result = run_characterize(&input, &layout, &mut LoggingRenderer).unwrap();

        assert_eq!(result.summary.thi_mean, Some(80.0));
        assert!(layout.categorized().exists());
        assert!(layout.summary().exists());
        assert!(layout.plots().is_dir());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_summary_written_when_categorized_write_fails() {
        let dir = env::temp_dir().join("heat_stress_test_categorized_blocked");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("daily.csv");
        fs::write(&input, "date,wbgtout_mean\n2020-01-01,27.25\n").unwrap();

        let layout = OutputLayout::new(dir.join("out"));
        // A directory in place of the file makes the categorized write fail.
        fs::create_dir_all(layout.categorized()).unwrap();

        let err = run_characterize(&input, &layout, &mut LoggingRenderer).unwrap_err();
        match err {
            PipelineError::WriteOutput { path, .. } => assert_eq!(path, layout.categorized()),
            other => panic!("unexpected error: {other}"),
        }

        assert!(layout.summary().is_file());
        let summary = fs::read_to_string(layout.summary()).unwrap();
        assert_eq!(summary.lines().nth(1), Some("27.25,27.25,27.25,,,,,,,0,"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
