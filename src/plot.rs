//! Plot requests handed to a rendering backend.
//!
//! The characterizer only decides *what* to plot: one daily series per
//! found mean column plus the exceedance count. Drawing is delegated to a
//! [`PlotRenderer`].

use std::path::{Path, PathBuf};

use tracing::info;

use crate::characterize::types::CategorizedTable;
use crate::model::Metric;

/// A time-ordered series ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub target: PathBuf,
    /// `(label, value)` pairs in row order; labels are dates or row indices.
    pub points: Vec<(String, Option<f64>)>,
}

/// Renders plot requests somewhere.
pub trait PlotRenderer {
    fn render(&mut self, request: &PlotRequest) -> anyhow::Result<()>;
}

/// Records each request through `tracing` instead of drawing it.
#[derive(Debug, Default)]
pub struct LoggingRenderer;

impl PlotRenderer for LoggingRenderer {
    fn render(&mut self, request: &PlotRequest) -> anyhow::Result<()> {
        let present = request.points.iter().filter(|(_, v)| v.is_some()).count();
        info!(
            title = %request.title,
            target = %request.target.display(),
            points = request.points.len(),
            present,
            "Plot requested"
        );
        Ok(())
    }
}

fn title(metric: Metric) -> &'static str {
    match metric {
        Metric::WbgtOut => "Daily Mean WBGT (Outdoor)",
        Metric::WbgtIn => "Daily Mean WBGT (Indoor)",
        Metric::Thi => "Daily Mean THI",
        Metric::Temperature => "Daily Mean Temperature",
        Metric::Humidity => "Daily Mean Humidity",
    }
}

fn x_labels(table: &CategorizedTable) -> (String, Vec<String>) {
    match &table.date_column {
        Some(date) => (
            "Date".to_string(),
            table
                .rows
                .iter()
                .map(|r| r.fields[date.index].clone())
                .collect(),
        ),
        None => (
            "Index".to_string(),
            (0..table.rows.len()).map(|i| i.to_string()).collect(),
        ),
    }
}

/// Builds every plot request for a categorized table, writing under `plots_dir`.
pub fn plot_requests(table: &CategorizedTable, plots_dir: &Path) -> Vec<PlotRequest> {
    let (x_label, labels) = x_labels(table);
    let mut requests = Vec::new();

    for (idx, mean) in table.categorized.iter().enumerate() {
        requests.push(PlotRequest {
            title: title(mean.metric).to_string(),
            x_label: x_label.clone(),
            y_label: mean.column.name.clone(),
            target: plots_dir.join(format!("{}.png", mean.column.name)),
            points: labels
                .iter()
                .zip(&table.rows)
                .map(|(label, row)| (label.clone(), row.means[idx]))
                .collect(),
        });
    }

    if table.has_exceedance() {
        requests.push(PlotRequest {
            title: "Number of Outdoor WBGT Thresholds Exceeded per Day".to_string(),
            x_label,
            y_label: "Count of thresholds exceeded".to_string(),
            target: plots_dir.join("wbgtout_threshold_exceedance_count.png"),
            points: labels
                .iter()
                .zip(&table.rows)
                .map(|(label, row)| {
                    let count = row.exceedance.map(|e| e.count() as f64);
                    (label.clone(), count)
                })
                .collect(),
        });
    }

    requests
}

/// Hands every request to `renderer`, returning how many were rendered.
///
/// A failed render is logged and skipped; plots never fail the stage.
pub fn render_all<R: PlotRenderer>(renderer: &mut R, requests: &[PlotRequest]) -> usize {
    let mut rendered = 0;
    for request in requests {
        match renderer.render(request) {
            Ok(()) => rendered += 1,
            Err(e) => tracing::warn!(target = %request.target.display(), error = %e, "Plot failed"),
        }
    }
    rendered
}
