//! # tidysheet-viz
//!
//! Chart specification generation for tidysheet tables.
//!
//! Builds serializable chart specs from the first numeric columns of a
//! [`Table`]; the spec can be rendered by an HTML/Chart.js page or any
//! front end consuming the JSON form.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tidysheet_table::Table;

/// How many numeric columns a table chart plots.
const CHART_COLUMN_LIMIT: usize = 2;

/// Errors from chart spec serialization.
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Chart specification for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_type: ChartKind,
    pub title: String,
    pub data: ChartData,
}

/// Chart type for visualization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Chart data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A dataset in a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Escape HTML special characters to prevent XSS.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl ChartSpec {
    /// Build a bar chart from the first two numeric-inferred columns of
    /// a table (fewer if fewer exist), in original column order. Labels
    /// are 1-based row numbers; one dataset per column, labeled with the
    /// column name; missing values plot as 0.
    ///
    /// Returns `None` when the table has no numeric columns: no chart is
    /// drawn in that case, and it is not an error.
    #[must_use]
    pub fn from_table(table: &Table, title: impl Into<String>) -> Option<Self> {
        let numeric: Vec<usize> = table
            .numeric_columns()
            .into_iter()
            .take(CHART_COLUMN_LIMIT)
            .collect();

        if numeric.is_empty() {
            return None;
        }

        let labels = (1..=table.row_count()).map(|n| n.to_string()).collect();
        let datasets = numeric
            .into_iter()
            .map(|col| Dataset {
                label: table.column_names()[col].clone(),
                data: table
                    .column_values(col)
                    .map(|cell| cell.as_float().unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        Some(ChartSpec {
            chart_type: ChartKind::Bar,
            title: title.into(),
            data: ChartData { labels, datasets },
        })
    }

    /// Convert to JSON for consumption by a front end.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, VizError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Generate a standalone HTML page with embedded Chart.js.
    #[must_use]
    pub fn to_html(&self) -> String {
        // Escape title for HTML context and JSON for script context
        let title = escape_html(&self.title);
        let json = serde_json::to_string(&self)
            .unwrap_or_default()
            .replace("</", "<\\/"); // Prevent script tag breakout

        let chart_type = match self.chart_type {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>
    <canvas id="chart"></canvas>
    <script>
        const spec = {json};
        const ctx = document.getElementById('chart').getContext('2d');
        new Chart(ctx, {{
            type: '{chart_type}',
            data: spec.data,
            options: {{
                responsive: true,
                plugins: {{
                    title: {{
                        display: true,
                        text: spec.title
                    }}
                }}
            }}
        }});
    </script>
</body>
</html>"#,
            title = title,
            json = json,
            chart_type = chart_type,
        )
    }
}
