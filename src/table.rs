//! Tabular views of a [`ScheduleResult`]: flat rows for CSV export and a
//! polars `DataFrame` for display.

use std::collections::HashMap;

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleResult;
use crate::task::Task;

/// One task of a computed schedule, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: String,
    pub norm_days: f64,
    pub cumulative_norm_days: f64,
    pub deadline: NaiveDate,
    pub progress: f64,
}

impl ScheduleResult {
    /// Rows in task order. `tasks` must be the tasks the result was computed
    /// from; a repeated id yields a single row, at its last occurrence.
    pub fn rows(&self, tasks: &[Task]) -> Vec<ResultRow> {
        let last_index: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| (task.id.as_str(), idx))
            .collect();

        let mut cumulative = 0.0;
        tasks
            .iter()
            .enumerate()
            .filter_map(|(idx, task)| {
                cumulative += task.norm_days;
                if last_index.get(task.id.as_str()) != Some(&idx) {
                    return None;
                }
                let deadline = self.deadline(&task.id)?;
                Some(ResultRow {
                    id: task.id.clone(),
                    norm_days: task.norm_days,
                    cumulative_norm_days: cumulative,
                    deadline,
                    progress: self.progress_of(&task.id).unwrap_or(0.0),
                })
            })
            .collect()
    }

    pub fn to_dataframe(&self, tasks: &[Task]) -> PolarsResult<DataFrame> {
        let rows = self.rows(tasks);
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        let norm_days: Vec<f64> = rows.iter().map(|row| row.norm_days).collect();
        let cumulative: Vec<f64> = rows.iter().map(|row| row.cumulative_norm_days).collect();
        let deadlines: Vec<i32> = rows.iter().map(|row| date_to_i32(row.deadline)).collect();
        let progress: Vec<f64> = rows.iter().map(|row| row.progress).collect();

        let columns = vec![
            Series::new(PlSmallStr::from_static("id"), ids).into_column(),
            Series::new(PlSmallStr::from_static("norm_days"), norm_days).into_column(),
            Series::new(PlSmallStr::from_static("cumulative_norm_days"), cumulative)
                .into_column(),
            Series::new(PlSmallStr::from_static("deadline"), deadlines)
                .cast(&DataType::Date)?
                .into_column(),
            Series::new(PlSmallStr::from_static("progress"), progress).into_column(),
        ];
        DataFrame::new(columns)
    }
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Float64(v) => format!("{v:.4}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        _ => value.to_string(),
    }
}

/// Render a frame as a boxed plain-text table.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| {
            columns
                .iter()
                .map(|col| {
                    col.get(row_idx)
                        .map(|av| cell_text(&av))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_line = |values: &[String]| {
        let mut line = String::from("|");
        for (value, width) in values.iter().zip(&widths) {
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(width - value.chars().count()));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_line(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_line(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
