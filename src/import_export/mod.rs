use crate::error::ScheduleError;
use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportExportError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type ImportExportResult<T> = Result<T, ImportExportError>;

pub mod file;

pub use file::{
    load_blocked_periods_from_csv, load_calendar_config, load_request_from_json,
    load_tasks_from_csv, save_calendar_config, save_result_to_csv, save_result_to_json,
    write_result_csv,
};
