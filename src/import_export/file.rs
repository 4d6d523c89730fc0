use super::{ImportExportError, ImportExportResult};
use crate::{
    BlockedPeriod, ScheduleOptions, ScheduleRequest, ScheduleResult, Task, WorkCalendarConfig,
    dates::{format_date, parse_date_field},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn load_request_from_json<P: AsRef<Path>>(path: P) -> ImportExportResult<ScheduleRequest> {
    let file = File::open(path)?;
    let options: ScheduleOptions = serde_json::from_reader(file)?;
    Ok(ScheduleRequest::try_from(options)?)
}

pub fn save_result_to_json<P: AsRef<Path>>(
    result: &ScheduleResult,
    path: P,
) -> ImportExportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, result)?;
    Ok(())
}

pub fn load_calendar_config<P: AsRef<Path>>(path: P) -> ImportExportResult<WorkCalendarConfig> {
    let file = File::open(path)?;
    let config: WorkCalendarConfig = serde_json::from_reader(file)?;
    if config.working_days().is_empty() {
        return Err(ImportExportError::InvalidData(
            "calendar config lists no working days".into(),
        ));
    }
    Ok(config)
}

pub fn save_calendar_config<P: AsRef<Path>>(
    config: &WorkCalendarConfig,
    path: P,
) -> ImportExportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

#[derive(Deserialize)]
struct TaskCsvRecord {
    id: String,
    #[serde(alias = "normDays", alias = "nrNormDays")]
    norm_days: String,
}

impl TaskCsvRecord {
    fn into_task(self) -> ImportExportResult<Task> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(ImportExportError::InvalidData("task row without id".into()));
        }
        let norm_days = self.norm_days.trim().parse::<f64>().map_err(|err| {
            ImportExportError::InvalidData(format!(
                "task {id} has invalid norm_days '{}': {err}",
                self.norm_days
            ))
        })?;
        Ok(Task::new(id, norm_days))
    }
}

/// Read tasks from a CSV file with `id,norm_days` columns; row order is
/// scheduling order.
pub fn load_tasks_from_csv<P: AsRef<Path>>(path: P) -> ImportExportResult<Vec<Task>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    for record in reader.deserialize::<TaskCsvRecord>() {
        tasks.push(record?.into_task()?);
    }
    debug!("loaded {} tasks from csv", tasks.len());
    Ok(tasks)
}

#[derive(Deserialize)]
struct BlockedPeriodCsvRecord {
    start: String,
    end: String,
}

pub fn load_blocked_periods_from_csv<P: AsRef<Path>>(
    path: P,
) -> ImportExportResult<Vec<BlockedPeriod>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut periods = Vec::new();
    for record in reader.deserialize::<BlockedPeriodCsvRecord>() {
        let record = record?;
        periods.push(BlockedPeriod::new(
            parse_date_field("blocked period start", &record.start)?,
            parse_date_field("blocked period end", &record.end)?,
        ));
    }
    Ok(periods)
}

#[derive(Serialize)]
struct ResultCsvRecord {
    id: String,
    norm_days: f64,
    cumulative_norm_days: f64,
    deadline: String,
    progress: f64,
}

/// Write one row per task: id, effort, cumulative effort, deadline, progress.
pub fn save_result_to_csv<P: AsRef<Path>>(
    result: &ScheduleResult,
    tasks: &[Task],
    path: P,
) -> ImportExportResult<()> {
    let file = File::create(path)?;
    write_result_csv(result, tasks, file)
}

pub fn write_result_csv<W: Write>(
    result: &ScheduleResult,
    tasks: &[Task],
    writer: W,
) -> ImportExportResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in result.rows(tasks) {
        writer.serialize(ResultCsvRecord {
            id: row.id,
            norm_days: row.norm_days,
            cumulative_norm_days: row.cumulative_norm_days,
            deadline: format_date(row.deadline),
            progress: row.progress,
        })?;
    }
    writer.flush()?;
    Ok(())
}
