use std::io::Write;

use chrono::{NaiveDate, Weekday};
use schedule_planner::{
    BusinessCalendar, ImportExportError, ScheduleError, ScheduleRequest, ScheduleResult, Task,
    TimeBudget, WorkCalendar, WorkCalendarConfig, load_blocked_periods_from_csv,
    load_calendar_config, load_request_from_json, load_tasks_from_csv, save_calendar_config,
    save_result_to_csv, save_result_to_json, schedule, write_result_csv,
};
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn sample_result() -> (Vec<Task>, ScheduleResult) {
    let tasks = vec![Task::new("First-task", 1.4), Task::new("Second-task", 1.4)];
    let request = ScheduleRequest::with_allocation(d(2018, 3, 5), 1.0, tasks.clone());
    (tasks, schedule(&request).unwrap())
}

#[test]
fn request_json_is_loaded_into_a_request() {
    let file = file_with(
        r#"{
            "start": "2018-02-23",
            "end": "2018-03-23",
            "tasks": [ { "id": "a", "normDays": 6 }, { "id": "b", "normDays": 14 } ],
            "blockedPeriods": [ { "start": "2018-02-28", "end": "2018-02-26" } ]
        }"#,
    );

    let request = load_request_from_json(file.path()).unwrap();
    assert_eq!(request.start, d(2018, 2, 23));
    assert_eq!(request.budget, TimeBudget::End(d(2018, 3, 23)));
    assert_eq!(request.tasks.len(), 2);
    assert_eq!(request.blocked_periods[0].start, d(2018, 2, 28));
}

#[test]
fn request_json_with_both_budgets_is_rejected() {
    let file = file_with(r#"{ "start": "2018-02-23", "end": "2018-03-23", "timeAllocation": 1 }"#);

    match load_request_from_json(file.path()) {
        Err(ImportExportError::Schedule(ScheduleError::ConflictingInput(msg))) => {
            assert!(msg.contains("not both"), "unexpected message: {msg}")
        }
        other => panic!("expected conflicting input, got {other:?}"),
    }
}

#[test]
fn malformed_request_json_is_a_serialization_error() {
    let file = file_with("{ not json");
    assert!(matches!(
        load_request_from_json(file.path()),
        Err(ImportExportError::Serialization(_))
    ));
}

#[test]
fn result_json_round_trip() {
    let (_, result) = sample_result();
    let file = NamedTempFile::new().unwrap();

    save_result_to_json(&result, file.path()).unwrap();
    let loaded: ScheduleResult =
        serde_json::from_reader(std::fs::File::open(file.path()).unwrap()).unwrap();

    assert_eq!(loaded, result);
    let keys: Vec<&str> = loaded.deadlines.keys().map(String::as_str).collect();
    assert_eq!(keys, ["First-task", "Second-task"]);
}

#[test]
fn tasks_csv_keeps_row_order() {
    let file = file_with("id,norm_days\ndraft,2.5\nbuild, 4\nship,0\n");
    let tasks = load_tasks_from_csv(file.path()).unwrap();

    assert_eq!(
        tasks,
        vec![
            Task::new("draft", 2.5),
            Task::new("build", 4.0),
            Task::new("ship", 0.0)
        ]
    );
}

#[test]
fn tasks_csv_accepts_camel_case_header() {
    let file = file_with("id,normDays\nonly,1.5\n");
    let tasks = load_tasks_from_csv(file.path()).unwrap();
    assert_eq!(tasks, vec![Task::new("only", 1.5)]);
}

#[test]
fn tasks_csv_rejects_unparsable_effort() {
    let file = file_with("id,norm_days\ndraft,lots\n");
    match load_tasks_from_csv(file.path()) {
        Err(ImportExportError::InvalidData(msg)) => {
            assert!(msg.contains("draft"), "unexpected message: {msg}")
        }
        other => panic!("expected invalid data, got {other:?}"),
    }
}

#[test]
fn tasks_csv_rejects_blank_id() {
    let file = file_with("id,norm_days\n  ,1\n");
    assert!(matches!(
        load_tasks_from_csv(file.path()),
        Err(ImportExportError::InvalidData(_))
    ));
}

#[test]
fn blocked_periods_csv_is_parsed() {
    let file = file_with("start,end\n2018-03-07,2018-03-09\n2018-04-02T00:00:00Z,2018-04-06\n");
    let periods = load_blocked_periods_from_csv(file.path()).unwrap();

    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].end, d(2018, 3, 9));
    assert_eq!(periods[1].start, d(2018, 4, 2));
}

#[test]
fn blocked_periods_csv_reports_bad_dates() {
    let file = file_with("start,end\n2018-03-07,soon\n");
    match load_blocked_periods_from_csv(file.path()) {
        Err(ImportExportError::Schedule(ScheduleError::InvalidDate { field, .. })) => {
            assert_eq!(field, "blocked period end")
        }
        other => panic!("expected invalid date, got {other:?}"),
    }
}

#[test]
fn result_csv_has_one_row_per_task() {
    let (tasks, result) = sample_result();
    let file = NamedTempFile::new().unwrap();

    save_result_to_csv(&result, &tasks, file.path()).unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        [
            "id,norm_days,cumulative_norm_days,deadline,progress",
            "First-task,1.4,1.4,2018-03-06,0.5",
            "Second-task,1.4,2.8,2018-03-08,1.0",
        ]
    );
}

#[test]
fn result_csv_for_no_tasks_is_empty() {
    let result = schedule(&ScheduleRequest::with_allocation(
        d(2018, 3, 5),
        1.0,
        Vec::new(),
    ))
    .unwrap();
    let mut buffer = Vec::new();
    write_result_csv(&result, &[], &mut buffer).unwrap();
    assert!(buffer.is_empty());
}

#[test]
fn calendar_config_round_trip() {
    let calendar = WorkCalendar::custom(
        vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu],
        vec![d(2025, 12, 25)],
    )
    .unwrap();
    let file = NamedTempFile::new().unwrap();

    save_calendar_config(&calendar.to_config(), file.path()).unwrap();
    let config = load_calendar_config(file.path()).unwrap();
    let loaded = WorkCalendar::from_config(&config).unwrap();

    assert_eq!(loaded.to_config(), calendar.to_config());
    assert!(!loaded.is_business_day(d(2025, 12, 26)));
}

#[test]
fn calendar_config_without_working_days_is_invalid() {
    let file = file_with(r#"{ "working_days": [] }"#);
    assert!(matches!(
        load_calendar_config(file.path()),
        Err(ImportExportError::InvalidData(_))
    ));
}

#[test]
fn calendar_config_holidays_default_to_empty() {
    let file = file_with(r#"{ "working_days": ["Mon", "Wed", "Fri"] }"#);
    let config: WorkCalendarConfig = load_calendar_config(file.path()).unwrap();
    assert_eq!(config.working_days().len(), 3);
    assert!(config.holidays().is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(
        load_request_from_json(&path),
        Err(ImportExportError::Io(_))
    ));
}
