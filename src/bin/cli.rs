use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use schedule_planner::{
    BusinessCalendar, Planner, ScheduleRequest, WorkCalendar, format_date,
    load_blocked_periods_from_csv, load_calendar_config, load_request_from_json,
    load_tasks_from_csv, parse_date, render_text_table, save_result_to_csv, save_result_to_json,
    write_result_csv,
};

/// planner - business-day deadline planning
#[derive(Parser, Debug)]
#[command(
    name = "planner",
    version,
    about = "Derive project end dates, time allocation and per-task deadlines"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Calendar config JSON (working days and holidays); defaults to Mon-Fri
    #[arg(long, global = true)]
    calendar: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a schedule from a JSON request or from flags
    Schedule {
        /// JSON request file (start, end | timeAllocation, tasks, blockedPeriods)
        #[arg(long, conflicts_with_all = ["start", "end", "allocation", "tasks", "blocked"])]
        request: Option<PathBuf>,

        /// Project start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Project end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Time allocation fraction, e.g. 0.5
        #[arg(long)]
        allocation: Option<f64>,

        /// Tasks CSV with id,norm_days columns
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// Blocked periods CSV with start,end columns
        #[arg(long)]
        blocked: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Write the result to a file instead of stdout (json or csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add business days to a date
    AddDays { date: String, days: f64 },

    /// Count business days between two dates
    Diff { from: String, to: String },

    /// Print the effective calendar configuration as JSON
    Calendar,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Table,
    Csv,
}

fn build_request(
    request: Option<PathBuf>,
    start: Option<String>,
    end: Option<String>,
    allocation: Option<f64>,
    tasks: Option<PathBuf>,
    blocked: Option<PathBuf>,
) -> Result<ScheduleRequest, Box<dyn Error>> {
    if let Some(path) = request {
        return Ok(load_request_from_json(path)?);
    }
    let start = start.ok_or("either --request or --start is required")?;
    let start = parse_date(&start)?;
    let end = end.as_deref().map(parse_date).transpose()?;
    let tasks = match tasks {
        Some(path) => load_tasks_from_csv(path)?,
        None => Vec::new(),
    };
    let blocked = match blocked {
        Some(path) => load_blocked_periods_from_csv(path)?,
        None => Vec::new(),
    };
    Ok(ScheduleRequest::from_parts(
        start, end, allocation, tasks, blocked,
    )?)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let calendar = match &cli.calendar {
        Some(path) => WorkCalendar::from_config(&load_calendar_config(path)?)?,
        None => WorkCalendar::default(),
    };

    match cli.command {
        Command::Schedule {
            request,
            start,
            end,
            allocation,
            tasks,
            blocked,
            format,
            output,
        } => {
            let request = build_request(request, start, end, allocation, tasks, blocked)?;
            let planner = Planner::new(calendar);
            let result = planner.schedule(&request)?;
            log::info!("{}", result.to_cli_summary());

            match (format, output) {
                (Format::Json, Some(path)) => {
                    save_result_to_json(&result, &path)?;
                    println!("Schedule written to {}.", path.display());
                }
                (Format::Csv, Some(path)) => {
                    save_result_to_csv(&result, &request.tasks, &path)?;
                    println!("Schedule written to {}.", path.display());
                }
                (Format::Table, Some(_)) => {
                    return Err("--output supports json and csv formats only".into());
                }
                (Format::Json, None) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                (Format::Csv, None) => {
                    write_result_csv(&result, &request.tasks, io::stdout())?;
                }
                (Format::Table, None) => {
                    println!("{}", result.to_cli_summary());
                    let df = result.to_dataframe(&request.tasks)?;
                    print!("{}", render_text_table(&df));
                }
            }
        }
        Command::AddDays { date, days } => {
            let date = parse_date(&date)?;
            println!("{}", format_date(calendar.add_business_days(date, days)?));
        }
        Command::Diff { from, to } => {
            let from = parse_date(&from)?;
            let to = parse_date(&to)?;
            println!("{}", calendar.business_day_diff(from, to));
        }
        Command::Calendar => {
            println!("{}", serde_json::to_string_pretty(&calendar.to_config())?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
