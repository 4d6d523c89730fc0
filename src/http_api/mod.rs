use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::{info, warn};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::json;

use crate::{
    Planner, ScheduleError, ScheduleOptions, ScheduleResult, WorkCalendar, WorkCalendarConfig,
};

/// Shared server state: the calendar every request is scheduled against.
#[derive(Clone)]
pub struct AppState {
    calendar: Arc<RwLock<WorkCalendar>>,
}

impl AppState {
    pub fn new(calendar: WorkCalendar) -> Self {
        Self {
            calendar: Arc::new(RwLock::new(calendar)),
        }
    }

    pub fn with_shared(calendar: Arc<RwLock<WorkCalendar>>) -> Self {
        Self { calendar }
    }

    fn planner(&self) -> Planner {
        Planner::new(self.calendar.read().clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(WorkCalendar::default())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(ScheduleError),
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        ApiError::Invalid(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(err) => {
                warn!("rejected request: {err}");
                let body = Json(ErrorBody {
                    error: err.kind(),
                    message: err.to_string(),
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schedule", post(create_schedule))
        .route("/calendar", get(get_calendar).put(update_calendar))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, calendar: WorkCalendar) -> std::io::Result<()> {
    let app = router(AppState::new(calendar));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn create_schedule(
    State(state): State<AppState>,
    Json(options): Json<ScheduleOptions>,
) -> Result<Json<ScheduleResult>, ApiError> {
    let result = state.planner().schedule_options(&options)?;
    Ok(Json(result))
}

async fn get_calendar(State(state): State<AppState>) -> Json<WorkCalendarConfig> {
    Json(state.calendar.read().to_config())
}

async fn update_calendar(
    State(state): State<AppState>,
    Json(config): Json<WorkCalendarConfig>,
) -> Result<Json<WorkCalendarConfig>, ApiError> {
    let calendar = WorkCalendar::from_config(&config)?;
    let current = {
        let mut guard = state.calendar.write();
        *guard = calendar;
        guard.to_config()
    };
    Ok(Json(current))
}
