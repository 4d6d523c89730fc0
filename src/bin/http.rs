#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use schedule_planner::{WorkCalendar, http_api, load_calendar_config};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr: SocketAddr = std::env::var("SCHEDULE_PLANNER_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let calendar = match std::env::var("SCHEDULE_PLANNER_CALENDAR") {
        Ok(path) => WorkCalendar::from_config(&load_calendar_config(&path)?)?,
        Err(_) => WorkCalendar::default(),
    };

    http_api::serve(addr, calendar).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
