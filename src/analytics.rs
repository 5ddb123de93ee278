use crate::environment::Environment;
use chrono::Datelike;
use chrono::Timelike;
use reqwest::header::ACCEPT;
use serde_json::{Value, json};
use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),

    #[error("event_properties is not a valid JSON object")]
    InvalidEventProperties,

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Non-successful response: {status} - {body}")]
    FailedResponse {
        status: reqwest::StatusCode,
        body: String,
    },
}

pub const PRODUCTION_MEASUREMENT_ID: &str = "G-7QDLRB20MV";
pub const PRODUCTION_API_SECRET: &str = "pWk4d0cXQHe51tJbnNxUmA";

pub fn analytics_id(environment: &Environment) -> String {
    match environment {
        Environment::Production => PRODUCTION_MEASUREMENT_ID.to_string(),
        // Disable analytics outside production
        _ => String::new(),
    }
}

pub fn analytics_api_key(environment: &Environment) -> String {
    match environment {
        Environment::Production => PRODUCTION_API_SECRET.to_string(),
        _ => String::new(),
    }
}

/// Track an event with the measurement protocol.
///
/// # Arguments
/// * `event_name` - The name of the event to track.
/// * `event_properties` - A JSON object containing properties of the event.
/// * `environment` - The environment in which the application is running.
/// * `client_id` - A unique identifier for the client, typically a UUID.
pub async fn track(
    event_name: &str,
    event_properties: Value,
    environment: &Environment,
    client_id: String,
) -> Result<(), TrackError> {
    let analytics_id = analytics_id(environment);
    let analytics_api_key = analytics_api_key(environment);
    if analytics_id.is_empty() {
        return Ok(());
    }
    let local_now = chrono::offset::Local::now();

    let system_time = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    let timezone = iana_time_zone::get_timezone()
        .ok()
        .map_or_else(|| String::from("UTC"), |tz| tz);

    let mut properties = json!({
        "time": system_time,
        "platform": "Dashboard",
        "os": env::consts::OS,
        "app_version": env!("CARGO_PKG_VERSION"),
        "timezone": timezone,
        "local_hour": local_now.hour(),
        "day_of_week": local_now.weekday().number_from_monday(),
        "event_id": system_time,
    });

    // Merge the event-specific properties, rejecting anything that is not a
    // JSON object up front.
    if let Some(obj) = event_properties.as_object() {
        for (k, v) in obj {
            properties[k] = v.clone();
        }
    } else {
        return Err(TrackError::InvalidEventProperties);
    }

    let body = json!({
        "client_id": client_id,
        "events": [{
            "name": event_name,
            "params": properties
        }],
    });

    let client = reqwest::Client::new();
    let url = format!(
        "https://www.google-analytics.com/mp/collect?measurement_id={}&api_secret={}",
        analytics_id, analytics_api_key
    );

    let response = client
        .post(&url)
        .json(&body)
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await?;
        return Err(TrackError::FailedResponse {
            status,
            body: body_text,
        });
    }

    Ok(())
}

/// Track removal of a custom template (non-blocking).
pub async fn track_template_removed(source: &str, environment: Environment, client_id: String) {
    let analytics_data = json!({
        "source": source,
    });

    let _ = track(
        "dashboard_template_removed",
        analytics_data,
        &environment,
        client_id,
    )
    .await;
}
