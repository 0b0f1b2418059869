//! Planning request boundary.
//!
//! Transport-agnostic handling of a JSON planning request: parse the body,
//! validate the settings once, run the planner and shape the response. Any
//! failure becomes a 400 with a short localized message; no other status is
//! ever produced.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ParseError, PlanError};
use crate::locale::Locale;
use crate::schedule::{DaySettings, FixedEvent, PlanBlock, PlanDefaults, SettingsInput, Task};
use crate::scheduler::DayPlanner;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Body of a planning request. `null` and absent lists both mean empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub events: Option<Vec<FixedEvent>>,
    #[serde(default)]
    pub settings: Option<SettingsInput>,
}

impl PlanRequest {
    /// Parse a request body.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the body is not JSON or a record has the
    /// wrong shape.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate settings and plan the day.
    ///
    /// # Errors
    ///
    /// Returns a validation error if settings are absent or invalid.
    pub fn execute(&self, defaults: &PlanDefaults, locale: Locale) -> Result<Vec<PlanBlock>, PlanError> {
        let input = self.settings.clone().unwrap_or_default();
        let settings = DaySettings::from_input(&input, defaults)?;
        let tasks = self.tasks.as_deref().unwrap_or_default();
        let events = self.events.as_deref().unwrap_or_default();

        debug!(tasks = tasks.len(), events = events.len(), date = %settings.date(), "planning request");
        Ok(DayPlanner::new(settings)
            .with_locale(locale)
            .plan(tasks, events))
    }
}

/// Response body: `{ "plan": [...] }` or `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ResponseBody {
    Plan { plan: Vec<PlanBlock> },
    Error { error: String },
}

/// Status and body ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl PlanResponse {
    pub fn ok(plan: Vec<PlanBlock>) -> Self {
        Self {
            status: STATUS_OK,
            body: ResponseBody::Plan { plan },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_BAD_REQUEST,
            body: ResponseBody::Error {
                error: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Serialize the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body)
    }
}

/// Handle a raw planning request body.
pub fn handle_plan_request(body: &str, defaults: &PlanDefaults, locale: Locale) -> PlanResponse {
    let result = PlanRequest::from_json(body)
        .map_err(PlanError::from)
        .and_then(|request| request.execute(defaults, locale));

    match result {
        Ok(plan) => PlanResponse::ok(plan),
        Err(err) => {
            warn!(error = %err, "rejecting planning request");
            PlanResponse::bad_request(locale.message_for(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(body: &str) -> PlanResponse {
        handle_plan_request(body, &PlanDefaults::default(), Locale::En)
    }

    #[test]
    fn absent_lists_mean_empty() {
        let response = handle(r#"{"settings":{"date":"2024-05-01","dayStart":"08:00","dayEnd":"22:00"},"tasks":null}"#);
        assert_eq!(response, PlanResponse::ok(Vec::new()));
    }

    #[test]
    fn missing_settings_is_bad_request() {
        let response = handle(r#"{"tasks":[]}"#);
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(response.body, ResponseBody::Error { error: "Missing required settings".into() });

        let response = handle(r#"{"settings":{"date":"2024-05-01","dayStart":"08:00"}}"#);
        assert_eq!(response.body, ResponseBody::Error { error: "Missing required settings".into() });
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let response = handle("{not json");
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(response.body, ResponseBody::Error { error: "Invalid data".into() });

        let response = handle(r#"{"settings":{"date":"2024-05-01","dayStart":"08:00","dayEnd":"22:00"},"tasks":[{"id":1}]}"#);
        assert_eq!(response.status, STATUS_BAD_REQUEST);
    }

    #[test]
    fn inverted_day_is_bad_request_in_polish() {
        let body = r#"{"settings":{"date":"2024-05-01","dayStart":"22:00","dayEnd":"08:00"}}"#;
        let response = handle_plan_request(body, &PlanDefaults::default(), Locale::Pl);
        assert_eq!(response.body, ResponseBody::Error { error: "Nieprawidłowe dane".into() });
    }

    #[test]
    fn success_body_has_plan_key() {
        let body = r#"{
            "tasks": [{"id":"t","title":"Mail","durationMinutes":30,"priority":"medium","energy":"medium"}],
            "settings": {"date":"2024-05-01","dayStart":"08:00","dayEnd":"22:00"}
        }"#;
        let response = handle(body);
        assert!(response.is_success());

        let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["plan"][0]["type"], "work");
        assert_eq!(json["plan"][0]["start"], "2024-05-01T08:00:00");
        assert_eq!(json["plan"][0]["end"], "2024-05-01T08:30:00");
    }

    #[test]
    fn response_body_reads_back() {
        let body: ResponseBody = serde_json::from_str(r#"{"error":"Invalid data"}"#).unwrap();
        assert_eq!(body, ResponseBody::Error { error: "Invalid data".into() });
        let body: ResponseBody = serde_json::from_str(r#"{"plan":[]}"#).unwrap();
        assert_eq!(body, ResponseBody::Plan { plan: Vec::new() });
    }
}
