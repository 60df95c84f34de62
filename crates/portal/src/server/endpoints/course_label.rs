//! API endpoints for course label functionality.
//!
//! These endpoints expose the course label parser, policy resolution and
//! registration summaries to the portal pages.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::course_label::{self, rules, CourseSummaryBuilder, PolicyBucket};
use crate::server::types::ApiErrorType;
use crate::types::PortalState;

/// Query parameters for `/course_label`.
#[derive(Debug, Deserialize)]
pub struct CourseLabelQuery {
    /// Registration name as stored in the CRM
    pub name: String,
}

/// Query parameters for `/course_label/combo`.
#[derive(Debug, Deserialize)]
pub struct ComboClassroomQuery {
    pub classroom: String,
}

/// Query parameters for `/policy`.
#[derive(Debug, Deserialize)]
pub struct PolicyQuery {
    pub days: i64,
}

/// Query parameters for `/course_summary`.
#[derive(Debug, Deserialize)]
pub struct CourseSummaryQuery {
    pub name: String,
    /// Whole days until the course starts
    pub days: Option<i64>,
    /// Course start date (`YYYY-MM-DD`), used when `days` is not given
    pub start_date: Option<String>,
}

/// GET /course_label
///
/// Splits a registration name into title, date range and location.
///
/// Query parameters:
/// - `name`: The registration name
pub async fn get_course_label(Query(params): Query<CourseLabelQuery>) -> Response {
    info!("GET /course_label - name={:?}", params.name);

    let (label, rule) = rules::resolve(&params.name);
    (
        StatusCode::OK,
        Json(json!({
            "raw_name": label.raw_name,
            "course_title": label.course_title,
            "date_range": label.date_range,
            "location": label.location,
            "rule": rule.name(),
        })),
    )
        .into_response()
}

/// GET /course_label/combo
///
/// Splits a combo course classroom string into date and location.
pub async fn get_combo_classroom(Query(params): Query<ComboClassroomQuery>) -> Response {
    info!("GET /course_label/combo - classroom={:?}", params.classroom);

    let classroom = course_label::parse_combo_classroom_label(&params.classroom);
    (StatusCode::OK, Json(classroom)).into_response()
}

/// GET /policy
///
/// Returns the refund and reschedule terms for a course starting in `days` days.
pub async fn get_policy(
    State(s): State<Arc<PortalState>>,
    Query(params): Query<PolicyQuery>,
) -> Response {
    info!("GET /policy - days={}", params.days);

    let table = s.policy_store.get();
    let policy = course_label::resolve_policy(params.days, table.as_deref());
    let bucket = PolicyBucket::for_days(params.days);

    (
        StatusCode::OK,
        Json(json!({
            "bucket": bucket.table_key(),
            "refund": policy.refund,
            "reschedule": policy.reschedule,
        })),
    )
        .into_response()
}

/// GET /course_summary
///
/// Returns the label, countdown message and policy terms for one registration.
///
/// Query parameters:
/// - `name`: The registration name
/// - `days` or `start_date`: When the course starts
pub async fn get_course_summary(
    State(s): State<Arc<PortalState>>,
    Query(params): Query<CourseSummaryQuery>,
) -> Response {
    info!(
        "GET /course_summary - name={:?}, days={:?}, start_date={:?}",
        params.name, params.days, params.start_date
    );

    let days = match (params.days, params.start_date.as_deref()) {
        (Some(days), _) => days,
        (None, Some(start_date)) => match NaiveDate::parse_from_str(start_date, "%Y-%m-%d") {
            Ok(start) => course_label::days_until_start(start, Local::now().date_naive()),
            Err(e) => {
                return ApiErrorType::from((
                    StatusCode::BAD_REQUEST,
                    "Invalid start_date, expected YYYY-MM-DD",
                    Some(e.to_string()),
                ))
                .into_response()
            }
        },
        (None, None) => {
            return ApiErrorType::from((
                StatusCode::BAD_REQUEST,
                "Either days or start_date is required",
                None,
            ))
            .into_response()
        }
    };

    let builder = CourseSummaryBuilder::new(s.policy_store.get());
    let summary = builder.summarize(&params.name, days);

    (StatusCode::OK, Json(summary)).into_response()
}

/// POST /policy/reload
///
/// Re-reads the policy file, replacing the cached table.
pub async fn post_reload_policy(State(s): State<Arc<PortalState>>) -> Response {
    info!(
        "POST /policy/reload - Reloading {}",
        s.policy_store.path().display()
    );

    match s.policy_store.reload() {
        Ok(_) => (StatusCode::OK, Json(json!({ "reloaded": true }))).into_response(),
        Err(e) => {
            error!("Failed to reload policy table: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to reload policy table",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course_label::PolicyStore;
    use axum::body::to_bytes;
    use chrono::Duration;
    use serde_json::Value;
    use std::path::Path;

    const POLICY_JSON: &str = r#"{
        "refundPolicy": {
            "More than 5 days1*": "Full refund",
            "3-5 days1*": "50% refund",
            "2 days or less1*": "No refund",
            "After course begins": "No refund"
        },
        "reschedulePolicy": {
            "More than 5 days1*": "Free",
            "3-5 days1*": "$25 fee"
        }
    }"#;

    fn state_with_policy(dir: &Path) -> Arc<PortalState> {
        let path = dir.join("policy.json");
        std::fs::write(&path, POLICY_JSON).unwrap();
        Arc::new(PortalState::new(PolicyStore::with_default_ttl(path)))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_course_label() {
        let response = get_course_label(Query(CourseLabelQuery {
            name: "May 24-25 Standard First Aid with CPR-C (SFA) - TMU".to_string(),
        }))
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["date_range"], "May 24-25");
        assert_eq!(body["course_title"], "Standard First Aid with CPR-C (SFA)");
        assert_eq!(body["location"], "TMU");
        assert_eq!(body["rule"], "dated_title");
    }

    #[tokio::test]
    async fn test_get_combo_classroom() {
        let response = get_combo_classroom(Query(ComboClassroomQuery {
            classroom: "April 12-13 Bronze Harbord".to_string(),
        }))
        .await;

        let body = body_json(response).await;
        assert_eq!(body["date"], "April 12-13");
        assert_eq!(body["location"], "Harbord");
    }

    #[tokio::test]
    async fn test_get_policy() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_policy(dir.path());

        let body = body_json(get_policy(State(state.clone()), Query(PolicyQuery { days: 4 })).await).await;
        assert_eq!(body["bucket"], "3-5 days1*");
        assert_eq!(body["refund"], "50% refund");
        assert_eq!(body["reschedule"], "$25 fee");

        let body = body_json(get_policy(State(state), Query(PolicyQuery { days: 1 })).await).await;
        assert_eq!(body["bucket"], "2 days or less1*");
        assert_eq!(body["refund"], "No refund");
        assert_eq!(body["reschedule"], Value::Null);
    }

    #[tokio::test]
    async fn test_get_policy_without_table() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(PortalState::new(PolicyStore::with_default_ttl(
            dir.path().join("missing.json"),
        )));

        let body = body_json(get_policy(State(state), Query(PolicyQuery { days: 10 })).await).await;
        assert_eq!(body["refund"], "");
        assert_eq!(body["reschedule"], "");
    }

    #[tokio::test]
    async fn test_get_course_summary_with_days() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_policy(dir.path());

        let response = get_course_summary(
            State(state),
            Query(CourseSummaryQuery {
                name: "May 24 - 25 Standard First Aid - TMU".to_string(),
                days: Some(14),
                start_date: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["label"]["date_range"], "May 24 - 25 Standard");
        assert_eq!(body["start_message"], "Starts in 2 weeks");
        assert_eq!(body["bucket"], "MoreThanFiveDays");
        assert_eq!(body["policy"]["refund"], "Full refund");
    }

    #[tokio::test]
    async fn test_get_course_summary_with_start_date() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_policy(dir.path());
        let start = Local::now().date_naive() + Duration::days(4);

        let response = get_course_summary(
            State(state),
            Query(CourseSummaryQuery {
                name: "Bronze Cross - Harbord".to_string(),
                days: None,
                start_date: Some(start.format("%Y-%m-%d").to_string()),
            }),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["days_until_start"], 4);
        assert_eq!(body["start_message"], "Starts in 4 days");
        assert_eq!(body["policy"]["refund"], "50% refund");
    }

    #[tokio::test]
    async fn test_get_course_summary_requires_start() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_policy(dir.path());

        let response = get_course_summary(
            State(state.clone()),
            Query(CourseSummaryQuery {
                name: "Bronze Cross - Harbord".to_string(),
                days: None,
                start_date: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get_course_summary(
            State(state),
            Query(CourseSummaryQuery {
                name: "Bronze Cross - Harbord".to_string(),
                days: None,
                start_date: Some("24/05/2025".to_string()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid start_date, expected YYYY-MM-DD");
    }

    #[tokio::test]
    async fn test_post_reload_policy() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_policy(dir.path());

        let response = post_reload_policy(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);

        std::fs::write(dir.path().join("policy.json"), "{").unwrap();
        let response = post_reload_policy(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
