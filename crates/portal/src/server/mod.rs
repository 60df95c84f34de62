use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{course_label, status};
use crate::types::PortalState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<PortalState>) -> Router {
    let course_label_router: Router<Arc<PortalState>> = Router::new()
        .route("/course_label", get(course_label::get_course_label))
        .route("/course_label/combo", get(course_label::get_combo_classroom))
        .route("/course_summary", get(course_label::get_course_summary));

    let policy_router: Router<Arc<PortalState>> = Router::new()
        .route("/policy", get(course_label::get_policy))
        .route("/policy/reload", post(course_label::post_reload_policy));

    Router::new()
        .route("/health", get(status::get_health))
        .merge(course_label_router)
        .merge(policy_router)
        .with_state(app_state)
}
