//! Course label parsing and refund/reschedule policy resolution
//!
//! Registration cards on the portal pages all go through this module: the
//! CRM's registration name is split into title, date range and location, the
//! day count until the course starts picks a policy bucket, and the day count
//! itself is rendered as a short "starts in" message.
//!
//! Every function here is pure. None of them fail; they degrade to a
//! best-effort result instead.
mod cache;
mod config;
mod error;
mod processor;
pub mod rules;
mod types;

pub use cache::PolicyStore;
pub use error::PolicyConfigError;
pub use processor::CourseSummaryBuilder;
pub use types::*;

use chrono::NaiveDate;

/// Message shown instead of the countdown once a course has started.
pub const COURSE_STARTED_MESSAGE: &str = "This course has already started";

/// Splits a registration name into title, date range and location.
///
/// Recognized shapes:
/// - `"May 24-25 Standard First Aid with CPR-C (SFA) - TMU"`
/// - `"May 24 - 25 Standard First Aid - TMU"` (see [`rules`] for how the date is sliced)
///
/// Anything else comes back as the title with an empty date range and location.
pub fn parse_standard_course_name(full_name: &str) -> CourseLabel {
    rules::resolve(full_name).0
}

/// Splits a combo course classroom string such as `"April 12-13 Bronze Harbord"`.
///
/// With at least four words the first two are the date and the last is the
/// location. Shorter strings are returned whole as the date.
pub fn parse_combo_classroom_label(classroom: &str) -> ComboClassroom {
    let tokens: Vec<&str> = classroom.split(' ').collect();

    if tokens.len() >= 4 {
        ComboClassroom {
            date: tokens[..2].join(" "),
            location: tokens[tokens.len() - 1].to_string(),
        }
    } else {
        ComboClassroom {
            date: classroom.to_string(),
            location: String::new(),
        }
    }
}

/// Looks up the refund and reschedule terms for a course starting in
/// `days_until_start` days.
///
/// # Arguments
/// * `days_until_start` - Whole days until the course starts, negative once it has begun
/// * `policy_table` - The loaded policy table, if any
///
/// # Returns
/// * Empty strings for both terms when there is no table
/// * `None` for a term whose bucket has no entry in the table
pub fn resolve_policy(days_until_start: i64, policy_table: Option<&PolicyTable>) -> ResolvedPolicy {
    let Some(table) = policy_table else {
        return ResolvedPolicy::neutral();
    };

    let key = PolicyBucket::for_days(days_until_start).table_key();
    ResolvedPolicy {
        refund: table.refund_policy.get(key).cloned(),
        reschedule: table.reschedule_policy.get(key).cloned(),
    }
}

/// Renders a non-negative day count as `"Starts in 1 weeks, 3 days"`.
///
/// Units are not singularized ("1 weeks", "1 days"); existing pages render
/// this text verbatim. Callers handle courses that have already started
/// before calling this, see [`start_message`].
pub fn format_relative_days(days: i64) -> String {
    let weeks = days.div_euclid(7);
    let remainder = days % 7;

    if weeks > 0 && remainder > 0 {
        format!("Starts in {weeks} weeks, {remainder} days")
    } else if weeks > 0 {
        format!("Starts in {weeks} weeks")
    } else {
        format!("Starts in {days} days")
    }
}

/// Countdown message for a registration card, or [`COURSE_STARTED_MESSAGE`]
/// when the start date has passed.
pub fn start_message(days_until_start: i64) -> String {
    if days_until_start < 0 {
        COURSE_STARTED_MESSAGE.to_string()
    } else {
        format_relative_days(days_until_start)
    }
}

/// Whole days from `today` until `start`, negative when `start` is in the past.
pub fn days_until_start(start: NaiveDate, today: NaiveDate) -> i64 {
    start.signed_duration_since(today).num_days()
}
