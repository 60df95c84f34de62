/// Types for course label and policy data
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display pieces derived from a registration name such as
/// `"May 24-25 Standard First Aid with CPR-C (SFA) - TMU"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLabel {
    pub raw_name: String,
    pub course_title: String,
    pub date_range: String, // e.g., "May 24-25"
    pub location: String,   // e.g., "TMU"
}

impl CourseLabel {
    /// Label used when no naming rule applies: the raw name becomes the title.
    pub fn passthrough(raw_name: &str) -> Self {
        Self {
            raw_name: raw_name.to_string(),
            course_title: raw_name.to_string(),
            date_range: String::new(),
            location: String::new(),
        }
    }
}

/// Date and location taken from a combo course classroom string
/// (e.g., `"April 12-13 Bronze Harbord"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboClassroom {
    pub date: String,
    pub location: String,
}

/// Refund and reschedule terms keyed by day-bucket label.
///
/// Loaded from JSON shaped like
/// `{"refundPolicy": {"3-5 days1*": "..."}, "reschedulePolicy": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTable {
    #[serde(default)]
    pub refund_policy: HashMap<String, String>,
    #[serde(default)]
    pub reschedule_policy: HashMap<String, String>,
}

/// Day-count bucket governing which policy text applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyBucket {
    MoreThanFiveDays,
    ThreeToFiveDays,
    TwoDaysOrLess,
    AfterCourseBegins,
}

impl PolicyBucket {
    /// Picks the bucket for a signed day count. Every integer maps to exactly one bucket.
    pub fn for_days(days_until_start: i64) -> Self {
        match days_until_start {
            d if d > 5 => PolicyBucket::MoreThanFiveDays,
            3..=5 => PolicyBucket::ThreeToFiveDays,
            0..=2 => PolicyBucket::TwoDaysOrLess,
            _ => PolicyBucket::AfterCourseBegins,
        }
    }

    /// The key this bucket is stored under in the policy table.
    pub fn table_key(&self) -> &'static str {
        match self {
            PolicyBucket::MoreThanFiveDays => "More than 5 days1*",
            PolicyBucket::ThreeToFiveDays => "3-5 days1*",
            PolicyBucket::TwoDaysOrLess => "2 days or less1*",
            PolicyBucket::AfterCourseBegins => "After course begins",
        }
    }
}

/// Policy text that applies to one registration.
///
/// A field is `None` when the table has no entry for the bucket; callers
/// must tolerate that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reschedule: Option<String>,
}

impl ResolvedPolicy {
    /// Neutral result used when no policy table is available.
    pub fn neutral() -> Self {
        Self {
            refund: Some(String::new()),
            reschedule: Some(String::new()),
        }
    }
}

/// Everything a registration card shows about one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub label: CourseLabel,
    pub days_until_start: i64,
    pub start_message: String,
    pub bucket: PolicyBucket,
    pub policy: ResolvedPolicy,
}
