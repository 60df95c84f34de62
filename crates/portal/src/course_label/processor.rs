/// Assembly of registration card summaries
use super::types::*;
use super::{parse_standard_course_name, resolve_policy, start_message};
use std::sync::Arc;

/// Builds [`CourseSummary`] values against one policy table
pub struct CourseSummaryBuilder {
    policy_table: Option<Arc<PolicyTable>>,
}

impl CourseSummaryBuilder {
    /// Creates a builder. Without a table, summaries carry empty policy text.
    pub fn new(policy_table: Option<Arc<PolicyTable>>) -> Self {
        Self { policy_table }
    }

    /// Summarizes one registration
    ///
    /// # Arguments
    /// * `registration_name` - The CRM registration name
    /// * `days_until_start` - Whole days until the course starts, negative once it has begun
    pub fn summarize(&self, registration_name: &str, days_until_start: i64) -> CourseSummary {
        CourseSummary {
            label: parse_standard_course_name(registration_name),
            days_until_start,
            start_message: start_message(days_until_start),
            bucket: PolicyBucket::for_days(days_until_start),
            policy: resolve_policy(days_until_start, self.policy_table.as_deref()),
        }
    }

    /// Gets the policy table, if any
    pub fn policy_table(&self) -> Option<&PolicyTable> {
        self.policy_table.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course_label::COURSE_STARTED_MESSAGE;

    fn table() -> Arc<PolicyTable> {
        Arc::new(
            PolicyTable::from_json(
                r#"{"refundPolicy": {"More than 5 days1*": "Full refund"},
                    "reschedulePolicy": {"More than 5 days1*": "Free"}}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_summarize_upcoming_course() {
        let builder = CourseSummaryBuilder::new(Some(table()));
        let summary = builder.summarize("May 24-25 Standard First Aid with CPR-C (SFA) - TMU", 10);

        assert_eq!(summary.label.course_title, "Standard First Aid with CPR-C (SFA)");
        assert_eq!(summary.start_message, "Starts in 1 weeks, 3 days");
        assert_eq!(summary.bucket, PolicyBucket::MoreThanFiveDays);
        assert_eq!(summary.policy.refund.as_deref(), Some("Full refund"));
        assert_eq!(summary.policy.reschedule.as_deref(), Some("Free"));
    }

    #[test]
    fn test_summarize_started_course() {
        let builder = CourseSummaryBuilder::new(Some(table()));
        let summary = builder.summarize("Bronze Cross - Harbord", -2);

        assert_eq!(summary.start_message, COURSE_STARTED_MESSAGE);
        assert_eq!(summary.bucket, PolicyBucket::AfterCourseBegins);
        assert_eq!(summary.policy.refund, None);
        assert_eq!(summary.policy.reschedule, None);
    }

    #[test]
    fn test_summarize_without_table() {
        let builder = CourseSummaryBuilder::new(None);
        assert!(builder.policy_table().is_none());

        let summary = builder.summarize("Bronze Cross - Harbord", 4);
        assert_eq!(summary.policy, ResolvedPolicy::neutral());
        assert_eq!(summary.start_message, "Starts in 4 days");
    }
}
