//! Naming rules for registration names.
//!
//! Registration names come from the CRM and follow a handful of
//! human-authored conventions. Each convention is a [`LabelRule`]; rules are
//! tried in order and the first one that applies produces the label. The
//! pass-through rule is last and always applies, so resolution never fails.
//!
//! To support a new naming convention, add a rule before the pass-through one.

use super::types::CourseLabel;
use regex::Regex;
use std::sync::LazyLock;

/// Separator between the date/title, extra and location segments.
pub const SEGMENT_SEPARATOR: &str = " - ";

// "May 24-25 Standard First Aid" -> ("May 24-25", " Standard First Aid")
static DATED_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+\s+[0-9]+-[0-9]+)(\s+.*)?$").unwrap());

/// A shape-matcher paired with the extractor for that shape.
pub struct LabelRule {
    name: &'static str,
    applies: fn(&[&str]) -> bool,
    extract: fn(&str, &[&str]) -> CourseLabel,
}

impl LabelRule {
    /// Short identifier, reported to callers so they can tell which path was taken.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// All rules, in evaluation order.
pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        name: "split_date",
        applies: has_three_or_more_segments,
        extract: extract_split_date,
    },
    LabelRule {
        name: "dated_title",
        applies: has_two_segments,
        extract: extract_dated_title,
    },
    LabelRule {
        name: "passthrough",
        applies: always,
        extract: extract_passthrough,
    },
];

/// Resolves a registration name against the rule table.
///
/// Returns the label together with the rule that produced it.
pub fn resolve(full_name: &str) -> (CourseLabel, &'static LabelRule) {
    let segments: Vec<&str> = full_name.split(SEGMENT_SEPARATOR).collect();

    // The pass-through rule always applies
    let rule = LABEL_RULES
        .iter()
        .find(|rule| (rule.applies)(&segments))
        .unwrap_or(&LABEL_RULES[LABEL_RULES.len() - 1]);

    ((rule.extract)(full_name, &segments), rule)
}

fn has_three_or_more_segments(segments: &[&str]) -> bool {
    segments.len() >= 3
}

fn has_two_segments(segments: &[&str]) -> bool {
    segments.len() == 2
}

fn always(_: &[&str]) -> bool {
    true
}

fn extract_passthrough(full_name: &str, _: &[&str]) -> CourseLabel {
    CourseLabel::passthrough(full_name)
}

/// `"May 24 - 25 Standard First Aid - TMU"`: the date range itself was written
/// with the separator, so the day after it ends up in the second segment.
///
/// The first two words of the second segment are always attached to the date,
/// which for names like the one above yields `"May 24 - 25 Standard"`. Existing
/// registration cards depend on this output, so it is kept as is.
fn extract_split_date(full_name: &str, segments: &[&str]) -> CourseLabel {
    let Some((location, rest)) = segments.split_last() else {
        return CourseLabel::passthrough(full_name);
    };
    let [first, second, ..] = rest else {
        return CourseLabel::passthrough(full_name);
    };

    let mut label = CourseLabel {
        raw_name: full_name.to_string(),
        course_title: full_name.to_string(),
        date_range: String::new(),
        location: location.to_string(),
    };

    let second_parts: Vec<&str> = second.split(' ').collect();
    if let [day, word, tail @ ..] = second_parts.as_slice() {
        label.date_range = format!("{first}{SEGMENT_SEPARATOR}{day} {word}");

        let mut title = tail.join(" ");
        if let [_, _, extra] = rest {
            title.push_str(SEGMENT_SEPARATOR);
            title.push_str(extra);
        }
        label.course_title = title;
    } else {
        label.date_range = format!("{first}{SEGMENT_SEPARATOR}{second}");
    }

    label
}

/// `"May 24-25 Standard First Aid with CPR-C (SFA) - TMU"`
fn extract_dated_title(full_name: &str, segments: &[&str]) -> CourseLabel {
    let [head, location] = segments else {
        return CourseLabel::passthrough(full_name);
    };

    let (date_range, course_title) = match DATED_TITLE_REGEX.captures(head) {
        Some(caps) => (
            caps.get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
            caps.get(2)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        ),
        None => (String::new(), head.to_string()),
    };

    CourseLabel {
        raw_name: full_name.to_string(),
        course_title,
        date_range,
        location: location.to_string(),
    }
}
