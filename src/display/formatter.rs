//! Remaining-seconds formatting and severity buckets

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::state::DeadlineState;

/// At or below this many seconds the countdown is a warning
pub const WARNING_THRESHOLD: i64 = 30;
/// At or below this many seconds the countdown is in danger
pub const DANGER_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Danger,
    Expired,
}

impl Severity {
    /// Classify remaining seconds; unset and negative count as zero
    pub fn from_seconds(seconds: Option<i64>) -> Self {
        match clamp(seconds) {
            0 => Severity::Expired,
            s if s <= DANGER_THRESHOLD => Severity::Danger,
            s if s <= WARNING_THRESHOLD => Severity::Warning,
            _ => Severity::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Expired => "expired",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formatted countdown ready for a presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub text: String,
    pub severity: Severity,
}

impl DisplayInfo {
    pub fn from_state(state: &DeadlineState) -> Self {
        display(state.seconds_left.map(to_signed))
    }
}

fn clamp(seconds: Option<i64>) -> i64 {
    seconds.unwrap_or(0).max(0)
}

fn to_signed(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX)
}

/// `m:ss`, e.g. `2:05`
pub fn format_remaining(seconds: Option<i64>) -> String {
    let total = clamp(seconds);
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn display(seconds: Option<i64>) -> DisplayInfo {
    DisplayInfo {
        text: format_remaining(seconds),
        severity: Severity::from_seconds(seconds),
    }
}

pub fn status_message(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) => format!("Seconds left to deadline: {}", s),
        None => "Loading deadline information...".to_string(),
    }
}

pub fn title(seconds: u64) -> String {
    format!("Deadline: {} seconds left", seconds)
}

pub fn description(seconds: u64) -> String {
    format!("Countdown timer with {} seconds left to deadline", seconds)
}

pub fn is_almost_deadline(seconds: Option<u64>) -> bool {
    seconds.is_some_and(|s| to_signed(s) <= DANGER_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_remaining(Some(125)), "2:05");
        assert_eq!(format_remaining(Some(59)), "0:59");
        assert_eq!(format_remaining(Some(600)), "10:00");
    }

    #[test]
    fn missing_or_negative_formats_as_zero() {
        assert_eq!(format_remaining(None), "0:00");
        assert_eq!(format_remaining(Some(0)), "0:00");
        assert_eq!(format_remaining(Some(-7)), "0:00");
    }

    #[test]
    fn severity_boundaries_are_inclusive() {
        assert_eq!(Severity::from_seconds(Some(60)), Severity::Normal);
        assert_eq!(Severity::from_seconds(Some(31)), Severity::Normal);
        assert_eq!(Severity::from_seconds(Some(30)), Severity::Warning);
        assert_eq!(Severity::from_seconds(Some(11)), Severity::Warning);
        assert_eq!(Severity::from_seconds(Some(10)), Severity::Danger);
        assert_eq!(Severity::from_seconds(Some(1)), Severity::Danger);
        assert_eq!(Severity::from_seconds(Some(0)), Severity::Expired);
        assert_eq!(Severity::from_seconds(None), Severity::Expired);
        assert_eq!(Severity::from_seconds(Some(-3)), Severity::Expired);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Danger).unwrap(), r#""danger""#);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn display_from_state() {
        let mut state = DeadlineState::new();
        assert_eq!(
            DisplayInfo::from_state(&state),
            DisplayInfo { text: "0:00".to_string(), severity: Severity::Expired }
        );

        state.apply_success(95, 0);
        assert_eq!(
            DisplayInfo::from_state(&state),
            DisplayInfo { text: "1:35".to_string(), severity: Severity::Normal }
        );
    }

    #[test]
    fn page_strings() {
        assert_eq!(status_message(None), "Loading deadline information...");
        assert_eq!(status_message(Some(42)), "Seconds left to deadline: 42");
        assert_eq!(status_message(Some(0)), "Seconds left to deadline: 0");
        assert_eq!(title(42), "Deadline: 42 seconds left");
        assert_eq!(description(5), "Countdown timer with 5 seconds left to deadline");
    }

    #[test]
    fn almost_deadline_needs_a_value() {
        assert!(!is_almost_deadline(None));
        assert!(is_almost_deadline(Some(10)));
        assert!(is_almost_deadline(Some(0)));
        assert!(!is_almost_deadline(Some(11)));
    }
}
