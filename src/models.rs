use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority, persisted as an ordinal where High sorts first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Ordinal used in the database and for sorting
    pub fn ordinal(&self) -> i64 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Decode a stored ordinal. Anything outside 1..=3 normalizes to Medium.
    pub fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            1 => Priority::High,
            3 => Priority::Low,
            _ => Priority::Medium,
        }
    }

    /// Parse a human-readable label, case-insensitively.
    /// Unknown labels normalize to Medium.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A task in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub priority: Priority,
    /// Due date in YYYY-MM-DD form. None and "" both mean "no due date".
    pub due_date: Option<String>,
    pub completed: bool,
}

impl Task {
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Active"
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.completed {
            "✓"
        } else {
            "○"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordinal_round_trip() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(Priority::from_ordinal(p.ordinal()), p);
        }
    }

    #[test]
    fn test_priority_out_of_range_normalizes_to_medium() {
        assert_eq!(Priority::from_ordinal(0), Priority::Medium);
        assert_eq!(Priority::from_ordinal(7), Priority::Medium);
        assert_eq!(Priority::from_ordinal(-1), Priority::Medium);
    }

    #[test]
    fn test_priority_from_label() {
        assert_eq!(Priority::from_label("high"), Priority::High);
        assert_eq!(Priority::from_label("HIGH"), Priority::High);
        assert_eq!(Priority::from_label(" Low "), Priority::Low);
        assert_eq!(Priority::from_label("medium"), Priority::Medium);
        assert_eq!(Priority::from_label("urgent"), Priority::Medium);
        assert_eq!(Priority::from_label(""), Priority::Medium);
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_sort_order() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_status_label() {
        let task = Task {
            id: 1,
            title: "t".to_string(),
            priority: Priority::Medium,
            due_date: None,
            completed: false,
        };
        assert_eq!(task.status_label(), "Active");
        let done = Task {
            completed: true,
            ..task
        };
        assert_eq!(done.status_label(), "Completed");
    }
}
