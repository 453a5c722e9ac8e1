//! Schedule document structures.
//!
//! The whole schedule lives in one JSON document: events and assignments
//! keyed by `YYYY-MM-DD` date strings plus the set of finalized dates. It is
//! loaded wholesale at startup and rewritten wholesale on every change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A timetable entry with 12-hour clock times (e.g., "10:00 AM").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleEvent {
    pub fn new(
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// An assignment due on some date, optionally tied to a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub due_date: String,
    pub assigned_staff: String,
}

impl Assignment {
    /// Create an assignment; blank staff defaults to "N/A".
    pub fn new(name: impl Into<String>, due_date: impl Into<String>, staff: &str) -> Self {
        let staff = staff.trim();
        Self {
            name: name.into(),
            due_date: due_date.into(),
            assigned_staff: if staff.is_empty() {
                "N/A".to_string()
            } else {
                staff.to_string()
            },
        }
    }
}

/// The persisted schedule document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleData {
    #[serde(default)]
    pub events: BTreeMap<String, Vec<ScheduleEvent>>,

    #[serde(default)]
    pub assignments: BTreeMap<String, Vec<Assignment>>,

    #[serde(default)]
    pub finalized_dates: Vec<String>,
}

impl ScheduleData {
    /// Whether edits to the given date are locked.
    pub fn is_finalized(&self, date: &str) -> bool {
        self.finalized_dates.iter().any(|d| d == date)
    }

    /// Events stored for a date, in insertion order.
    pub fn events_for(&self, date: &str) -> &[ScheduleEvent] {
        self.events.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Assignments stored for a date, in insertion order.
    pub fn assignments_for(&self, date: &str) -> &[Assignment] {
        self.assignments.get(date).map(Vec::as_slice).unwrap_or(&[])
    }
}
