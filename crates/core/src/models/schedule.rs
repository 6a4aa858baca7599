use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::rotation::{self, Direction};

/// How often a rotation is meant to recur.
///
/// Stored as metadata only; nothing advances a rotation automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    /// Whether the weekday selector applies to this recurrence.
    pub fn uses_days(self) -> bool {
        matches!(self, Recurrence::Weekly)
    }

    /// Whether the day-of-month selector applies to this recurrence.
    pub fn uses_dates(self) -> bool {
        matches!(self, Recurrence::Monthly | Recurrence::Yearly)
    }

    /// Whether the month selector applies to this recurrence.
    pub fn uses_months(self) -> bool {
        matches!(self, Recurrence::Yearly)
    }
}

/// A persisted rotation schedule.
///
/// The JSON shape is the one written into the storage slot, so field names
/// stay camelCase. Selector sets missing from older records load as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: u64,
    pub title: String,
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub recurrence: Recurrence,
    /// Weekdays, 0 through 6.
    #[serde(default)]
    pub selected_days: BTreeSet<u8>,
    /// Months, 1 through 12.
    #[serde(default)]
    pub selected_months: BTreeSet<u8>,
    /// Days of the month, 1 through 31.
    #[serde(default)]
    pub selected_dates: BTreeSet<u8>,
    /// Time of day as "HH:MM".
    pub time: String,
    #[serde(default)]
    pub current_index: usize,
}

impl Schedule {
    /// The name whose turn it currently is.
    pub fn current_name(&self) -> Option<&str> {
        self.names.get(self.current_index).map(String::as_str)
    }

    /// Moves the turn pointer one step and returns the new index.
    ///
    /// Returns `None` and leaves the record untouched when it has no names.
    pub fn rotate(&mut self, direction: Direction) -> Option<usize> {
        let next = rotation::step(self.current_index, self.names.len(), direction)?;
        self.current_index = next;
        Some(next)
    }
}

/// A schedule as returned to clients, with the current turn resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub current_name: Option<String>,
}

impl From<&Schedule> for ScheduleResponse {
    fn from(schedule: &Schedule) -> Self {
        Self {
            current_name: schedule.current_name().map(str::to_string),
            schedule: schedule.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotateRequest {
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotateResponse {
    pub id: u64,
    pub rotated: bool,
    pub current_index: Option<usize>,
    pub current_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteScheduleResponse {
    pub id: u64,
    pub deleted: bool,
}
