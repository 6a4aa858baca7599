//! Transient form state for creating and editing schedules.
//!
//! The form is a small state machine: it is either closed, creating a new
//! schedule, or editing an existing one. Field edits are only accepted while
//! it is open, and the name list never drops below one entry.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::schedule::{Recurrence, Schedule};
use crate::errors::{RotaError, RotaResult};

const DAY_RANGE: RangeInclusive<u8> = 0..=6;
const DATE_RANGE: RangeInclusive<u8> = 1..=31;
const MONTH_RANGE: RangeInclusive<u8> = 1..=12;

/// Editable copy of a schedule's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub title: String,
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub recurrence: Recurrence,
    pub selected_days: BTreeSet<u8>,
    pub selected_months: BTreeSet<u8>,
    pub selected_dates: BTreeSet<u8>,
    pub time: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            names: vec![String::new()],
            recurrence: Recurrence::Daily,
            selected_days: BTreeSet::new(),
            selected_months: BTreeSet::new(),
            selected_dates: BTreeSet::new(),
            time: String::new(),
        }
    }
}

impl FormState {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut names = schedule.names.clone();
        if names.is_empty() {
            names.push(String::new());
        }

        Self {
            title: schedule.title.clone(),
            names,
            recurrence: schedule.recurrence,
            selected_days: schedule.selected_days.clone(),
            selected_months: schedule.selected_months.clone(),
            selected_dates: schedule.selected_dates.clone(),
            time: schedule.time.clone(),
        }
    }

    pub fn add_name_field(&mut self) {
        self.names.push(String::new());
    }

    pub fn change_name_field(&mut self, index: usize, value: impl Into<String>) -> RotaResult<()> {
        let len = self.names.len();
        let slot = self
            .names
            .get_mut(index)
            .ok_or(RotaError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    /// Removes a name entry. Returns `false` when it is the last one left.
    pub fn remove_name_field(&mut self, index: usize) -> RotaResult<bool> {
        let len = self.names.len();
        if index >= len {
            return Err(RotaError::IndexOutOfRange { index, len });
        }
        if len <= 1 {
            return Ok(false);
        }

        self.names.remove(index);
        Ok(true)
    }

    /// Toggles a weekday (0-6). Returns whether it is now selected.
    pub fn toggle_day(&mut self, day: u8) -> RotaResult<bool> {
        toggle(&mut self.selected_days, day, DAY_RANGE, "day")
    }

    /// Toggles a day of the month (1-31). Returns whether it is now selected.
    pub fn toggle_date(&mut self, date: u8) -> RotaResult<bool> {
        toggle(&mut self.selected_dates, date, DATE_RANGE, "date")
    }

    /// Toggles a month (1-12). Returns whether it is now selected.
    pub fn toggle_month(&mut self, month: u8) -> RotaResult<bool> {
        toggle(&mut self.selected_months, month, MONTH_RANGE, "month")
    }

    /// Checks required fields and returns the non-blank names.
    pub fn validated_names(&self) -> RotaResult<Vec<String>> {
        if self.title.is_empty() {
            return Err(RotaError::Validation("title is required".to_string()));
        }
        if self.time.is_empty() {
            return Err(RotaError::Validation("time is required".to_string()));
        }

        let names: Vec<String> = self
            .names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();

        if names.is_empty() {
            return Err(RotaError::Validation(
                "at least one name is required".to_string(),
            ));
        }

        Ok(names)
    }

    /// Builds the record that a submit would store.
    ///
    /// `current_index` is wrapped into the new name list when an edit
    /// removed names. Only names are trimmed; title and time just need to be
    /// non-empty.
    pub fn to_schedule(&self, id: u64, current_index: usize) -> RotaResult<Schedule> {
        let names = self.validated_names()?;
        let current_index = current_index % names.len();

        Ok(Schedule {
            id,
            title: self.title.clone(),
            names,
            recurrence: self.recurrence,
            selected_days: self.selected_days.clone(),
            selected_months: self.selected_months.clone(),
            selected_dates: self.selected_dates.clone(),
            time: self.time.clone(),
            current_index,
        })
    }
}

fn toggle(set: &mut BTreeSet<u8>, value: u8, range: RangeInclusive<u8>, what: &str) -> RotaResult<bool> {
    if !range.contains(&value) {
        return Err(RotaError::Validation(format!(
            "{} {} is outside {}-{}",
            what,
            value,
            range.start(),
            range.end()
        )));
    }

    if set.remove(&value) {
        Ok(false)
    } else {
        set.insert(value);
        Ok(true)
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing { id: u64 },
}

/// Form mode plus the fields being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleForm {
    mode: FormMode,
    state: FormState,
}

impl ScheduleForm {
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    /// Closed -> Creating, starting from empty fields.
    pub fn open(&mut self) -> RotaResult<()> {
        match self.mode {
            FormMode::Closed => {
                self.state = FormState::default();
                self.mode = FormMode::Creating;
                Ok(())
            }
            mode => Err(RotaError::InvalidTransition(format!(
                "cannot start a new schedule while the form is {}",
                mode_label(mode)
            ))),
        }
    }

    /// Closed -> Editing, loading the schedule's fields.
    pub fn begin_edit(&mut self, schedule: &Schedule) -> RotaResult<()> {
        match self.mode {
            FormMode::Closed => {
                self.state = FormState::from_schedule(schedule);
                self.mode = FormMode::Editing { id: schedule.id };
                Ok(())
            }
            mode => Err(RotaError::InvalidTransition(format!(
                "cannot edit schedule {} while the form is {}",
                schedule.id,
                mode_label(mode)
            ))),
        }
    }

    /// Mutable access to the fields, only while the form is open.
    pub fn fields_mut(&mut self) -> RotaResult<&mut FormState> {
        if !self.is_open() {
            return Err(RotaError::InvalidTransition(
                "the form is closed".to_string(),
            ));
        }
        Ok(&mut self.state)
    }

    /// Any open state -> Closed, dropping the fields.
    pub fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.state = FormState::default();
    }
}

/// Partial update of the plain form fields. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFormRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub recurrence: Option<Recurrence>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNameRequest {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub value: u8,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveNameResponse {
    pub removed: bool,
    pub names: Vec<String>,
}

fn mode_label(mode: FormMode) -> &'static str {
    match mode {
        FormMode::Closed => "closed",
        FormMode::Creating => "creating",
        FormMode::Editing { .. } => "editing",
    }
}
