//! The owning controller for rotation schedules.
//!
//! `RotationController` holds the schedule list, the edit form and the
//! storage backend. Every mutation builds the new list, writes it through the
//! store, and only then replaces the in-memory copy, so memory and storage
//! agree even when a write fails.

use tracing::{debug, info, warn};

use crate::errors::{RotaError, RotaResult};
use crate::id::IdGenerator;
use crate::models::form::{FormMode, FormState, ScheduleForm};
use crate::models::rotation::Direction;
use crate::models::schedule::{Recurrence, Schedule};
use crate::store::{KeyValueStore, ScheduleStore};

pub struct RotationController<S> {
    store: ScheduleStore<S>,
    schedules: Vec<Schedule>,
    form: ScheduleForm,
    ids: IdGenerator,
}

impl<S: KeyValueStore> RotationController<S> {
    /// Creates a controller and loads whatever the backend already holds.
    pub fn new(backend: S) -> Self {
        let store = ScheduleStore::new(backend);
        let schedules = store.load();
        let ids = IdGenerator::seeded(schedules.iter().map(|s| s.id));

        Self {
            store,
            schedules,
            form: ScheduleForm::default(),
            ids,
        }
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn schedule(&self, id: u64) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    pub fn form(&self) -> &ScheduleForm {
        &self.form
    }

    /// Re-reads the list from storage, dropping the in-memory copy.
    pub fn reload(&mut self) {
        self.schedules = self.store.load();
        for schedule in &self.schedules {
            self.ids.observe(schedule.id);
        }
    }

    fn commit(&mut self, schedules: Vec<Schedule>) -> RotaResult<()> {
        self.store.save(&schedules)?;
        self.schedules = schedules;
        Ok(())
    }

    pub fn open_form(&mut self) -> RotaResult<()> {
        self.form.open()?;
        debug!("Opened form for a new schedule");
        Ok(())
    }

    pub fn begin_edit(&mut self, id: u64) -> RotaResult<()> {
        let schedule = self
            .schedules
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| RotaError::NotFound(format!("Schedule with ID {} not found", id)))?;

        self.form.begin_edit(schedule)?;
        debug!("Editing schedule: id={}", id);
        Ok(())
    }

    /// Closes the form without saving anything.
    pub fn cancel(&mut self) {
        if self.form.is_open() {
            debug!("Discarding form in mode {:?}", self.form.mode());
        }
        self.form.close();
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> RotaResult<()> {
        self.form.fields_mut()?.title = title.into();
        Ok(())
    }

    pub fn set_recurrence(&mut self, recurrence: Recurrence) -> RotaResult<()> {
        self.form.fields_mut()?.recurrence = recurrence;
        Ok(())
    }

    pub fn set_time(&mut self, time: impl Into<String>) -> RotaResult<()> {
        self.form.fields_mut()?.time = time.into();
        Ok(())
    }

    pub fn add_name_field(&mut self) -> RotaResult<()> {
        self.form.fields_mut()?.add_name_field();
        Ok(())
    }

    pub fn change_name_field(&mut self, index: usize, value: impl Into<String>) -> RotaResult<()> {
        self.form.fields_mut()?.change_name_field(index, value)
    }

    /// Returns `false` when the entry was the last one and was kept.
    pub fn remove_name_field(&mut self, index: usize) -> RotaResult<bool> {
        self.form.fields_mut()?.remove_name_field(index)
    }

    pub fn toggle_day(&mut self, day: u8) -> RotaResult<bool> {
        self.form.fields_mut()?.toggle_day(day)
    }

    pub fn toggle_date(&mut self, date: u8) -> RotaResult<bool> {
        self.form.fields_mut()?.toggle_date(date)
    }

    pub fn toggle_month(&mut self, month: u8) -> RotaResult<bool> {
        self.form.fields_mut()?.toggle_month(month)
    }

    /// Validates the form, stores the resulting schedule and closes the form.
    ///
    /// A failed validation or write leaves the form open and the list as it was.
    pub fn submit(&mut self) -> RotaResult<Schedule> {
        let fields: &FormState = self.form.state();

        let (schedule, schedules) = match self.form.mode() {
            FormMode::Closed => {
                return Err(RotaError::InvalidTransition(
                    "nothing to submit, the form is closed".to_string(),
                ));
            }
            FormMode::Creating => {
                // A rejected form must not consume an id.
                fields.validated_names()?;
                let schedule = fields.to_schedule(self.ids.next_id(), 0)?;
                let mut schedules = self.schedules.clone();
                schedules.push(schedule.clone());
                (schedule, schedules)
            }
            FormMode::Editing { id } => {
                let mut schedules = self.schedules.clone();
                let Some(slot) = schedules.iter_mut().find(|s| s.id == id) else {
                    return Err(RotaError::NotFound(format!(
                        "Schedule with ID {} not found",
                        id
                    )));
                };
                // The turn may have moved while the form was open.
                let schedule = fields.to_schedule(id, slot.current_index)?;
                *slot = schedule.clone();
                (schedule, schedules)
            }
        };

        let created = self.form.mode() == FormMode::Creating;
        self.commit(schedules)?;
        self.form.close();

        if created {
            info!("Created schedule: id={}, title={}", schedule.id, schedule.title);
        } else {
            info!("Updated schedule: id={}, title={}", schedule.id, schedule.title);
        }

        Ok(schedule)
    }

    /// Moves the turn pointer of one schedule.
    ///
    /// Returns the new index, or `None` when nothing moved: no schedule has
    /// `id`, or it has no names to rotate through.
    pub fn rotate(&mut self, id: u64, direction: Direction) -> RotaResult<Option<usize>> {
        let Some(position) = self.schedules.iter().position(|s| s.id == id) else {
            debug!("Rotate ignored, no schedule with id={}", id);
            return Ok(None);
        };

        let mut schedules = self.schedules.clone();
        let Some(index) = schedules[position].rotate(direction) else {
            warn!("Schedule id={} has no names, leaving it untouched", id);
            return Ok(None);
        };

        self.commit(schedules)?;
        debug!("Rotated schedule id={} {:?} to index {}", id, direction, index);
        Ok(Some(index))
    }

    /// Removes a schedule. Returns `false` when no schedule has `id`.
    pub fn delete_schedule(&mut self, id: u64) -> RotaResult<bool> {
        if !self.schedules.iter().any(|s| s.id == id) {
            debug!("Delete ignored, no schedule with id={}", id);
            return Ok(false);
        }

        let schedules = self
            .schedules
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();

        self.commit(schedules)?;
        info!("Deleted schedule: id={}", id);
        Ok(true)
    }
}
