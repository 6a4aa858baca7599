use chrono::Utc;

/// Issues schedule ids.
///
/// Ids are millisecond timestamps bumped past the last issued value, so two
/// schedules created within the same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Starts past every id in `existing`.
    pub fn seeded(existing: impl IntoIterator<Item = u64>) -> Self {
        Self {
            last: existing.into_iter().max().unwrap_or(0),
        }
    }

    /// Moves the floor up so later ids stay above `id`.
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}
