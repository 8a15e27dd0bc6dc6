use crate::day::DaySchedule;

/// Canonical serialization of the days published for a queue, used only for
/// change detection.
///
/// Covers every published day, not only the one on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSnapshot(String);

impl ScheduleSnapshot {
    /// `days` are expected in date order
    pub fn from_days(days: &[DaySchedule]) -> Self {
        // Struct fields serialize in declaration order, so equal schedules
        // always produce the same string
        let canonical = serde_json::to_string(days).unwrap_or_default();
        Self(canonical)
    }

    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotDiff {
    /// No snapshot was stored for the queue. The new one is the baseline.
    FirstSeen,
    Changed,
    Unchanged,
}

impl SnapshotDiff {
    pub fn compare(stored: Option<&ScheduleSnapshot>, new: &ScheduleSnapshot) -> Self {
        match stored {
            None => Self::FirstSeen,
            Some(stored) if stored == new => Self::Unchanged,
            Some(_) => Self::Changed,
        }
    }

    /// Whether the new snapshot has to be persisted
    pub fn needs_store(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}
