mod day;
pub mod day_resolver;
mod interval;
mod queue;
mod raw;
mod refresh;
pub mod reminder;
mod settings;
mod shared;
mod snapshot;
mod time_of_day;
pub mod timeline;
mod view;

pub use day::{format_date, parse_date, DayLabel, DaySchedule, InvalidDayLabel, ScheduleDays};
pub use day_resolver::{resolve_day, ResolvedDay};
pub use interval::OutageInterval;
pub use queue::{is_valid_queue_id, Queue, QueueValidationError};
pub use raw::{ExtractedDays, RawDaySchedule, RawInterval, RawScheduleBundle};
pub use refresh::{QueueRefreshState, RefreshPhase, ResolvedSchedule};
pub use reminder::{AlertContent, ReminderJob, ReminderPlan};
pub use settings::*;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use snapshot::{ScheduleSnapshot, SnapshotDiff};
pub use time_of_day::{InvalidTimeOfDay, TimeOfDay};
pub use timeline::{OutageTotal, Timeline};
pub use view::{PowerStatus, ScheduleView, NO_DATA_STATUS};
