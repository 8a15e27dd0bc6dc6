use crate::day::{DayLabel, DaySchedule, ScheduleDays};
use crate::time_of_day::TimeOfDay;

/// The day chosen for display together with the days the user may page to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDay {
    pub label: DayLabel,
    pub schedule: DaySchedule,
    pub available_days: Vec<DayLabel>,
}

/// Picks the day to surface at `now`, in priority order:
/// today while it still has outages to come, then tomorrow, then today
/// even if its outages are over, then yesterday.
///
/// Returns `None` when no day has data.
pub fn resolve_day(days: &ScheduleDays, now: &TimeOfDay) -> Option<ResolvedDay> {
    let label = select_day(days, now)?;
    let schedule = days.get(label)?.clone();

    Some(ResolvedDay {
        label,
        schedule,
        available_days: available_days(days),
    })
}

fn select_day(days: &ScheduleDays, now: &TimeOfDay) -> Option<DayLabel> {
    match (&days.yesterday, &days.today, &days.tomorrow) {
        (_, Some(today), _) if today.has_upcoming(now) => Some(DayLabel::Today),
        (_, _, Some(_)) => Some(DayLabel::Tomorrow),
        (_, Some(_), _) => Some(DayLabel::Today),
        (Some(_), _, _) => Some(DayLabel::Yesterday),
        _ => None,
    }
}

/// Yesterday is only worth paging to if it had outages.
pub fn available_days(days: &ScheduleDays) -> Vec<DayLabel> {
    let mut labels = Vec::with_capacity(3);
    if let Some(yesterday) = &days.yesterday {
        if !yesterday.intervals.is_empty() {
            labels.push(DayLabel::Yesterday);
        }
    }
    if days.today.is_some() {
        labels.push(DayLabel::Today);
    }
    if days.tomorrow.is_some() {
        labels.push(DayLabel::Tomorrow);
    }
    labels
}
