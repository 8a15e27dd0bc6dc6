use crate::day::{DayLabel, DaySchedule};
use crate::interval::OutageInterval;
use crate::time_of_day::TimeOfDay;
use crate::timeline::OutageTotal;
use serde::{Deserialize, Serialize};

pub const NO_DATA_STATUS: &str = "Даних немає";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerStatus {
    pub is_power_on: bool,
    pub status_text: String,
}

impl PowerStatus {
    pub fn no_data() -> Self {
        Self {
            is_power_on: true,
            status_text: NO_DATA_STATUS.into(),
        }
    }
}

/// Display facts of one day of a queue's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub day: DayLabel,
    pub date: String,
    pub published_at: String,
    pub approved_since: String,
    pub intervals: Vec<OutageInterval>,
    pub timeline: Vec<bool>,
    pub total_outage: OutageTotal,
    pub current_outage: Option<OutageInterval>,
    pub next_outage: Option<OutageInterval>,
    pub status: PowerStatus,
    pub available_days: Vec<DayLabel>,
}

impl ScheduleView {
    pub fn new(
        day: DayLabel,
        schedule: &DaySchedule,
        available_days: Vec<DayLabel>,
        now: &TimeOfDay,
    ) -> Self {
        let (current_outage, next_outage) = match day {
            DayLabel::Today => (
                schedule.current_outage(now).cloned(),
                schedule.next_outage(now).cloned(),
            ),
            DayLabel::Tomorrow => (None, schedule.intervals.iter().min_by_key(|i| i.from).cloned()),
            DayLabel::Yesterday => (None, None),
        };
        let status = power_status(day, current_outage.as_ref(), next_outage.as_ref());

        Self {
            day,
            date: schedule.date.clone(),
            published_at: schedule.published_at.clone(),
            approved_since: schedule.approved_since.clone(),
            intervals: schedule.intervals.clone(),
            timeline: schedule.timeline().to_vec(),
            total_outage: schedule.total_outage(),
            current_outage,
            next_outage,
            status,
            available_days,
        }
    }
}

fn power_status(
    day: DayLabel,
    current: Option<&OutageInterval>,
    next: Option<&OutageInterval>,
) -> PowerStatus {
    match (day, current, next) {
        (DayLabel::Today, Some(current), _) => PowerStatus {
            is_power_on: false,
            status_text: format!("Увімкнуть о {}", current.to),
        },
        (DayLabel::Today, None, Some(next)) => PowerStatus {
            is_power_on: true,
            status_text: format!("Відключення о {}", next.from),
        },
        (DayLabel::Today, None, None) => PowerStatus {
            is_power_on: true,
            status_text: "Сьогодні відключень більше немає".into(),
        },
        (DayLabel::Tomorrow, _, Some(first)) => PowerStatus {
            is_power_on: true,
            status_text: format!("Завтра відключення о {}", first.from),
        },
        (DayLabel::Tomorrow, _, None) => PowerStatus {
            is_power_on: true,
            status_text: "Завтра відключень немає".into(),
        },
        (DayLabel::Yesterday, _, _) => PowerStatus {
            is_power_on: true,
            status_text: "Показано графік за вчора".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(intervals: &[(&str, &str)]) -> DaySchedule {
        DaySchedule {
            date: "10.12.2025".into(),
            published_at: "09.12.2025 21:14".into(),
            approved_since: "09.12.2025 21:00".into(),
            intervals: intervals
                .iter()
                .map(|(from, to)| OutageInterval::parse(from, to, &format!("{}-{}", from, to)).unwrap())
                .collect(),
        }
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn today_before_an_outage() {
        let view = ScheduleView::new(
            DayLabel::Today,
            &schedule(&[("10:00", "12:00")]),
            vec![DayLabel::Today],
            &time("09:00"),
        );
        assert_eq!(view.current_outage, None);
        assert_eq!(view.next_outage.as_ref().map(|i| i.from), Some(time("10:00")));
        assert!(view.status.is_power_on);
        assert_eq!(view.status.status_text, "Відключення о 10:00");
        assert_eq!(view.timeline.len(), 24);
        assert!(!view.timeline[10] && !view.timeline[11] && view.timeline[12]);
        assert_eq!(
            view.total_outage,
            OutageTotal {
                hours: 2,
                remainder_minutes: 0
            }
        );
    }

    #[test]
    fn today_during_an_outage() {
        let view = ScheduleView::new(
            DayLabel::Today,
            &schedule(&[("10:00", "12:00")]),
            vec![DayLabel::Today],
            &time("10:30"),
        );
        assert!(!view.status.is_power_on);
        assert_eq!(view.status.status_text, "Увімкнуть о 12:00");
    }

    #[test]
    fn today_after_all_outages() {
        let view = ScheduleView::new(
            DayLabel::Today,
            &schedule(&[("10:00", "12:00")]),
            vec![DayLabel::Today],
            &time("13:00"),
        );
        assert_eq!(view.status.status_text, "Сьогодні відключень більше немає");
    }

    #[test]
    fn tomorrow_reports_first_outage() {
        let view = ScheduleView::new(
            DayLabel::Tomorrow,
            &schedule(&[("16:00", "18:00"), ("06:00", "08:00")]),
            vec![DayLabel::Today, DayLabel::Tomorrow],
            &time("23:30"),
        );
        assert_eq!(view.current_outage, None);
        assert_eq!(view.status.status_text, "Завтра відключення о 06:00");

        let view = ScheduleView::new(DayLabel::Tomorrow, &schedule(&[]), vec![], &time("23:30"));
        assert_eq!(view.status.status_text, "Завтра відключень немає");
    }
}
