use crate::day::{parse_date, DayLabel, DaySchedule, ScheduleDays};
use crate::interval::{self, OutageInterval};
use crate::time_of_day::InvalidTimeOfDay;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outage window as published, before its bounds are parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInterval {
    pub from: String,
    pub to: String,
    pub shutdown_hours: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDaySchedule {
    pub event_date: String,
    pub created_at: String,
    pub schedule_approved_since: String,
    pub queues: BTreeMap<String, Vec<RawInterval>>,
}

/// Result of one fetch: published days, each mapping queue ids to outages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawScheduleBundle {
    pub days: Vec<RawDaySchedule>,
}

/// Schedules of one queue around a day, plus the intervals that had to be
/// dropped because their bounds could not be parsed.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDays {
    pub days: ScheduleDays,
    /// Every day published for the queue, in date order
    pub published: Vec<DaySchedule>,
    pub skipped: Vec<InvalidTimeOfDay>,
}

impl RawScheduleBundle {
    pub fn new(days: Vec<RawDaySchedule>) -> Self {
        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether any published day lists the queue
    pub fn contains_queue(&self, queue_id: &str) -> bool {
        self.days.iter().any(|d| d.queues.contains_key(queue_id))
    }

    /// First entry published for `date` that lists `queue_id`
    fn find_day(
        &self,
        queue_id: &str,
        date: NaiveDate,
    ) -> Option<(&RawDaySchedule, &[RawInterval])> {
        self.days
            .iter()
            .filter(|d| parse_date(&d.event_date) == Some(date))
            .find_map(|d| {
                d.queues
                    .get(queue_id)
                    .map(|intervals| (d, intervals.as_slice()))
            })
    }

    /// Picks yesterday's, today's and tomorrow's schedule of `queue_id`.
    /// Days with an unreadable date are ignored. If a date is published
    /// twice the first occurrence listing the queue wins.
    pub fn extract_days(&self, queue_id: &str, today: NaiveDate) -> ExtractedDays {
        let mut extracted = ExtractedDays {
            published: self.queue_days(queue_id),
            ..Default::default()
        };

        for label in &[DayLabel::Yesterday, DayLabel::Today, DayLabel::Tomorrow] {
            let date = today + Duration::days(label.offset());
            let (raw_day, raw_intervals) = match self.find_day(queue_id, date) {
                Some(found) => found,
                None => continue,
            };

            let (schedule, mut skipped) = raw_day.to_day_schedule(raw_intervals);
            extracted.skipped.append(&mut skipped);
            match label {
                DayLabel::Yesterday => extracted.days.yesterday = Some(schedule),
                DayLabel::Today => extracted.days.today = Some(schedule),
                DayLabel::Tomorrow => extracted.days.tomorrow = Some(schedule),
            }
        }

        extracted
    }

    /// Every published day that lists `queue_id`, ordered by date. Does not
    /// depend on the current day, so equal payloads give equal results.
    pub fn queue_days(&self, queue_id: &str) -> Vec<DaySchedule> {
        let mut days = BTreeMap::new();
        for raw_day in &self.days {
            if let (Some(date), Some(intervals)) =
                (parse_date(&raw_day.event_date), raw_day.queues.get(queue_id))
            {
                days.entry(date)
                    .or_insert_with(|| raw_day.to_day_schedule(intervals).0);
            }
        }
        days.into_iter().map(|(_, day)| day).collect()
    }
}

impl RawDaySchedule {
    fn to_day_schedule(&self, raw_intervals: &[RawInterval]) -> (DaySchedule, Vec<InvalidTimeOfDay>) {
        let mut skipped = Vec::new();
        let mut intervals = Vec::with_capacity(raw_intervals.len());
        for raw in raw_intervals {
            match OutageInterval::parse(&raw.from, &raw.to, &raw.shutdown_hours) {
                Ok(interval) => intervals.push(interval),
                Err(e) => skipped.push(e),
            }
        }
        interval::sort_by_start(&mut intervals);

        let schedule = DaySchedule {
            date: self.event_date.clone(),
            published_at: self.created_at.clone(),
            approved_since: self.schedule_approved_since.clone(),
            intervals,
        };
        (schedule, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {
            "eventDate": "10.12.2025",
            "createdAt": "09.12.2025 21:14",
            "scheduleApprovedSince": "09.12.2025 21:00",
            "queues": {
                "5.2": [
                    { "from": "16:00", "to": "18:00", "shutdownHours": "16:00-18:00" },
                    { "from": "xx:00", "to": "09:00", "shutdownHours": "broken" },
                    { "from": "06:00", "to": "08:30", "shutdownHours": "06:00-08:30" }
                ],
                "1.1": []
            }
        },
        {
            "eventDate": "11.12.2025",
            "createdAt": "10.12.2025 20:02",
            "scheduleApprovedSince": "10.12.2025 20:00",
            "queues": {
                "5.2": [
                    { "from": "22:00", "to": "00:00", "shutdownHours": "22:00-24:00" }
                ]
            }
        }
    ]"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
    }

    #[test]
    fn decodes_published_payload() {
        let bundle: RawScheduleBundle = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(bundle.days.len(), 2);
        assert!(bundle.contains_queue("5.2"));
        assert!(bundle.contains_queue("1.1"));
        assert!(!bundle.contains_queue("3.1"));
    }

    #[test]
    fn extracts_queue_days_and_skips_malformed_intervals() {
        let bundle: RawScheduleBundle = serde_json::from_str(PAYLOAD).unwrap();
        let extracted = bundle.extract_days("5.2", today());

        assert!(extracted.days.yesterday.is_none());
        let today = extracted.days.today.unwrap();
        assert_eq!(today.published_at, "09.12.2025 21:14");
        assert_eq!(
            today
                .intervals
                .iter()
                .map(|i| i.label.as_str())
                .collect::<Vec<_>>(),
            vec!["06:00-08:30", "16:00-18:00"]
        );
        assert_eq!(extracted.skipped.len(), 1);

        let tomorrow = extracted.days.tomorrow.unwrap();
        assert_eq!(tomorrow.intervals.len(), 1);
        assert!(tomorrow.intervals[0].crosses_midnight());
    }

    #[test]
    fn queue_with_empty_list_still_has_a_day() {
        let bundle: RawScheduleBundle = serde_json::from_str(PAYLOAD).unwrap();
        let extracted = bundle.extract_days("1.1", today());
        assert_eq!(extracted.days.today.map(|d| d.intervals.len()), Some(0));
        assert!(extracted.days.tomorrow.is_none());
    }

    #[test]
    fn shifts_with_the_current_day() {
        let bundle: RawScheduleBundle = serde_json::from_str(PAYLOAD).unwrap();
        let next_day = today().succ_opt().unwrap();
        let extracted = bundle.extract_days("5.2", next_day);
        assert_eq!(
            extracted.days.yesterday.map(|d| d.date),
            Some("10.12.2025".to_string())
        );
        assert_eq!(
            extracted.days.today.map(|d| d.date),
            Some("11.12.2025".to_string())
        );
        assert!(extracted.days.tomorrow.is_none());
    }

    #[test]
    fn same_date_published_per_queue() {
        let day = |queue_id: &str, from: &str| RawDaySchedule {
            event_date: "10.12.2025".into(),
            created_at: "09.12.2025 21:14".into(),
            schedule_approved_since: "09.12.2025 21:00".into(),
            queues: vec![(
                queue_id.to_string(),
                vec![RawInterval {
                    from: from.into(),
                    to: "23:00".into(),
                    shutdown_hours: String::new(),
                }],
            )]
            .into_iter()
            .collect(),
        };
        let bundle = RawScheduleBundle::new(vec![
            day("5.2", "10:00"),
            day("1.1", "14:00"),
            day("1.1", "20:00"),
        ]);

        let extracted = bundle.extract_days("1.1", today());
        let today = extracted.days.today.unwrap();
        assert_eq!(today.intervals[0].from.to_string(), "14:00");
        assert_eq!(extracted.published.len(), 1);
        assert_eq!(extracted.published[0], today);
    }

    #[test]
    fn published_days_do_not_depend_on_the_current_day() {
        let bundle: RawScheduleBundle = serde_json::from_str(PAYLOAD).unwrap();
        let published = bundle.queue_days("5.2");
        assert_eq!(
            published.iter().map(|d| d.date.as_str()).collect::<Vec<_>>(),
            vec!["10.12.2025", "11.12.2025"]
        );

        let later = today() + Duration::days(5);
        assert_eq!(bundle.extract_days("5.2", later).published, published);
        assert!(bundle.extract_days("5.2", later).days.is_empty());
    }
}
