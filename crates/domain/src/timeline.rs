use crate::interval::OutageInterval;
use crate::time_of_day::TimeOfDay;
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: usize = 24;

/// Per-hour projection of a day, `true` meaning power is available.
pub type Timeline = [bool; HOURS_PER_DAY];

/// Projects the outage intervals of one day onto whole hours.
///
/// Sub-hour boundaries are rounded down to the containing hour and an
/// interval that ends at or before its start hour is drawn to the end of
/// the day.
pub fn build_timeline(intervals: &[OutageInterval]) -> Timeline {
    let mut timeline = [true; HOURS_PER_DAY];

    for interval in intervals {
        let from_hour = interval.from.hour() as usize;
        let to_hour = interval.to.hour() as usize;
        if from_hour >= HOURS_PER_DAY {
            continue;
        }
        let end_hour = if to_hour <= from_hour {
            HOURS_PER_DAY
        } else {
            std::cmp::min(to_hour, HOURS_PER_DAY)
        };
        for slot in timeline.iter_mut().take(end_hour).skip(from_hour) {
            *slot = false;
        }
    }

    timeline
}

/// The outage `now` falls into. First match wins if intervals overlap.
pub fn current_outage<'a>(
    intervals: &'a [OutageInterval],
    now: &TimeOfDay,
) -> Option<&'a OutageInterval> {
    intervals.iter().find(|i| i.contains(now))
}

/// The earliest outage starting strictly after `now` on the same day.
pub fn next_outage<'a>(
    intervals: &'a [OutageInterval],
    now: &TimeOfDay,
) -> Option<&'a OutageInterval> {
    intervals
        .iter()
        .filter(|i| now.is_before(&i.from))
        .min_by_key(|i| i.from)
}

/// Whether any outage of the day has yet to end at `now`.
pub fn has_upcoming(intervals: &[OutageInterval], now: &TimeOfDay) -> bool {
    intervals
        .iter()
        .any(|i| i.end_minute() > now.minute_of_day())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutageTotal {
    pub hours: u32,
    pub remainder_minutes: u32,
}

pub fn total_outage(intervals: &[OutageInterval]) -> OutageTotal {
    let minutes: u32 = intervals.iter().map(|i| i.duration_minutes()).sum();
    OutageTotal {
        hours: minutes / 60,
        remainder_minutes: minutes % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(from: &str, to: &str) -> OutageInterval {
        OutageInterval::parse(from, to, &format!("{}-{}", from, to)).unwrap()
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn off_hours(timeline: &Timeline) -> Vec<usize> {
        timeline
            .iter()
            .enumerate()
            .filter(|(_, on)| !**on)
            .map(|(hour, _)| hour)
            .collect()
    }

    #[test]
    fn empty_day_has_power_all_day() {
        assert!(build_timeline(&[]).iter().all(|on| *on));
    }

    #[test]
    fn marks_hours_of_an_outage() {
        let timeline = build_timeline(&[interval("13:00", "15:00")]);
        assert_eq!(off_hours(&timeline), vec![13, 14]);
    }

    #[test]
    fn caps_midnight_crossing_outage_at_end_of_day() {
        let timeline = build_timeline(&[interval("22:00", "02:00")]);
        assert_eq!(off_hours(&timeline), vec![22, 23]);
        assert!(timeline[0] && timeline[1]);
    }

    #[test]
    fn rounds_sub_hour_bounds_down() {
        let timeline = build_timeline(&[interval("08:30", "10:15")]);
        assert_eq!(off_hours(&timeline), vec![8, 9]);

        let timeline = build_timeline(&[interval("22:30", "23:00")]);
        assert_eq!(off_hours(&timeline), vec![22]);

        // Start and end in the same hour reads as running to end of day
        let timeline = build_timeline(&[interval("22:10", "22:40")]);
        assert_eq!(off_hours(&timeline), (22..24).collect::<Vec<_>>());
    }

    #[test]
    fn finds_current_and_next_outage() {
        let intervals = vec![interval("10:00", "12:00"), interval("16:00", "18:00")];

        assert_eq!(current_outage(&intervals, &time("09:00")), None);
        assert_eq!(next_outage(&intervals, &time("09:00")), Some(&intervals[0]));

        assert_eq!(current_outage(&intervals, &time("11:00")), Some(&intervals[0]));
        assert_eq!(next_outage(&intervals, &time("11:00")), Some(&intervals[1]));

        assert_eq!(current_outage(&intervals, &time("16:00")), Some(&intervals[1]));
        assert_eq!(next_outage(&intervals, &time("16:00")), None);
    }

    #[test]
    fn next_outage_ignores_input_order() {
        let intervals = vec![interval("20:00", "22:00"), interval("14:00", "15:00")];
        assert_eq!(next_outage(&intervals, &time("08:00")), Some(&intervals[1]));
    }

    #[test]
    fn upcoming_respects_midnight_crossing() {
        let intervals = vec![interval("10:00", "23:00")];
        assert!(has_upcoming(&intervals, &time("22:59")));
        assert!(!has_upcoming(&intervals, &time("23:00")));
        assert!(!has_upcoming(&intervals, &time("23:30")));

        let intervals = vec![interval("22:00", "02:00")];
        assert!(has_upcoming(&intervals, &time("23:30")));
        assert!(!has_upcoming(&[], &time("00:00")));
    }

    #[test]
    fn sums_outage_duration() {
        let intervals = vec![
            interval("10:00", "12:30"),
            interval("22:00", "02:00"),
            interval("14:15", "15:00"),
        ];
        assert_eq!(
            total_outage(&intervals),
            OutageTotal {
                hours: 7,
                remainder_minutes: 15
            }
        );
    }
}
