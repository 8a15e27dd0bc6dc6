use chrono::{Local, NaiveDate, NaiveDateTime};
use power_schedule_domain::TimeOfDay;
use std::sync::Mutex;

// Mocking out time so that it is possible to run tests that depend on time.
// Every "now" of a refresh cycle is read from here.
pub trait ISys: Send + Sync {
    /// The current local wall-clock time
    fn get_local_datetime(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.get_local_datetime().date()
    }

    fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from(self.get_local_datetime().time())
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_local_datetime(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// System with a settable clock, used by tests
pub struct StaticTimeSys {
    now: Mutex<NaiveDateTime>,
}

impl StaticTimeSys {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }
}

impl ISys for StaticTimeSys {
    fn get_local_datetime(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}
