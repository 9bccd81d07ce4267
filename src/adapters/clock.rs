//! System clock adapter.
//!
//! Production [`ClockPort`] backed by the OS clock. Tests inject fixed
//! clocks instead so timer lines are deterministic.

use chrono::{DateTime, Local, Utc};

use crate::app::ports::ClockPort;

#[derive(Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn epoch_secs(&self) -> i64 {
        Utc::now().timestamp()
    }

    fn local_now(&self) -> DateTime<Local> {
        Local::now()
    }
}
