//! System clock adapter

use chrono::{DateTime, Utc};
use gatherly_application::Clock;

/// Wall-clock time source for production wiring
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
