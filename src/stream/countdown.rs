use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// How long before the start a reminder fires by default.
pub const DEFAULT_REMINDER_LEAD: TimeDelta = TimeDelta::minutes(10);

/// Time left until a stream starts. Hours are not wrapped into days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Countdown from `now` to `start`, clamped at zero once started.
pub fn countdown(start: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let total = (start - now).num_seconds().max(0) as u64;

    Countdown {
        hours: total / 3600,
        minutes: (total % 3600) / 60,
        seconds: total % 60,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// The reminder instant is not in the future.
    StartingSoon { start: DateTime<Utc> },
}

impl fmt::Display for ReminderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderError::StartingSoon { start } => {
                write!(f, "Event starting soon ({}), too late for a reminder", start)
            }
        }
    }
}

impl std::error::Error for ReminderError {}

/// When to fire a "starts in N minutes" reminder for an event.
pub fn reminder_at(
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    lead: TimeDelta,
) -> Result<DateTime<Utc>, ReminderError> {
    match start.checked_sub_signed(lead) {
        Some(trigger) if trigger > now => Ok(trigger),
        _ => Err(ReminderError::StartingSoon { start }),
    }
}
