//! Dates and sleeping

use std::fmt::Write as _;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, Timelike};

use crate::error::{Result, StdlibError};

/// A captured local timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    at: DateTime<Local>,
}

impl Date {
    /// The current local time.
    pub fn now() -> Self {
        Self { at: Local::now() }
    }

    /// Wrap an existing timestamp.
    pub fn from_datetime(at: DateTime<Local>) -> Self {
        Self { at }
    }

    /// Calendar year
    pub fn year(&self) -> i64 {
        i64::from(self.at.year())
    }

    /// Month, 1-12
    pub fn month(&self) -> i64 {
        i64::from(self.at.month())
    }

    /// Day of month, 1-31
    pub fn day(&self) -> i64 {
        i64::from(self.at.day())
    }

    /// Hour, 0-23
    pub fn hour(&self) -> i64 {
        i64::from(self.at.hour())
    }

    /// Minute, 0-59
    pub fn minute(&self) -> i64 {
        i64::from(self.at.minute())
    }

    /// Second, 0-59
    pub fn second(&self) -> i64 {
        i64::from(self.at.second())
    }

    /// Millisecond within the second
    pub fn millisecond(&self) -> i64 {
        i64::from(self.at.nanosecond() / 1_000_000)
    }

    /// Nanosecond within the second
    pub fn nanosecond(&self) -> i64 {
        i64::from(self.at.nanosecond())
    }

    /// Render with a strftime layout such as `%Y-%m-%d`.
    pub fn format(&self, layout: &str) -> Result<String> {
        let items: Vec<Item<'_>> = StrftimeItems::new(layout).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(StdlibError::InvalidArgument(format!(
                "FORMAT: invalid layout '{}'",
                layout
            )));
        }
        let mut out = String::new();
        write!(out, "{}", self.at.format_with_items(items.into_iter()))
            .map_err(|_| StdlibError::InvalidArgument(format!("FORMAT: invalid layout '{}'", layout)))?;
        Ok(out)
    }
}

/// Block the current thread for `seconds`.
pub fn sleep(seconds: f64) -> Result<()> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(StdlibError::InvalidArgument(
            "SLEEP: duration must be non-negative".to_string(),
        ));
    }
    std::thread::sleep(Duration::from_secs_f64(seconds));
    Ok(())
}
