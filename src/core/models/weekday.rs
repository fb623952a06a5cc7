//! Teaching-week days and weekly schedules

use crate::core::error::{RecordsError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A day of the five-day teaching week
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
}

impl Weekday {
    /// All teaching days in calendar order
    pub const ALL: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Full English day name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == lowered || (lowered.len() == 3 && name.starts_with(&lowered))
            })
            .ok_or_else(|| RecordsError::invalid(format!("unknown weekday '{s}'")))
    }
}

/// A course's weekly meetings: at most one time slot per day
pub type WeeklySchedule = BTreeMap<Weekday, String>;
