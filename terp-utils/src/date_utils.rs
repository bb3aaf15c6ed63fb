use std::fmt::{Display, Formatter};
use thiserror::*;

use time::{Date, Weekday};

#[derive(Debug, Error)]
pub enum TerpDateError {
    #[error("Invalid date: {0}")]
    DateError(#[from] time::error::ComponentRange),
}

/// Weekday with the payroll numbering `monday = 0 … sunday = 6`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}
impl From<DayOfWeek> for Weekday {
    fn from(day_of_week: DayOfWeek) -> Self {
        match day_of_week {
            DayOfWeek::Monday => Self::Monday,
            DayOfWeek::Tuesday => Self::Tuesday,
            DayOfWeek::Wednesday => Self::Wednesday,
            DayOfWeek::Thursday => Self::Thursday,
            DayOfWeek::Friday => Self::Friday,
            DayOfWeek::Saturday => Self::Saturday,
            DayOfWeek::Sunday => Self::Sunday,
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DayOfWeek::Monday => "Monday",
                DayOfWeek::Tuesday => "Tuesday",
                DayOfWeek::Wednesday => "Wednesday",
                DayOfWeek::Thursday => "Thursday",
                DayOfWeek::Friday => "Friday",
                DayOfWeek::Saturday => "Saturday",
                DayOfWeek::Sunday => "Sunday",
            }
        )
    }
}

impl DayOfWeek {
    pub fn to_index(&self) -> u8 {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(DayOfWeek::Monday),
            1 => Some(DayOfWeek::Tuesday),
            2 => Some(DayOfWeek::Wednesday),
            3 => Some(DayOfWeek::Thursday),
            4 => Some(DayOfWeek::Friday),
            5 => Some(DayOfWeek::Saturday),
            6 => Some(DayOfWeek::Sunday),
            _ => None,
        }
    }

    pub fn of(date: Date) -> Self {
        date.weekday().into()
    }
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: Date, to: Date) -> i64 {
    to.to_julian_day() as i64 - from.to_julian_day() as i64
}

/// First and last day of the given calendar month.
pub fn month_bounds(year: i32, month: u8) -> Result<(Date, Date), TerpDateError> {
    let month: time::Month = month.try_into()?;
    let first = Date::from_calendar_date(year, month, 1)?;
    let last = Date::from_calendar_date(
        year,
        month,
        time::util::days_in_month(month, year),
    )?;
    Ok((first, last))
}

/// Inclusive iterator over a calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    next: Option<Date>,
    last: Date,
}

impl DateRange {
    pub fn new(first: Date, last: Date) -> Self {
        Self {
            next: (first <= last).then_some(first),
            last,
        }
    }
}

impl Iterator for DateRange {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let current = self.next?;
        self.next = if current < self.last {
            current.next_day()
        } else {
            None
        };
        Some(current)
    }
}
