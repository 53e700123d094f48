use std::{collections::BTreeSet, fmt};

use chrono::{NaiveDateTime, NaiveTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Every weekday of the timetable, starting on monday
    pub const ALL: [Self; 6] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Name as written in the timetable
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Понедельник",
            Self::Tuesday => "Вторник",
            Self::Wednesday => "Среда",
            Self::Thursday => "Четверг",
            Self::Friday => "Пятница",
            Self::Saturday => "Суббота",
        }
    }

    /// Find the weekday from its name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.name() == name)
    }

    /// Days since monday
    pub fn offset(self) -> i64 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
        }
    }
}

/// Which weeks of the semester a lesson follows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub weekday: Weekday,

    /// Start and end of the lesson, carried from the previous row when the
    /// time cell spans two rows
    pub time: TimeRange,

    pub parity: Parity,

    /// Course's name
    pub name: String,

    /// Weeks the lesson happens, takes precedence over the parity when
    /// not empty
    pub weeks: BTreeSet<u32>,

    /// Professors' names
    pub lecturers: Vec<String>,

    /// List of rooms where the course takes place
    pub rooms: Vec<String>,

    pub subgroup: Option<u32>,
}

/// A lesson placed on the calendar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub location: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Outcome of expanding one lesson
#[derive(Debug, PartialEq, Eq)]
pub enum Expansion {
    Events(Vec<CalendarEvent>),
    /// The lesson belongs to another subgroup
    FilteredOut,
}

impl Expansion {
    pub fn into_events(self) -> Vec<CalendarEvent> {
        match self {
            Self::Events(events) => events,
            Self::FilteredOut => vec![],
        }
    }
}
