use thiserror::Error;

/// Everything that can stop a run
#[derive(Debug, Error)]
pub enum Error {
    /// A fragment matches none of the known cell shapes
    #[error("Unrecognized field: {0:?}")]
    FieldNotRecognized(String),

    /// A lesson row without a course name
    #[error("Course name not found in row {0:?}")]
    CourseNameNotFound(Vec<String>),

    /// A lesson row before any weekday marker
    #[error("Weekday not found for row {0:?}")]
    WeekdayNotFound(Vec<String>),

    /// A lesson row without time and nothing to carry over
    #[error("Time range not found for row {0:?}")]
    TimeRangeNotFound(Vec<String>),

    /// The weeks of the semester fall outside of the calendar
    #[error("Week {0} of the semester can't be placed on the calendar")]
    WeekOutOfRange(u32),

    /// One of the header fields is missing or unreadable
    #[error("Header field missing: {0}")]
    HeaderFieldMissing(&'static str),

    /// The page has no usable timetable
    #[error("URL: {0} • no timetable found")]
    EmptyTimetable(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
