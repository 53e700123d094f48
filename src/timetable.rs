use std::collections::BTreeSet;

use chrono::Duration;
use scraper::{ElementRef, Html, Selector};

use crate::{
    error::{Error, Result},
    filter,
    info::models::WeekMap,
    utils::{self, models::Position},
};

pub mod classifier;
pub mod models;

use classifier::Field;
use models::{CalendarEvent, Expansion, Lesson, Parity, TimeRange, Weekday};

/// Rows of a table, each as its list of fragments
pub type Rows = Vec<Vec<String>>;

/// Number of rows of the header block
const HEAD_SIZE: usize = 4;

/// Shown instead of the lessons when the group has no timetable
const NO_TIMETABLE: &str = "Расписание не найдено";

/// Fetch the timetable page, split into the header block and the data rows
pub async fn timetable(url: &str, user_agent: &str) -> Result<(Rows, Rows)> {
    let document = utils::get_webpage(url, user_agent).await?;

    split_rows(url, rows(&document))
}

/// Split the rows into the header block and the data rows
fn split_rows(url: &str, mut rows: Rows) -> Result<(Rows, Rows)> {
    let no_timetable = rows
        .iter()
        .flatten()
        .any(|fragment| fragment.contains(NO_TIMETABLE));

    // Header, then the columns' titles, then the lessons
    if no_timetable || rows.len() <= HEAD_SIZE {
        return Err(Error::EmptyTimetable(url.to_owned()));
    }
    let data = rows.split_off(HEAD_SIZE + 1);
    rows.truncate(HEAD_SIZE);

    Ok((rows, data))
}

/// Fragments of every row of the first table of the document
fn rows(document: &Html) -> Rows {
    // Selectors
    let sel_table = Selector::parse("table").unwrap();
    let sel_tr = Selector::parse("tr").unwrap();

    let Some(raw_timetable) = document.select(&sel_table).next() else {
        return vec![];
    };

    raw_timetable
        .select(&sel_tr)
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .flat_map(|cell| utils::split_fragments(&cell.text().collect::<String>()))
                .collect()
        })
        .collect()
}

/// What the previous rows tell about the current one
#[derive(Clone, Copy, Debug, Default)]
struct Context {
    weekday: Option<Weekday>,
    /// Time of the previous row, usable once by a row without time
    time: Option<TimeRange>,
}

/// Build the lessons from the data rows
pub fn lessons(data: &[Vec<String>]) -> Result<Vec<Lesson>> {
    let mut context = Context::default();
    let mut lessons = vec![];

    for row in data {
        let (next, lesson) = read_row(context, row)?;
        context = next;
        lessons.extend(lesson);
    }

    log::info!("{} lessons found", lessons.len());

    Ok(lessons)
}

/// Read one row, returns the context for the next row and the lesson if any
fn read_row(context: Context, row: &[String]) -> Result<(Context, Option<Lesson>)> {
    match row {
        [] => return Ok((context, None)),
        [single] => {
            // New day
            if let Some(weekday) = Weekday::from_name(single) {
                let context = Context {
                    weekday: Some(weekday),
                    time: None,
                };
                return Ok((context, None));
            }

            log::debug!("Skipping row without lesson: {single:?}");
            return Ok((context, None));
        }
        _ => (),
    }

    let weekday = context
        .weekday
        .ok_or_else(|| Error::WeekdayNotFound(row.to_vec()))?;

    let mut time = None;
    let mut parity = Parity::None;
    let mut name = None;
    let mut weeks = BTreeSet::new();
    let mut lecturers = vec![];
    let mut rooms = vec![];
    let mut subgroup = None;

    for fragment in row {
        match classifier::classify(fragment)? {
            Field::Time(range) => time = Some(range),
            Field::Parity(p) => parity = p,
            Field::Lecturer(lecturer) => lecturers.push(lecturer),
            Field::Rooms(mut found) => rooms.append(&mut found),
            Field::Weeks(w) => weeks = w,
            Field::Subgroup(n) => subgroup = Some(n),
            Field::Name(n) => name = Some(n),
        }
    }

    // The time cell can span over two rows, the second one has no time
    let (time, carry) = match (time, context.time) {
        (Some(time), _) => (time, Some(time)),
        (None, Some(previous)) => {
            log::debug!("Reusing time {previous} for row {row:?}");
            (previous, None)
        }
        (None, None) => return Err(Error::TimeRangeNotFound(row.to_vec())),
    };

    let name = name.ok_or_else(|| Error::CourseNameNotFound(row.to_vec()))?;

    let context = Context {
        weekday: Some(weekday),
        time: carry,
    };
    let lesson = Lesson {
        weekday,
        time,
        parity,
        name,
        weeks,
        lecturers,
        rooms,
        subgroup,
    };

    Ok((context, Some(lesson)))
}

/// Place a lesson on each of its weeks
pub fn expand(lesson: &Lesson, weeks: &WeekMap, subgroup: Option<u32>) -> Expansion {
    if !filter::subgroup_matches(lesson.subgroup, subgroup) {
        return Expansion::FilteredOut;
    }

    // Explicit weeks first, then parity, else every week
    let selected: WeekMap = if lesson.weeks.is_empty() {
        weeks.with_parity(lesson.parity)
    } else {
        lesson
            .weeks
            .iter()
            .filter_map(|&week| {
                let monday = weeks.get(week);
                if monday.is_none() {
                    log::warn!("{}: week {week} is after the last week", lesson.name);
                }
                monday.map(|monday| (week, monday))
            })
            .collect()
    };

    let events = selected
        .iter()
        .map(|(_, monday)| {
            let date = monday + Duration::days(lesson.weekday.offset());

            CalendarEvent {
                title: lesson.name.clone(),
                location: lesson.rooms.join(" "),
                description: lesson.lecturers.join(" "),
                start: date.and_time(lesson.time.start),
                end: date.and_time(lesson.time.end),
            }
        })
        .collect();

    Expansion::Events(events)
}

/// Build the events of the whole semester
pub fn build(lessons: &[Lesson], weeks: &WeekMap, subgroup: Option<u32>) -> Vec<CalendarEvent> {
    lessons
        .iter()
        .flat_map(|lesson| match expand(lesson, weeks, subgroup) {
            Expansion::FilteredOut => {
                log::debug!("{} is for subgroup {:?}", lesson.name, lesson.subgroup);
                vec![]
            }
            expansion => expansion.into_events(),
        })
        .collect()
}

/// Display the timetable
pub fn display(lessons: &[Lesson]) {
    let widths = [15, 10, 40, 16, 28];

    utils::line_table(&widths, &Position::Top);
    utils::row_table(
        &widths,
        &["Время", "Недели", "Дисциплина", "Аудитория", "Преподаватель"],
    );

    for day in Weekday::ALL {
        let mut day_lessons = lessons.iter().filter(|lesson| lesson.weekday == day).peekable();
        if day_lessons.peek().is_none() {
            continue;
        }

        utils::line_table(&widths, &Position::Middle);
        utils::row_table(&widths, &[day.name(), "", "", "", ""]);

        for lesson in day_lessons {
            let weeks = if lesson.weeks.is_empty() {
                match lesson.parity {
                    Parity::None => String::new(),
                    Parity::Even => "Ч".to_owned(),
                    Parity::Odd => "Н".to_owned(),
                }
            } else {
                lesson
                    .weeks
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            };
            let name = match lesson.subgroup {
                Some(n) => format!("{} ({n} п.гр.)", lesson.name),
                None => lesson.name.clone(),
            };

            let time = lesson.time.to_string();
            let rooms = lesson.rooms.join(" ");
            let lecturers = lesson.lecturers.join(", ");

            utils::row_table(&widths, &[&time, &weeks, &name, &rooms, &lecturers]);
        }
    }

    utils::line_table(&widths, &Position::Bottom);
}
