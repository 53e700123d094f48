use std::{collections::BTreeSet, sync::LazyLock};

use chrono::NaiveTime;
use regex::Regex;

use crate::error::{Error, Result};

use super::models::{Parity, TimeRange};

/// What a fragment of a timetable cell is about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Time(TimeRange),
    Parity(Parity),
    Lecturer(String),
    Rooms(Vec<String>),
    Weeks(BTreeSet<u32>),
    Subgroup(u32),
    Name(String),
}

type Matcher = fn(&str) -> Option<Field>;

/// Matchers by priority, the first one to match wins.
/// The course name accepts almost anything so it stays last.
const MATCHERS: [Matcher; 7] = [time, parity, lecturer, rooms, weeks, subgroup, name];

// h1 => start hour | m1 => start minute
// h2 => end hour   | m2 => end minute
static RE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<h1>\d{1,2}):(?P<m1>\d{2})\s*-\s*(?P<h2>\d{1,2}):(?P<m2>\d{2})$").unwrap()
});
static RE_LECTURER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[А-ЯЁ][а-яё]+(-[А-ЯЁ][а-яё]+)?\s[А-ЯЁ]\.(\s?[А-ЯЁ]\.)*$").unwrap()
});
static RE_ROOM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+[а-яё]*-\d+[а-яё]*").unwrap());
static RE_ROOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+[а-яё]*-\d+[а-яё]*\s?)+$").unwrap());
static RE_FACILITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[а-яё\s]+$").unwrap());
static RE_WEEKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^нед\.:[\s\d,]+$").unwrap());
static RE_SUBGROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<n>\d+) п\.гр\.$").unwrap());
static RE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{Lu}.*$").unwrap());
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Find what the fragment is
pub fn classify(fragment: &str) -> Result<Field> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(fragment))
        .ok_or_else(|| Error::FieldNotRecognized(fragment.to_owned()))
}

/// Parse `HH:MM - HH:MM`
pub fn parse_time_range(fragment: &str) -> Option<TimeRange> {
    let captures = RE_TIME.captures(fragment)?;
    let number = |group: &str| captures.name(group)?.as_str().parse::<u32>().ok();

    Some(TimeRange {
        start: NaiveTime::from_hms_opt(number("h1")?, number("m1")?, 0)?,
        end: NaiveTime::from_hms_opt(number("h2")?, number("m2")?, 0)?,
    })
}

fn time(fragment: &str) -> Option<Field> {
    parse_time_range(fragment).map(Field::Time)
}

/// Ч => even weeks | Н => odd weeks
fn parity(fragment: &str) -> Option<Field> {
    match fragment {
        "Ч" => Some(Field::Parity(Parity::Even)),
        "Н" => Some(Field::Parity(Parity::Odd)),
        _ => None,
    }
}

fn lecturer(fragment: &str) -> Option<Field> {
    RE_LECTURER
        .is_match(fragment)
        .then(|| Field::Lecturer(fragment.to_owned()))
}

fn rooms(fragment: &str) -> Option<Field> {
    if RE_ROOMS.is_match(fragment) {
        Some(Field::Rooms(
            RE_ROOM
                .find_iter(fragment)
                .map(|room| room.as_str().to_owned())
                .collect(),
        ))
    } else if RE_FACILITY.is_match(fragment) {
        // Gym, stadium, etc.
        Some(Field::Rooms(vec![fragment.to_owned()]))
    } else {
        None
    }
}

fn weeks(fragment: &str) -> Option<Field> {
    if !RE_WEEKS.is_match(fragment) {
        return None;
    }

    let weeks: BTreeSet<u32> = RE_NUMBER
        .find_iter(fragment)
        .filter_map(|week| week.as_str().parse().ok())
        .collect();

    (!weeks.is_empty()).then_some(Field::Weeks(weeks))
}

fn subgroup(fragment: &str) -> Option<Field> {
    RE_SUBGROUP
        .captures(fragment)?
        .name("n")?
        .as_str()
        .parse()
        .ok()
        .map(Field::Subgroup)
}

fn name(fragment: &str) -> Option<Field> {
    RE_NAME
        .is_match(fragment)
        .then(|| Field::Name(fragment.to_owned()))
}
