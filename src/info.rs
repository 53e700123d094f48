use std::sync::LazyLock;

use chrono::{Datelike, Duration, Local, NaiveDate};
use regex::Regex;

use crate::error::{Error, Result};

pub mod models;

use models::{Head, WeekMap};

/// Months as written in a russian date, i.e. "9 сентября 2019"
const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

// d => day | m => month | y => year
static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<d>\d+)\s(?P<m>[а-яё]+)\s(?P<y>\d+)").unwrap());
static RE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Группа\s+(?P<group>.+)").unwrap());
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Read the header block of the timetable
pub fn head(header: &[Vec<String>]) -> Result<Head> {
    // The fields are always at the same place
    let fragments: Vec<&str> = header.iter().flatten().map(String::as_str).collect();
    let field = |i: usize, name| fragments.get(i).ok_or(Error::HeaderFieldMissing(name));

    let date = get_date(field(0, "date")?).ok_or(Error::HeaderFieldMissing("date"))?;
    let week = first_number(field(2, "week")?).ok_or(Error::HeaderFieldMissing("week"))?;
    let group = RE_GROUP
        .captures(field(3, "group")?)
        .and_then(|captures| captures.name("group"))
        .map(|group| group.as_str().trim().to_owned())
        .ok_or(Error::HeaderFieldMissing("group"))?;
    let semester =
        first_number(field(4, "semester")?).ok_or(Error::HeaderFieldMissing("semester"))?;

    log::debug!("Header: group {group}, semester {semester}, week {week} on {date}");

    Ok(Head {
        date,
        week,
        group,
        semester,
    })
}

/// Turn a russian date to a `NaiveDate`
fn get_date(data: &str) -> Option<NaiveDate> {
    let captures = RE_DATE.captures(data)?;

    let day = captures.name("d")?.as_str().parse().ok()?;
    let month = MONTHS
        .iter()
        .position(|month| *month == &captures["m"])
        .and_then(|i| u32::try_from(i + 1).ok())?;
    let year = captures.name("y")?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn first_number(data: &str) -> Option<u32> {
    RE_NUMBER.find(data)?.as_str().parse().ok()
}

/// Monday of each week of the semester, from week 1 to `last_week`.
///
/// The page never tells when the semester started, only which week we are
/// in today, so the weeks are anchored on `today`: week `i` of the semester
/// is the ISO week `iso_week(today) - published_week + i`. Running this on
/// another day shifts the whole semester accordingly.
pub fn weeks(today: NaiveDate, published_week: u32, last_week: u32) -> Result<WeekMap> {
    let current_week = i64::from(today.iso_week().week());
    let offset = current_week - i64::from(published_week);

    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));

    (1..=last_week)
        .map(|week| {
            let iso_week = offset + i64::from(week);
            Duration::try_weeks(iso_week - current_week)
                .and_then(|shift| monday.checked_add_signed(shift))
                .map(|date| (week, date))
                .ok_or(Error::WeekOutOfRange(week))
        })
        .collect()
}

/// Build the weeks of the semester from the current date
pub fn weeks_from_now(head: &Head, last_week: u32) -> Result<WeekMap> {
    let today = Local::now().date_naive();
    if today != head.date {
        log::debug!("Timetable published on {}, today is {today}", head.date);
    }

    weeks(today, head.week, last_week)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::models::Parity;

    fn header() -> Vec<Vec<String>> {
        [
            vec!["Расписание на 9 сентября 2019 г.", "понедельник"],
            vec!["Идёт 1 неделя"],
            vec!["Группа ПМИ-91"],
            vec!["1 семестр"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(String::from).collect())
        .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_head() {
        assert_eq!(
            head(&header()).unwrap(),
            Head {
                date: date(2019, 9, 9),
                week: 1,
                group: "ПМИ-91".into(),
                semester: 1,
            }
        );
    }

    #[test]
    fn missing_head_field() {
        let mut header = header();
        header[2] = vec!["Без группы".into()];
        assert!(matches!(
            head(&header),
            Err(Error::HeaderFieldMissing("group"))
        ));

        header.truncate(3);
        assert!(matches!(
            head(&header),
            Err(Error::HeaderFieldMissing("group"))
        ));

        assert!(matches!(
            head(&[vec!["32 мартобря 2019".into()]]),
            Err(Error::HeaderFieldMissing("date"))
        ));
    }

    #[test]
    fn months() {
        assert_eq!(get_date("1 января 2020"), Some(date(2020, 1, 1)));
        assert_eq!(get_date("31 декабря 2019"), Some(date(2019, 12, 31)));
        assert_eq!(get_date("30 февраля 2019"), None);
    }

    #[test]
    fn anchored_weeks() {
        // 2019-10-02 is in ISO week 40, the week 40 starts on 2019-09-30
        let map = weeks(date(2019, 10, 2), 1, 3).unwrap();

        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![
                (1, date(2019, 9, 30)),
                (2, date(2019, 10, 7)),
                (3, date(2019, 10, 14)),
            ]
        );
    }

    #[test]
    fn weeks_across_years() {
        // Week 16 of the semester on 2019-12-18 (ISO week 51)
        let map = weeks(date(2019, 12, 18), 16, 18).unwrap();

        assert_eq!(map.get(1), Some(date(2019, 9, 2)));
        assert_eq!(map.get(16), Some(date(2019, 12, 16)));
        assert_eq!(map.get(18), Some(date(2019, 12, 30)));
    }

    #[test]
    fn parity_partition() {
        for last_week in [1, 2, 17, 18] {
            let map = weeks(date(2019, 10, 2), 5, last_week).unwrap();
            let even = map.with_parity(Parity::Even);
            let odd = map.with_parity(Parity::Odd);

            assert_eq!(even.len() + odd.len(), map.len());
            assert_eq!(map.len(), last_week as usize);
            assert!(even.iter().all(|(week, _)| week % 2 == 0 && odd.get(week).is_none()));
            assert!((1..=last_week).all(|week| even.get(week).or(odd.get(week)).is_some()));
        }
    }

    #[test]
    fn unreachable_weeks() {
        let mut header = header();
        header[1] = vec!["Идёт 20000000 неделя".into()];
        let head = head(&header).unwrap();
        assert_eq!(head.week, 20_000_000);

        assert!(matches!(
            weeks(date(2019, 10, 2), head.week, 18),
            Err(Error::WeekOutOfRange(1))
        ));
    }
}
