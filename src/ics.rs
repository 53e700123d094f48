use chrono::{NaiveDateTime, Utc};
use ics::{
    escape_text,
    parameters::TzIDParam,
    properties::{Description, DtEnd, DtStart, Location, Summary},
    components::Property,
    Event, ICalendar,
};

use crate::{error::Result, info::models::Head, timetable::models::CalendarEvent};

/// Timezone of the university
const TZ: &str = "Asia/Novosibirsk";

/// Export the events to an iCalendar file
pub fn export(
    events: &[CalendarEvent],
    head: &Head,
    filename: &mut String,
    with_tz: bool,
) -> Result<()> {
    let mut calendar = ICalendar::new("2.0", "-//nstu2ics//RU");
    calendar.push(Property::new(
        "X-WR-CALNAME",
        format!("{}, {} семестр", head.group, head.semester),
    ));
    if with_tz {
        calendar.push(Property::new("X-WR-TIMEZONE", TZ));
    }

    // Add .ics extension if not already there
    if !std::path::Path::new(filename.as_str())
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ics"))
    {
        filename.push_str(".ics");
    }

    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ev = Event::new(uuid::Uuid::new_v4().to_string(), dtstamp.clone());

        let mut start = DtStart::new(datetime(event.start));
        let mut end = DtEnd::new(datetime(event.end));
        if with_tz {
            start.add(TzIDParam::new(TZ));
            end.add(TzIDParam::new(TZ));
        }
        ev.push(start);
        ev.push(end);

        ev.push(Summary::new(escape_text(event.title.clone())));
        if !event.location.is_empty() {
            ev.push(Location::new(escape_text(event.location.clone())));
        }
        if !event.description.is_empty() {
            ev.push(Description::new(escape_text(event.description.clone())));
        }

        calendar.add_event(ev);
    }

    calendar.save_file(filename.as_str())?;
    log::info!("{} events written to {filename}", events.len());

    Ok(())
}

/// Local time, without the `Z` suffix
fn datetime(date: NaiveDateTime) -> String {
    date.format("%Y%m%dT%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn local_datetime() {
        let date = NaiveDate::from_ymd_opt(2019, 9, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        assert_eq!(datetime(date), "20190930T090000");
    }

    #[test]
    fn export_file() {
        let head = Head {
            date: NaiveDate::from_ymd_opt(2019, 9, 9).unwrap(),
            week: 1,
            group: "ПМИ-91".into(),
            semester: 1,
        };
        let day = NaiveDate::from_ymd_opt(2019, 9, 30).unwrap();
        let event = CalendarEvent {
            title: "Алгебра".into(),
            location: "7-313".into(),
            description: String::new(),
            start: day.and_hms_opt(9, 0, 0).unwrap(),
            end: day.and_hms_opt(10, 30, 0).unwrap(),
        };

        let path = std::env::temp_dir().join(format!("nstu2ics-{}", uuid::Uuid::new_v4()));
        let mut filename = path.to_string_lossy().into_owned();
        export(&[event], &head, &mut filename, true).unwrap();
        assert!(filename.ends_with(".ics"));

        let content = std::fs::read_to_string(&filename).unwrap();
        std::fs::remove_file(&filename).unwrap();

        assert!(content.contains("X-WR-CALNAME:ПМИ-91, 1 семестр"));
        assert!(content.contains("DTSTART;TZID=Asia/Novosibirsk:20190930T090000"));
        assert!(content.contains("LOCATION:7-313"));
        assert!(!content.contains("DESCRIPTION"));
    }
}
