use std::{collections::BTreeSet, io::IsTerminal};

use dialoguer::Select;

use crate::{error::Result, timetable::models::Lesson};

/// True if the lesson is for the wanted subgroup.
/// Lessons without subgroup are for everyone, as is everything when no
/// subgroup is wanted.
pub fn subgroup_matches(lesson: Option<u32>, wanted: Option<u32>) -> bool {
    match (lesson, wanted) {
        (Some(lesson), Some(wanted)) => lesson == wanted,
        _ => true,
    }
}

/// Lessons of the wanted subgroup
pub fn by_subgroup(lessons: Vec<Lesson>, wanted: Option<u32>) -> Vec<Lesson> {
    lessons
        .into_iter()
        .filter(|lesson| subgroup_matches(lesson.subgroup, wanted))
        .collect()
}

/// Subgroups found in the timetable
pub fn subgroups(lessons: &[Lesson]) -> BTreeSet<u32> {
    lessons.iter().filter_map(|lesson| lesson.subgroup).collect()
}

/// Subgroup to keep, asked to the user when not given and the timetable
/// has some
pub fn subgroup(lessons: &[Lesson], wanted: Option<u32>) -> Result<Option<u32>> {
    if wanted.is_some() {
        return Ok(wanted);
    }

    let found = subgroups(lessons);
    if found.is_empty() || !std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut items = vec!["Все подгруппы".to_owned()];
    items.extend(found.iter().map(|n| format!("{n} п.гр.")));

    let selection = Select::new()
        .with_prompt("Выберите подгруппу")
        .items(&items)
        .default(0)
        .interact()?;

    // First item keeps every subgroup
    Ok(selection
        .checked_sub(1)
        .and_then(|i| found.into_iter().nth(i)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::timetable::models::{Parity, TimeRange, Weekday};

    #[test]
    fn matching() {
        assert!(subgroup_matches(None, None));
        assert!(subgroup_matches(None, Some(1)));
        assert!(subgroup_matches(Some(2), None));
        assert!(subgroup_matches(Some(2), Some(2)));
        assert!(!subgroup_matches(Some(2), Some(1)));
    }

    #[test]
    fn shown_lessons() {
        let lesson = |subgroup| Lesson {
            weekday: Weekday::Monday,
            time: TimeRange {
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            },
            parity: Parity::None,
            name: "Физика".into(),
            weeks: BTreeSet::new(),
            lecturers: vec![],
            rooms: vec![],
            subgroup,
        };
        let lessons = vec![lesson(None), lesson(Some(1)), lesson(Some(2))];

        let kept = by_subgroup(lessons.clone(), Some(2));
        assert_eq!(
            kept.iter().map(|l| l.subgroup).collect::<Vec<_>>(),
            vec![None, Some(2)]
        );
        assert_eq!(by_subgroup(lessons, None).len(), 3);
    }

    #[test]
    fn given_subgroup_is_kept() {
        assert_eq!(subgroup(&[], Some(3)).unwrap(), Some(3));
        assert_eq!(subgroup(&[], None).unwrap(), None);
    }
}
