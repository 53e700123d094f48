use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::timetable::models::Parity;

/// Information published above the timetable
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Head {
    /// Day the page was generated
    pub date: NaiveDate,
    /// Week of the semester at `date`
    pub week: u32,
    pub group: String,
    pub semester: u32,
}

/// Monday of each week of the semester, by week number
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeekMap(BTreeMap<u32, NaiveDate>);

impl WeekMap {
    pub fn get(&self, week: u32) -> Option<NaiveDate> {
        self.0.get(&week).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, NaiveDate)> + '_ {
        self.0.iter().map(|(week, monday)| (*week, *monday))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Only keep the weeks matching the parity, `Parity::None` keeps everything
    pub fn with_parity(&self, parity: Parity) -> Self {
        let keep = |week: u32| match parity {
            Parity::None => true,
            Parity::Even => week % 2 == 0,
            Parity::Odd => week % 2 == 1,
        };

        self.iter().filter(|(week, _)| keep(*week)).collect()
    }
}

impl FromIterator<(u32, NaiveDate)> for WeekMap {
    fn from_iter<I: IntoIterator<Item = (u32, NaiveDate)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
