use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use scraper::Html;

use crate::error::Result;

pub mod models;

use models::{Position, BAR_H, BAR_V};

/// Separators used inside the cells: new lines, non-breaking spaces,
/// semicolons and runs of blanks
static RE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\x{a0};]|\s{2,}").unwrap());

/// Get timetable webpage
pub async fn get_webpage(url: &str, user_agent: &str) -> Result<Html> {
    // Use custom User-Agent
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;
    let html = client
        .get(url)
        .timeout(Duration::from_secs(10))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    // Parse document
    let document = Html::parse_document(&html);

    Ok(document)
}

/// Split the text of a cell into trimmed, non-empty fragments
pub fn split_fragments(text: &str) -> Vec<String> {
    RE_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Shorten the string when it doesn't fit in `length` chars
pub fn etc_str(data: &str, length: usize) -> String {
    if data.chars().count() <= length {
        return data.to_owned();
    }

    let mut short: String = data.chars().take(length.saturating_sub(1)).collect();
    short.push('…');

    short
}

/// Print a separation line of the table
pub fn line_table(widths: &[usize], pos: &Position) {
    let (left, joint, right) = pos.joints();

    let bars = widths
        .iter()
        .map(|width| BAR_H.to_string().repeat(*width))
        .collect::<Vec<_>>()
        .join(&joint.to_string());

    println!("{left}{bars}{right}");
}

/// Print a row of the table, each cell centered in its width
pub fn row_table<S: AsRef<str>>(widths: &[usize], cells: &[S]) {
    let sep = BAR_V;

    print!("{sep}");
    for (&width, cell) in widths.iter().zip(cells) {
        print!("{:^width$}{sep}", etc_str(cell.as_ref(), width));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments() {
        assert_eq!(
            split_fragments("  Алгебра\nИванов И.И.;7-313\u{a0}Ч    нед.: 1 3  "),
            vec!["Алгебра", "Иванов И.И.", "7-313", "Ч", "нед.: 1 3"]
        );
        assert_eq!(split_fragments("09:00 - 10:30"), vec!["09:00 - 10:30"]);
        assert!(split_fragments(" \n ; ").is_empty());
    }

    #[test]
    fn shorten() {
        assert_eq!(etc_str("Физика", 10), "Физика");
        assert_eq!(etc_str("Программирование", 6), "Прогр…");
    }
}
