use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::models::{Note, DATE_TIME_FMT};

/// The closed set of list orderings the user can pick from. Exactly one
/// strategy is active at a time; all of them are stable for equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Title, ascending lexicographic.
    ByTitle,
    /// Creation timestamp, newest first.
    ByDate,
    /// Raw color tag string, ascending; untagged notes sort first.
    ByColor,
}

impl SortStrategy {
    /// Reorders the given view in place. Re-applying the active strategy
    /// leaves the order untouched.
    pub fn sort(self, notes: &mut [Note]) {
        match self {
            SortStrategy::ByTitle => notes.sort_by(|a, b| a.title.cmp(&b.title)),
            SortStrategy::ByDate => {
                notes.sort_by(|a, b| cmp_date_time(&b.date_time, &a.date_time))
            }
            SortStrategy::ByColor => notes.sort_by(|a, b| {
                a.color
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.color.as_deref().unwrap_or(""))
            }),
        }
    }
}

fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts, DATE_TIME_FMT).ok()
}

/// Chronological comparison of display timestamps; unparseable values
/// order before everything parseable.
fn cmp_date_time(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
