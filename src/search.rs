use crate::models::Note;

/// Case-insensitive substring filter over title, subtitle and body text.
/// A blank query returns the input unchanged; matching preserves the
/// input's relative order.
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return notes.to_vec();
    }
    notes
        .iter()
        .filter(|n| note_matches(n, &q))
        .cloned()
        .collect()
}

fn note_matches(note: &Note, query_lower: &str) -> bool {
    let contains = |field: Option<&str>| {
        field.map_or(false, |s| s.to_lowercase().contains(query_lower))
    };
    note.title.to_lowercase().contains(query_lower)
        || contains(note.subtitle.as_deref())
        || contains(note.note_text.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, subtitle: Option<&str>, text: Option<&str>) -> Note {
        let mut builder = Note::builder().title(title).date_time("now");
        if let Some(s) = subtitle {
            builder = builder.subtitle(s);
        }
        builder = builder.note_text(text.unwrap_or("body"));
        builder.build().unwrap()
    }

    #[test]
    fn blank_query_returns_all_in_order() {
        let notes = vec![
            note("Groceries", None, Some("milk")),
            note("Work plan", None, Some("sprint")),
        ];
        assert_eq!(filter_notes(&notes, ""), notes);
        assert_eq!(filter_notes(&notes, "   "), notes);
    }

    #[test]
    fn matches_title_case_insensitively_preserving_order() {
        let notes = vec![
            note("Groceries", None, None),
            note("Work plan", None, None),
            note("group trip", None, None),
        ];
        let hits = filter_notes(&notes, "gro");
        let titles: Vec<&str> = hits.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Groceries", "group trip"]);
    }

    #[test]
    fn matches_subtitle_and_body() {
        let notes = vec![
            note("One", Some("Quarterly Budget"), Some("numbers")),
            note("Two", None, Some("call the BUDGET office")),
            note("Three", None, Some("unrelated")),
        ];
        let hits = filter_notes(&notes, "budget");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "One");
        assert_eq!(hits[1].title, "Two");
    }
}
