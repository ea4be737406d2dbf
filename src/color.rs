use crate::models::Note;

/// The closed palette of note colors. Each entry carries a literal
/// display code; a note's stored tag resolves to exactly one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteColor {
    /// Charcoal fallback for notes with no recognizable tag.
    #[default]
    Default,
    Yellow,
    Red,
    Blue,
    Green,
    Purple,
}

impl NoteColor {
    /// Every palette entry, in the order the editor lays out its swatches.
    pub const ALL: [NoteColor; 6] = [
        NoteColor::Default,
        NoteColor::Yellow,
        NoteColor::Red,
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Purple,
    ];

    /// The literal display code stored on notes and rendered by the UI.
    pub fn code(self) -> &'static str {
        match self {
            NoteColor::Default => "#333333",
            NoteColor::Yellow => "#FDBE3B",
            NoteColor::Red => "#FF4842",
            NoteColor::Blue => "#3A52Fc",
            NoteColor::Green => "#17C51E",
            NoteColor::Purple => "#AF00FF",
        }
    }

    /// Total resolution from a stored tag: exact match on the trimmed
    /// code, default for anything absent, blank or unrecognized.
    pub fn resolve(tag: Option<&str>) -> NoteColor {
        let Some(tag) = tag else {
            return NoteColor::Default;
        };
        let tag = tag.trim();
        NoteColor::ALL
            .iter()
            .copied()
            .find(|c| c.code() == tag)
            .unwrap_or_default()
    }
}

/// Resolved display code for a stored tag; never fails.
pub fn resolve_color(tag: Option<&str>) -> &'static str {
    NoteColor::resolve(tag).code()
}

/// Display color for a note.
pub fn note_color(note: &Note) -> &'static str {
    resolve_color(note.color.as_deref())
}

/// Tracks the swatch currently picked in the editor.
#[derive(Debug, Default)]
pub struct ColorSelection {
    current: NoteColor,
}

impl ColorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// User tapped a swatch.
    pub fn select(&mut self, color: NoteColor) {
        self.current = color;
    }

    /// Re-selects the swatch whose code matches an existing note's stored
    /// tag (ignoring case), or the default swatch when nothing matches.
    pub fn restore(&mut self, stored_tag: Option<&str>) {
        let tag = stored_tag.unwrap_or("").trim();
        self.current = NoteColor::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(tag))
            .unwrap_or_default();
    }

    pub fn current(&self) -> NoteColor {
        self.current
    }

    /// The tag value to store on the note being saved.
    pub fn color_tag(&self) -> &'static str {
        self.current.code()
    }
}
