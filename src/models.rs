use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display format for note timestamps, e.g. "Tuesday, 25 August 2026 14:30 PM".
pub const DATE_TIME_FMT: &str = "%A, %d %B %Y %H:%M %p";

/// A single user note as persisted in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Assigned by the store on first save; stable across edits.
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default, rename = "noteText")]
    pub note_text: Option<String>,
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(default, rename = "imagePath")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "webLink")]
    pub web_link: Option<String>,
}

impl Note {
    pub fn builder() -> NoteBuilder {
        NoteBuilder::default()
    }
}

/// Current-time display string used when a note is created.
pub fn display_timestamp() -> String {
    Local::now().format(DATE_TIME_FMT).to_string()
}

/// Rejects links that are clearly not web URLs.
pub fn validate_web_link(link: &str) -> Result<(), ValidationError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !link.starts_with("http://") && !link.starts_with("https://") {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(())
}

/// Collects note fields and validates them on [`NoteBuilder::build`].
#[derive(Debug, Default)]
pub struct NoteBuilder {
    id: Option<i64>,
    title: String,
    subtitle: Option<String>,
    note_text: Option<String>,
    date_time: Option<String>,
    image_path: Option<String>,
    color: Option<String>,
    web_link: Option<String>,
}

impl NoteBuilder {
    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn note_text(mut self, note_text: impl Into<String>) -> Self {
        self.note_text = Some(note_text.into());
        self
    }

    /// Overrides the creation timestamp; defaults to the current time.
    pub fn date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = Some(date_time.into());
        self
    }

    pub fn image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn web_link(mut self, web_link: impl Into<String>) -> Self {
        self.web_link = Some(web_link.into());
        self
    }

    /// Validates the collected fields and produces the note. A note must
    /// have a title and at least one of subtitle or body text; a web
    /// link, when present, must look like an http(s) URL.
    pub fn build(self) -> Result<Note, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let no_subtitle = self
            .subtitle
            .as_deref()
            .map_or(true, |s| s.trim().is_empty());
        let no_text = self
            .note_text
            .as_deref()
            .map_or(true, |s| s.trim().is_empty());
        if no_subtitle && no_text {
            return Err(ValidationError::EmptyContent);
        }
        if let Some(link) = self.web_link.as_deref() {
            validate_web_link(link)?;
        }
        Ok(Note {
            id: self.id,
            title: self.title,
            subtitle: self.subtitle,
            note_text: self.note_text,
            date_time: self.date_time.unwrap_or_else(display_timestamp),
            image_path: self.image_path,
            color: self.color,
            web_link: self.web_link,
        })
    }
}

/// Persisted index file: the id counter plus every note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexFile {
    #[serde(rename = "nextId")]
    pub next_id: i64,
    pub notes: Vec<Note>,
}

impl Default for IndexFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            notes: vec![],
        }
    }
}
