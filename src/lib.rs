//! Domain core for a local notes app: a note entity with color tags and
//! optional image/link attachments, an undo/redo command history over a
//! storage collaborator, and a debounced search/filter/sort pipeline
//! feeding an observable list.

pub mod color;
pub mod commands;
pub mod error;
pub mod models;
pub mod search;
pub mod session;
pub mod sort;
pub mod storage;

pub use color::{note_color, resolve_color, ColorSelection, NoteColor};
pub use commands::{CommandHistory, NoteCommand};
pub use error::{Result, StoreError, ValidationError};
pub use models::{Note, NoteBuilder};
pub use search::filter_notes;
pub use session::NotesSession;
pub use sort::SortStrategy;
pub use storage::{JsonNoteStore, NoteStore};
