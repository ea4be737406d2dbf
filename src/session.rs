use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use crate::commands::{CommandHistory, NoteCommand};
use crate::error::Result;
use crate::models::Note;
use crate::search::filter_notes;
use crate::sort::SortStrategy;
use crate::storage::NoteStore;

/// Quiet window a search query must survive before a filter pass runs.
/// Queries superseded inside the window are abandoned.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

enum ViewEvent {
    Query(String),
    Sort(SortStrategy),
}

/// One user-facing editing session over a note store. Issues reversible
/// commands through its own [`CommandHistory`] and publishes a filtered,
/// optionally sorted view of the store on a watch channel.
///
/// Must be created inside a tokio runtime; the view task is spawned on
/// the current one.
pub struct NotesSession<S: NoteStore> {
    store: Arc<S>,
    history: CommandHistory,
    events: mpsc::UnboundedSender<ViewEvent>,
    view: watch::Receiver<Vec<Note>>,
}

impl<S: NoteStore + 'static> NotesSession<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view) = watch::channel(store.get_all());
        tokio::spawn(view_task(store.subscribe(), events_rx, view_tx));
        Self {
            store,
            history: CommandHistory::new(),
            events,
            view,
        }
    }

    /// Observable filtered view of the store.
    pub fn notes(&self) -> watch::Receiver<Vec<Note>> {
        self.view.clone()
    }

    /// Saves a new note. The id is assigned by the store up front so the
    /// recorded command replays against a stable identifier.
    pub fn add_note(&mut self, mut note: Note) -> Result<Note> {
        if note.id.is_none() {
            note.id = Some(self.store.allocate_id()?);
        }
        let saved = note.clone();
        self.history
            .execute(NoteCommand::Add { note }, self.store.as_ref())?;
        Ok(saved)
    }

    /// Replaces a stored note. The edit keeps the original identifier.
    pub fn edit_note(&mut self, old: Note, mut new: Note) -> Result<()> {
        new.id = old.id;
        self.history
            .execute(NoteCommand::Edit { old, new }, self.store.as_ref())
    }

    /// Removes a stored note.
    pub fn delete_note(&mut self, note: Note) -> Result<()> {
        self.history
            .execute(NoteCommand::Delete { note }, self.store.as_ref())
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(self.store.as_ref())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(self.store.as_ref())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Updates the search query. Filtering is debounced: only the last
    /// query inside the quiet window triggers a pass.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let _ = self.events.send(ViewEvent::Query(query.into()));
    }

    /// Selects the active ordering. Takes effect immediately, re-sorting
    /// the current filtered view without re-filtering.
    pub fn set_sort_strategy(&self, strategy: SortStrategy) {
        let _ = self.events.send(ViewEvent::Sort(strategy));
    }
}

async fn view_task(
    mut store_rx: watch::Receiver<Vec<Note>>,
    mut events: mpsc::UnboundedReceiver<ViewEvent>,
    view: watch::Sender<Vec<Note>>,
) {
    let mut query = String::new();
    let mut pending: Option<String> = None;
    let mut deadline = Instant::now();

    loop {
        tokio::select! {
            changed = store_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let all = store_rx.borrow_and_update().clone();
                trace!(notes = all.len(), "store snapshot changed");
                let _ = view.send(filter_notes(&all, &query));
            }
            event = events.recv() => {
                match event {
                    None => break,
                    Some(ViewEvent::Query(q)) => {
                        trace!(query = %q, "search query updated");
                        pending = Some(q);
                        deadline = Instant::now() + SEARCH_DEBOUNCE;
                    }
                    Some(ViewEvent::Sort(strategy)) => {
                        debug!(?strategy, "sort strategy selected");
                        let mut current = view.borrow().clone();
                        strategy.sort(&mut current);
                        let _ = view.send(current);
                    }
                }
            }
            _ = sleep_until(deadline), if pending.is_some() => {
                query = pending.take().unwrap_or_default();
                trace!(query = %query, "search query settled");
                let all = store_rx.borrow().clone();
                let _ = view.send(filter_notes(&all, &query));
            }
        }
    }
}
