use tracing::debug;

use crate::error::Result;
use crate::models::Note;
use crate::storage::NoteStore;

/// One reversible note mutation. Immutable once constructed; [`apply`]
/// and [`revert`] are inverses of each other.
///
/// [`apply`]: NoteCommand::apply
/// [`revert`]: NoteCommand::revert
#[derive(Debug, Clone)]
pub enum NoteCommand {
    Add { note: Note },
    Edit { old: Note, new: Note },
    Delete { note: Note },
}

impl NoteCommand {
    /// Runs the mutation against the store.
    pub fn apply(&self, store: &dyn NoteStore) -> Result<()> {
        match self {
            NoteCommand::Add { note } => store.insert_or_replace(note),
            NoteCommand::Edit { new, .. } => store.insert_or_replace(new),
            NoteCommand::Delete { note } => store.delete(note),
        }
    }

    /// Reverses the mutation.
    pub fn revert(&self, store: &dyn NoteStore) -> Result<()> {
        match self {
            NoteCommand::Add { note } => store.delete(note),
            NoteCommand::Edit { old, .. } => store.insert_or_replace(old),
            NoteCommand::Delete { note } => store.insert_or_replace(note),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            NoteCommand::Add { .. } => "add",
            NoteCommand::Edit { .. } => "edit",
            NoteCommand::Delete { .. } => "delete",
        }
    }
}

/// Two-stack undo/redo log over committed commands. Owned by the
/// editing session; one history per session, never shared.
#[derive(Debug, Default)]
pub struct CommandHistory {
    done: Vec<NoteCommand>,
    undone: Vec<NoteCommand>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the command and records it. Any new command invalidates the
    /// redo stack. The stacks are updated even when the store reports a
    /// failure; the error still propagates to the caller.
    pub fn execute(&mut self, command: NoteCommand, store: &dyn NoteStore) -> Result<()> {
        debug!(kind = command.kind(), "executing command");
        let result = command.apply(store);
        self.done.push(command);
        self.undone.clear();
        result
    }

    /// Reverses the most recent command. No-op when there is nothing to
    /// undo.
    pub fn undo(&mut self, store: &dyn NoteStore) -> Result<()> {
        let Some(command) = self.done.pop() else {
            return Ok(());
        };
        debug!(kind = command.kind(), "undoing command");
        let result = command.revert(store);
        self.undone.push(command);
        result
    }

    /// Reapplies the most recently undone command. No-op when the redo
    /// stack is empty.
    pub fn redo(&mut self, store: &dyn NoteStore) -> Result<()> {
        let Some(command) = self.undone.pop() else {
            return Ok(());
        };
        debug!(kind = command.kind(), "redoing command");
        let result = command.apply(store);
        self.done.push(command);
        result
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
