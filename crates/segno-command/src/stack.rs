//! Linear undo history.

use log::debug;

use segno_model::Document;

use crate::command::Command;
use crate::errors::Result;

/// What changed about the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackEvent {
    /// The stack's contents or applied prefix changed; raised once per
    /// submit, undo and redo.
    StackChanged,
    /// The cursor moved.
    IndexChanged,
    /// The clean/dirty state flipped; carries the new dirtiness.
    DirtyChanged(bool),
}

/// Listener handle returned by [`CommandStack::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StackSubscriberId(u64);

type StackListener = Box<dyn FnMut(&StackEvent)>;

/// Linear command history with a cursor.
///
/// Commands at indices below the cursor are applied; the rest form the
/// redo tail. Submitting while the cursor is not at the end drops the
/// tail first. The stack owns its commands; the document is passed into
/// each operation, never stored.
pub struct CommandStack {
    commands: Vec<Box<dyn Command>>,
    cursor: usize,
    /// Cursor position at which the document was last saved. `None`
    /// means that state is no longer reachable by undo/redo.
    saved: Option<usize>,
    listeners: Vec<(StackSubscriberId, StackListener)>,
    next_subscriber: u64,
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandStack {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            saved: Some(0),
            listeners: Vec::new(),
            next_subscriber: 1,
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of applied commands; also the index the next submission
    /// lands at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// The document differs from its last saved state.
    pub fn is_dirty(&self) -> bool {
        self.saved != Some(self.cursor)
    }

    /// All commands in submission order, applied or not.
    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    /// Labels of the applied commands, oldest first.
    pub fn undo_labels(&self) -> Vec<String> {
        self.commands[..self.cursor]
            .iter()
            .map(|command| command.label())
            .collect()
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn subscribe(&mut self, listener: StackListener) -> StackSubscriberId {
        let id = StackSubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: StackSubscriberId) {
        self.listeners.retain(|(key, _)| *key != id);
    }

    fn emit(&mut self, event: StackEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Apply a command and record it.
    ///
    /// The command runs first; a failing command leaves both the
    /// document and the history untouched. On success the redo tail is
    /// dropped, then the command either merges into its predecessor or
    /// is pushed.
    pub fn submit(&mut self, doc: &mut Document, command: Box<dyn Command>) -> Result<()> {
        command.redo(doc)?;
        let was_dirty = self.is_dirty();

        if self.cursor < self.commands.len() {
            // The saved state may live in the tail we are dropping.
            if matches!(self.saved, Some(saved) if saved > self.cursor) {
                self.saved = None;
            }
            self.commands.truncate(self.cursor);
        }

        let merged = match self.commands.last_mut() {
            Some(previous) => previous.merge_with(command.as_ref()),
            None => false,
        };
        if merged {
            debug!("merged {} into previous command", command.kind());
            // The state at the cursor is no longer the saved one.
            if self.saved == Some(self.cursor) {
                self.saved = None;
            }
        } else {
            self.commands.push(command);
            self.cursor += 1;
        }

        self.emit(StackEvent::StackChanged);
        self.emit(StackEvent::IndexChanged);
        self.emit_dirty_transition(was_dirty);
        Ok(())
    }

    /// Reverse the command below the cursor. Returns false at the
    /// bottom of the history.
    pub fn undo(&mut self, doc: &mut Document) -> Result<bool> {
        if self.cursor == 0 {
            return Ok(false);
        }
        let was_dirty = self.is_dirty();
        self.commands[self.cursor - 1].undo(doc)?;
        self.cursor -= 1;
        self.emit(StackEvent::StackChanged);
        self.emit(StackEvent::IndexChanged);
        self.emit_dirty_transition(was_dirty);
        Ok(true)
    }

    /// Re-apply the command at the cursor. Returns false at the top of
    /// the history.
    pub fn redo(&mut self, doc: &mut Document) -> Result<bool> {
        if self.cursor == self.commands.len() {
            return Ok(false);
        }
        let was_dirty = self.is_dirty();
        self.commands[self.cursor].redo(doc)?;
        self.cursor += 1;
        self.emit(StackEvent::StackChanged);
        self.emit(StackEvent::IndexChanged);
        self.emit_dirty_transition(was_dirty);
        Ok(true)
    }

    /// Record that the document was just saved at the current cursor.
    pub fn mark_saved(&mut self) {
        let was_dirty = self.is_dirty();
        self.saved = Some(self.cursor);
        self.emit_dirty_transition(was_dirty);
    }

    fn emit_dirty_transition(&mut self, was_dirty: bool) {
        let now_dirty = self.is_dirty();
        if now_dirty != was_dirty {
            self.emit(StackEvent::DirtyChanged(now_dirty));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CreateIntervalAndEndEvent, MoveEvent, Rename};
    use segno_model::{Id, Path};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_document() -> Document {
        let mut doc = Document::new("score");
        doc.create_event_with_timenode(Id::num(1), Id::num(1), "start", 0)
            .unwrap();
        doc.create_interval_and_end_event(
            "intro",
            Id::num(1),
            1000,
            Id::num(1),
            Id::num(2),
            Id::num(2),
        )
        .unwrap();
        doc
    }

    fn submit_rename(stack: &mut CommandStack, doc: &mut Document, name: &str) {
        let command = Rename::new(doc, Path::interval(&Id::num(1)), name).unwrap();
        stack.submit(doc, Box::new(command)).unwrap();
    }

    #[test]
    fn test_submit_undo_redo_round_trip() {
        let mut doc = sample_document();
        let before = doc.clone();
        let mut stack = CommandStack::new();

        submit_rename(&mut stack, &mut doc, "verse");
        assert_eq!(doc.intervals.get(&Id::num(1)).unwrap().name, "verse");

        assert!(stack.undo(&mut doc).unwrap());
        assert_eq!(doc, before);

        assert!(stack.redo(&mut doc).unwrap());
        assert_eq!(doc.intervals.get(&Id::num(1)).unwrap().name, "verse");
    }

    #[test]
    fn test_boundaries_are_not_errors() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();
        assert!(!stack.undo(&mut doc).unwrap());
        assert!(!stack.redo(&mut doc).unwrap());
    }

    #[test]
    fn test_submit_truncates_redo_tail() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();

        let move_event = MoveEvent::new(&doc, Id::num(2), 500).unwrap();
        stack.submit(&mut doc, Box::new(move_event)).unwrap();
        let create = CreateIntervalAndEndEvent::new(&doc, "verse", Id::num(2), 2000).unwrap();
        stack.submit(&mut doc, Box::new(create)).unwrap();
        assert_eq!(stack.len(), 2);

        stack.undo(&mut doc).unwrap();
        submit_rename(&mut stack, &mut doc, "bridge");

        // The undone creation is gone for good.
        assert_eq!(stack.len(), 2);
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_labels()[1], "Rename to \"bridge\"");
    }

    #[test]
    fn test_consecutive_renames_merge() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();

        for name in ["i", "in", "int"] {
            submit_rename(&mut stack, &mut doc, name);
        }
        assert_eq!(stack.len(), 1);
        assert_eq!(doc.intervals.get(&Id::num(1)).unwrap().name, "int");

        // One undo restores the pre-edit name.
        stack.undo(&mut doc).unwrap();
        assert_eq!(doc.intervals.get(&Id::num(1)).unwrap().name, "intro");
    }

    #[test]
    fn test_different_targets_do_not_merge() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();

        submit_rename(&mut stack, &mut doc, "verse");
        let other = Rename::new(&doc, Path::event(&Id::num(1)), "go").unwrap();
        stack.submit(&mut doc, Box::new(other)).unwrap();
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();
        assert!(!stack.is_dirty());

        submit_rename(&mut stack, &mut doc, "verse");
        assert!(stack.is_dirty());

        stack.mark_saved();
        assert!(!stack.is_dirty());

        stack.undo(&mut doc).unwrap();
        assert!(stack.is_dirty());
        stack.redo(&mut doc).unwrap();
        assert!(!stack.is_dirty());
    }

    #[test]
    fn test_truncation_invalidates_saved_state() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();

        submit_rename(&mut stack, &mut doc, "verse");
        stack.mark_saved();
        stack.undo(&mut doc).unwrap();

        // The saved state was in the dropped tail; nothing reachable is
        // clean until the next save.
        submit_rename(&mut stack, &mut doc, "bridge");
        assert!(stack.is_dirty());
        stack.undo(&mut doc).unwrap();
        assert!(stack.is_dirty());
    }

    #[test]
    fn test_merge_at_saved_cursor_marks_dirty() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();

        submit_rename(&mut stack, &mut doc, "verse");
        stack.mark_saved();
        submit_rename(&mut stack, &mut doc, "verses");

        assert_eq!(stack.len(), 1);
        assert!(stack.is_dirty());
        stack.undo(&mut doc).unwrap();
        // The merged entry jumps past the saved state.
        assert!(stack.is_dirty());
    }

    #[test]
    fn test_failed_command_leaves_history_untouched() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();

        let command = Rename::new(&doc, Path::interval(&Id::num(1)), "verse").unwrap();
        doc.remove_interval(&Id::num(1)).unwrap();
        assert!(stack.submit(&mut doc, Box::new(command)).is_err());
        assert_eq!(stack.len(), 0);
        assert!(!stack.is_dirty());
    }

    #[test]
    fn test_stack_events() {
        let mut doc = sample_document();
        let mut stack = CommandStack::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            stack.subscribe(Box::new(move |event: &StackEvent| {
                seen.borrow_mut().push(*event);
            }));
        }

        submit_rename(&mut stack, &mut doc, "verse");
        assert_eq!(
            *seen.borrow(),
            vec![
                StackEvent::StackChanged,
                StackEvent::IndexChanged,
                StackEvent::DirtyChanged(true),
            ]
        );

        // Undo and redo each raise exactly one of both stack events.
        seen.borrow_mut().clear();
        stack.undo(&mut doc).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                StackEvent::StackChanged,
                StackEvent::IndexChanged,
                StackEvent::DirtyChanged(false),
            ]
        );

        seen.borrow_mut().clear();
        stack.redo(&mut doc).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                StackEvent::StackChanged,
                StackEvent::IndexChanged,
                StackEvent::DirtyChanged(true),
            ]
        );
    }
}
