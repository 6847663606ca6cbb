//! Undo/Redo history with transaction support.
//!
//! Every document modification goes through the history to enable
//! undo/redo. Commands can be grouped into transactions for multi-step
//! operations that undo as one.

use log::{debug, warn};

use crate::commands::Command;

/// A group of commands undone and redone as a single unit.
pub struct Transaction {
    pub name: String,
    pub commands: Vec<Box<dyn Command>>,
}

impl Transaction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: Box<dyn Command>) {
        self.commands.push(cmd);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Linear undo/redo stack.
pub struct UndoHistory {
    /// Commands that can be undone
    undo_stack: Vec<Box<dyn Command>>,
    /// Commands that can be redone
    redo_stack: Vec<Box<dyn Command>>,
    /// Maximum number of undoable entries, 0 for unbounded
    max_size: usize,
    /// Current open transaction
    current_transaction: Option<Transaction>,
    /// Whether history has changed since the last save
    dirty: bool,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoHistory {
    /// Default maximum history size.
    pub const DEFAULT_MAX_SIZE: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            current_transaction: None,
            dirty: false,
        }
    }

    /// Apply a command and record it.
    ///
    /// Anything previously undone and not redone is discarded.
    pub fn execute(&mut self, mut cmd: Box<dyn Command>) {
        debug!("execute: {}", cmd.description());
        cmd.redo();
        match self.current_transaction {
            Some(ref mut transaction) => transaction.push(cmd),
            None => self.push_command(cmd),
        }
    }

    /// Revert the most recent command. Does nothing when there is none.
    pub fn undo(&mut self) {
        if self.in_transaction() {
            warn!("Undo requested while a transaction is open");
            return;
        }
        if let Some(mut cmd) = self.undo_stack.pop() {
            debug!("undo: {}", cmd.description());
            cmd.undo();
            self.redo_stack.push(cmd);
            self.dirty = true;
        }
    }

    /// Re-apply the most recently undone command. Does nothing when there is
    /// none.
    pub fn redo(&mut self) {
        if self.in_transaction() {
            warn!("Redo requested while a transaction is open");
            return;
        }
        if let Some(mut cmd) = self.redo_stack.pop() {
            debug!("redo: {}", cmd.description());
            cmd.redo();
            self.undo_stack.push(cmd);
            self.dirty = true;
        }
    }

    /// Check if there are commands to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are commands to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the description of the next undo command.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Get the description of the next redo command.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as saved (clears dirty flag).
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the size bound, dropping the oldest entries if needed.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.trim();
    }

    /// Begin a new transaction.
    /// Commands executed during a transaction are grouped as one undo unit.
    pub fn begin_transaction(&mut self, name: impl Into<String>) {
        if self.current_transaction.is_some() {
            warn!("Beginning transaction while one is already open");
            self.commit_transaction();
        }
        self.current_transaction = Some(Transaction::new(name));
    }

    /// Commit the current transaction.
    pub fn commit_transaction(&mut self) {
        if let Some(transaction) = self.current_transaction.take() {
            if !transaction.is_empty() {
                self.push_command(Box::new(TransactionCommand(transaction)));
            }
        }
    }

    /// Revert everything executed in the open transaction and drop it.
    pub fn rollback_transaction(&mut self) {
        if let Some(transaction) = self.current_transaction.take() {
            for mut cmd in transaction.commands.into_iter().rev() {
                cmd.undo();
            }
        }
    }

    /// Check if a transaction is currently open.
    pub fn in_transaction(&self) -> bool {
        self.current_transaction.is_some()
    }

    fn push_command(&mut self, cmd: Box<dyn Command>) {
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
        self.dirty = true;
        self.trim();
    }

    fn trim(&mut self) {
        if self.max_size > 0 && self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_transaction = None;
        self.dirty = false;
    }

    /// Get the number of commands in the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of commands in the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

/// A command that wraps a transaction.
struct TransactionCommand(Transaction);

impl Command for TransactionCommand {
    fn description(&self) -> &str {
        &self.0.name
    }

    fn redo(&mut self) {
        for cmd in &mut self.0.commands {
            cmd.redo();
        }
    }

    fn undo(&mut self) {
        for cmd in self.0.commands.iter_mut().rev() {
            cmd.undo();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::NoopCommand;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Appends to a shared log so ordering can be asserted
    struct PushCommand {
        value: i32,
        log: Rc<RefCell<Vec<i32>>>,
    }

    impl Command for PushCommand {
        fn description(&self) -> &str {
            "Push"
        }

        fn redo(&mut self) {
            self.log.borrow_mut().push(self.value);
        }

        fn undo(&mut self) {
            let popped = self.log.borrow_mut().pop();
            assert_eq!(popped, Some(self.value));
        }
    }

    fn push(value: i32, log: &Rc<RefCell<Vec<i32>>>) -> Box<dyn Command> {
        Box::new(PushCommand {
            value,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn test_history_basic() {
        let mut history = UndoHistory::new();

        assert!(!history.can_undo());
        assert!(!history.can_redo());

        history.execute(Box::new(NoopCommand));

        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_description(), Some("No Operation"));
        assert!(history.is_dirty());
    }

    #[test]
    fn test_history_undo_redo() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut history = UndoHistory::new();

        history.execute(push(1, &log));
        history.execute(push(2, &log));
        assert_eq!(*log.borrow(), vec![1, 2]);

        history.undo();
        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 1);

        history.redo();
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_empty_undo_redo_are_noops() {
        let mut history = UndoHistory::new();
        history.undo();
        history.redo();
        assert_eq!(history.undo_count(), 0);
        assert!(!history.is_dirty());
    }

    #[test]
    fn test_execute_discards_redo_tail() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut history = UndoHistory::new();
        history.execute(push(1, &log));
        history.execute(push(2, &log));
        history.undo();
        history.execute(push(3, &log));

        assert!(!history.can_redo());
        assert_eq!(*log.borrow(), vec![1, 3]);
    }

    #[test]
    fn test_bounded_size_drops_oldest() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut history = UndoHistory::with_capacity(2);
        for value in 1..=3 {
            history.execute(push(value, &log));
        }
        assert_eq!(history.undo_count(), 2);

        history.undo();
        history.undo();
        history.undo();
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_transaction_is_one_unit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut history = UndoHistory::new();

        history.begin_transaction("Batch");
        history.execute(push(1, &log));
        history.execute(push(2, &log));
        history.undo();
        assert_eq!(*log.borrow(), vec![1, 2]);
        history.commit_transaction();

        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.undo_description(), Some("Batch"));
        history.undo();
        assert!(log.borrow().is_empty());
        history.redo();
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_rollback_reverts_transaction() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut history = UndoHistory::new();
        history.begin_transaction("Abandoned");
        history.execute(push(7, &log));
        history.execute(push(8, &log));
        history.rollback_transaction();

        assert!(log.borrow().is_empty());
        assert!(!history.can_undo());
        assert!(!history.in_transaction());
    }

    #[test]
    fn test_mark_saved() {
        let mut history = UndoHistory::new();
        history.execute(Box::new(NoopCommand));
        history.mark_saved();
        assert!(!history.is_dirty());
        history.undo();
        assert!(history.is_dirty());
    }
}
