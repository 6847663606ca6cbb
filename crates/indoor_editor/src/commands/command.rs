//! Command trait.

/// A reversible edit of the document.
///
/// A command captures everything it needs to invert itself when it is
/// constructed. `redo` applies the edit and `undo` restores the state from
/// before it; the two calls alternate, starting with `redo`.
///
/// Commands do not validate business rules such as "a building keeps at
/// least one floor". Callers check those before building the command.
///
/// # Example
///
/// ```ignore
/// struct RenameCommand {
///     zone: Rc<Zone>,
///     old_name: String,
///     new_name: String,
/// }
///
/// impl Command for RenameCommand {
///     fn description(&self) -> &str { "Rename Zone" }
///     fn redo(&mut self) { self.zone.set_name(self.new_name.clone()); }
///     fn undo(&mut self) { self.zone.set_name(self.old_name.clone()); }
/// }
/// ```
pub trait Command {
    /// Human-readable description for the undo/redo menu.
    fn description(&self) -> &str;

    /// Apply the edit.
    fn redo(&mut self);

    /// Revert the edit.
    fn undo(&mut self);
}

/// A command that does nothing.
pub struct NoopCommand;

impl Command for NoopCommand {
    fn description(&self) -> &str {
        "No Operation"
    }

    fn redo(&mut self) {}

    fn undo(&mut self) {}
}
