//! Enumerations for TUI state management.

/// Screen the viewer is currently showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    IssueList,
    EditTitle,
    ConfirmDelete,
    Help,
}

/// Change requested through the card callbacks, applied once dispatch returns.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Open the title editor for this issue, prefilled with the current title.
    Edit { id: String, title: String },
    Delete(String),
    AddSubtask(String),
    /// Container click on a card; the innermost one becomes the selection.
    Focus(String),
}
