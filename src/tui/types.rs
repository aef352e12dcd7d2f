//! TUI type definitions for focus and actions.

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Vertical navigation toolbar
    Toolbar,
    /// The active view
    Main,
}

/// Actions returned from input handling and carried out by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Switch to the view with this identifier
    Navigate(String),
    /// Submit the search form
    Search,
    /// Store the download options as config defaults
    SaveOptions,
}
