//! Application state management and input handling.

use crate::config::Keybindings;
use crate::context::ApplicationContext;
use crate::navigation::ViewKind;
use crate::options::{DownloadOptions, OptionField};
use crate::search::{ContentKind, SearchField, SearchForm};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use ratatui::widgets::ListState;

use super::types::{Action, Focus};

/// Application state for the TUI.
pub struct App {
    /// Config, navigator, assets and search backend
    pub ctx: ApplicationContext,
    /// Current focus (toolbar or main)
    pub focus: Focus,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Button highlighted on the startup view
    pub startup_choice: ContentKind,
    /// Search form state
    pub search: SearchForm,
    /// Focused search form field
    pub search_field: SearchField,
    /// Download options form state
    pub options: DownloadOptions,
    /// Focused options group
    pub option_field: OptionField,
    /// List state for the toolbar
    pub toolbar_state: ListState,
    /// Status message shown in the footer
    pub status_message: Option<String>,
    /// Error message to display
    pub error_message: Option<String>,
    /// Whether help modal is shown
    pub show_help: bool,
    pub keybindings: Keybindings,
}

impl App {
    /// Create the app state, seeding the forms from the config defaults.
    pub fn new(ctx: ApplicationContext) -> Self {
        let config = ctx.config();
        let search = SearchForm::new(config.search.exact, config.search.handler);
        let options = config.options.clone();
        let keybindings = config.keybindings.clone();

        let mut toolbar_state = ListState::default();
        toolbar_state.select(ctx.navigator().registry().position(ctx.navigator().current()));

        Self {
            ctx,
            focus: Focus::Main,
            should_quit: false,
            startup_choice: ContentKind::default(),
            search,
            search_field: SearchField::default(),
            options,
            option_field: OptionField::default(),
            toolbar_state,
            status_message: None,
            error_message: None,
            show_help: false,
            keybindings,
        }
    }

    /// Kind of the active view.
    pub fn current_kind(&self) -> ViewKind {
        self.ctx.navigator().current_view().kind
    }

    /// Whether keystrokes currently go into the search term field.
    pub fn is_editing_text(&self) -> bool {
        self.focus == Focus::Main
            && self.current_kind() == ViewKind::Search
            && self.search_field == SearchField::Term
    }

    /// Set an error message.
    pub fn set_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    /// Clear error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// Carry out the navigation and search actions.
    ///
    /// `Quit` and `SaveOptions` are left to the event loop.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Navigate(id) => match self.ctx.navigator_mut().switch_to(id) {
                Ok(()) => self.sync_toolbar(),
                Err(e) => self.set_error(&e.to_string()),
            },
            Action::Search => {
                if self.ctx.submit_search(&self.search) {
                    let message = format!(
                        "Search submitted: '{}' [{}] exact={} handler={}",
                        self.search.search_term(),
                        self.search.content_kind.label(),
                        self.search.is_exact_match(),
                        self.search.handler_mode()
                    );
                    self.set_status(&message);
                }
            }
            Action::Quit | Action::SaveOptions | Action::None => {}
        }
    }

    /// Point the toolbar highlight at the active view.
    fn sync_toolbar(&mut self) {
        let navigator = self.ctx.navigator();
        let pos = navigator.registry().position(navigator.current());
        self.toolbar_state.select(pos);
    }

    /// Copy the options form into the config so it can be saved.
    pub fn store_options(&mut self) {
        self.ctx.config_mut().options = self.options.clone();
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        // Handle help modal
        if self.show_help {
            if key.code == KeyCode::Esc
                || self.keybindings.matches(&self.keybindings.help, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                self.show_help = false;
            }
            return Action::None;
        }

        // Tab leaves the text field too
        if self
            .keybindings
            .matches(&self.keybindings.toggle_focus, &key)
        {
            self.focus = match self.focus {
                Focus::Toolbar => Focus::Main,
                Focus::Main => Focus::Toolbar,
            };
            return Action::None;
        }

        if self.is_editing_text() {
            return self.handle_term_input(key);
        }

        if self.keybindings.matches(&self.keybindings.help, &key) {
            self.show_help = true;
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }

        // Number keys jump straight to a view
        if let KeyCode::Char(c) = key.code {
            if let Some(n) = c.to_digit(10).filter(|n| *n > 0) {
                let registry = self.ctx.navigator().registry();
                return match registry.ids().get(n as usize - 1) {
                    Some(id) => Action::Navigate(id.to_string()),
                    None => Action::None,
                };
            }
        }

        if self.focus == Focus::Toolbar {
            return self.handle_toolbar_input(key);
        }

        match self.current_kind() {
            ViewKind::Startup => self.handle_startup_input(key),
            ViewKind::Search => self.handle_search_input(key),
            ViewKind::Options => self.handle_options_input(key),
            ViewKind::Settings => {
                if self.keybindings.matches(&self.keybindings.back, &key) {
                    self.focus = Focus::Toolbar;
                }
                Action::None
            }
        }
    }

    fn handle_toolbar_input(&mut self, key: KeyEvent) -> Action {
        let moved = if self.keybindings.matches(&self.keybindings.up, &key) {
            Some(self.ctx.navigator_mut().previous())
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            Some(self.ctx.navigator_mut().next())
        } else {
            None
        };

        match moved {
            Some(Ok(())) => self.sync_toolbar(),
            Some(Err(e)) => self.set_error(&e.to_string()),
            None => {
                if self.keybindings.matches(&self.keybindings.select, &key)
                    || self.keybindings.matches(&self.keybindings.right, &key)
                {
                    self.focus = Focus::Main;
                }
            }
        }
        Action::None
    }

    fn handle_startup_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.left, &key)
            || self.keybindings.matches(&self.keybindings.right, &key)
        {
            self.startup_choice = self.startup_choice.toggle();
            Action::None
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            debug!("{} selected", self.startup_choice.label());
            self.search.content_kind = self.startup_choice;
            self.search_field = SearchField::Term;
            Action::Navigate("search".to_string())
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            self.focus = Focus::Toolbar;
            Action::None
        } else {
            Action::None
        }
    }

    fn handle_term_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => Action::Search,
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search.input.push(c);
                Action::None
            }
            KeyCode::Backspace => {
                self.search.input.pop();
                Action::None
            }
            KeyCode::Down => {
                self.search_field = self.search_field.next();
                Action::None
            }
            KeyCode::Up => {
                self.search_field = self.search_field.previous();
                Action::None
            }
            KeyCode::Esc => {
                self.search.input.clear();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) -> Action {
        let forward = self.keybindings.matches(&self.keybindings.right, &key);
        let backward = self.keybindings.matches(&self.keybindings.left, &key);

        if self.keybindings.matches(&self.keybindings.up, &key) {
            self.search_field = self.search_field.previous();
            Action::None
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            self.search_field = self.search_field.next();
            Action::None
        } else if forward || backward || key.code == KeyCode::Char(' ') {
            match self.search_field {
                SearchField::Exact => self.search.exact = !self.search.exact,
                SearchField::Handler => {
                    self.search.handler_mode = if backward {
                        self.search.handler_mode.previous()
                    } else {
                        self.search.handler_mode.next()
                    };
                }
                SearchField::Term => {}
            }
            Action::None
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            Action::Search
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            self.search_field = SearchField::Term;
            Action::None
        } else {
            Action::None
        }
    }

    fn handle_options_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.up, &key) {
            self.option_field = self.option_field.previous();
            Action::None
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            self.option_field = self.option_field.next();
            Action::None
        } else if self.keybindings.matches(&self.keybindings.right, &key)
            || self.keybindings.matches(&self.keybindings.select, &key)
        {
            self.options.cycle(self.option_field, true);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.left, &key) {
            self.options.cycle(self.option_field, false);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.save, &key) {
            Action::SaveOptions
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            self.focus = Focus::Toolbar;
            Action::None
        } else {
            Action::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::search::{HandlerMode, SearchBackend};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(String, bool, String)>>>;

    struct Recorder(Calls);

    impl SearchBackend for Recorder {
        fn submit_search(&mut self, term: &str, exact: bool, handler_mode: &str) {
            self.0
                .borrow_mut()
                .push((term.to_string(), exact, handler_mode.to_string()));
        }
    }

    fn app() -> (App, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let ctx = ApplicationContext::new(Config::new(), Box::new(Recorder(Rc::clone(&calls))))
            .unwrap();
        (App::new(ctx), calls)
    }

    fn press(app: &mut App, code: KeyCode) {
        let action = app.handle_input(KeyEvent::new(code, KeyModifiers::NONE));
        app.apply(&action);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_starts_on_home() {
        let (app, _) = app();
        assert_eq!(app.current_kind(), ViewKind::Startup);
        assert_eq!(app.toolbar_state.selected(), Some(0));
    }

    #[test]
    fn test_startup_choice_opens_search() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ctx.navigator().current(), "search");
        assert_eq!(app.search.content_kind, ContentKind::Animation);
        assert!(app.is_editing_text());
    }

    #[test]
    fn test_quit_key_is_text_while_editing() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('2'));
        type_text(&mut app, "q1?");

        assert!(!app.should_quit);
        assert!(!app.show_help);
        assert_eq!(app.search.input, "q1?");
    }

    #[test]
    fn test_modified_chars_not_typed() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('2'));
        type_text(&mut app, "Naruto");
        for mods in [KeyModifiers::CONTROL, KeyModifiers::ALT] {
            let action = app.handle_input(KeyEvent::new(KeyCode::Char('x'), mods));
            assert_eq!(action, Action::None);
        }

        assert_eq!(app.search.input, "Naruto");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_search_submission() {
        let (mut app, calls) = app();
        press(&mut app, KeyCode::Char('2'));
        type_text(&mut app, "Demon Slayer");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.search.handler_mode, HandlerMode::Complex);
        assert_eq!(
            *calls.borrow(),
            vec![("Demon Slayer".to_string(), true, "complex".to_string())]
        );
        assert!(app.status_message.unwrap().contains("Demon Slayer"));
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let (mut app, calls) = app();
        press(&mut app, KeyCode::Char('2'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(calls.borrow().is_empty());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_toolbar_navigation() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Toolbar);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.ctx.navigator().current(), "settings");
        assert_eq!(app.toolbar_state.selected(), Some(3));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.ctx.navigator().current(), "search");
    }

    #[test]
    fn test_unknown_navigation_sets_error() {
        let (mut app, _) = app();
        app.apply(&Action::Navigate("nonexistent".to_string()));

        assert_eq!(app.ctx.navigator().current(), "startup");
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_options_cycle_and_store() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);

        assert_eq!(app.options.selected_quality().as_str(), "1080p");
        assert_eq!(app.options.selected_language().as_str(), "chinese");

        let action = app.handle_input(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE));
        assert_eq!(action, Action::SaveOptions);
        app.store_options();
        assert_eq!(app.ctx.config().options, app.options);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('2'));
        let action = app.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_toggle() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.ctx.navigator().current(), "startup");
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
