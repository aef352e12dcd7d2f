//! Integration tests for anime-earth.
//!
//! These tests drive the public API the way the TUI does, with a recording
//! search backend standing in for the real engine.

use anime_earth::config::Config;
use anime_earth::context::ApplicationContext;
use anime_earth::error::NavigationError;
use anime_earth::navigation::{DEFAULT_VIEW, View, ViewKind, ViewNavigator, ViewRegistry};
use anime_earth::options::{DownloadOptions, EpisodeMode, Language, Quality};
use anime_earth::search::{HandlerMode, SearchBackend, SearchForm};
use anime_earth::tui::{Action, App};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;

type Calls = Rc<RefCell<Vec<(String, bool, String)>>>;

struct RecordingBackend(Calls);

impl SearchBackend for RecordingBackend {
    fn submit_search(&mut self, term: &str, exact: bool, handler_mode: &str) {
        self.0
            .borrow_mut()
            .push((term.to_string(), exact, handler_mode.to_string()));
    }
}

fn press(app: &mut App, code: KeyCode) -> Action {
    let action = app.handle_input(KeyEvent::new(code, KeyModifiers::NONE));
    app.apply(&action);
    action
}

fn standard_navigator() -> ViewNavigator {
    ViewNavigator::new(ViewRegistry::standard().unwrap(), DEFAULT_VIEW).unwrap()
}

/// Every registered view can be switched to.
#[test]
fn test_switch_to_every_registered_view() {
    let mut nav = standard_navigator();
    let ids: Vec<String> = nav.registry().ids().iter().map(|s| s.to_string()).collect();

    for id in &ids {
        nav.switch_to(id).unwrap();
        assert_eq!(nav.current(), id);
    }
}

/// Unknown views fail and leave the active view alone.
#[test]
fn test_switch_to_unknown_view() {
    let mut nav = standard_navigator();
    nav.switch_to("options").unwrap();

    for bogus in ["nonexistent", "", "Search", "startup "] {
        assert_eq!(
            nav.switch_to(bogus),
            Err(NavigationError::UnknownView(bogus.to_string()))
        );
        assert_eq!(nav.current(), "options");
    }
}

/// Startup, search, then a bad id leaves search active.
#[test]
fn test_navigation_scenario() {
    let mut nav = standard_navigator();
    assert_eq!(nav.current(), "startup");

    nav.switch_to("search").unwrap();
    assert!(nav.switch_to("nonexistent").is_err());
    assert_eq!(nav.current(), "search");
}

/// Registration order is preserved and duplicates are rejected.
#[test]
fn test_registry_order_and_duplicates() {
    let mut registry = ViewRegistry::new();
    for id in ["settings", "startup", "options"] {
        registry
            .register(View::new(id, id, ViewKind::Settings))
            .unwrap();
    }
    let again = View::new("startup", "Again", ViewKind::Startup);
    assert!(registry.register(again).is_err());
    registry
        .register(View::new("search", "Search", ViewKind::Search))
        .unwrap();

    assert_eq!(registry.ids(), vec!["settings", "startup", "options", "search"]);
    assert_eq!(registry.get("startup").unwrap().title, "startup");
}

/// Observers see each successful switch with the new id.
#[test]
fn test_navigator_observers() {
    let mut nav = standard_navigator();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    nav.subscribe(move |id| sink.borrow_mut().push(id.to_string()));

    nav.switch_to("search").unwrap();
    let _ = nav.switch_to("nonexistent");
    nav.switch_to("settings").unwrap();

    assert_eq!(*seen.borrow(), vec!["search", "settings"]);
}

/// Blank search terms never reach the backend.
#[test]
fn test_blank_search_not_submitted() {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let mut backend = RecordingBackend(Rc::clone(&calls));

    for input in ["", "   "] {
        let form = SearchForm {
            input: input.to_string(),
            ..SearchForm::default()
        };
        assert!(!form.submit(&mut backend));
    }
    assert!(calls.borrow().is_empty());
}

/// A valid search reaches the backend exactly once with all three fields.
#[test]
fn test_search_submitted_once() {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let mut ctx =
        ApplicationContext::new(Config::new(), Box::new(RecordingBackend(Rc::clone(&calls))))
            .unwrap();

    let form = SearchForm {
        input: "Demon Slayer".to_string(),
        exact: true,
        handler_mode: HandlerMode::Complex,
        ..SearchForm::default()
    };
    assert!(ctx.submit_search(&form));

    assert_eq!(
        *calls.borrow(),
        vec![("Demon Slayer".to_string(), true, "complex".to_string())]
    );
}

/// Options form defaults.
#[test]
fn test_download_options_defaults() {
    let options = DownloadOptions::default();
    assert_eq!(options.selected_quality(), Quality::P720);
    assert_eq!(options.selected_language(), Language::Subbed);
    assert_eq!(options.episode_mode(), EpisodeMode::All);
    assert!(options.use_default_folder_name());
}

/// Config values seed the TUI forms and start view.
#[test]
fn test_config_seeds_app() {
    let config: Config = toml::from_str(
        r#"
        start_view = "search"

        [options]
        quality = "480p"

        [search]
        exact = true
        handler = "choice"
    "#,
    )
    .unwrap();

    let backend = Box::new(RecordingBackend(Rc::default()));
    let ctx = ApplicationContext::new(config, backend).unwrap();
    let app = App::new(ctx);
    assert_eq!(app.ctx.navigator().current(), "search");
    assert_eq!(app.options.selected_quality(), Quality::P480);
    assert!(app.search.is_exact_match());
    assert_eq!(app.search.handler_mode(), HandlerMode::Choice);
}

/// Full keyboard flow: pick Anime, type a name, submit.
#[test]
fn test_keyboard_search_flow() {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let ctx =
        ApplicationContext::new(Config::new(), Box::new(RecordingBackend(Rc::clone(&calls))))
            .unwrap();
    let mut app = App::new(ctx);

    assert_eq!(
        press(&mut app, KeyCode::Enter),
        Action::Navigate("search".to_string())
    );
    for c in "Frieren".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    assert_eq!(press(&mut app, KeyCode::Enter), Action::Search);

    assert_eq!(
        *calls.borrow(),
        vec![("Frieren".to_string(), false, "simple".to_string())]
    );
}
