//! Configuration file support for anime-earth.
//!
//! This module provides functionality for loading and saving user preferences
//! from a TOML configuration file.

use crate::error::Result;
use crate::navigation::DEFAULT_VIEW;
use crate::options::DownloadOptions;
use crate::search::HandlerMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// User configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// View shown at start-up
    #[serde(default = "default_start_view")]
    pub start_view: String,

    /// Directory holding bundled images (overrides platform default)
    #[serde(default)]
    pub assets_dir: Option<String>,

    /// Default download options
    #[serde(default)]
    pub options: DownloadOptions,

    /// Default search form settings
    #[serde(default)]
    pub search: SearchDefaults,

    #[serde(default)]
    pub keybindings: Keybindings,
}

/// Initial state of the search form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchDefaults {
    #[serde(default)]
    pub exact: bool,

    #[serde(default)]
    pub handler: HandlerMode,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_start_view() -> String {
    DEFAULT_VIEW.to_string()
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            start_view: default_start_view(),
            assets_dir: None,
            options: DownloadOptions::default(),
            search: SearchDefaults::default(),
            keybindings: Keybindings::default(),
        }
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/anime-earth/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> std::result::Result<PathBuf, io::Error> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("anime-earth");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from `path`, or defaults if there is no file there.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::get_config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Store `options` as the new defaults in the config file.
    ///
    /// Only the `[options]` table changes; the rest of the file is written back
    /// as it was loaded.
    pub fn save_options(options: &DownloadOptions) -> Result<PathBuf> {
        let path = Self::get_config_path()?;
        Self::save_options_to(&path, options)?;
        Ok(path)
    }

    /// Like [`Config::save_options`], for the file at `path`.
    ///
    /// A file that fails to parse is left alone and the error returned.
    pub fn save_options_to(path: &Path, options: &DownloadOptions) -> Result<()> {
        let mut on_disk = Self::load_from(path)?;
        on_disk.options = options.clone();
        on_disk.save_to(path)
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            Self::new().save()?;
        }

        Ok(path)
    }
}

/// Key bindings for the TUI.
///
/// Each action maps to a list of key specs such as `"q"`, `"enter"`, `"up"`
/// or `"ctrl+s"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub quit: Vec<String>,
    pub help: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub toggle_focus: Vec<String>,
    pub save: Vec<String>,
}

fn keys(specs: &[&str]) -> Vec<String> {
    specs.iter().map(|s| s.to_string()).collect()
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            quit: keys(&["q"]),
            help: keys(&["?"]),
            up: keys(&["up", "k"]),
            down: keys(&["down", "j"]),
            left: keys(&["left", "h"]),
            right: keys(&["right", "l"]),
            select: keys(&["enter"]),
            back: keys(&["esc"]),
            toggle_focus: keys(&["tab"]),
            save: keys(&["w"]),
        }
    }
}

impl Keybindings {
    /// Whether `key` matches any of the specs in `binding`.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        binding
            .iter()
            .filter_map(|spec| parse_key_spec(spec))
            .any(|(code, mods)| {
                // Shift is implied by the character itself.
                code == key.code
                    && key.modifiers.contains(mods)
                    && key.modifiers.difference(mods | KeyModifiers::SHIFT).is_empty()
            })
    }
}

/// Parse a key spec like `"ctrl+q"` into a key code and required modifiers.
pub fn parse_key_spec(spec: &str) -> Option<(KeyCode, KeyModifiers)> {
    let spec = spec.trim();
    let mut mods = KeyModifiers::NONE;
    let mut rest = spec;

    loop {
        if let Some(tail) = strip_prefix_ignore_case(rest, "ctrl+") {
            mods |= KeyModifiers::CONTROL;
            rest = tail;
        } else if let Some(tail) = strip_prefix_ignore_case(rest, "alt+") {
            mods |= KeyModifiers::ALT;
            rest = tail;
        } else {
            break;
        }
    }

    let code = match rest.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                // Terminals report ctrl+letter as the lowercase letter.
                (Some(c), None) if mods.contains(KeyModifiers::CONTROL) => {
                    KeyCode::Char(c.to_ascii_lowercase())
                }
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some((code, mods))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Quality;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("anime-earth-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("config.toml")
    }

    #[test]
    fn test_new_config_has_defaults() {
        let config = Config::new();
        assert_eq!(config.start_view, "startup");
        assert!(config.assets_dir.is_none());
        assert_eq!(config.options, DownloadOptions::default());
        assert!(!config.search.exact);
        assert_eq!(config.search.handler, HandlerMode::Simple);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::new();
        config.start_view = "options".to_string();
        config.options.quality = Quality::P1080;
        config.search.handler = HandlerMode::Choice;

        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("start_view = \"options\""));
        assert!(toml_str.contains("quality = \"1080p\""));
        assert!(toml_str.contains("handler = \"choice\""));
    }

    #[test]
    fn test_config_partial_deserialization() {
        let toml_str = r#"
            start_view = "search"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.start_view, "search");
        assert_eq!(config.options.quality, Quality::P720);
        assert_eq!(config.keybindings.quit, vec!["q".to_string()]);
    }

    #[test]
    fn test_keybindings_override() {
        let toml_str = r#"
            [keybindings]
            quit = ["ctrl+x"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        let kb = &config.keybindings;
        assert!(kb.matches(&kb.quit, &key(KeyCode::Char('x'), KeyModifiers::CONTROL)));
        assert!(!kb.matches(&kb.quit, &key(KeyCode::Char('q'), KeyModifiers::NONE)));
        // Untouched bindings keep their defaults.
        assert!(kb.matches(&kb.up, &key(KeyCode::Char('k'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_parse_key_spec() {
        assert_eq!(parse_key_spec("enter"), Some((KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(
            parse_key_spec("Ctrl+Q"),
            Some((KeyCode::Char('q'), KeyModifiers::CONTROL))
        );
        assert_eq!(parse_key_spec("?"), Some((KeyCode::Char('?'), KeyModifiers::NONE)));
        assert_eq!(parse_key_spec("bogus"), None);
    }

    #[test]
    fn test_matches_ignores_shift_for_chars() {
        let kb = Keybindings::default();
        assert!(kb.matches(&kb.help, &key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(!kb.matches(&kb.quit, &key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let path = scratch_file("missing").with_file_name("absent.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.start_view, "startup");
    }

    #[test]
    fn test_save_options_keeps_rest_of_file() {
        let path = scratch_file("save-options");
        fs::write(
            &path,
            "start_view = \"search\"\n\n[keybindings]\nquit = [\"ctrl+x\"]\n",
        )
        .unwrap();

        // Runtime state carrying a command-line assets override
        let mut runtime = Config::load_from(&path).unwrap();
        runtime.assets_dir = Some("/tmp/override".to_string());
        runtime.options.quality = Quality::P1080;

        Config::save_options_to(&path, &runtime.options).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(reloaded.assets_dir.is_none());
        assert_eq!(reloaded.start_view, "search");
        assert_eq!(reloaded.keybindings.quit, vec!["ctrl+x".to_string()]);
        assert_eq!(reloaded.options.quality, Quality::P1080);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_options_refuses_malformed_file() {
        let path = scratch_file("malformed");
        let broken = "start_view = = \"search\"\n";
        fs::write(&path, broken).unwrap();

        let result = Config::save_options_to(&path, &DownloadOptions::default());
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);

        fs::remove_file(&path).unwrap();
    }
}
