//! Download options collected by the options view.
//!
//! Every group is a plain enum, so exactly one choice is always selected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferred video quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "1080p")]
    P1080,
    #[default]
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "360p")]
    P360,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::P1080, Quality::P720, Quality::P480, Quality::P360];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quality::P1080 => "1080p (Full HD)",
            Quality::P720 => "720p (HD) - Recommended",
            Quality::P480 => "480p (SD)",
            Quality::P360 => "360p (Low)",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// Audio and subtitle preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Dubbed,
    #[default]
    Subbed,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Dubbed, Language::Subbed, Language::Chinese];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Dubbed => "dubbed",
            Language::Subbed => "subbed",
            Language::Chinese => "chinese",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Dubbed => "Dubbed (English Audio)",
            Language::Subbed => "Subbed (Original Audio + Subtitles)",
            Language::Chinese => "Chinese (Mandarin)",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// Which episodes to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeMode {
    #[default]
    All,
    Range,
}

impl EpisodeMode {
    pub const ALL: [EpisodeMode; 2] = [EpisodeMode::All, EpisodeMode::Range];

    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeMode::All => "all",
            EpisodeMode::Range => "range",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EpisodeMode::All => "Download All Episodes",
            EpisodeMode::Range => "Download Specific Range",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Quality, Language, EpisodeMode);

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(pos + step) % all.len()]
}

/// The option groups of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionField {
    #[default]
    Quality,
    Language,
    Episodes,
    FolderName,
}

impl OptionField {
    pub const ALL: [OptionField; 4] = [
        OptionField::Quality,
        OptionField::Language,
        OptionField::Episodes,
        OptionField::FolderName,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            OptionField::Quality => "Video Quality",
            OptionField::Language => "Audio & Subtitles",
            OptionField::Episodes => "Episode Selection",
            OptionField::FolderName => "Folder Naming",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// User download preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    #[serde(default)]
    pub quality: Quality,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub episodes: EpisodeMode,

    /// Use the folder name shown on the website instead of a custom one
    #[serde(default = "default_folder_name")]
    pub use_default_folder_name: bool,
}

fn default_folder_name() -> bool {
    true
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            language: Language::default(),
            episodes: EpisodeMode::default(),
            use_default_folder_name: default_folder_name(),
        }
    }
}

impl DownloadOptions {
    pub fn selected_quality(&self) -> Quality {
        self.quality
    }

    pub fn selected_language(&self) -> Language {
        self.language
    }

    pub fn episode_mode(&self) -> EpisodeMode {
        self.episodes
    }

    pub fn use_default_folder_name(&self) -> bool {
        self.use_default_folder_name
    }

    /// Move the choice of `field` forward, or backward when `forward` is false.
    pub fn cycle(&mut self, field: OptionField, forward: bool) {
        match field {
            OptionField::Quality => {
                self.quality = if forward {
                    self.quality.next()
                } else {
                    self.quality.previous()
                }
            }
            OptionField::Language => {
                self.language = if forward {
                    self.language.next()
                } else {
                    self.language.previous()
                }
            }
            OptionField::Episodes => {
                self.episodes = if forward {
                    self.episodes.next()
                } else {
                    self.episodes.previous()
                }
            }
            OptionField::FolderName => self.use_default_folder_name = !self.use_default_folder_name,
        }
    }

    /// Labels of the choices in `field` and the index of the selected one.
    pub fn choices(&self, field: OptionField) -> (Vec<&'static str>, usize) {
        match field {
            OptionField::Quality => (
                Quality::ALL.iter().map(|q| q.label()).collect(),
                Quality::ALL.iter().position(|q| *q == self.quality).unwrap_or(0),
            ),
            OptionField::Language => (
                Language::ALL.iter().map(|l| l.label()).collect(),
                Language::ALL.iter().position(|l| *l == self.language).unwrap_or(0),
            ),
            OptionField::Episodes => (
                EpisodeMode::ALL.iter().map(|e| e.label()).collect(),
                EpisodeMode::ALL.iter().position(|e| *e == self.episodes).unwrap_or(0),
            ),
            OptionField::FolderName => (
                vec!["Yes - Use default name", "No - I'll specify a custom name"],
                if self.use_default_folder_name { 0 } else { 1 },
            ),
        }
    }
}
