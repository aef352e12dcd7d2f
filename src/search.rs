//! Search form state and the hand-off to the search engine.
//!
//! No search or download engine ships with anime-earth. A submission is packaged
//! into its three fields and passed to a [`SearchBackend`]; the default backend
//! just logs them.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search algorithm variant requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerMode {
    /// Basic search, fastest
    #[default]
    Simple,
    /// Advanced search with filtering
    Complex,
    /// Interactive selection from results
    Choice,
}

impl HandlerMode {
    pub const ALL: [HandlerMode; 3] = [
        HandlerMode::Simple,
        HandlerMode::Complex,
        HandlerMode::Choice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerMode::Simple => "simple",
            HandlerMode::Complex => "complex",
            HandlerMode::Choice => "choice",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HandlerMode::Simple => "Simple (Fast)",
            HandlerMode::Complex => "Complex (Thorough)",
            HandlerMode::Choice => "Choice (Interactive)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            HandlerMode::Simple => HandlerMode::Complex,
            HandlerMode::Complex => HandlerMode::Choice,
            HandlerMode::Choice => HandlerMode::Simple,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            HandlerMode::Simple => HandlerMode::Choice,
            HandlerMode::Complex => HandlerMode::Simple,
            HandlerMode::Choice => HandlerMode::Complex,
        }
    }
}

impl fmt::Display for HandlerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(HandlerMode::Simple),
            "complex" => Ok(HandlerMode::Complex),
            "choice" => Ok(HandlerMode::Choice),
            other => Err(format!("Unknown handler mode '{}'", other)),
        }
    }
}

/// Kind of content picked on the startup view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    #[default]
    Anime,
    Animation,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Anime => "Anime",
            ContentKind::Animation => "Animation",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ContentKind::Anime => ContentKind::Animation,
            ContentKind::Animation => ContentKind::Anime,
        }
    }
}

/// A validated search submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub exact: bool,
    pub handler_mode: HandlerMode,
}

impl SearchRequest {
    /// Build a request, or `None` if the trimmed term is empty.
    pub fn new(term: &str, exact: bool, handler_mode: HandlerMode) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            term: term.to_string(),
            exact,
            handler_mode,
        })
    }
}

/// The external search/download engine.
pub trait SearchBackend {
    fn submit_search(&mut self, term: &str, exact: bool, handler_mode: &str);
}

/// Backend that only logs what it was asked to search for.
#[derive(Debug, Default)]
pub struct LogSearchBackend;

impl SearchBackend for LogSearchBackend {
    fn submit_search(&mut self, term: &str, exact: bool, handler_mode: &str) {
        info!(
            "Search requested: term='{}' exact={} handler={}",
            term, exact, handler_mode
        );
    }
}

/// Fields of the search form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Term,
    Exact,
    Handler,
}

impl SearchField {
    pub fn next(self) -> Self {
        match self {
            SearchField::Term => SearchField::Exact,
            SearchField::Exact => SearchField::Handler,
            SearchField::Handler => SearchField::Term,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SearchField::Term => SearchField::Handler,
            SearchField::Exact => SearchField::Term,
            SearchField::Handler => SearchField::Exact,
        }
    }
}

/// State of the search view.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    /// Raw text typed into the name field
    pub input: String,
    /// Exact name match instead of fuzzy search
    pub exact: bool,
    pub handler_mode: HandlerMode,
    pub content_kind: ContentKind,
}

impl SearchForm {
    pub fn new(exact: bool, handler_mode: HandlerMode) -> Self {
        Self {
            exact,
            handler_mode,
            ..Self::default()
        }
    }

    /// The current term with surrounding whitespace removed.
    pub fn search_term(&self) -> &str {
        self.input.trim()
    }

    pub fn is_exact_match(&self) -> bool {
        self.exact
    }

    pub fn handler_mode(&self) -> HandlerMode {
        self.handler_mode
    }

    pub fn request(&self) -> Option<SearchRequest> {
        SearchRequest::new(&self.input, self.exact, self.handler_mode)
    }

    /// Hand the form to `backend`. Returns false, without calling the backend,
    /// when the term is empty.
    pub fn submit(&self, backend: &mut dyn SearchBackend) -> bool {
        match self.request() {
            Some(request) => {
                backend.submit_search(&request.term, request.exact, request.handler_mode.as_str());
                true
            }
            None => {
                debug!("Dropping search with empty term");
                false
            }
        }
    }
}
