//! A terminal shell for the Anime Earth downloader.
//!
//! anime-earth presents the downloader's views (Home, Search, Download Options
//! and Settings) in a full-screen TUI with a navigation toolbar. It does not
//! download anything itself: search submissions are handed to a
//! [`search::SearchBackend`], which by default only logs them.
//!
//! # Usage
//!
//! ```bash
//! # Run with default settings
//! cargo run
//!
//! # Open the search view directly
//! cargo run -- --view search
//! ```

pub mod assets;
pub mod config;
pub mod context;
pub mod error;
pub mod navigation;
pub mod options;
pub mod search;
pub mod tui;
