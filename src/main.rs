//! Main entry point for the anime-earth application.

use anime_earth::config::Config;
use anime_earth::context::ApplicationContext;
use anime_earth::search::LogSearchBackend;
use anime_earth::tui::{Action, App, draw, poll_event};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::Duration;

/// Command-line arguments for the anime-earth application.
#[derive(Parser, Debug)]
#[command(
    name = "anime-earth",
    version,
    about = "Anime Earth downloader shell",
    long_about = "Browse the Anime Earth views, fill in search and download options from a TUI."
)]
struct Args {
    /// View to open at start-up: startup, search, options or settings
    #[arg(short, long)]
    view: Option<String>,

    /// Directory holding bundled images
    #[arg(short, long)]
    assets_dir: Option<String>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write a default config file if none exists, print its path and exit
    #[arg(long)]
    init_config: bool,
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Log level set to {:?}", log_level);

    if args.init_config {
        let path = Config::create_default_if_missing()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Load config
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    let mut ctx = ApplicationContext::new(config, Box::new(LogSearchBackend))?;

    // CLI args apply to this run only and are never saved
    if let Some(dir) = &args.assets_dir {
        ctx.set_assets_dir(dir);
    }

    if let Some(view) = &args.view {
        if let Err(e) = ctx.navigator_mut().switch_to(view) {
            warn!("{}. Staying on '{}'.", e, ctx.navigator().current());
        }
    }

    info!("Assets directory: {}", ctx.assets().dir().display());

    let mut app = App::new(ctx);
    let mut terminal = init_terminal()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    restore_terminal()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            // Clear messages from the previous action
            app.clear_error();
            app.status_message = None;

            let action = app.handle_input(key);

            match action {
                Action::Quit => break,
                Action::SaveOptions => {
                    app.store_options();
                    match Config::save_options(&app.options) {
                        Ok(path) => app.set_status(&format!("Options saved to {}", path.display())),
                        Err(e) => app.set_error(&e.to_string()),
                    }
                }
                Action::Navigate(_) | Action::Search | Action::None => app.apply(&action),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
