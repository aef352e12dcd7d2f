//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::state::App;
use super::types::Focus;
use crate::assets::LOGO_IMAGE;
use crate::navigation::ViewKind;
use crate::options::OptionField;
use crate::search::{ContentKind, HandlerMode, SearchField};

const ACCENT: Color = Color::Rgb(13, 115, 119);

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content (toolbar + main)
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, app, chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // Toolbar (fixed width)
            Constraint::Min(0),     // Main content
        ])
        .split(chunks[1]);

    draw_toolbar(frame, app, content_chunks[0]);

    match app.current_kind() {
        ViewKind::Startup => draw_startup(frame, app, content_chunks[1]),
        ViewKind::Search => draw_search(frame, app, content_chunks[1]),
        ViewKind::Options => draw_options(frame, app, content_chunks[1]),
        ViewKind::Settings => draw_settings(frame, content_chunks[1]),
    }

    draw_footer(frame, app, chunks[2]);

    if let Some(error) = &app.error_message {
        draw_error_popup(frame, error);
    }

    if app.show_help {
        draw_help_modal(frame);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.ctx.navigator().current_view();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Anime Earth",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", view.title), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", app.search.content_kind.label()),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_toolbar(frame: &mut Frame, app: &mut App, area: Rect) {
    let navigator = app.ctx.navigator();
    let items: Vec<ListItem> = navigator
        .registry()
        .iter()
        .enumerate()
        .map(|(i, view)| ListItem::new(format!("{} {}", i + 1, view.title)))
        .collect();

    // Keep the highlight on the active view even if it was changed elsewhere.
    let active = navigator.registry().position(navigator.current());
    app.toolbar_state.select(active);

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Navigate")
                .border_style(focus_style(app.focus == Focus::Toolbar)),
        )
        .highlight_style(
            Style::default()
                .bg(ACCENT)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.toolbar_state);
}

fn draw_startup(frame: &mut Frame, app: &App, area: Rect) {
    let assets = app.ctx.assets();
    let logo = if assets.image_exists(LOGO_IMAGE) {
        Line::from(Span::styled(
            format!("[logo: {}]", assets.resolve_image(LOGO_IMAGE).display()),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            "ANIME EARTH",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
    };

    let button = |kind: ContentKind| {
        let style = if app.startup_choice == kind {
            Style::default()
                .bg(ACCENT)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Span::styled(format!("  {}  ", kind.label()), style)
    };

    let text = vec![
        Line::from(""),
        logo,
        Line::from(""),
        Line::from("Choose Your Destiny"),
        Line::from(""),
        Line::from(vec![
            button(ContentKind::Anime),
            Span::raw("    "),
            button(ContentKind::Animation),
        ]),
    ];

    let startup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Home")
                .border_style(focus_style(app.focus == Focus::Main)),
        );

    frame.render_widget(startup, area);
}

fn radio_lines<'a>(labels: &[&'a str], selected: usize) -> Vec<Line<'a>> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("(*) {}", label),
                    Style::default().fg(Color::Cyan),
                ))
            } else {
                Line::from(format!("( ) {}", label))
            }
        })
        .collect()
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Term
            Constraint::Min(0),    // Options
        ])
        .split(area);

    let main_focused = app.focus == Focus::Main;
    let field_style = |field: SearchField| focus_style(main_focused && app.search_field == field);

    let input_text = if app.search.input.is_empty() && !app.is_editing_text() {
        "e.g., Attack on Titan Season 3, Demon Slayer..."
    } else {
        app.search.input.as_str()
    };
    let input = Paragraph::new(input_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Enter the name of the anime or animation")
            .border_style(field_style(SearchField::Term)),
    );
    frame.render_widget(input, chunks[0]);

    if app.is_editing_text() {
        // Keep the cursor inside the input borders
        let inner_width = chunks[0].width.saturating_sub(2) as usize;
        let offset = app.search.input.chars().count().min(inner_width) as u16;
        frame.set_cursor_position((
            chunks[0].x.saturating_add(offset).saturating_add(1),
            chunks[0].y.saturating_add(1),
        ));
    }

    let groups = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let mut exact_lines = vec![Line::from(Span::styled(
        "Is the name exact? (Season and all, word for word)",
        Style::default().fg(Color::DarkGray),
    ))];
    exact_lines.extend(radio_lines(
        &["Yes - Exact match", "No - Fuzzy search"],
        if app.search.exact { 0 } else { 1 },
    ));
    let exact = Paragraph::new(exact_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Name Matching")
            .border_style(field_style(SearchField::Exact)),
    );
    frame.render_widget(exact, groups[0]);

    let labels: Vec<&str> = HandlerMode::ALL.iter().map(|m| m.label()).collect();
    let selected = HandlerMode::ALL
        .iter()
        .position(|m| *m == app.search.handler_mode)
        .unwrap_or(0);
    let handler = Paragraph::new(radio_lines(&labels, selected)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search Handler")
            .border_style(field_style(SearchField::Handler)),
    );
    frame.render_widget(handler, groups[1]);
}

fn draw_options(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut cells = Vec::new();
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        cells.extend(cols.iter().copied());
    }

    for (field, cell) in OptionField::ALL.iter().zip(cells) {
        let focused = app.focus == Focus::Main && app.option_field == *field;
        let (labels, selected) = app.options.choices(*field);

        let mut lines = Vec::new();
        if *field == OptionField::FolderName {
            lines.push(Line::from(Span::styled(
                "Use the default folder name as shown on the website?",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.extend(radio_lines(&labels, selected));

        let group = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(field.title())
                .border_style(focus_style(focused)),
        );
        frame.render_widget(group, cell);
    }
}

fn draw_settings(frame: &mut Frame, area: Rect) {
    let settings = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Settings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Settings panel coming soon!",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Settings"));

    frame.render_widget(settings, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status_message {
        let footer = Paragraph::new(status.as_str())
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
        return;
    }

    let help_text = if app.focus == Focus::Toolbar {
        "[↑↓] switch view  [Enter] open  [Tab] main  [?] help  [q] quit"
    } else if app.is_editing_text() {
        "[Enter] search  [↑↓] field  [Esc] clear  [Tab] toolbar"
    } else {
        match app.current_kind() {
            ViewKind::Startup => "[←→] choose  [Enter] select  [1-4] views  [Tab] toolbar  [?] help  [q] quit",
            ViewKind::Search => "[↑↓] field  [←→] change  [Enter] search  [Tab] toolbar  [?] help  [q] quit",
            ViewKind::Options => "[↑↓] group  [←→] change  [w] save defaults  [Tab] toolbar  [?] help  [q] quit",
            ViewKind::Settings => "[1-4] views  [Tab] toolbar  [?] help  [q] quit",
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_error_popup(frame: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(popup, area);
}

fn draw_help_modal(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let help = Paragraph::new(
        "Navigation\n\
        - 1-4: Jump to Home, Search, Download Options, Settings\n\
        - Tab: Switch between toolbar and view\n\
        - Up/Down in toolbar: Previous/next view\n\n\
        Search\n\
        - Type a name and press Enter to search\n\
        - Up/Down: Move between fields\n\
        - Left/Right/Space: Change exact match and handler\n\n\
        Download Options\n\
        - Up/Down: Move between groups\n\
        - Left/Right: Change selection\n\
        - w: Save as defaults\n\n\
        Press Esc or ? to close",
    )
    .wrap(Wrap { trim: false })
    .block(Block::default().borders(Borders::ALL).title("Help"));

    frame.render_widget(help, area);
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
