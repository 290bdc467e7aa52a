//! UI rendering
//!
//! Rendering functions that transform state into terminal frames.
//! Apart from the composer's editors, which carry cursor state, nothing
//! here mutates anything.

pub mod composer;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Focus};
use composer::{ComposerWidget, COMPOSER_HEIGHT};

/// Static list header
pub const LIST_HEADER: &str = "POST LIST";

/// Text under the full-screen spinner
pub const LOADING_TEXT: &str = "loading ...";

const SPINNER_UNICODE: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_ASCII: &[&str] = &["|", "/", "-", "\\"];

/// Render the application UI
///
/// This is the main rendering entry point.
pub fn render(frame: &mut Frame, state: &AppState, composer: &mut ComposerWidget) {
    let area = frame.size();

    if state.initial_loading() {
        render_loading(frame, area, state);
    } else {
        render_feed_screen(frame, area, state, composer);
    }

    if state.help_visible {
        render_help_overlay(frame, area);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error);
    }
}

/// Current spinner frame for the tick counter
pub fn spinner_frame(state: &AppState) -> &'static str {
    let frames = if state.config.unicode_enabled {
        SPINNER_UNICODE
    } else {
        SPINNER_ASCII
    };
    frames[(state.tick % frames.len() as u64) as usize]
}

/// Full-screen spinner shown until the first list request settles
fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let style = if state.config.colors_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let text = vec![
        Line::from(Span::styled(spinner_frame(state), style)),
        Line::from(""),
        Line::from(LOADING_TEXT),
    ];

    let loading = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(loading, chunks[1]);
}

/// Composer on top, post list below, status bar at the bottom
fn render_feed_screen(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    composer: &mut ComposerWidget,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(COMPOSER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    composer.render(frame, chunks[0], state);
    render_post_list(frame, chunks[1], state);
    render_status_bar(frame, chunks[2], state);
}

/// Render the post list with header, separators and refresh indicator
fn render_post_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let colors = state.config.colors_enabled;

    let mut title = vec![Span::styled(
        format!(" {} ", LIST_HEADER),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if state.is_refreshing() {
        title.push(Span::styled(
            format!("{} refreshing ", spinner_frame(state)),
            if colors {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            },
        ));
    }

    let border = if colors && state.focus == Focus::List {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border);

    if state.feed.posts.is_empty() {
        let empty = Paragraph::new("No posts. Press Ctrl+R to refresh.")
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    // Inner width, minus the highlight symbol
    let width = area.width.saturating_sub(4) as usize;
    let separator = if state.config.unicode_enabled { "─" } else { "-" }.repeat(width);

    let last = state.feed.posts.len() - 1;
    let items: Vec<ListItem> = state
        .feed
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let mut lines = vec![Line::from(Span::styled(
                post.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            lines.extend(post.body.lines().map(|line| Line::from(line.to_string())));
            if i < last {
                lines.push(Line::from(Span::styled(
                    separator.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let highlight = if colors {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.feed.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render status bar with the last message or key hints
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = match state.status.message {
        Some(ref message) => Paragraph::new(message.as_str()).style(if state.config.colors_enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        }),
        None => {
            let hints = match state.focus {
                Focus::List => "Tab: Compose | Up/Down: Select | Ctrl+R: Refresh | F1: Help | q: Quit",
                _ => "Tab: Next field | Ctrl+S: Add post | Ctrl+R: Refresh | F1: Help | Ctrl+C: Quit",
            };
            Paragraph::new(hints).style(Style::default().fg(Color::Gray))
        }
    };

    frame.render_widget(status, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  Ctrl+C       - Quit"),
        Line::from("  F1           - Toggle help"),
        Line::from("  Ctrl+R, F5   - Refresh list"),
        Line::from("  Esc          - Dismiss overlays"),
        Line::from(""),
        Line::from("Composer:"),
        Line::from("  Tab          - Next field"),
        Line::from("  Shift+Tab    - Previous field"),
        Line::from("  Ctrl+S       - Add post"),
        Line::from("  Enter (body) - Add post"),
        Line::from(""),
        Line::from("List:"),
        Line::from("  Up/k Down/j  - Move selection"),
        Line::from("  q            - Quit"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area); // Clear background
    frame.render_widget(help, popup_area);
}

/// Render error overlay
fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

/// Helper to create centered rectangle
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{reduce, Action, ListKind};
    use libpostfeed::Post;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut composer = ComposerWidget::new();

        terminal
            .draw(|frame| render(frame, state, &mut composer))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    fn loaded(posts: Vec<Post>) -> AppState {
        let state = reduce(
            AppState::new(),
            Action::ListStarted {
                request_id: 1,
                kind: ListKind::Initial,
            },
        );
        reduce(state, Action::PostsLoaded { request_id: 1, posts })
    }

    #[test]
    fn test_loading_screen_shows_only_spinner() {
        let screen = draw(&AppState::new());

        assert!(screen.contains(LOADING_TEXT));
        assert!(!screen.contains(LIST_HEADER));
        assert!(!screen.contains("Add Post"));
    }

    #[test]
    fn test_feed_screen_shows_header_posts_and_submit() {
        let state = loaded(vec![Post::new(1, "First title", "First body")]);
        let screen = draw(&state);

        assert!(screen.contains(LIST_HEADER));
        assert!(screen.contains("First title"));
        assert!(screen.contains("First body"));
        assert!(screen.contains("Add Post"));
        assert!(!screen.contains(LOADING_TEXT));
    }

    #[test]
    fn test_posting_label() {
        let state = loaded(vec![]);
        let state = reduce(
            state,
            Action::PostStarted {
                request_id: "req".to_string(),
            },
        );
        let screen = draw(&state);

        assert!(screen.contains("[ Adding post ]"));
        assert!(!screen.contains("Adding post..."));
    }

    #[test]
    fn test_post_body_shows_every_line() {
        let state = loaded(vec![
            Post::new(1, "Multi", "first line\nsecond line\nthird line"),
            Post::new(2, "Next", "after"),
        ]);
        let screen = draw(&state);

        assert!(screen.contains("first line"));
        assert!(screen.contains("second line"));
        assert!(screen.contains("third line"));
        assert!(screen.contains("after"));
    }

    #[test]
    fn test_refresh_indicator() {
        let state = loaded(vec![Post::new(1, "A", "X")]);
        let state = reduce(
            state,
            Action::ListStarted {
                request_id: 2,
                kind: ListKind::Refresh,
            },
        );
        let screen = draw(&state);

        assert!(screen.contains("refreshing"));
        assert!(screen.contains("A"));
    }

    #[test]
    fn test_error_overlay() {
        let mut state = loaded(vec![]);
        state.error = Some("boom happened".to_string());
        let screen = draw(&state);

        assert!(screen.contains("boom happened"));
        assert!(screen.contains("Press Esc to dismiss"));
    }

    #[test]
    fn test_ascii_spinner_without_unicode() {
        let mut state = AppState::new();
        state.config.unicode_enabled = false;
        assert_eq!(spinner_frame(&state), "|");

        let state = reduce(state, Action::Tick);
        assert_eq!(spinner_frame(&state), "/");
    }
}
