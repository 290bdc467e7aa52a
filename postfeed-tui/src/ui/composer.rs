//! Composer widget with tui-textarea integration
//!
//! Two single-line editors (title and body) plus the submit label. The
//! textareas own cursor and editing state; their contents are mirrored into
//! `AppState` through `TitleChanged`/`BodyChanged` actions.

use crossterm::event::KeyEvent;
use libpostfeed::Draft;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::{Action, AppState, Focus};

const TITLE_PLACEHOLDER: &str = "Post title";
const BODY_PLACEHOLDER: &str = "Post body (Enter or Ctrl+S to add)";

/// Submit label while idle
pub const SUBMIT_LABEL: &str = "Add Post";

/// Submit label while a create request is in flight
pub const POSTING_LABEL: &str = "Adding post";

/// Rows the composer needs: two bordered inputs and the submit line
pub const COMPOSER_HEIGHT: u16 = 7;

/// Stateful composer widget
pub struct ComposerWidget<'a> {
    title: TextArea<'a>,
    body: TextArea<'a>,
}

impl Default for ComposerWidget<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ComposerWidget<'a> {
    /// Create an empty composer
    pub fn new() -> Self {
        Self {
            title: editor(TITLE_PLACEHOLDER, ""),
            body: editor(BODY_PLACEHOLDER, ""),
        }
    }

    /// Current title text
    pub fn title(&self) -> String {
        self.title.lines().join("\n")
    }

    /// Current body text
    pub fn body(&self) -> String {
        self.body.lines().join("\n")
    }

    /// Feed a key to the editor under `focus`
    ///
    /// Returns the change action when the key modified the text. Keys on the
    /// list pane are not consumed.
    pub fn input(&mut self, focus: Focus, key: KeyEvent) -> Option<Action> {
        match focus {
            Focus::Title => self
                .title
                .input(key)
                .then(|| Action::TitleChanged(self.title())),
            Focus::Body => self
                .body
                .input(key)
                .then(|| Action::BodyChanged(self.body())),
            Focus::List => None,
        }
    }

    /// Bring the editors in line with the draft
    ///
    /// Only rebuilds an editor whose text differs, which happens when the
    /// draft is cleared after a successful create.
    pub fn sync(&mut self, draft: &Draft) {
        if self.title() != draft.title {
            self.title = editor(TITLE_PLACEHOLDER, &draft.title);
        }
        if self.body() != draft.body {
            self.body = editor(BODY_PLACEHOLDER, &draft.body);
        }
    }

    /// Render both inputs and the submit label
    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Body
                Constraint::Length(1), // Submit
            ])
            .split(area);

        let posting = state.is_posting();
        style_editor(&mut self.title, " Title ", state.focus == Focus::Title, posting, state);
        style_editor(&mut self.body, " Body ", state.focus == Focus::Body, posting, state);

        frame.render_widget(&self.title, chunks[0]);
        frame.render_widget(&self.body, chunks[1]);
        frame.render_widget(submit_line(state), chunks[2]);
    }
}

fn editor<'a>(placeholder: &str, text: &str) -> TextArea<'a> {
    let mut textarea = if text.is_empty() {
        TextArea::default()
    } else {
        TextArea::new(text.lines().map(str::to_string).collect())
    };
    textarea.set_placeholder_text(placeholder);
    textarea.set_cursor_line_style(Style::default());
    textarea.move_cursor(tui_textarea::CursorMove::End);
    textarea
}

fn style_editor(
    textarea: &mut TextArea<'_>,
    title: &'static str,
    focused: bool,
    posting: bool,
    state: &AppState,
) {
    let border = if !state.config.colors_enabled {
        Style::default()
    } else if posting {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    textarea.set_block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    );

    // Hide the cursor on inactive editors
    let cursor = if focused && !posting {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    textarea.set_cursor_style(cursor);
}

fn submit_line(state: &AppState) -> Paragraph<'static> {
    let (label, style) = if state.is_posting() {
        (format!("[ {} ]", POSTING_LABEL), Style::default().add_modifier(Modifier::DIM))
    } else if state.config.colors_enabled {
        (
            format!("[ {} ]", SUBMIT_LABEL),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        (format!("[ {} ]", SUBMIT_LABEL), Style::default().add_modifier(Modifier::BOLD))
    };

    Paragraph::new(Line::from(vec![
        Span::styled(label, style),
        Span::styled("  Ctrl+S", Style::default().fg(Color::Gray)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_emits_change_actions() {
        let mut composer = ComposerWidget::new();

        let action = composer.input(Focus::Title, key('H'));
        assert!(matches!(action, Some(Action::TitleChanged(ref t)) if t == "H"));

        let action = composer.input(Focus::Body, key('B'));
        assert!(matches!(action, Some(Action::BodyChanged(ref b)) if b == "B"));

        assert!(composer.input(Focus::List, key('x')).is_none());
    }

    #[test]
    fn test_sync_clears_editors() {
        let mut composer = ComposerWidget::new();
        composer.input(Focus::Title, key('H'));
        composer.input(Focus::Body, key('B'));

        composer.sync(&Draft::default());

        assert_eq!(composer.title(), "");
        assert_eq!(composer.body(), "");
    }

    #[test]
    fn test_sync_keeps_matching_text() {
        let mut composer = ComposerWidget::new();
        composer.input(Focus::Title, key('T'));

        composer.sync(&Draft::new("T", ""));

        // Cursor position survives, so typing continues at the end
        composer.input(Focus::Title, key('x'));
        assert_eq!(composer.title(), "Tx");
    }
}
