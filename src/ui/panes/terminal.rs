//! Terminal pane rendering: scrollback plus the live prompt and input line.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

use crate::shell::TerminalSession;
use crate::ui::theme::DEFAULT_THEME;

/// Render the terminal pane.
///
/// While the session is awaiting input the prompt and the in-progress input
/// line are shown after the scrollback; while a command runs, only output
/// (including any unterminated partial line) is shown.
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    session: &TerminalSession,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Terminal ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let mut lines: Vec<Line> = session
        .lines()
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(DEFAULT_THEME.fg))))
        .collect();

    let live_row = lines.len();
    let mut live_col = 0usize;
    if session.is_running() {
        if !session.partial_line().is_empty() {
            lines.push(Line::from(Span::styled(
                session.partial_line().to_string(),
                Style::default().fg(DEFAULT_THEME.fg),
            )));
        }
    } else {
        live_col = session.prompt().chars().count() + session.input.chars().count();
        lines.push(Line::from(vec![
            Span::styled(
                session.prompt().to_string(),
                Style::default().fg(DEFAULT_THEME.primary),
            ),
            Span::styled(
                session.input.clone(),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
        ]));
    }

    let total = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // usize::MAX means "stick to the bottom".
    if total > visible_height {
        let max_scroll = total - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);

    // Place the hardware cursor at the end of the input line.
    if is_focused && !session.is_running() && live_row >= *scroll_offset {
        let y = area.y + 1 + (live_row - *scroll_offset) as u16;
        let x = area.x + 2 + live_col.min(u16::MAX as usize) as u16;
        if y < area.y + area.height.saturating_sub(1) && x < area.x + area.width {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}
