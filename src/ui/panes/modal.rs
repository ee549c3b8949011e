//! Modal overlay rendering: errors, warnings, confirmations and prompts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::app::Modal;
use crate::ui::theme::DEFAULT_THEME;

/// Render the active modal centered over the whole frame.
pub fn render_modal(frame: &mut Frame, area: Rect, modal: &Modal) {
    let (title, body, border, footer) = match modal {
        Modal::Error(message) => (
            " Error ",
            message.clone(),
            DEFAULT_THEME.error,
            "Enter/Esc to dismiss",
        ),
        Modal::Warning(message) => (
            " Warning ",
            message.clone(),
            DEFAULT_THEME.secondary,
            "Enter/Esc to dismiss",
        ),
        Modal::About => (
            " About ",
            format!(
                "ride {}\n\nA terminal IDE: tabbed editor, file explorer,\nand an embedded shell.\n\n\
                 File   ^N new  ^S save  ^W close tab  ^Q quit\n\
                 Edit   ^Z undo  ^Y redo  ^X cut  ^C copy  ^V paste  ^A all\n\
                 View   ^B explorer  ^T terminal\n\
                 Run    F5 run current file",
                env!("CARGO_PKG_VERSION")
            ),
            DEFAULT_THEME.primary,
            "Enter/Esc to dismiss",
        ),
        Modal::ConfirmDelete(path) => (
            " Delete ",
            format!("Are you sure you want to delete {}?", path.display()),
            DEFAULT_THEME.error,
            "y to delete · n/Esc to cancel",
        ),
        Modal::SaveAsPrompt { input } => (
            " Save As ",
            input.clone(),
            DEFAULT_THEME.primary,
            "Enter to save · Esc to cancel",
        ),
        Modal::RenamePrompt { input, .. } => (
            " Rename ",
            input.clone(),
            DEFAULT_THEME.primary,
            "Enter to rename · Esc to cancel",
        ),
    };

    let rect = centered_rect(area, 60, &body);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", footer),
            Style::default().fg(DEFAULT_THEME.comment),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).add_modifier(Modifier::BOLD));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let paragraph = Paragraph::new(body.clone())
        .style(Style::default().fg(DEFAULT_THEME.fg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    // Text-entry modals get a visible cursor at the end of the input.
    if matches!(modal, Modal::SaveAsPrompt { .. } | Modal::RenamePrompt { .. }) {
        let x = inner.x + (body.chars().count() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

/// A centered rect wide enough for prompts, tall enough for `body`.
fn centered_rect(area: Rect, percent_x: u16, body: &str) -> Rect {
    let body_lines = body.lines().count().max(1) as u16 + 2;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(body_lines.min(area.height)),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
