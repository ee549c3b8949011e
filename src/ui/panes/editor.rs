//! Editor pane rendering: the tab strip and the active editing surface.
//!
//! The pane uses a simple character-by-character tokenizer to apply
//! best-effort syntax highlighting keyed on the tab's detected language;
//! anything unrecognized renders as plain text.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::editor::{EditorTabs, Language};
use crate::ui::theme::DEFAULT_THEME;

/// Highlight one line of source for `language`.
fn highlight_line(line: &str, language: Language) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let comment = language.line_comment();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(leader) = comment {
            let rest: String = chars[i..].iter().collect();
            if rest.starts_with(leader) {
                if !current_word.is_empty() {
                    spans.push(styled_word(current_word.clone(), language, false));
                    current_word.clear();
                }
                spans.push(Span::styled(
                    rest,
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
                break;
            }
        }

        // Strings (double or single quoted)
        if c == '"' || c == '\'' {
            if !current_word.is_empty() {
                spans.push(styled_word(current_word.clone(), language, false));
                current_word.clear();
            }
            let quote = c;
            let mut end = i + 1;
            while end < chars.len() && chars[end] != quote {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            if end < chars.len() {
                end += 1;
            }
            let text: String = chars[i..end.min(chars.len())].iter().collect();
            spans.push(Span::styled(
                text,
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Delimiters end the current word
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let is_func = c == '(';
                spans.push(styled_word(current_word.clone(), language, is_func));
                current_word.clear();
            }
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        spans.push(styled_word(current_word, language, false));
    }

    Line::from(spans)
}

fn styled_word(word: String, language: Language, is_function: bool) -> Span<'static> {
    let style = if language.keywords().contains(&word.as_str()) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if language.types().contains(&word.as_str()) {
        Style::default().fg(DEFAULT_THEME.type_name)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else if is_function {
        Style::default().fg(DEFAULT_THEME.secondary)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    Span::styled(word, style)
}

/// Render the tab strip and the active buffer.
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    tabs: &EditorTabs,
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
        .title(" Editor ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if tabs.is_empty() {
        let hint = Paragraph::new("(no open files — Ctrl+N for a new file, Enter in the explorer to open one)")
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(hint, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    render_tab_strip(frame, rows[0], tabs);
    render_buffer(frame, rows[1], tabs, is_focused, scroll_offset);
}

fn render_tab_strip(frame: &mut Frame, area: Rect, tabs: &EditorTabs) {
    let titles: Vec<Line> = tabs
        .tabs()
        .iter()
        .map(|tab| {
            let marker = if tab.buffer.is_modified() { " ●" } else { "" };
            Line::from(vec![
                Span::raw(tab.title.clone()),
                Span::styled(
                    marker.to_string(),
                    Style::default().fg(DEFAULT_THEME.modified),
                ),
            ])
        })
        .collect();

    let strip = Tabs::new(titles)
        .select(tabs.active_index().unwrap_or(0))
        .style(Style::default().fg(DEFAULT_THEME.comment))
        .highlight_style(
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    frame.render_widget(strip, area);
}

fn render_buffer(
    frame: &mut Frame,
    area: Rect,
    tabs: &EditorTabs,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let Some(tab) = tabs.active_tab() else {
        return;
    };
    let buffer = &tab.buffer;
    let (cursor_row, cursor_col) = buffer.cursor();
    let total_lines = buffer.line_count();
    let visible_height = area.height.max(1) as usize;

    // Keep the cursor inside the visible window.
    if cursor_row < *scroll_offset {
        *scroll_offset = cursor_row;
    } else if cursor_row >= *scroll_offset + visible_height {
        *scroll_offset = cursor_row + 1 - visible_height;
    }
    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let selection = buffer.selection();

    let visible_lines: Vec<Line> = buffer
        .lines()
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = idx == cursor_row;
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(line, tab.language);

            let in_selection = selection
                .map(|((sr, _), (er, _))| idx >= sr && idx <= er)
                .unwrap_or(false);
            if is_current && is_focused {
                for span in &mut content.spans {
                    span.style = span
                        .style
                        .patch(Style::default().bg(DEFAULT_THEME.current_line_bg));
                }
            } else if in_selection {
                for span in &mut content.spans {
                    span.style = span
                        .style
                        .patch(Style::default().bg(DEFAULT_THEME.current_line_bg));
                }
            }

            let mut spans = vec![Span::styled(format!("{:>4} ", idx + 1), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines);
    frame.render_widget(paragraph, area);

    if is_focused {
        let cursor_x = area.x + 5 + cursor_col.min(u16::MAX as usize) as u16;
        let cursor_y = area.y + (cursor_row - *scroll_offset) as u16;
        if cursor_x < area.x + area.width && cursor_y < area.y + area.height {
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }
}
