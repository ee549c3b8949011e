//! Explorer pane rendering: the indented file tree with selection.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::explorer::FileTree;
use crate::ui::theme::DEFAULT_THEME;

/// Render the file tree pane.
pub fn render_explorer_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &FileTree,
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
        .title(" Explorer ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let nodes = tree.visible_nodes();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the selection inside the visible window.
    if tree.selected < *scroll_offset {
        *scroll_offset = tree.selected;
    } else if tree.selected >= *scroll_offset + visible_height {
        *scroll_offset = tree.selected + 1 - visible_height;
    }
    if nodes.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(nodes.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = nodes
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, node)| {
            let indent = "  ".repeat(node.depth);
            let glyph = if node.is_dir {
                if node.expanded {
                    "▾ "
                } else {
                    "▸ "
                }
            } else {
                "  "
            };
            let name_style = if node.is_dir {
                Style::default().fg(DEFAULT_THEME.directory)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            let mut line = Line::from(vec![
                Span::raw(indent),
                Span::styled(glyph, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(node.name.clone(), name_style),
            ]);
            if idx == tree.selected && is_focused {
                for span in &mut line.spans {
                    span.style = span
                        .style
                        .patch(Style::default().bg(DEFAULT_THEME.current_line_bg));
                }
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
