//! Narration pane: descriptions of every step up to the cursor

use crate::steps::StepRecord;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the narration pane.
///
/// `records` is the full walkthrough; only steps up to `position` are shown,
/// the current one emphasized. `scroll_offset` is clamped so that
/// `usize::MAX` pins the view to the newest line.
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    records: &[&dyn StepRecord],
    position: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_normal)
    };

    let block = Block::default()
        .title(" Narration ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if records.is_empty() {
        let paragraph = Paragraph::new("(no steps)")
            .block(block)
            .style(Style::default().fg(theme.comment).bg(theme.bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let shown = (position + 1).min(records.len());
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = clamp_scroll(*scroll_offset, shown, visible_height);

    let visible_items: Vec<ListItem> = records[..shown]
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, record)| {
            let is_current = i == position;
            let tag_style = if is_current {
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.comment)
            };
            let text_style = if is_current {
                Style::default()
                    .fg(theme.fg)
                    .bg(theme.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.comment)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3} {:<10}", i + 1, record.stage_tag()), tag_style),
                Span::styled(record.description().to_string(), text_style),
            ]))
        })
        .collect();

    let list = List::new(visible_items)
        .block(block)
        .style(Style::default().bg(theme.bg));
    frame.render_widget(list, area);
}

/// Largest valid offset for `total` lines in a view `height` lines tall
fn clamp_scroll(offset: usize, total: usize, height: usize) -> usize {
    offset.min(total.saturating_sub(height))
}
