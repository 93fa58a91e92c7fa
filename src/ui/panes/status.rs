//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
    pub is_playing: bool,
    /// Whether `message` reports rejected input
    pub is_error: bool,
    /// Prompt and text being typed while in input mode
    pub input: Option<(&'a str, &'a str)>,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let step_text = format!(" Step {}/{} ", data.current_step + 1, data.total_steps);
    let badge_bg = if data.is_error {
        theme.error
    } else if data.input.is_some() {
        theme.secondary
    } else {
        theme.primary
    };

    let sep_style = Style::default()
        .bg(theme.current_line_bg)
        .fg(theme.comment);

    let mut left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", sep_style),
    ];

    if let Some((prompt, text)) = data.input {
        left_spans.push(Span::styled(
            format!(" {}: ", prompt),
            Style::default().bg(theme.current_line_bg).fg(theme.fg),
        ));
        left_spans.push(Span::styled(
            format!("{}▏", text),
            Style::default()
                .bg(theme.current_line_bg)
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        ));
        if data.is_error {
            left_spans.push(Span::styled(
                format!("  {}", data.message),
                Style::default().bg(theme.current_line_bg).fg(theme.error),
            ));
        }
    } else {
        left_spans.push(Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(theme.current_line_bg)
                .fg(if data.is_error { theme.error } else { theme.fg }),
        ));
    }

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(theme.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(theme.comment).fg(Color::Black);
    let desc_style = Style::default().bg(theme.current_line_bg).fg(theme.fg);

    let mut right_spans = if data.input.is_some() {
        vec![
            Span::styled(" ↵ ", key_style),
            Span::styled(" apply ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" esc ", key_style),
            Span::styled(" cancel ", desc_style),
        ]
    } else {
        vec![
            Span::styled(" ←/→ ", key_style),
            Span::styled(" step ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" ⎵ ", key_style),
            Span::styled(" play ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" n ", key_style),
            Span::styled(" input ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" o ", key_style),
            Span::styled(" mode ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled("q", key_style),
            Span::styled(" quit ", desc_style),
        ]
    };

    let is_at_start = data.current_step == 0;
    let is_at_end = data.current_step + 1 >= data.total_steps;
    let badge = if data.input.is_some() {
        Some((" ⌨ INPUT ", theme.secondary))
    } else if data.is_playing {
        Some((" ▶ PLAYING ", theme.secondary))
    } else if is_at_end {
        Some((" END ", theme.error))
    } else if is_at_start {
        Some((" START ", theme.success))
    } else {
        None
    };

    if let Some((text, bg)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(theme.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
