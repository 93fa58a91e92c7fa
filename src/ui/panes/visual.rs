//! Visual pane: the derived picture for the current step
//!
//! - **Factors**: the number, the divisor under test, the division equation,
//!   the factors found so far (new ones marked) and scan progress
//! - **Find max**: the array as a row of cells with the compared index and the
//!   running maximum marked

use crate::playback::session::Walkthrough;
use crate::steps::factors::{FactorStage, FactorStep};
use crate::steps::find_max::{MaxStage, MaxStep};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the visual pane for whichever walkthrough is active
pub fn render_visual_pane(
    frame: &mut Frame,
    area: Rect,
    walkthrough: &Walkthrough,
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

    let content_width = area.width.saturating_sub(2) as usize;

    let (title, lines) = match walkthrough {
        Walkthrough::Factors { timeline, .. } => (
            " Factors ",
            timeline
                .current()
                .map(|step| factor_lines(step, content_width, theme))
                .unwrap_or_default(),
        ),
        Walkthrough::FindMax { timeline, .. } => (
            " Array ",
            timeline
                .current()
                .map(|step| max_lines(step, content_width, theme))
                .unwrap_or_default(),
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_items = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().bg(theme.bg));
    frame.render_widget(list, area);
}

fn label(text: &str, theme: &Theme) -> Span<'static> {
    Span::styled(format!("{:<10}", text), Style::default().fg(theme.comment))
}

fn factor_lines(step: &FactorStep, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        label("Number", theme),
        Span::styled(
            step.number.to_string(),
            Style::default()
                .fg(theme.number)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        label("Mode", theme),
        Span::styled(
            if step.optimized {
                format!("optimized (up to √{} ≈ {})", step.number, step.display_limit())
            } else {
                format!("naive (up to {})", step.display_limit())
            },
            Style::default().fg(theme.fg),
        ),
    ]));
    lines.push(Line::from(vec![
        label("Divisor", theme),
        match step.current_divisor {
            Some(d) => Span::styled(d.to_string(), Style::default().fg(theme.secondary)),
            None => Span::styled("-", Style::default().fg(theme.comment)),
        },
    ]));

    // Division equation once it has been evaluated
    let equation = match (step.current_divisor, step.quotient, step.remainder) {
        (Some(d), Some(q), Some(r)) => {
            let color = if r == 0 { theme.success } else { theme.error };
            Span::styled(
                format!("{} ÷ {} = {} r {}", step.number, d, q, r),
                Style::default().fg(color),
            )
        }
        _ => Span::styled("-", Style::default().fg(theme.comment)),
    };
    lines.push(Line::from(vec![label("Division", theme), equation]));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![Span::styled(
        format!("Factors ({})", step.factors.len()),
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    )]));
    if step.factors.is_empty() {
        lines.push(Line::from(Span::styled(
            "(none yet)",
            Style::default().fg(theme.comment),
        )));
    } else {
        lines.extend(chip_rows(step, width, theme));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        label("Progress", theme),
        Span::styled(
            progress_bar(step, width.saturating_sub(10)),
            Style::default().fg(theme.secondary),
        ),
    ]));

    if step.stage == FactorStage::Result {
        lines.push(Line::from(Span::styled(
            "Done",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines
}

/// Lay the factors out as `[n]` chips, wrapping at `width`
fn chip_rows(step: &FactorStep, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for &factor in &step.factors {
        let chip = format!("[{}]", factor);
        let chip_width = chip.chars().count() + 1;
        if used > 0 && used + chip_width > width.max(1) {
            rows.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        let style = if step.is_new(factor) && step.stage == FactorStage::Found {
            Style::default()
                .fg(Color::Black)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.success)
        };
        current.push(Span::styled(chip, style));
        current.push(Span::raw(" "));
        used += chip_width;
    }
    if !current.is_empty() {
        rows.push(Line::from(current));
    }
    rows
}

/// Text progress bar of the divisor against the displayed bound
fn progress_bar(step: &FactorStep, width: usize) -> String {
    let limit = step.display_limit().max(1);
    let done = match (step.stage, step.current_divisor) {
        (FactorStage::Result, _) => limit,
        (_, Some(d)) => d.min(limit),
        _ => 0,
    };
    let bar_width = width.saturating_sub(12).clamp(1, 40);
    let filled = (done as usize * bar_width) / limit as usize;
    format!(
        "{}{} {}/{}",
        "█".repeat(filled),
        "░".repeat(bar_width - filled),
        done,
        limit
    )
}

fn max_lines(step: &MaxStep, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let cell_width = step
        .values
        .iter()
        .map(|v| v.to_string().chars().count())
        .max()
        .unwrap_or(1)
        + 2;
    let per_row = (width / (cell_width + 1)).max(1);

    for (row_start, chunk) in step.values.chunks(per_row).enumerate() {
        let base = row_start * per_row;
        let mut cells = Vec::new();
        let mut indices = Vec::new();
        for (offset, value) in chunk.iter().enumerate() {
            let i = base + offset;
            let is_compared = step.index == Some(i);
            let is_max = step.max_index == i;
            let style = if is_compared && step.updated {
                Style::default()
                    .fg(Color::Black)
                    .bg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else if is_compared {
                Style::default().fg(Color::Black).bg(theme.secondary)
            } else if is_max {
                Style::default()
                    .fg(Color::Black)
                    .bg(theme.success)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg).bg(theme.current_line_bg)
            };
            cells.push(Span::styled(
                format!("{:^w$}", value, w = cell_width),
                style,
            ));
            cells.push(Span::raw(" "));
            indices.push(Span::styled(
                format!("{:^w$} ", i, w = cell_width),
                Style::default().fg(theme.comment),
            ));
        }
        lines.push(Line::from(cells));
        lines.push(Line::from(indices));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        label("Max", theme),
        Span::styled(
            format!("{} (index {})", step.current_max, step.max_index),
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        label("Compare", theme),
        match step.index {
            Some(i) => Span::styled(
                format!("arr[{}] = {}", i, step.values[i]),
                Style::default().fg(theme.secondary),
            ),
            None => Span::styled("-", Style::default().fg(theme.comment)),
        },
    ]));

    if step.stage == MaxStage::Complete {
        lines.push(Line::from(Span::styled(
            "Done",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines
}
