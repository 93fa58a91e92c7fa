//! Code listing pane with syntax highlighting
//!
//! Renders the fixed listing for the current walkthrough and highlights the
//! lines that correspond to the step under the cursor. Highlighting uses a
//! small character tokenizer that understands JavaScript and Python well
//! enough for the short listings shown here.

use crate::listing::{Language, Listing};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn highlight_source_code<'a>(line: &'a str, language: Language, theme: &Theme) -> Line<'a> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];

        // Line comments
        let is_comment = match language {
            Language::JavaScript => {
                c == '/' && chars.get(i + 1).is_some_and(|&(_, next)| next == '/')
            }
            Language::Python => c == '#',
        };
        if is_comment {
            flush_word(&mut spans, &mut current_word, false, language, theme);
            spans.push(Span::styled(
                &line[byte_idx..],
                Style::default().fg(theme.comment),
            ));
            return Line::from(spans);
        }

        // Strings
        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false, language, theme);
            let quote = c;
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != quote {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            let end_byte = chars.get(end).map_or(line.len(), |&(b, _)| b);
            spans.push(Span::styled(
                &line[byte_idx..end_byte],
                Style::default().fg(theme.string),
            ));
            i = end;
            continue;
        }

        // Delimiters and operators
        if !c.is_alphanumeric() && c != '_' {
            flush_word(&mut spans, &mut current_word, c == '(', language, theme);
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(theme.primary),
                _ => Style::default().fg(theme.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false, language, theme);
    Line::from(spans)
}

fn flush_word(
    spans: &mut Vec<Span<'_>>,
    word: &mut String,
    is_function: bool,
    language: Language,
    theme: &Theme,
) {
    if word.is_empty() {
        return;
    }
    let style = get_keyword_style(word, is_function, language, theme);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_keyword_style(word: &str, is_function: bool, language: Language, theme: &Theme) -> Style {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return Style::default().fg(theme.number);
    }

    let is_keyword = match language {
        Language::JavaScript => matches!(
            word,
            "function" | "const" | "let" | "var" | "for" | "if" | "else" | "return" | "while"
        ),
        Language::Python => matches!(
            word,
            "def" | "for" | "in" | "if" | "else" | "return" | "while" | "import"
        ),
    };
    if is_keyword {
        return Style::default()
            .fg(theme.keyword)
            .add_modifier(Modifier::BOLD);
    }

    match word {
        "Math" | "math" | "range" | "len" | "sorted" => Style::default().fg(theme.type_name),
        _ if is_function => Style::default().fg(theme.function),
        _ => Style::default().fg(theme.fg),
    }
}

/// Render the code listing pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    listing: &Listing,
    highlighted: &[usize],
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
        .title(format!(" {} ", listing.language))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = listing.source.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the first highlighted line on screen
    if let Some(&first) = highlighted.first() {
        let idx = first.saturating_sub(1);
        if idx < *scroll_offset {
            *scroll_offset = idx;
        } else if idx >= *scroll_offset + visible_height {
            *scroll_offset = idx + 1 - visible_height;
        }
    }
    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = highlighted.contains(&line_num);
            let marker = if is_current { "▶" } else { " " };
            let line_num_str = format!("{}{:3} ", marker, line_num);

            let num_style = if is_current {
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.comment)
            };

            let mut content_line = highlight_source_code(line, listing.language, theme);
            if is_current {
                let bg = Style::default().bg(theme.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines)
        .block(block)
        .style(Style::default().bg(theme.bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DARK_THEME;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        for (src, lang) in [
            ("    if (num % i === 0) {", Language::JavaScript),
            ("  return factors.sort((a, b) => a - b); // done", Language::JavaScript),
            ("        if i != num // i:", Language::Python),
            ("    print('√ ok') # note", Language::Python),
        ] {
            let line = highlight_source_code(src, lang, &DARK_THEME);
            assert_eq!(text(&line), src);
        }
    }

    #[test]
    fn test_python_floor_division_is_not_a_comment() {
        let line = highlight_source_code("x = num // i", Language::Python, &DARK_THEME);
        assert!(line
            .spans
            .iter()
            .all(|s| s.style.fg != Some(DARK_THEME.comment)));
    }

    #[test]
    fn test_keywords_are_bold() {
        let line = highlight_source_code("def find_factors(num):", Language::Python, &DARK_THEME);
        assert_eq!(line.spans[0].content, "def");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }
}
