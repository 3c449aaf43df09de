//! Small widget helpers shared by the wizard steps.
//!
//! Everything here builds ratatui values from plain data, the renderer decides where
//! they go.

use crate::app::TextInput;
use crate::config::Theme;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rounded block with the step title, used as the frame of every step body.
pub fn step_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style())
        .title(Span::styled(format!(" {title} "), theme.title_style()))
        .padding(Padding::horizontal(1))
}

/// "Label: value" on one line, label in the accent colour.
pub fn labelled_line(
    label: &str,
    value: impl Into<String>,
    value_style: Style,
    theme: &Theme,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label} "), theme.accent_style()),
        Span::styled(value.into(), value_style),
    ])
}

/// A dim help line.
pub fn hint_line(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), theme.help_style()))
}

/// Renders a text field with its cursor as a reversed cell.
///
/// `prefix` is drawn before the field (a prompt or "> "). The field scrolls horizontally
/// so the cursor stays visible inside `width` columns.
pub fn input_line(prefix: &str, input: &TextInput, width: usize, theme: &Theme) -> Line<'static> {
    let available = width.saturating_sub(prefix.width());
    let (before, at, after) = input_field_view(input, available);

    let cursor_style = theme.accent_style().add_modifier(Modifier::REVERSED);
    Line::from(vec![
        Span::styled(prefix.to_string(), theme.accent_style()),
        Span::raw(before),
        Span::styled(at, cursor_style),
        Span::raw(after),
    ])
}

/// Splits a text field into the visible text before the cursor, the cell under it and
/// the visible text after it.
///
/// Text before the cursor is dropped from the left until the cursor cell fits, text after
/// it is cut at the right edge.
fn input_field_view(input: &TextInput, width: usize) -> (String, String, String) {
    let (head, tail) = input.split_at_cursor();
    let mut tail_chars = tail.chars();
    let at = tail_chars.next().unwrap_or(' ');
    let rest: String = tail_chars.collect();

    let at_width = at.width().unwrap_or(1).max(1);
    if width < at_width {
        return (String::new(), String::new(), String::new());
    }

    let head_room = width - at_width;
    let mut head_width = head.width();
    let mut head_start = 0;
    if head_width > head_room {
        for (idx, c) in head.char_indices() {
            if head_width <= head_room {
                head_start = idx;
                break;
            }
            head_width -= c.width().unwrap_or(0);
            head_start = idx + c.len_utf8();
        }
    }
    let visible_head = head[head_start..].to_string();

    let mut room = width - at_width - head_width.min(head_room);
    let mut visible_rest = String::new();
    for c in rest.chars() {
        let w = c.width().unwrap_or(0);
        if w > room {
            break;
        }
        room -= w;
        visible_rest.push(c);
    }

    (visible_head, at.to_string(), visible_rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(value: &str, cursor_from_end: usize) -> TextInput {
        let mut input = TextInput::new(value);
        for _ in 0..cursor_from_end {
            input.left();
        }
        input
    }

    #[test]
    fn short_input_is_shown_whole() {
        let (before, at, after) = input_field_view(&field("index", 0), 20);
        assert_eq!((before.as_str(), at.as_str(), after.as_str()), ("index", " ", ""));

        let (before, at, after) = input_field_view(&field("index", 2), 20);
        assert_eq!((before.as_str(), at.as_str(), after.as_str()), ("ind", "e", "x"));
    }

    #[test]
    fn long_input_keeps_cursor_visible() {
        let (before, at, after) = input_field_view(&field("abcdefghij", 0), 5);
        assert_eq!(before, "ghij");
        assert_eq!(at, " ");
        assert!(after.is_empty());

        let mut input = field("abcdefghij", 0);
        input.home();
        let (before, at, after) = input_field_view(&input, 5);
        assert!(before.is_empty());
        assert_eq!(at, "a");
        assert_eq!(after, "bcde");
    }

    #[test]
    fn zero_width_draws_nothing() {
        let (before, at, after) = input_field_view(&field("abc", 1), 0);
        assert!(before.is_empty() && at.is_empty() && after.is_empty());
    }
}
