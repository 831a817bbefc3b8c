#![forbid(unsafe_code)]

//! Single-line editable text with a grapheme cursor.

use folio_runtime::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;

use super::wrap::display_width;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in graphemes.
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.set_value(value);
        field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value and put the cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.grapheme_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn byte_offset(&self, grapheme: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        // A combining mark may merge into the previous grapheme.
        let before = self.value[..at + c.len_utf8()].graphemes(true).count();
        self.cursor = before;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    /// Apply an editing key. Returns `true` when the value changed.
    ///
    /// Cursor movement is consumed but reports no change; keys the field does
    /// not understand are left to the caller.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<bool> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                Some(true)
            }
            KeyCode::Backspace => Some(self.backspace()),
            KeyCode::Delete => Some(self.delete()),
            KeyCode::Left => {
                self.move_left();
                Some(false)
            }
            KeyCode::Right => {
                self.move_right();
                Some(false)
            }
            KeyCode::Home => {
                self.cursor = 0;
                Some(false)
            }
            KeyCode::End => {
                self.cursor = self.grapheme_count();
                Some(false)
            }
            _ => None,
        }
    }

    /// Value split around the cursor grapheme: (before, at, after).
    fn split_at_cursor(&self) -> (&str, &str, &str) {
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        (
            &self.value[..start],
            &self.value[start..end],
            &self.value[end..],
        )
    }

    /// Render on one row, scrolled so the cursor stays visible.
    pub fn render(&self, area: Rect, buf: &mut Buffer, style: Style, focused: bool) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, style);
        let width = usize::from(area.width);
        let (before, at, after) = self.split_at_cursor();

        // Drop leading graphemes until the cursor cell fits.
        let mut head = before;
        while display_width(head) + 1 > width {
            let Some((idx, _)) = head.grapheme_indices(true).nth(1) else {
                head = "";
                break;
            };
            head = &head[idx..];
        }

        let mut spans = vec![Span::styled(head, style)];
        if focused {
            let cursor = if at.is_empty() { " " } else { at };
            spans.push(Span::styled(cursor, style.add_modifier(Modifier::REVERSED)));
        } else {
            spans.push(Span::styled(at, style));
        }
        spans.push(Span::styled(after, style));
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
