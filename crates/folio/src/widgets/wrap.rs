#![forbid(unsafe_code)]

//! Word wrapping with a grapheme fallback for words wider than a line.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wrap `text` into lines at most `width` cells wide.
///
/// Runs of whitespace collapse to one space. Explicit newlines start a new
/// line; an empty paragraph yields an empty line. A zero width returns the
/// text unchanged.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_owned()];
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let before = lines.len();
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };
            if needed <= width {
                if !line.is_empty() {
                    line.push(' ');
                    line_width += 1;
                }
                line.push_str(word);
                line_width += word_width;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }
            for grapheme in word.graphemes(true) {
                let g_width = display_width(grapheme);
                if line_width + g_width > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push_str(grapheme);
                line_width += g_width;
            }
        }

        if !line.is_empty() || lines.len() == before {
            lines.push(line);
        }
    }
    lines
}

/// Number of lines [`wrap`] produces.
pub fn wrapped_height(text: &str, width: usize) -> usize {
    wrap(text, width).len()
}
