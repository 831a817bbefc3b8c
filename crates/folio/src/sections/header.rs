#![forbid(unsafe_code)]

//! Hero band: name, welcome message and the typed-out quote.

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;

use super::{RenderContext, Section, SectionId, render_centered};
use crate::content::{HEADER_MESSAGE, OWNER};
use crate::typewriter::Typewriter;
use crate::widgets::wrap;

pub struct HeaderSection {
    typewriter: Typewriter,
}

impl HeaderSection {
    pub fn new(quote: &str) -> Self {
        Self {
            typewriter: Typewriter::new(quote),
        }
    }

    /// Begin typing the quote.
    pub fn start(&mut self, now: Instant) {
        self.typewriter.start(now);
    }

    pub fn quote(&self) -> &str {
        self.typewriter.full_text()
    }

    pub fn visible_quote(&self) -> &str {
        self.typewriter.visible()
    }

    fn text_width(width: u16) -> usize {
        usize::from(width.saturating_sub(4)).max(1)
    }

    fn quote_lines(&self, text: &str, width: u16) -> Vec<String> {
        wrap(&format!("\u{201c}{text}\u{201d}"), Self::text_width(width))
    }
}

impl Section for HeaderSection {
    fn id(&self) -> SectionId {
        SectionId::Header
    }

    fn height(&self, width: u16) -> u16 {
        let message = wrap(HEADER_MESSAGE, Self::text_width(width)).len();
        let quote = self.quote_lines(self.quote(), width).len();
        // padding, name, gap, message, gap, quote, padding
        u16::try_from(2 + 1 + 1 + message + 1 + quote + 2).unwrap_or(u16::MAX)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let style = tokens.header();
        buf.set_style(area, style);

        let mut y = area.y + 2;
        let name = Line::styled(OWNER, style.add_modifier(Modifier::BOLD));
        render_centered(&name, area, y, buf);
        y += 2;

        for line in wrap(HEADER_MESSAGE, Self::text_width(area.width)) {
            render_centered(&Line::styled(line, style), area, y, buf);
            y += 1;
        }
        y += 1;

        // Lay the partial quote out on the full quote's lines so the text
        // does not jump while typing.
        let full = self.quote_lines(self.quote(), area.width);
        let mut remaining = if self.typewriter.is_done() {
            usize::MAX
        } else {
            self.visible_quote().chars().count() + 1
        };
        let quote_style = style.add_modifier(Modifier::ITALIC);
        for line in full {
            let shown: String = line.chars().take(remaining).collect();
            remaining = remaining.saturating_sub(line.chars().count() + 1);
            let pad = line.chars().count() - shown.chars().count();
            let padded = format!("{shown}{}", " ".repeat(pad));
            render_centered(&Line::styled(padded, quote_style), area, y, buf);
            y += 1;
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.typewriter.poll(now)
    }

    fn timers_armed(&self) -> bool {
        self.typewriter.is_running()
    }

    fn unmount(&mut self) {
        self.typewriter.cancel();
    }

    fn full_width(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_theme::{StyleTokens, Theme};

    use super::*;

    fn render_text(section: &HeaderSection, width: u16) -> String {
        let height = section.height(width);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let tokens = StyleTokens::for_theme(Theme::Light);
        section.render(
            area,
            &mut buf,
            &RenderContext {
                tokens: &tokens,
                focused: false,
            },
        );
        folio_runtime::buffer_to_text(&buf)
    }

    #[test]
    fn quote_types_out_then_stops() {
        let t0 = Instant::now();
        let mut header = HeaderSection::new("Dream big, code bigger.");
        header.start(t0);
        assert!(header.timers_armed());
        assert!(header.tick(t0 + Duration::from_millis(250)));
        assert_eq!(header.visible_quote(), "Dream");
        header.tick(t0 + Duration::from_secs(5));
        assert_eq!(header.visible_quote(), "Dream big, code bigger.");
        assert!(!header.timers_armed());
    }

    #[test]
    fn renders_name_message_and_quote() {
        let t0 = Instant::now();
        let mut header = HeaderSection::new("Dream big, code bigger.");
        header.start(t0);
        header.tick(t0 + Duration::from_secs(5));
        let text = render_text(&header, 60);
        assert!(text.contains(OWNER));
        assert!(text.contains(HEADER_MESSAGE));
        assert!(text.contains("\u{201c}Dream big, code bigger.\u{201d}"));
    }

    #[test]
    fn partial_quote_is_shown_while_typing() {
        let t0 = Instant::now();
        let mut header = HeaderSection::new("Dream big, code bigger.");
        header.start(t0);
        header.tick(t0 + Duration::from_millis(250));
        let text = render_text(&header, 60);
        assert!(text.contains("\u{201c}Dream"));
        assert!(!text.contains("bigger"));
    }

    #[test]
    fn height_is_stable_while_typing() {
        let t0 = Instant::now();
        let mut header = HeaderSection::new("The best way to predict the future is to create it.");
        let before = header.height(30);
        header.start(t0);
        header.tick(t0 + Duration::from_millis(100));
        assert_eq!(header.height(30), before);
    }

    #[test]
    fn unmount_cancels_typing() {
        let t0 = Instant::now();
        let mut header = HeaderSection::new("abc");
        header.start(t0);
        header.unmount();
        assert!(!header.timers_armed());
        assert!(!header.tick(t0 + Duration::from_secs(1)));
    }
}
