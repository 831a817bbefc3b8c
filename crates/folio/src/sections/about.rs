#![forbid(unsafe_code)]

//! About card with the "Show More" hobbies toggle.

use std::time::Instant;

use folio_runtime::event::{KeyCode, KeyEvent};
use folio_theme::StyleTokens;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use super::{
    HelpEntry, KeyOutcome, RenderContext, Section, SectionId, card, card_height,
    card_inner_width, render_lines,
};
use crate::content::{ABOUT_PARAGRAPHS, HOBBIES, HOBBIES_TITLE};
use crate::widgets::wrap;

#[derive(Debug, Default)]
pub struct AboutSection {
    show_more: bool,
}

impl AboutSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.show_more
    }

    pub fn toggle(&mut self) {
        self.show_more = !self.show_more;
    }

    fn button_label(&self) -> &'static str {
        if self.show_more {
            "[ Show Less ]"
        } else {
            "[ Show More ]"
        }
    }

    fn lines(&self, width: usize, tokens: &StyleTokens, focused: bool) -> Vec<Line<'static>> {
        let width = width.max(1);
        let mut lines = Vec::new();
        for (i, paragraph) in ABOUT_PARAGRAPHS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.extend(
                wrap(paragraph, width)
                    .into_iter()
                    .map(|l| Line::styled(l, tokens.body())),
            );
        }

        if self.show_more {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("\u{2726} {HOBBIES_TITLE}"),
                tokens.title(),
            ));
            for hobby in HOBBIES {
                for (j, part) in wrap(hobby, width.saturating_sub(2).max(1))
                    .into_iter()
                    .enumerate()
                {
                    let bullet = if j == 0 { "\u{2022} " } else { "  " };
                    lines.push(Line::from(vec![
                        Span::styled(bullet, tokens.accent()),
                        Span::styled(part, tokens.body()),
                    ]));
                }
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            self.button_label(),
            tokens.button(focused),
        )));
        lines
    }
}

impl Section for AboutSection {
    fn id(&self) -> SectionId {
        SectionId::About
    }

    fn height(&self, width: u16) -> u16 {
        let tokens = StyleTokens::for_theme(folio_theme::Theme::Light);
        card_height(self.lines(card_inner_width(width), &tokens, false).len())
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = card(SectionId::About.title(), ctx);
        let inner = block.inner(area);
        block.render(area, buf);
        let lines = self.lines(usize::from(inner.width), ctx.tokens, ctx.focused);
        render_lines(&lines, inner, buf);
    }

    fn handle_key(&mut self, key: &KeyEvent, _now: Instant) -> KeyOutcome {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![HelpEntry {
            key: "Enter/Space",
            action: "Show more / less",
        }]
    }
}

#[cfg(test)]
mod tests {
    use folio_theme::Theme;

    use super::*;

    fn render(section: &AboutSection, width: u16) -> String {
        let area = Rect::new(0, 0, width, section.height(width));
        let mut buf = Buffer::empty(area);
        let tokens = StyleTokens::for_theme(Theme::Dark);
        section.render(
            area,
            &mut buf,
            &RenderContext {
                tokens: &tokens,
                focused: true,
            },
        );
        folio_runtime::buffer_to_text(&buf)
    }

    #[test]
    fn collapsed_by_default() {
        let about = AboutSection::new();
        let text = render(&about, 70);
        assert!(text.contains("Show More"));
        assert!(!text.contains(HOBBIES_TITLE));
    }

    #[test]
    fn enter_reveals_hobbies() {
        let mut about = AboutSection::new();
        let collapsed = about.height(70);
        let outcome = about.handle_key(&KeyEvent::from(KeyCode::Enter), Instant::now());
        assert_eq!(outcome, KeyOutcome::Handled);
        assert!(about.is_expanded());
        assert!(about.height(70) > collapsed);

        let text = render(&about, 70);
        assert!(text.contains(HOBBIES_TITLE));
        assert!(text.contains("Reading motivational books"));
        assert!(text.contains("Show Less"));

        about.handle_key(&KeyEvent::from(KeyCode::Char(' ')), Instant::now());
        assert!(!about.is_expanded());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut about = AboutSection::new();
        let outcome = about.handle_key(&KeyEvent::from(KeyCode::Char('x')), Instant::now());
        assert_eq!(outcome, KeyOutcome::Ignored);
    }
}
