#![forbid(unsafe_code)]

//! Profile card: initials avatar, title and bio.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::Widget;

use super::{RenderContext, Section, SectionId, card, card_height, card_inner_width, render_lines};
use crate::content::{INITIALS, PROFILE_BIO, PROFILE_TITLE};
use crate::widgets::wrap;

const AVATAR_WIDTH: usize = 8;
const AVATAR_HEIGHT: usize = 3;
/// Below this inner width the avatar sits above the text.
const STACK_BELOW: usize = 40;

#[derive(Debug, Default)]
pub struct ProfileSection;

impl ProfileSection {
    pub fn new() -> Self {
        Self
    }

    fn text_width(inner: usize) -> usize {
        if inner < STACK_BELOW {
            inner.max(1)
        } else {
            inner - AVATAR_WIDTH - 2
        }
    }

    fn text_lines(inner: usize) -> Vec<String> {
        let mut lines = vec![PROFILE_TITLE.to_owned()];
        lines.extend(wrap(PROFILE_BIO, Self::text_width(inner)));
        lines
    }
}

impl Section for ProfileSection {
    fn id(&self) -> SectionId {
        SectionId::Profile
    }

    fn height(&self, width: u16) -> u16 {
        let inner = card_inner_width(width);
        let text = Self::text_lines(inner).len();
        let rows = if inner < STACK_BELOW {
            AVATAR_HEIGHT + 1 + text
        } else {
            AVATAR_HEIGHT.max(text)
        };
        card_height(rows)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let block = card("Profile", ctx);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let stacked = usize::from(inner.width) < STACK_BELOW;
        let avatar = Rect::new(
            inner.x,
            inner.y,
            (AVATAR_WIDTH as u16).min(inner.width),
            (AVATAR_HEIGHT as u16).min(inner.height),
        );
        buf.set_style(avatar, tokens.header());
        let initials = Line::styled(INITIALS, tokens.header().add_modifier(Modifier::BOLD));
        super::render_centered(&initials, avatar, avatar.y + avatar.height / 2, buf);

        let text_area = if stacked {
            let top = (AVATAR_HEIGHT as u16 + 1).min(inner.height);
            Rect::new(inner.x, inner.y + top, inner.width, inner.height - top)
        } else {
            let left = AVATAR_WIDTH as u16 + 2;
            Rect::new(inner.x + left, inner.y, inner.width - left, inner.height)
        };

        let mut lines = Vec::new();
        for (i, text) in Self::text_lines(usize::from(inner.width))
            .into_iter()
            .enumerate()
        {
            let style = if i == 0 { tokens.title() } else { tokens.body() };
            lines.push(Line::styled(text, style));
        }
        render_lines(&lines, text_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use folio_theme::{StyleTokens, Theme};

    use super::*;

    fn render(width: u16) -> String {
        let section = ProfileSection::new();
        let area = Rect::new(0, 0, width, section.height(width));
        let mut buf = Buffer::empty(area);
        let tokens = StyleTokens::for_theme(Theme::Ocean);
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
    fn wide_layout_puts_avatar_beside_text() {
        let text = render(80);
        let first = text.lines().nth(1).unwrap();
        assert!(first.contains(PROFILE_TITLE));
        assert!(text.contains(INITIALS));
        assert!(text.contains("Afghanistan"));
    }

    #[test]
    fn narrow_layout_stacks() {
        let text = render(30);
        let title_row = text.lines().position(|l| l.contains(PROFILE_TITLE)).unwrap();
        let avatar_row = text.lines().position(|l| l.contains(INITIALS)).unwrap();
        assert!(avatar_row < title_row);
        assert!(text.contains("easier."));
    }
}
