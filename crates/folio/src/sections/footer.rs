#![forbid(unsafe_code)]

//! Footer band: social links, copyright and credits.

use folio_theme::Role;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use super::{RenderContext, Section, SectionId, render_centered};
use crate::content::{BUILT_WITH, SOCIAL_LINKS, copyright};

pub struct FooterSection {
    year: i32,
}

impl FooterSection {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl Section for FooterSection {
    fn id(&self) -> SectionId {
        SectionId::Footer
    }

    fn height(&self, _width: u16) -> u16 {
        // padding, links, gap, copyright, credits, padding
        (1 + SOCIAL_LINKS.len() + 1 + 2 + 1) as u16
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let style = tokens.nav();
        buf.set_style(area, style);

        let mut y = area.y + 1;
        for link in SOCIAL_LINKS {
            let line = Line::from(vec![
                Span::styled(format!("{}: ", link.label), style),
                Span::styled(link.url, tokens.link().bg(tokens.color(Role::NavBg))),
            ]);
            render_centered(&line, area, y, buf);
            y += 1;
        }
        y += 1;
        render_centered(&Line::styled(copyright(self.year), style), area, y, buf);
        render_centered(&Line::styled(BUILT_WITH, style), area, y + 1, buf);
    }

    fn full_width(&self) -> bool {
        true
    }
}
