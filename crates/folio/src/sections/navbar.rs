#![forbid(unsafe_code)]

//! Pinned navigation bar with the scroll-progress gauge.

use folio_theme::{Role, StyleTokens};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use super::SectionId;
use crate::content::OWNER;

/// Rows taken by the bar.
pub const NAVBAR_HEIGHT: u16 = 2;

/// Jump key, label and target of each nav link.
pub const NAV_LINKS: [(char, &str, SectionId); 4] = [
    ('1', "Home", SectionId::Header),
    ('2', "About", SectionId::About),
    ('3', "Projects", SectionId::Projects),
    ('4', "Contact", SectionId::Contact),
];

/// Nav target bound to a digit key.
pub fn link_for_key(key: char) -> Option<SectionId> {
    NAV_LINKS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, _, id)| *id)
}

pub struct NavBar<'a> {
    tokens: &'a StyleTokens,
    active: Option<SectionId>,
    progress: f64,
}

impl<'a> NavBar<'a> {
    pub fn new(tokens: &'a StyleTokens) -> Self {
        Self {
            tokens,
            active: None,
            progress: 0.0,
        }
    }

    /// Highlight the link for `section`.
    pub fn active(mut self, section: Option<SectionId>) -> Self {
        self.active = section;
        self
    }

    /// Scroll progress in percent.
    pub fn progress(mut self, progress: f64) -> Self {
        self.progress = progress.clamp(0.0, 100.0);
        self
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let tokens = self.tokens;
        let nav = tokens.nav();
        buf.set_style(area, nav);

        let mut spans = vec![
            Span::styled(format!(" {OWNER} "), nav.add_modifier(Modifier::BOLD)),
            Span::styled(" ", nav),
        ];
        for (key, label, id) in NAV_LINKS {
            let style = if self.active == Some(id) {
                tokens.nav_active()
            } else {
                nav
            };
            spans.push(Span::styled(format!(" {key} {label} "), style));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let percent = format!(" {:>3.0}% ", self.progress);
        let theme = format!("Theme: {}{percent}", tokens.theme().label());
        let theme_width = theme.chars().count() as u16;
        if theme_width < area.width {
            buf.set_string(area.right() - theme_width, area.y, theme, nav);
        }

        if area.height > 1 {
            let width = usize::from(area.width);
            let filled = ((self.progress / 100.0) * width as f64).round() as usize;
            let filled = filled.min(width);
            let bg = tokens.color(Role::NavBg);
            let gauge = Line::from(vec![
                Span::styled("\u{2501}".repeat(filled), tokens.progress_fill().bg(bg)),
                Span::styled(
                    "\u{2500}".repeat(width - filled),
                    tokens.progress_track().bg(bg),
                ),
            ]);
            buf.set_line(area.x, area.y + 1, &gauge, area.width);
        }
    }
}
