#![forbid(unsafe_code)]

//! Page sections.
//!
//! Each section owns its local state and its timers. The app stacks them
//! vertically into one tall page, asks each for its height at the current
//! width, and renders them with an explicit [`RenderContext`] carrying the
//! theme's [`StyleTokens`].

pub mod about;
pub mod contact;
pub mod feedback_wall;
pub mod footer;
pub mod header;
pub mod navbar;
pub mod profile;
pub mod projects;
pub mod skills;
pub mod updates;

use std::time::Instant;

use folio_runtime::event::KeyEvent;
use folio_theme::StyleTokens;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding};

pub use about::AboutSection;
pub use contact::ContactSection;
pub use feedback_wall::FeedbackWall;
pub use footer::FooterSection;
pub use header::HeaderSection;
pub use profile::ProfileSection;
pub use projects::ProjectsSection;
pub use skills::SkillsSection;
pub use updates::UpdatesSection;

/// Sections in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Header,
    Profile,
    About,
    Skills,
    Projects,
    Contact,
    Feedback,
    Updates,
    Footer,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        Self::Header,
        Self::Profile,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Contact,
        Self::Feedback,
        Self::Updates,
        Self::Footer,
    ];

    /// Sections reachable with Tab, in focus order.
    pub const FOCUSABLE: [SectionId; 4] =
        [Self::About, Self::Projects, Self::Contact, Self::Feedback];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Header => "Home",
            Self::Profile => "Profile",
            Self::About => "About Me",
            Self::Skills => "Skills",
            Self::Projects => "My Projects",
            Self::Contact => "Contact Me",
            Self::Feedback => "Feedback Wall",
            Self::Updates => "Project Updates",
            Self::Footer => "Footer",
        }
    }
}

/// Everything a section needs to draw itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub tokens: &'a StyleTokens,
    /// The section owns keyboard focus.
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled,
}

/// A single help overlay row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    pub key: &'static str,
    pub action: &'static str,
}

pub trait Section {
    fn id(&self) -> SectionId;

    /// Rows needed at `width`.
    fn height(&self, width: u16) -> u16;

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>);

    /// Handle a key while this section has focus.
    fn handle_key(&mut self, _key: &KeyEvent, _now: Instant) -> KeyOutcome {
        KeyOutcome::Ignored
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        Vec::new()
    }

    /// When focused, plain characters go to the section instead of page
    /// shortcuts.
    fn captures_text(&self) -> bool {
        false
    }

    /// Poll owned timers. Returns whether anything visible changed.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    /// Whether any owned timer is pending.
    fn timers_armed(&self) -> bool {
        false
    }

    /// Cancel owned timers; called when the page is torn down.
    fn unmount(&mut self) {}

    /// Header and footer span the whole terminal width.
    fn full_width(&self) -> bool {
        false
    }
}

/// Rounded card with the section title in the top border.
pub(crate) fn card<'a>(title: &'a str, ctx: &RenderContext<'_>) -> Block<'a> {
    let tokens = ctx.tokens;
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(tokens.card_border(ctx.focused))
        .title(Line::styled(format!(" {title} "), tokens.title()))
        .padding(Padding::horizontal(1))
        .style(tokens.card())
}

/// Columns left for content inside a [`card`].
pub(crate) fn card_inner_width(width: u16) -> usize {
    usize::from(width.saturating_sub(4))
}

/// Rows a [`card`] needs around `inner` content rows.
pub(crate) fn card_height(inner: usize) -> u16 {
    u16::try_from(inner + 2).unwrap_or(u16::MAX)
}

/// Draw `lines` top to bottom, clipped to `area`.
pub(crate) fn render_lines(lines: &[Line<'_>], area: Rect, buf: &mut Buffer) {
    for (row, line) in lines.iter().take(usize::from(area.height)).enumerate() {
        buf.set_line(area.x, area.y + row as u16, line, area.width);
    }
}

/// Draw `line` horizontally centered on row `y` of `area`.
pub(crate) fn render_centered(line: &Line<'_>, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.bottom() {
        return;
    }
    let width = u16::try_from(line.width()).unwrap_or(u16::MAX).min(area.width);
    let x = area.x + (area.width - width) / 2;
    buf.set_line(x, y, line, width);
}

/// Star string for a 1..=5 rating.
pub(crate) fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(5 - filled))
}
