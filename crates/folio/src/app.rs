#![forbid(unsafe_code)]

//! The portfolio page as a single [`Model`].
//!
//! Sections are stacked into one tall page laid out at the terminal width.
//! The page is drawn into an off-screen buffer and the rows under the scroll
//! offset are copied between the pinned navbar and the status line.
//!
//! # Controls
//!
//! - Tab / Shift-Tab: focus the next / previous interactive section
//! - Esc: back to page scrolling
//! - j/k, arrows, PgUp/PgDn, Home/End, mouse wheel: scroll
//! - 1-4: jump to a nav link
//! - t / Ctrl+T: cycle theme
//! - u: pause or resume project updates
//! - ?: help overlay
//! - q / Ctrl+C: quit

use std::cell::Cell;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use folio_runtime::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use folio_runtime::{Cmd, Every, Model, SharedStorage, SubId, Subscription};
use folio_theme::{StyleTokens, Theme};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Widget};

use crate::catalog::ProjectCatalog;
use crate::content::QUOTES;
use crate::sections::navbar::{NAVBAR_HEIGHT, NAV_LINKS, NavBar, link_for_key};
use crate::sections::{
    AboutSection, ContactSection, FeedbackWall, FooterSection, HeaderSection, HelpEntry,
    KeyOutcome, ProfileSection, ProjectsSection, RenderContext, Section, SectionId,
    SkillsSection, UpdatesSection,
};
use crate::scroll::ScrollState;
use crate::theme_store::ThemeStore;

/// Tick rate while any section timer is pending.
pub const HEARTBEAT: Duration = Duration::from_millis(50);
pub const HEARTBEAT_ID: SubId = 0x466f_6c69_6f54_6b;

/// Widest the content column gets; header and footer ignore it.
const CONTENT_MAX_WIDTH: u16 = 96;
const SECTION_GAP: usize = 1;
const WHEEL_LINES: isize = 3;
/// Terminal size assumed until the first frame is drawn.
const FALLBACK_VIEWPORT: (u16, u16) = (80, 24);

const GLOBAL_HELP: [HelpEntry; 10] = [
    HelpEntry {
        key: "Tab/Shift-Tab",
        action: "Focus next / previous section",
    },
    HelpEntry {
        key: "Esc",
        action: "Back to page scrolling",
    },
    HelpEntry {
        key: "j/k \u{2191}/\u{2193}",
        action: "Scroll",
    },
    HelpEntry {
        key: "PgUp/PgDn",
        action: "Scroll a page",
    },
    HelpEntry {
        key: "Home/End",
        action: "Top / bottom",
    },
    HelpEntry {
        key: "1-4",
        action: "Jump to section",
    },
    HelpEntry {
        key: "t, Ctrl+T",
        action: "Cycle theme",
    },
    HelpEntry {
        key: "u",
        action: "Pause / resume updates",
    },
    HelpEntry {
        key: "?",
        action: "Toggle help",
    },
    HelpEntry {
        key: "q, Ctrl+C",
        action: "Quit",
    },
];

/// Top-level application message.
#[derive(Debug, Clone)]
pub enum Msg {
    Event(Event),
    /// Heartbeat carrying the time section timers are polled against.
    Tick(Instant),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Startup knobs that are not persisted.
#[derive(Debug, Clone, Copy)]
pub struct PortfolioOptions {
    /// Seeds the quote pick and the update ticker.
    pub seed: u64,
    /// Year shown in the footer copyright.
    pub year: i32,
}

impl PortfolioOptions {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            year: Local::now().year(),
        }
    }
}

/// Where a section sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    id: SectionId,
    top: usize,
    x: u16,
    width: u16,
    height: u16,
}

pub struct Portfolio {
    theme: ThemeStore,
    header: HeaderSection,
    profile: ProfileSection,
    about: AboutSection,
    skills: SkillsSection,
    projects: ProjectsSection,
    contact: ContactSection,
    feedback: FeedbackWall,
    updates: UpdatesSection,
    footer: FooterSection,
    focus: Option<SectionId>,
    scroll: ScrollState,
    show_help: bool,
    /// Size of the last drawn frame.
    viewport: Cell<(u16, u16)>,
}

impl Portfolio {
    pub fn new(storage: SharedStorage, options: PortfolioOptions) -> Self {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let quote = QUOTES.choose(&mut rng).copied().unwrap_or(QUOTES[0]);
        let ticker_seed: u64 = rng.random();
        Self {
            theme: ThemeStore::load(storage.clone()),
            header: HeaderSection::new(quote),
            profile: ProfileSection::new(),
            about: AboutSection::new(),
            skills: SkillsSection::new(),
            projects: ProjectsSection::new(ProjectCatalog::builtin()),
            contact: ContactSection::new(storage),
            feedback: FeedbackWall::new(),
            updates: UpdatesSection::new(ticker_seed),
            footer: FooterSection::new(options.year),
            focus: None,
            scroll: ScrollState::new(),
            show_help: false,
            viewport: Cell::new(FALLBACK_VIEWPORT),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn focus(&self) -> Option<SectionId> {
        self.focus
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Scroll progress in percent, as shown in the navbar.
    pub fn progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    pub fn header(&self) -> &HeaderSection {
        &self.header
    }

    pub fn about(&self) -> &AboutSection {
        &self.about
    }

    pub fn projects(&self) -> &ProjectsSection {
        &self.projects
    }

    pub fn contact(&self) -> &ContactSection {
        &self.contact
    }

    pub fn feedback(&self) -> &FeedbackWall {
        &self.feedback
    }

    pub fn updates(&self) -> &UpdatesSection {
        &self.updates
    }

    /// Page rows between the navbar and the status line.
    fn page_area(area: Rect) -> Rect {
        let top = NAVBAR_HEIGHT.min(area.height);
        let height = area.height.saturating_sub(NAVBAR_HEIGHT + 1);
        Rect::new(area.x, area.y + top, area.width, height)
    }

    fn sections(&self) -> [&dyn Section; 9] {
        [
            &self.header,
            &self.profile,
            &self.about,
            &self.skills,
            &self.projects,
            &self.contact,
            &self.feedback,
            &self.updates,
            &self.footer,
        ]
    }

    fn sections_mut(&mut self) -> [&mut dyn Section; 9] {
        [
            &mut self.header,
            &mut self.profile,
            &mut self.about,
            &mut self.skills,
            &mut self.projects,
            &mut self.contact,
            &mut self.feedback,
            &mut self.updates,
            &mut self.footer,
        ]
    }

    fn section(&self, id: SectionId) -> &dyn Section {
        match id {
            SectionId::Header => &self.header,
            SectionId::Profile => &self.profile,
            SectionId::About => &self.about,
            SectionId::Skills => &self.skills,
            SectionId::Projects => &self.projects,
            SectionId::Contact => &self.contact,
            SectionId::Feedback => &self.feedback,
            SectionId::Updates => &self.updates,
            SectionId::Footer => &self.footer,
        }
    }

    fn section_mut(&mut self, id: SectionId) -> &mut dyn Section {
        match id {
            SectionId::Header => &mut self.header,
            SectionId::Profile => &mut self.profile,
            SectionId::About => &mut self.about,
            SectionId::Skills => &mut self.skills,
            SectionId::Projects => &mut self.projects,
            SectionId::Contact => &mut self.contact,
            SectionId::Feedback => &mut self.feedback,
            SectionId::Updates => &mut self.updates,
            SectionId::Footer => &mut self.footer,
        }
    }

    /// Lay every section out at `width`. Returns placements and page height.
    fn layout(&self, width: u16) -> (Vec<Placement>, usize) {
        let column = width.min(CONTENT_MAX_WIDTH);
        let column_x = (width - column) / 2;
        let mut placements = Vec::with_capacity(SectionId::ALL.len());
        let mut top = 0;
        for section in self.sections() {
            let (x, section_width) = if section.full_width() {
                (0, width)
            } else {
                (column_x, column)
            };
            let height = section.height(section_width);
            placements.push(Placement {
                id: section.id(),
                top,
                x,
                width: section_width,
                height,
            });
            top += usize::from(height) + SECTION_GAP;
        }
        (placements, top.saturating_sub(SECTION_GAP))
    }

    fn placement(&self, id: SectionId) -> Option<Placement> {
        let (width, _) = self.viewport.get();
        self.layout(width).0.into_iter().find(|p| p.id == id)
    }

    /// Re-measure the page against the last known viewport.
    fn sync_scroll(&mut self) {
        let (width, height) = self.viewport.get();
        let (_, total) = self.layout(width);
        let page = Self::page_area(Rect::new(0, 0, width, height));
        self.scroll.set_extent(total, usize::from(page.height));
    }

    fn timers_armed(&self) -> bool {
        self.sections().iter().any(|s| s.timers_armed())
    }

    fn tick(&mut self, now: Instant) {
        let mut changed = false;
        for section in self.sections_mut() {
            changed |= section.tick(now);
        }
        if changed {
            tracing::trace!("section timers fired");
        }
    }

    fn quit(&mut self) -> Cmd<Msg> {
        for section in self.sections_mut() {
            section.unmount();
        }
        tracing::info!("quitting");
        Cmd::quit()
    }

    fn cycle_theme(&mut self) -> Cmd<Msg> {
        let theme = self.theme.cycle();
        Cmd::log(format!("theme changed to {theme}"))
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = SectionId::FOCUSABLE;
        let n = order.len();
        let next = match self.focus.and_then(|id| order.iter().position(|f| *f == id)) {
            Some(i) if forward => (i + 1) % n,
            Some(i) => (i + n - 1) % n,
            None if forward => 0,
            None => n - 1,
        };
        let id = order[next];
        self.focus = Some(id);
        tracing::debug!(section = id.title(), "focus moved");
        if let Some(p) = self.placement(id) {
            self.scroll.reveal(p.top, usize::from(p.height));
        }
    }

    fn jump_to(&mut self, id: SectionId) {
        if let Some(p) = self.placement(id) {
            self.scroll.scroll_to(p.top);
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) -> Cmd<Msg> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return self.quit(),
                KeyCode::Char('t') => return self.cycle_theme(),
                _ => {}
            }
        }

        if self.show_help {
            self.show_help = false;
            return Cmd::none();
        }

        match key.code {
            KeyCode::PageDown => {
                self.scroll.page_down();
                return Cmd::none();
            }
            KeyCode::PageUp => {
                self.scroll.page_up();
                return Cmd::none();
            }
            KeyCode::Tab => {
                self.cycle_focus(true);
                return Cmd::none();
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return Cmd::none();
            }
            KeyCode::Esc if self.focus.is_some() => {
                self.focus = None;
                return Cmd::none();
            }
            _ => {}
        }

        if let Some(id) = self.focus {
            let section = self.section_mut(id);
            if section.handle_key(&key, now) == KeyOutcome::Handled {
                return Cmd::none();
            }
            // Unhandled characters stay out of page shortcuts while typing.
            if section.captures_text() && matches!(key.code, KeyCode::Char(_)) {
                return Cmd::none();
            }
        }

        self.on_page_key(key, now)
    }

    fn on_page_key(&mut self, key: KeyEvent, now: Instant) -> Cmd<Msg> {
        match key.code {
            KeyCode::Char('q') => return self.quit(),
            KeyCode::Char('t') => return self.cycle_theme(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('u') => {
                self.updates.toggle(now);
                tracing::debug!(live = self.updates.is_live(), "updates toggled");
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll.scroll_by(-1),
            KeyCode::Home => self.scroll.to_top(),
            KeyCode::End => self.scroll.to_bottom(),
            KeyCode::Char(c) => {
                if let Some(id) = link_for_key(c) {
                    self.jump_to(id);
                }
            }
            _ => {}
        }
        Cmd::none()
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll.scroll_by(WHEEL_LINES),
            MouseEventKind::ScrollUp => self.scroll.scroll_by(-WHEEL_LINES),
            _ => {}
        }
    }

    /// The last nav link whose section starts at or above the offset.
    fn active_link(placements: &[Placement], offset: usize) -> Option<SectionId> {
        NAV_LINKS
            .iter()
            .filter_map(|(_, _, id)| placements.iter().find(|p| p.id == *id))
            .filter(|p| p.top <= offset)
            .map(|p| p.id)
            .last()
    }

    fn render_page(
        &self,
        placements: &[Placement],
        total: usize,
        offset: usize,
        view: Rect,
        tokens: &StyleTokens,
        buf: &mut Buffer,
    ) {
        let page_height = u16::try_from(total).unwrap_or(u16::MAX);
        let mut page = Buffer::empty(Rect::new(0, 0, view.width, page_height));
        page.set_style(page.area, tokens.page());

        let window_end = offset + usize::from(view.height);
        for p in placements {
            if p.top >= window_end || p.top + usize::from(p.height) <= offset {
                continue;
            }
            let Ok(y) = u16::try_from(p.top) else {
                continue;
            };
            let rect = Rect::new(p.x, y, p.width, p.height).intersection(page.area);
            let ctx = RenderContext {
                tokens,
                focused: self.focus == Some(p.id),
            };
            self.section(p.id).render(rect, &mut page, &ctx);
        }

        for row in 0..view.height {
            let Ok(src) = u16::try_from(offset + usize::from(row)) else {
                break;
            };
            if src >= page_height {
                break;
            }
            for col in 0..view.width {
                buf[(view.x + col, view.y + row)] = page[(col, src)].clone();
            }
        }
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer, tokens: &StyleTokens) {
        let nav = tokens.nav();
        buf.set_style(area, nav);
        let hint = |key: &'static str, action: &'static str| {
            [
                Span::styled(format!(" {key} "), tokens.nav_active()),
                Span::styled(format!("{action} "), nav),
            ]
        };
        let mut spans = Vec::new();
        match self.focus {
            Some(id) => {
                spans.push(Span::styled(format!(" {} ", id.title()), tokens.nav_active()));
                spans.extend(hint("Esc", "Page"));
                spans.extend(hint("Tab", "Next"));
            }
            None => {
                spans.extend(hint("Tab", "Focus"));
                spans.extend(hint("?", "Help"));
                spans.extend(hint("t", "Theme"));
                spans.extend(hint("q", "Quit"));
            }
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }

    fn render_help_overlay(&self, area: Rect, buf: &mut Buffer, tokens: &StyleTokens) {
        let mut entries: Vec<HelpEntry> = GLOBAL_HELP.to_vec();
        if let Some(id) = self.focus {
            entries.extend(self.section(id).keybindings());
        }

        let rows = u16::try_from(entries.len()).unwrap_or(u16::MAX);
        let overlay_width = 56u16.min(area.width.saturating_sub(4));
        let overlay_height = (rows + 2).min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(overlay_width) / 2;
        let y = area.y + area.height.saturating_sub(overlay_height) / 2;
        let overlay = Rect::new(x, y, overlay_width, overlay_height);

        Clear.render(overlay, buf);
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(tokens.card_border(true))
            .title("Help")
            .title_alignment(Alignment::Center)
            .style(tokens.card());
        let inner = block.inner(overlay);
        block.render(overlay, buf);

        for (row, entry) in entries.iter().take(usize::from(inner.height)).enumerate() {
            let line = Line::from(vec![
                Span::styled(format!("{:<16}", entry.key), tokens.accent()),
                Span::styled(entry.action, tokens.body()),
            ]);
            buf.set_line(inner.x + 1, inner.y + row as u16, &line, inner.width.saturating_sub(1));
        }
    }
}

impl Model for Portfolio {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        let now = Instant::now();
        self.header.start(now);
        self.updates.mount(now);
        self.sync_scroll();
        tracing::info!(theme = %self.theme.get(), "portfolio started");
        Cmd::none()
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        self.sync_scroll();
        let cmd = match msg {
            Msg::Tick(now) => {
                self.tick(now);
                Cmd::none()
            }
            Msg::Event(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.on_key(key, Instant::now())
            }
            Msg::Event(Event::Mouse(mouse)) => {
                self.on_mouse(mouse);
                Cmd::none()
            }
            Msg::Event(Event::Resize(width, height)) => {
                self.viewport.set((width, height));
                Cmd::none()
            }
            Msg::Event(_) => Cmd::none(),
        };
        self.sync_scroll();
        cmd
    }

    fn view(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        self.viewport.set((area.width, area.height));
        let tokens = StyleTokens::for_theme(self.theme.get());
        let (placements, total) = self.layout(area.width);
        let page = Self::page_area(area);
        let mut scroll = self.scroll;
        scroll.set_extent(total, usize::from(page.height));

        let buf = frame.buffer_mut();
        buf.set_style(area, tokens.page());
        self.render_page(&placements, total, scroll.offset(), page, &tokens, buf);

        let nav_area = Rect::new(area.x, area.y, area.width, NAVBAR_HEIGHT.min(area.height));
        NavBar::new(&tokens)
            .active(Self::active_link(&placements, scroll.offset()))
            .progress(scroll.progress())
            .render(nav_area, buf);

        if area.height > NAVBAR_HEIGHT {
            let status = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            self.render_status(status, buf, &tokens);
        }

        if self.show_help {
            self.render_help_overlay(area, buf, &tokens);
        }
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
        if !self.timers_armed() {
            return Vec::new();
        }
        vec![Box::new(Every::with_id(HEARTBEAT_ID, HEARTBEAT, || {
            Msg::Tick(Instant::now())
        }))]
    }
}
