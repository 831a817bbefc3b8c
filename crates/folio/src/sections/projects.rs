#![forbid(unsafe_code)]

//! Project cards with a tech-tag filter bar and per-card details.

use std::collections::HashSet;
use std::time::Instant;

use folio_runtime::event::{KeyCode, KeyEvent};
use folio_theme::StyleTokens;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Widget};

use super::{
    HelpEntry, KeyOutcome, RenderContext, Section, SectionId, card, card_height,
    card_inner_width, render_lines,
};
use crate::catalog::{Project, ProjectCatalog, TechFilter};
use crate::widgets::{display_width, wrap};

pub struct ProjectsSection {
    catalog: ProjectCatalog,
    tags: Vec<TechFilter>,
    filter: usize,
    selected: usize,
    /// Names of projects whose details are expanded.
    expanded: HashSet<String>,
}

impl ProjectsSection {
    pub fn new(catalog: ProjectCatalog) -> Self {
        let tags = catalog.available_tags();
        Self {
            catalog,
            tags,
            filter: 0,
            selected: 0,
            expanded: HashSet::new(),
        }
    }

    pub fn filter(&self) -> &TechFilter {
        &self.tags[self.filter]
    }

    pub fn tags(&self) -> &[TechFilter] {
        &self.tags
    }

    /// Projects shown under the current filter.
    pub fn visible(&self) -> Vec<&Project> {
        self.catalog.filter(self.filter())
    }

    pub fn selected(&self) -> Option<&Project> {
        self.visible().get(self.selected).copied()
    }

    pub fn is_expanded(&self, project: &Project) -> bool {
        self.expanded.contains(&project.name)
    }

    pub fn select_filter(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t.label() == tag) {
            Some(idx) => {
                self.filter = idx;
                self.selected = 0;
                true
            }
            None => false,
        }
    }

    fn cycle_filter(&mut self, forward: bool) {
        let n = self.tags.len();
        self.filter = if forward {
            (self.filter + 1) % n
        } else {
            (self.filter + n - 1) % n
        };
        self.selected = 0;
        tracing::debug!(filter = %self.filter(), "project filter changed");
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.visible().len();
        if count == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(count - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    pub fn toggle_selected(&mut self) {
        let Some(name) = self.selected().map(|p| p.name.clone()) else {
            return;
        };
        if !self.expanded.remove(&name) {
            self.expanded.insert(name);
        }
    }

    fn filter_bar(&self, tokens: &StyleTokens, focused: bool) -> Line<'static> {
        let mut spans = vec![Span::styled("Filter: ", tokens.muted())];
        for (i, tag) in self.tags.iter().enumerate() {
            let style = if i == self.filter {
                let active = tokens.tag().add_modifier(Modifier::BOLD);
                if focused {
                    active.add_modifier(Modifier::REVERSED)
                } else {
                    active
                }
            } else {
                tokens.muted()
            };
            spans.push(Span::styled(format!(" {} ", tag.label()), style));
        }
        Line::from(spans)
    }

    fn tag_lines(project: &Project, width: usize, tokens: &StyleTokens) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut used = 0;
        for tag in &project.tech_stack {
            let chip = format!(" {tag} ");
            let chip_width = display_width(&chip);
            if used > 0 && used + 1 + chip_width > width {
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            if used > 0 {
                spans.push(Span::raw(" "));
                used += 1;
            }
            spans.push(Span::styled(chip, tokens.tag()));
            used += chip_width;
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }
        lines
    }

    /// Content rows of one project card.
    fn card_lines(
        &self,
        project: &Project,
        width: usize,
        tokens: &StyleTokens,
    ) -> Vec<Line<'static>> {
        let width = width.max(1);
        let mut lines = Vec::new();

        let mut badges = Vec::new();
        if project.featured {
            badges.push(Span::styled("\u{2605} Featured", tokens.featured()));
            badges.push(Span::raw("  "));
        }
        badges.push(Span::styled(
            format!("[{}]", project.status.label()),
            tokens.accent(),
        ));
        lines.push(Line::from(badges));

        lines.extend(
            wrap(&project.description, width)
                .into_iter()
                .map(|l| Line::styled(l, tokens.body())),
        );
        lines.extend(Self::tag_lines(project, width, tokens));

        match &project.live_link {
            Some(url) => lines.push(Line::from(vec![
                Span::styled("View Live: ", tokens.body()),
                Span::styled(url.clone(), tokens.link()),
            ])),
            None => lines.push(Line::styled("Local Demo", tokens.muted())),
        }

        if self.is_expanded(project) {
            lines.push(Line::styled("\u{25be} Hide details", tokens.muted()));
            lines.extend(
                wrap(&project.details, width)
                    .into_iter()
                    .map(|l| Line::styled(l, tokens.body())),
            );
        } else {
            lines.push(Line::styled("\u{25b8} Show details", tokens.muted()));
        }
        lines
    }

    fn project_card_height(&self, project: &Project, width: u16, tokens: &StyleTokens) -> usize {
        self.card_lines(project, card_inner_width(width), tokens).len() + 2
    }
}

impl Default for ProjectsSection {
    fn default() -> Self {
        Self::new(ProjectCatalog::builtin())
    }
}

impl Section for ProjectsSection {
    fn id(&self) -> SectionId {
        SectionId::Projects
    }

    fn height(&self, width: u16) -> u16 {
        let tokens = StyleTokens::for_theme(folio_theme::Theme::Light);
        let inner = u16::try_from(card_inner_width(width)).unwrap_or(u16::MAX);
        // filter bar + gap
        let mut rows = 2;
        let visible = self.visible();
        if visible.is_empty() {
            rows += 1;
        }
        for project in visible {
            rows += self.project_card_height(project, inner, &tokens);
        }
        card_height(rows)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let block = card(SectionId::Projects.title(), ctx);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        render_lines(&[self.filter_bar(tokens, ctx.focused)], inner, buf);

        let mut y = inner.y + 2;
        let visible = self.visible();
        if visible.is_empty() {
            let row = Rect::new(inner.x, y, inner.width, 1);
            render_lines(
                &[Line::styled("No projects use this technology.", tokens.muted())],
                row,
                buf,
            );
            return;
        }

        for (i, project) in visible.into_iter().enumerate() {
            if y >= inner.bottom() {
                break;
            }
            let height = self.project_card_height(project, inner.width, tokens) as u16;
            let rect = Rect::new(inner.x, y, inner.width, height.min(inner.bottom() - y));
            let highlighted = ctx.focused && i == self.selected;
            let border = tokens.card_border(highlighted);
            let card = Block::bordered()
                .border_type(if highlighted {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(border)
                .title(Line::styled(format!(" {} ", project.name), tokens.title()))
                .padding(Padding::horizontal(1));
            let card_inner = card.inner(rect);
            card.render(rect, buf);
            let lines = self.card_lines(project, usize::from(card_inner.width), tokens);
            render_lines(&lines, card_inner, buf);
            y += height;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, _now: Instant) -> KeyOutcome {
        match key.code {
            KeyCode::Left => self.cycle_filter(false),
            KeyCode::Right => self.cycle_filter(true),
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "\u{2190}/\u{2192}",
                action: "Change tech filter",
            },
            HelpEntry {
                key: "\u{2191}/\u{2193}",
                action: "Select project",
            },
            HelpEntry {
                key: "Enter/Space",
                action: "Show / hide details",
            },
        ]
    }
}
