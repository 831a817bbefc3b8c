#![forbid(unsafe_code)]

//! Skill proficiency bars.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use super::{RenderContext, Section, SectionId, card, card_height, render_lines};
use crate::content::{SKILLS, Skill};
use crate::widgets::display_width;

const LEVEL_WIDTH: usize = 5;

pub struct SkillsSection {
    skills: &'static [Skill],
}

impl SkillsSection {
    pub fn new() -> Self {
        Self { skills: &SKILLS }
    }

    fn label_width(&self) -> usize {
        self.skills
            .iter()
            .map(|s| display_width(s.name))
            .max()
            .unwrap_or(0)
            + 2
    }
}

impl Default for SkillsSection {
    fn default() -> Self {
        Self::new()
    }
}

/// Filled cells of a `width`-cell bar at `level` percent.
pub fn filled_cells(level: u8, width: usize) -> usize {
    (usize::from(level.min(100)) * width + 50) / 100
}

impl Section for SkillsSection {
    fn id(&self) -> SectionId {
        SectionId::Skills
    }

    fn height(&self, _width: u16) -> u16 {
        card_height(self.skills.len())
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let block = card(SectionId::Skills.title(), ctx);
        let inner = block.inner(area);
        block.render(area, buf);

        let label_width = self.label_width();
        let bar_width = usize::from(inner.width).saturating_sub(label_width + LEVEL_WIDTH);
        let lines: Vec<Line<'_>> = self
            .skills
            .iter()
            .map(|skill| {
                let filled = filled_cells(skill.level, bar_width);
                Line::from(vec![
                    Span::styled(format!("{:<label_width$}", skill.name), tokens.body()),
                    Span::styled("\u{2588}".repeat(filled), tokens.progress_fill()),
                    Span::styled(
                        "\u{2591}".repeat(bar_width - filled),
                        tokens.progress_track(),
                    ),
                    Span::styled(format!("{:>4}%", skill.level), tokens.muted()),
                ])
            })
            .collect();
        render_lines(&lines, inner, buf);
    }
}
