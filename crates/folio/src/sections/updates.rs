#![forbid(unsafe_code)]

//! Live project-updates feed.

use std::time::Instant;

use chrono::{DateTime, Local};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use super::{RenderContext, Section, SectionId, card, card_height, render_lines};
use crate::ticker::{TICKER_CAP, TICKER_PERIOD, UpdateEvent, UpdateTicker};

pub struct UpdatesSection {
    ticker: UpdateTicker,
}

impl UpdatesSection {
    pub fn new(seed: u64) -> Self {
        Self::with_ticker(UpdateTicker::new(seed))
    }

    pub fn with_ticker(ticker: UpdateTicker) -> Self {
        Self { ticker }
    }

    pub fn mount(&mut self, now: Instant) {
        self.ticker.mount(now);
    }

    pub fn is_live(&self) -> bool {
        self.ticker.is_mounted()
    }

    /// Pause a running feed, or restart a paused one from empty.
    pub fn toggle(&mut self, now: Instant) {
        if self.ticker.is_mounted() {
            self.ticker.unmount();
        } else {
            self.ticker.mount(now);
        }
    }

    pub fn ticker(&self) -> &UpdateTicker {
        &self.ticker
    }
}

fn clock_label(event: &UpdateEvent) -> String {
    i64::try_from(event.id)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_owned())
}

impl Section for UpdatesSection {
    fn id(&self) -> SectionId {
        SectionId::Updates
    }

    fn height(&self, _width: u16) -> u16 {
        // status line + the capped feed
        card_height(1 + TICKER_CAP)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let block = card(SectionId::Updates.title(), ctx);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::with_capacity(1 + TICKER_CAP);
        if self.is_live() {
            lines.push(Line::from(vec![
                Span::styled("\u{25cf} Live", tokens.success()),
                Span::styled(
                    format!("  new update every {}s", TICKER_PERIOD.as_secs()),
                    tokens.muted(),
                ),
            ]));
        } else {
            lines.push(Line::styled("Paused. Press u to resume.", tokens.muted()));
        }

        if self.ticker.is_empty() && self.is_live() {
            lines.push(Line::styled("Waiting for the first update\u{2026}", tokens.muted()));
        }
        for event in self.ticker.events() {
            lines.push(Line::from(vec![
                Span::styled(clock_label(event), tokens.accent()),
                Span::raw("  "),
                Span::styled(event.message, tokens.body()),
            ]));
        }
        render_lines(&lines, inner, buf);
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.ticker.poll(now) > 0
    }

    fn timers_armed(&self) -> bool {
        self.ticker.is_mounted()
    }

    fn unmount(&mut self) {
        self.ticker.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_theme::{StyleTokens, Theme};

    use super::*;
    use crate::content::UPDATE_MESSAGES;

    fn render(section: &UpdatesSection) -> String {
        let tokens = StyleTokens::for_theme(Theme::Ocean);
        let area = Rect::new(0, 0, 90, section.height(90));
        let mut buf = Buffer::empty(area);
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
    fn feed_fills_while_live() {
        let t0 = Instant::now();
        let mut section = UpdatesSection::new(7);
        section.mount(t0);
        assert!(render(&section).contains("Waiting for the first update"));

        assert!(!section.tick(t0 + Duration::from_secs(14)));
        assert!(section.tick(t0 + TICKER_PERIOD));
        let text = render(&section);
        assert!(text.contains("Live"));
        let shown = UPDATE_MESSAGES.iter().filter(|m| text.contains(*m)).count();
        assert_eq!(shown, 1);
    }

    #[test]
    fn toggle_pauses_and_restarts_empty() {
        let t0 = Instant::now();
        let mut section = UpdatesSection::new(1);
        section.mount(t0);
        section.tick(t0 + TICKER_PERIOD * 2);
        assert_eq!(section.ticker().len(), 2);

        section.toggle(t0 + TICKER_PERIOD * 2);
        assert!(!section.is_live());
        assert!(!section.timers_armed());
        assert!(!section.tick(t0 + TICKER_PERIOD * 10));
        assert!(render(&section).contains("Press u to resume"));

        section.toggle(t0 + TICKER_PERIOD * 10);
        assert!(section.is_live());
        assert!(section.ticker().is_empty());
    }

    #[test]
    fn height_is_fixed() {
        let t0 = Instant::now();
        let mut section = UpdatesSection::new(3);
        let before = section.height(60);
        section.mount(t0);
        section.tick(t0 + TICKER_PERIOD * 9);
        assert_eq!(section.ticker().len(), TICKER_CAP);
        assert_eq!(section.height(60), before);
    }
}
