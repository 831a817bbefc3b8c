#![forbid(unsafe_code)]

//! Feedback wall: a small entry form over the ledger, newest or
//! highest-rated first.

use std::time::Instant;

use folio_runtime::event::{KeyCode, KeyEvent};
use folio_theme::StyleTokens;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Widget};

use super::{
    HelpEntry, KeyOutcome, RenderContext, Section, SectionId, card, card_height,
    card_inner_width, render_lines, stars,
};
use crate::feedback::{FeedbackError, FeedbackLedger, MAX_RATING, MIN_RATING, SortMode};
use crate::widgets::{TextField, wrap, wrapped_height};

pub const THANKS: &str = "Thanks for your feedback!";
pub const EMPTY_WALL: &str = "No feedback yet. Be the first!";

/// Rows above the entry list: two labelled inputs, rating, sort, notice, gap.
const FORM_ROWS: usize = 4 + 1 + 4 + 1 + 1 + 1;

/// Form control with the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackRow {
    Name,
    Rating,
    Comment,
    Sort,
}

impl FeedbackRow {
    const ORDER: [FeedbackRow; 4] = [Self::Name, Self::Rating, Self::Comment, Self::Sort];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|r| *r == self).unwrap_or(0)
    }

    fn step(self, down: bool) -> Self {
        let pos = self.position();
        let pos = if down {
            (pos + 1).min(Self::ORDER.len() - 1)
        } else {
            pos.saturating_sub(1)
        };
        Self::ORDER[pos]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Accepted,
    Rejected(FeedbackError),
}

pub struct FeedbackWall {
    ledger: FeedbackLedger,
    name: TextField,
    comment: TextField,
    rating: u8,
    row: FeedbackRow,
    sort: SortMode,
    notice: Option<Notice>,
}

impl FeedbackWall {
    pub fn new() -> Self {
        Self {
            ledger: FeedbackLedger::new(),
            name: TextField::new(),
            comment: TextField::new(),
            rating: MAX_RATING,
            row: FeedbackRow::Name,
            sort: SortMode::default(),
            notice: None,
        }
    }

    pub fn ledger(&self) -> &FeedbackLedger {
        &self.ledger
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn row(&self) -> FeedbackRow {
        self.row
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Reason the last submission was turned down, if it was.
    pub fn rejection(&self) -> Option<&FeedbackError> {
        match &self.notice {
            Some(Notice::Rejected(err)) => Some(err),
            _ => None,
        }
    }

    pub fn submit(&mut self) -> bool {
        let outcome = self
            .ledger
            .submit(self.name.value(), self.rating, self.comment.value())
            .map(|entry| entry.id);
        match outcome {
            Ok(_) => {
                self.name.clear();
                self.comment.clear();
                self.rating = MAX_RATING;
                self.notice = Some(Notice::Accepted);
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "feedback rejected");
                self.notice = Some(Notice::Rejected(err));
                false
            }
        }
    }

    fn set_rating(&mut self, rating: u8) {
        self.rating = rating.clamp(MIN_RATING, MAX_RATING);
    }

    /// Rows [`Self::entry_lines`] produces, without styling anything.
    fn entry_line_count(&self, width: usize) -> usize {
        let width = width.max(1);
        let view = self.ledger.view(self.sort);
        if view.is_empty() {
            return 1;
        }
        let separators = view.len() - 1;
        separators
            + view
                .iter()
                .map(|entry| 1 + wrapped_height(&entry.comment, width))
                .sum::<usize>()
    }

    fn entry_lines(&self, width: usize, tokens: &StyleTokens) -> Vec<Line<'static>> {
        let width = width.max(1);
        let view = self.ledger.view(self.sort);
        if view.is_empty() {
            return vec![Line::styled(EMPTY_WALL, tokens.muted())];
        }
        let mut lines = Vec::new();
        for (i, entry) in view.into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            let mut head = vec![
                Span::styled(stars(entry.rating), tokens.featured()),
                Span::raw(" "),
                Span::styled(entry.name.clone(), tokens.title()),
            ];
            if entry.is_featured() {
                head.push(Span::raw(" "));
                head.push(Span::styled("[Featured]", tokens.tag()));
            }
            lines.push(Line::from(head));
            lines.extend(
                wrap(&entry.comment, width)
                    .into_iter()
                    .map(|l| Line::styled(l, tokens.body())),
            );
        }
        lines
    }

    fn render_input(
        &self,
        label: &str,
        field: &TextField,
        active: bool,
        area: Rect,
        buf: &mut Buffer,
        tokens: &StyleTokens,
    ) {
        buf.set_line(
            area.x,
            area.y,
            &Line::styled(label.to_owned(), tokens.body()),
            area.width,
        );
        let frame = Rect::new(area.x, area.y + 1, area.width, 3);
        let input = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(tokens.input_border(active));
        let inner = input.inner(frame);
        input.render(frame, buf);
        field.render(inner, buf, tokens.input(active), active);
    }

    fn control_style(&self, row: FeedbackRow, ctx: &RenderContext<'_>) -> Style {
        let style = ctx.tokens.body();
        if ctx.focused && self.row == row {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }
}

impl Default for FeedbackWall {
    fn default() -> Self {
        Self::new()
    }
}

impl Section for FeedbackWall {
    fn id(&self) -> SectionId {
        SectionId::Feedback
    }

    fn height(&self, width: u16) -> u16 {
        card_height(FORM_ROWS + self.entry_line_count(card_inner_width(width)))
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let block = card(SectionId::Feedback.title(), ctx);
        let inner = block.inner(area);
        block.render(area, buf);
        if usize::from(inner.height) < FORM_ROWS {
            return;
        }

        let mut y = inner.y;
        let name_active = ctx.focused && self.row == FeedbackRow::Name;
        self.render_input(
            "Your name",
            &self.name,
            name_active,
            Rect::new(inner.x, y, inner.width, 4),
            buf,
            tokens,
        );
        y += 4;

        let rating = Line::from(vec![
            Span::styled("Rating: ", self.control_style(FeedbackRow::Rating, ctx)),
            Span::styled(stars(self.rating), tokens.featured()),
            Span::styled(format!(" ({}/{MAX_RATING})", self.rating), tokens.muted()),
        ]);
        buf.set_line(inner.x, y, &rating, inner.width);
        y += 1;

        let comment_active = ctx.focused && self.row == FeedbackRow::Comment;
        self.render_input(
            "Comment",
            &self.comment,
            comment_active,
            Rect::new(inner.x, y, inner.width, 4),
            buf,
            tokens,
        );
        y += 4;

        let sort = Line::from(vec![
            Span::styled("Sort: ", self.control_style(FeedbackRow::Sort, ctx)),
            Span::styled(self.sort.label(), tokens.accent()),
        ]);
        buf.set_line(inner.x, y, &sort, inner.width);
        y += 1;

        let notice = match &self.notice {
            Some(Notice::Accepted) => Line::styled(THANKS, tokens.success()),
            Some(Notice::Rejected(err)) => Line::styled(err.to_string(), tokens.error()),
            None => Line::styled("Enter to submit", tokens.muted()),
        };
        buf.set_line(inner.x, y, &notice, inner.width);
        y += 2;

        let list = Rect::new(inner.x, y, inner.width, inner.bottom().saturating_sub(y));
        render_lines(
            &self.entry_lines(usize::from(inner.width), tokens),
            list,
            buf,
        );
    }

    fn handle_key(&mut self, key: &KeyEvent, _now: Instant) -> KeyOutcome {
        match key.code {
            KeyCode::Up => {
                self.row = self.row.step(false);
                return KeyOutcome::Handled;
            }
            KeyCode::Down => {
                self.row = self.row.step(true);
                return KeyOutcome::Handled;
            }
            KeyCode::Enter => {
                if self.row == FeedbackRow::Sort {
                    self.sort = self.sort.toggle();
                } else {
                    self.submit();
                }
                return KeyOutcome::Handled;
            }
            _ => {}
        }

        match self.row {
            FeedbackRow::Name => text_outcome(self.name.handle_key(key)),
            FeedbackRow::Comment => text_outcome(self.comment.handle_key(key)),
            FeedbackRow::Rating => match key.code {
                KeyCode::Left => {
                    self.set_rating(self.rating.saturating_sub(1));
                    KeyOutcome::Handled
                }
                KeyCode::Right => {
                    self.set_rating(self.rating + 1);
                    KeyOutcome::Handled
                }
                KeyCode::Char(c @ '1'..='5') => {
                    self.set_rating(c as u8 - b'0');
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            },
            FeedbackRow::Sort => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    self.sort = self.sort.toggle();
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            },
        }
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "\u{2191}/\u{2193}",
                action: "Name / rating / comment / sort",
            },
            HelpEntry {
                key: "1-5 \u{2190}/\u{2192}",
                action: "Set rating",
            },
            HelpEntry {
                key: "Enter",
                action: "Submit (or toggle sort)",
            },
        ]
    }

    fn captures_text(&self) -> bool {
        true
    }
}

fn text_outcome(result: Option<bool>) -> KeyOutcome {
    match result {
        Some(_) => KeyOutcome::Handled,
        None => KeyOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use folio_theme::Theme;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn press(wall: &mut FeedbackWall, code: KeyCode) {
        wall.handle_key(&key(code), Instant::now());
    }

    fn type_str(wall: &mut FeedbackWall, text: &str) {
        for c in text.chars() {
            press(wall, KeyCode::Char(c));
        }
    }

    fn post(wall: &mut FeedbackWall, name: &str, rating: char, comment: &str) {
        while wall.row() != FeedbackRow::Name {
            press(wall, KeyCode::Up);
        }
        type_str(wall, name);
        press(wall, KeyCode::Down);
        press(wall, KeyCode::Char(rating));
        press(wall, KeyCode::Down);
        type_str(wall, comment);
        press(wall, KeyCode::Enter);
    }

    fn render(wall: &FeedbackWall) -> String {
        let tokens = StyleTokens::for_theme(Theme::Dark);
        let area = Rect::new(0, 0, 60, wall.height(60));
        let mut buf = Buffer::empty(area);
        wall.render(
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
    fn empty_wall_invites_feedback() {
        let wall = FeedbackWall::new();
        assert!(render(&wall).contains(EMPTY_WALL));
    }

    #[test]
    fn posts_and_sorts() {
        let mut wall = FeedbackWall::new();
        post(&mut wall, "X", '5', "great");
        post(&mut wall, "Y", '3', "ok");
        assert_eq!(wall.ledger().len(), 2);

        let text = render(&wall);
        let x = text.find("X [Featured]").unwrap();
        let y = text.find("\u{2606} Y").unwrap();
        assert!(y < x, "newest first");
        assert!(text.contains(THANKS));

        // Down to the sort row and toggle.
        press(&mut wall, KeyCode::Down);
        assert_eq!(wall.row(), FeedbackRow::Sort);
        press(&mut wall, KeyCode::Enter);
        assert_eq!(wall.sort(), SortMode::HighestRating);
        assert_eq!(wall.ledger().len(), 2);

        let text = render(&wall);
        assert!(text.contains("Sort: Highest rating"));
        let x = text.find("X [Featured]").unwrap();
        let y = text.find("\u{2606} Y").unwrap();
        assert!(x < y);
    }

    #[test]
    fn measured_rows_match_rendered_entries() {
        let tokens = StyleTokens::for_theme(Theme::Ocean);
        let mut wall = FeedbackWall::new();
        assert_eq!(wall.entry_line_count(40), wall.entry_lines(40, &tokens).len());

        post(&mut wall, "X", '5', "great");
        post(
            &mut wall,
            "Y",
            '3',
            "a longer comment that has to wrap over several rows of the card",
        );
        for width in [12, 40, 200] {
            assert_eq!(
                wall.entry_line_count(width),
                wall.entry_lines(width, &tokens).len(),
                "width {width}"
            );
        }
        assert_eq!(wall.height(60), card_height(FORM_ROWS + wall.entry_line_count(56)));
    }

    #[test]
    fn accepted_submission_resets_form() {
        let mut wall = FeedbackWall::new();
        post(&mut wall, "Ana", '2', "nice");
        assert_eq!(wall.rating(), MAX_RATING);
        assert!(wall.rejection().is_none());
        assert!(wall.name.is_empty());
        assert!(wall.comment.is_empty());
    }

    #[test]
    fn rejection_reason_is_shown() {
        let mut wall = FeedbackWall::new();
        type_str(&mut wall, "Ana");
        press(&mut wall, KeyCode::Enter);
        assert_eq!(wall.rejection(), Some(&FeedbackError::EmptyComment));
        assert!(render(&wall).contains("Please write a comment"));
        assert_eq!(wall.name.value(), "Ana");
        assert!(wall.ledger().is_empty());
    }

    #[test]
    fn rating_keys_clamp() {
        let mut wall = FeedbackWall::new();
        press(&mut wall, KeyCode::Down);
        assert_eq!(wall.row(), FeedbackRow::Rating);
        press(&mut wall, KeyCode::Right);
        assert_eq!(wall.rating(), 5);
        for _ in 0..10 {
            press(&mut wall, KeyCode::Left);
        }
        assert_eq!(wall.rating(), 1);
        press(&mut wall, KeyCode::Char('4'));
        assert_eq!(wall.rating(), 4);
        press(&mut wall, KeyCode::Char('9'));
        assert_eq!(wall.rating(), 4);
    }

    #[test]
    fn digits_type_into_text_rows() {
        let mut wall = FeedbackWall::new();
        type_str(&mut wall, "R2D2");
        assert_eq!(wall.name.value(), "R2D2");
        assert_eq!(wall.rating(), 5);
    }
}
