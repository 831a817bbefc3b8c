#![forbid(unsafe_code)]

//! Contact form: three fields, debounced email check, draft persistence and
//! a timed confirmation.

use std::time::{Duration, Instant};

use folio_runtime::event::{KeyCode, KeyEvent};
use folio_runtime::{SharedStorage, Timeout};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Widget};

use super::{HelpEntry, KeyOutcome, RenderContext, Section, SectionId, card, card_height};
use crate::draft::{ContactDraft, ContactField, DraftStore};
use crate::validation::{EmailDebouncer, ValidationState, validate_all};
use crate::widgets::TextField;

/// How long the confirmation stays up before the form resets.
pub const CONFIRMATION_WINDOW: Duration = Duration::from_secs(3);

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent.";
const SUBMIT_LABEL: &str = "[ Send Message ]";

/// label + bordered input + error line
const FIELD_ROWS: usize = 5;

pub struct ContactSection {
    fields: [TextField; 3],
    focused: ContactField,
    errors: ValidationState,
    drafts: DraftStore,
    debouncer: EmailDebouncer,
    submitted: bool,
    reset: Timeout,
}

impl ContactSection {
    /// Build the form, restoring any persisted draft.
    pub fn new(storage: SharedStorage) -> Self {
        let drafts = DraftStore::new(storage);
        let fields = match drafts.load() {
            Some(draft) => {
                tracing::debug!("restored contact draft");
                ContactField::ALL.map(|f| TextField::with_value(draft.field(f)))
            }
            None => Default::default(),
        };
        Self {
            fields,
            focused: ContactField::Name,
            errors: ValidationState::default(),
            drafts,
            debouncer: EmailDebouncer::new(),
            submitted: false,
            reset: Timeout::new(),
        }
    }

    pub fn draft(&self) -> ContactDraft {
        ContactDraft::new(
            self.fields[0].value(),
            self.fields[1].value(),
            self.fields[2].value(),
        )
    }

    pub fn errors(&self) -> &ValidationState {
        &self.errors
    }

    pub fn focused_field(&self) -> ContactField {
        self.focused
    }

    /// The confirmation is showing.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn email_check_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn field_mut(&mut self, field: ContactField) -> &mut TextField {
        &mut self.fields[field.index()]
    }

    /// Validate and, when clean, accept the message.
    pub fn submit(&mut self, now: Instant) -> bool {
        let draft = self.draft();
        let errors = validate_all(&draft);
        if !errors.is_clean() {
            tracing::debug!(?errors, "contact form rejected");
            self.errors = errors;
            return false;
        }
        self.errors = errors;
        self.debouncer.cancel();
        self.drafts.clear();
        self.submitted = true;
        self.reset.start(now, CONFIRMATION_WINDOW);
        tracing::debug!("contact form accepted");
        true
    }

    fn reset_form(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.errors = ValidationState::default();
        self.submitted = false;
        self.focused = ContactField::Name;
    }

    fn edited(&mut self, now: Instant) {
        self.drafts.save(&self.draft());
        if self.focused == ContactField::Email {
            let email = self.fields[1].value().to_owned();
            self.debouncer.schedule(&email, now);
        }
    }
}

impl Section for ContactSection {
    fn id(&self) -> SectionId {
        SectionId::Contact
    }

    fn height(&self, _width: u16) -> u16 {
        // fields, button, confirmation
        card_height(FIELD_ROWS * ContactField::ALL.len() + 1 + 1)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let tokens = ctx.tokens;
        let block = card(SectionId::Contact.title(), ctx);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 3 {
            return;
        }

        let mut y = inner.y;
        for field in ContactField::ALL {
            if y + FIELD_ROWS as u16 > inner.bottom() {
                return;
            }
            let active = ctx.focused && field == self.focused && !self.submitted;
            buf.set_line(
                inner.x,
                y,
                &Line::styled(field.label(), tokens.body()),
                inner.width,
            );

            let frame = Rect::new(inner.x, y + 1, inner.width, 3);
            let input = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(tokens.input_border(active));
            let input_area = input.inner(frame);
            input.render(frame, buf);
            self.fields[field.index()].render(input_area, buf, tokens.input(active), active);

            let error = self.errors.get(field);
            if !error.is_empty() {
                buf.set_line(
                    inner.x,
                    y + 4,
                    &Line::styled(error.to_owned(), tokens.error()),
                    inner.width,
                );
            }
            y += FIELD_ROWS as u16;
        }

        if y < inner.bottom() {
            buf.set_line(
                inner.x,
                y,
                &Line::styled(SUBMIT_LABEL, tokens.button(ctx.focused && !self.submitted)),
                inner.width,
            );
        }
        if self.submitted && y + 1 < inner.bottom() {
            buf.set_line(
                inner.x,
                y + 1,
                &Line::styled(SUCCESS_MESSAGE, tokens.success()),
                inner.width,
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> KeyOutcome {
        // Editing is frozen while the confirmation shows.
        if self.submitted {
            return KeyOutcome::Ignored;
        }
        match key.code {
            KeyCode::Up => {
                self.focused = self.focused.prev();
                return KeyOutcome::Handled;
            }
            KeyCode::Down => {
                self.focused = self.focused.next();
                return KeyOutcome::Handled;
            }
            KeyCode::Enter => {
                self.submit(now);
                return KeyOutcome::Handled;
            }
            _ => {}
        }
        let focused = self.focused;
        match self.field_mut(focused).handle_key(key) {
            Some(true) => {
                self.edited(now);
                KeyOutcome::Handled
            }
            Some(false) => KeyOutcome::Handled,
            None => KeyOutcome::Ignored,
        }
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "\u{2191}/\u{2193}",
                action: "Previous / next field",
            },
            HelpEntry {
                key: "Enter",
                action: "Send message",
            },
        ]
    }

    fn captures_text(&self) -> bool {
        true
    }

    fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(error) = self.debouncer.poll(now) {
            self.errors.set(ContactField::Email, error);
            changed = true;
        }
        if self.reset.poll(now) {
            self.reset_form();
            changed = true;
        }
        changed
    }

    fn timers_armed(&self) -> bool {
        self.debouncer.is_pending() || self.reset.is_pending()
    }

    fn unmount(&mut self) {
        self.debouncer.cancel();
        self.reset.cancel();
    }
}

#[cfg(test)]
mod tests {
    use folio_runtime::{MemoryStorage, shared};
    use folio_theme::{StyleTokens, Theme};

    use super::*;
    use crate::draft::DRAFT_KEY;
    use crate::validation::{EMAIL_INVALID, MESSAGE_REQUIRED, NAME_REQUIRED};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn type_str(form: &mut ContactSection, text: &str, now: Instant) {
        for c in text.chars() {
            form.handle_key(&key(KeyCode::Char(c)), now);
        }
    }

    fn fill(form: &mut ContactSection, name: &str, email: &str, message: &str, now: Instant) {
        type_str(form, name, now);
        form.handle_key(&key(KeyCode::Down), now);
        type_str(form, email, now);
        form.handle_key(&key(KeyCode::Down), now);
        type_str(form, message, now);
    }

    #[test]
    fn valid_submit_shows_confirmation_then_resets() {
        let storage = shared(MemoryStorage::new());
        let mut form = ContactSection::new(storage.clone());
        let t0 = Instant::now();
        fill(&mut form, "Ana", "a@b.com", "Hi", t0);
        assert!(storage.borrow().get(DRAFT_KEY).unwrap().is_some());

        form.handle_key(&key(KeyCode::Enter), t0);
        assert!(form.is_submitted());
        assert!(form.errors().is_clean());
        assert_eq!(storage.borrow().get(DRAFT_KEY).unwrap(), None);
        assert!(!form.email_check_pending());

        // Typing is ignored during the window.
        form.handle_key(&key(KeyCode::Char('x')), t0);
        assert_eq!(form.draft().message, "Hi");

        assert!(!form.tick(t0 + Duration::from_millis(2_999)));
        assert!(form.tick(t0 + CONFIRMATION_WINDOW));
        assert!(!form.is_submitted());
        assert_eq!(form.draft(), ContactDraft::default());
        assert!(!form.timers_armed());
    }

    #[test]
    fn invalid_submit_keeps_draft() {
        let storage = shared(MemoryStorage::new());
        let mut form = ContactSection::new(storage.clone());
        let t0 = Instant::now();
        form.handle_key(&key(KeyCode::Down), t0);
        type_str(&mut form, "a@b.com", t0);

        assert!(!form.submit(t0));
        assert_eq!(form.errors().get(ContactField::Name), NAME_REQUIRED);
        assert_eq!(form.errors().get(ContactField::Message), MESSAGE_REQUIRED);
        assert_eq!(form.errors().get(ContactField::Email), "");
        assert!(!form.is_submitted());
        assert!(storage.borrow().get(DRAFT_KEY).unwrap().is_some());
    }

    #[test]
    fn email_check_waits_for_quiet_period() {
        let mut form = ContactSection::new(shared(MemoryStorage::new()));
        let t0 = Instant::now();
        form.handle_key(&key(KeyCode::Down), t0);
        type_str(&mut form, "abc", t0);
        assert!(form.email_check_pending());
        assert!(!form.tick(t0 + Duration::from_millis(399)));

        // Another keystroke restarts the wait.
        form.handle_key(&key(KeyCode::Char('d')), t0 + Duration::from_millis(300));
        assert!(!form.tick(t0 + Duration::from_millis(500)));
        assert!(form.tick(t0 + Duration::from_millis(700)));
        assert_eq!(form.errors().get(ContactField::Email), EMAIL_INVALID);
    }

    #[test]
    fn draft_is_restored_on_construction() {
        let storage = shared(MemoryStorage::new());
        storage
            .borrow_mut()
            .set(DRAFT_KEY, r#"{"name":"Ana","email":"","message":"Hi"}"#.to_owned())
            .unwrap();
        let form = ContactSection::new(storage);
        assert_eq!(form.draft(), ContactDraft::new("Ana", "", "Hi"));
    }

    #[test]
    fn focus_moves_are_clamped() {
        let mut form = ContactSection::new(shared(MemoryStorage::new()));
        let now = Instant::now();
        form.handle_key(&key(KeyCode::Up), now);
        assert_eq!(form.focused_field(), ContactField::Name);
        for _ in 0..5 {
            form.handle_key(&key(KeyCode::Down), now);
        }
        assert_eq!(form.focused_field(), ContactField::Message);
    }

    #[test]
    fn renders_errors_and_confirmation() {
        let mut form = ContactSection::new(shared(MemoryStorage::new()));
        let now = Instant::now();
        form.submit(now);

        let tokens = StyleTokens::for_theme(Theme::Light);
        let area = Rect::new(0, 0, 50, form.height(50));
        let mut buf = Buffer::empty(area);
        let ctx = RenderContext {
            tokens: &tokens,
            focused: true,
        };
        form.render(area, &mut buf, &ctx);
        let text = folio_runtime::buffer_to_text(&buf);
        assert!(text.contains(NAME_REQUIRED));
        assert!(text.contains("Send Message"));
        assert!(!text.contains(SUCCESS_MESSAGE));

        fill(&mut form, "Ana", "a@b.com", "Hi", now);
        form.submit(now);
        let mut buf = Buffer::empty(area);
        form.render(area, &mut buf, &ctx);
        let text = folio_runtime::buffer_to_text(&buf);
        assert!(text.contains(SUCCESS_MESSAGE));
        assert!(!text.contains(NAME_REQUIRED));
    }
}
