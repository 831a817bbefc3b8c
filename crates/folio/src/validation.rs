#![forbid(unsafe_code)]

//! Contact form validation.
//!
//! Submit-time validation checks every field. While the user types, only the
//! email field is checked, and only after a quiet period: each keystroke
//! re-arms a single [`Timeout`], so at most one check is ever pending.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use folio_runtime::Timeout;
use regex_lite::Regex;

use crate::draft::{ContactDraft, ContactField};

/// Quiet period before the email field is checked.
pub const EMAIL_DEBOUNCE: Duration = Duration::from_millis(400);

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Enter a valid email";
pub const MESSAGE_REQUIRED: &str = "Message is required";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

/// `local@domain.tld` shaped, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Per-field error messages. An empty string means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ValidationState {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, error: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = error.into();
    }

    /// No field has an error.
    pub fn is_clean(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// Check every field, as on submit.
pub fn validate_all(draft: &ContactDraft) -> ValidationState {
    let email = draft.email.trim();
    ValidationState {
        name: required(&draft.name, NAME_REQUIRED),
        email: if email.is_empty() {
            EMAIL_REQUIRED.to_owned()
        } else if !is_valid_email(email) {
            EMAIL_INVALID.to_owned()
        } else {
            String::new()
        },
        message: required(&draft.message, MESSAGE_REQUIRED),
    }
}

fn required(value: &str, error: &str) -> String {
    if value.trim().is_empty() {
        error.to_owned()
    } else {
        String::new()
    }
}

/// The debounced email check. An empty email is not flagged here; only the
/// submit-time check requires it.
pub fn debounced_email_error(email: &str) -> String {
    let email = email.trim();
    if email.is_empty() || is_valid_email(email) {
        String::new()
    } else {
        EMAIL_INVALID.to_owned()
    }
}

/// Owns the single pending email check.
#[derive(Debug, Default)]
pub struct EmailDebouncer {
    timeout: Timeout,
    pending: Option<String>,
}

impl EmailDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending check and schedule one for `email`.
    pub fn schedule(&mut self, email: &str, now: Instant) {
        self.pending = Some(email.to_owned());
        self.timeout.start(now, EMAIL_DEBOUNCE);
    }

    pub fn cancel(&mut self) {
        self.timeout.cancel();
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.timeout.is_pending()
    }

    /// The email error to apply once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if !self.timeout.poll(now) {
            return None;
        }
        self.pending.take().map(|email| debounced_email_error(&email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn valid_draft_has_no_errors() {
        let state = validate_all(&ContactDraft::new("Ana", "a@b.com", "Hi"));
        assert!(state.is_clean(), "{state:?}");
    }

    #[test]
    fn every_field_is_required() {
        let state = validate_all(&ContactDraft::new("  ", "", "\t"));
        assert_eq!(state.name, NAME_REQUIRED);
        assert_eq!(state.email, EMAIL_REQUIRED);
        assert_eq!(state.message, MESSAGE_REQUIRED);
        assert!(!state.is_clean());
    }

    #[test]
    fn email_shape() {
        for ok in ["a@b.com", "first.last@school.edu.af", "x+y@d.io"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["abc", "a@b", "@b.com", "a@.com", "a b@c.com", "a@b.", "a@@b.com"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn submit_check_trims_email() {
        let state = validate_all(&ContactDraft::new("Ana", " a@b.com ", "Hi"));
        assert!(state.is_clean());
    }

    #[test]
    fn debounced_check_ignores_empty_email() {
        assert_eq!(debounced_email_error(""), "");
        assert_eq!(debounced_email_error("abc"), EMAIL_INVALID);
        assert_eq!(debounced_email_error("a@b.com"), "");
    }

    #[test]
    fn check_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut debouncer = EmailDebouncer::new();
        debouncer.schedule("abc", t0);

        assert_eq!(debouncer.poll(t0 + 399 * MS), None);
        assert_eq!(debouncer.poll(t0 + 400 * MS).as_deref(), Some(EMAIL_INVALID));
        assert_eq!(debouncer.poll(t0 + 900 * MS), None);
    }

    #[test]
    fn rapid_typing_keeps_only_the_last_check() {
        let t0 = Instant::now();
        let mut debouncer = EmailDebouncer::new();
        for (i, partial) in ["a", "a@", "a@b", "a@b.", "a@b.c"].iter().enumerate() {
            let at = t0 + (i as u32) * 100 * MS;
            assert_eq!(debouncer.poll(at), None);
            debouncer.schedule(partial, at);
        }
        // Last keystroke at 400ms: nothing may fire before 800ms.
        assert_eq!(debouncer.poll(t0 + 799 * MS), None);
        assert_eq!(debouncer.poll(t0 + 800 * MS).as_deref(), Some(""));
    }

    #[test]
    fn invalid_then_valid_clears_within_one_window() {
        let t0 = Instant::now();
        let mut debouncer = EmailDebouncer::new();
        let mut state = ValidationState::default();

        debouncer.schedule("abc", t0);
        if let Some(err) = debouncer.poll(t0 + 450 * MS) {
            state.set(ContactField::Email, err);
        }
        assert_eq!(state.email, EMAIL_INVALID);

        debouncer.schedule("abc@d.io", t0 + 500 * MS);
        if let Some(err) = debouncer.poll(t0 + 900 * MS) {
            state.set(ContactField::Email, err);
        }
        assert!(state.email.is_empty());
    }

    #[test]
    fn cancelled_check_never_fires() {
        let t0 = Instant::now();
        let mut debouncer = EmailDebouncer::new();
        debouncer.schedule("abc", t0);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + 5000 * MS), None);
    }
}
