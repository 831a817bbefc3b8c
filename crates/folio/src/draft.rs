#![forbid(unsafe_code)]

//! Contact form draft and its persistence.

use folio_runtime::SharedStorage;
use serde::{Deserialize, Serialize};

/// Storage key holding the serialized draft.
pub const DRAFT_KEY: &str = "contactForm";

/// Contact form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::Name, Self::Email, Self::Message];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Message => 2,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Message,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Name,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// True when every field is the empty string.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }
}

/// Reads and writes the draft under [`DRAFT_KEY`].
pub struct DraftStore {
    storage: SharedStorage,
}

impl DraftStore {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// The persisted draft, if any. Unparseable drafts count as absent.
    pub fn load(&self) -> Option<ContactDraft> {
        let raw = match self.storage.borrow().get(DRAFT_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read contact draft");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unparseable contact draft");
                None
            }
        }
    }

    /// Persist `draft` unless every field is empty.
    pub fn save(&self, draft: &ContactDraft) {
        if draft.is_empty() {
            return;
        }
        let encoded = match serde_json::to_string(draft) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode contact draft");
                return;
            }
        };
        if let Err(err) = self.storage.borrow_mut().set(DRAFT_KEY, encoded) {
            tracing::warn!(error = %err, "failed to persist contact draft");
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.storage.borrow_mut().remove(DRAFT_KEY) {
            tracing::warn!(error = %err, "failed to clear contact draft");
        }
    }
}
