#![forbid(unsafe_code)]

//! Folio: a developer portfolio rendered as a terminal application.
//!
//! The page is a stack of sections (header, profile, about, skills,
//! projects, contact, feedback, live updates, footer) under a pinned navbar.
//! State lives in one [`app::Portfolio`] model driven by
//! [`folio_runtime::Program`]; theme choice and the contact draft persist
//! through a [`folio_runtime::StorageBackend`].

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod content;
pub mod draft;
pub mod error;
pub mod feedback;
pub mod ids;
pub mod logging;
pub mod scroll;
pub mod sections;
pub mod theme_store;
pub mod ticker;
pub mod typewriter;
pub mod validation;
pub mod widgets;

pub use app::{Msg, Portfolio, PortfolioOptions};
pub use cli::{Cli, run, run_from_env};
pub use error::{AppError, Result};
