#![forbid(unsafe_code)]

//! Terminal program runtime for folio.
//!
//! - [`Model`], [`Cmd`] and [`Program`]: the Elm-style update loop
//! - [`Subscription`] and [`Every`]: background message sources reconciled
//!   after every update
//! - [`Timeout`] and [`Interval`]: deadline timers polled by the model
//! - [`StorageBackend`]: small key/value persistence
//! - [`ProgramSimulator`]: headless driver for tests

pub mod program;
pub mod simulator;
pub mod storage;
pub mod subscription;
pub mod timer;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use simulator::{ProgramSimulator, buffer_to_text};
pub use storage::{
    FileStorage, MemoryStorage, SharedStorage, StorageBackend, StorageError, StorageResult, shared,
};
pub use subscription::{Every, StopSignal, SubId, Subscription};
pub use timer::{Interval, Timeout};

/// Terminal event types, re-exported so applications need not name crossterm.
pub mod event {
    pub use ratatui::crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    };
}
