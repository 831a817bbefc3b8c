#![forbid(unsafe_code)]

//! Elm-style program runtime.
//!
//! A [`Model`] owns all application state. Terminal input is converted into
//! the model's message type, fed to [`Model::update`], and the returned
//! [`Cmd`] describes any follow-up effect. [`Model::view`] draws the current
//! state into a ratatui frame whenever something changed.
//!
//! ```ignore
//! struct Counter(i32);
//!
//! impl Model for Counter {
//!     type Message = Event;
//!
//!     fn update(&mut self, _msg: Event) -> Cmd<Event> {
//!         self.0 += 1;
//!         Cmd::none()
//!     }
//!
//!     fn view(&self, frame: &mut Frame<'_>) {
//!         frame.render_widget(Paragraph::new(self.0.to_string()), frame.area());
//!     }
//! }
//! ```

use std::io::{self, Stdout};
use std::time::Duration;

use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

use crate::subscription::{SubId, Subscription, SubscriptionManager};

/// Application state and behaviour.
pub trait Model: Sized {
    /// Messages that drive `update`. Terminal events convert into it.
    type Message: From<Event> + Send + 'static;

    /// Startup effects, run once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The single state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Draw the current state.
    fn view(&self, frame: &mut Frame<'_>);

    /// Subscriptions that should be running right now.
    ///
    /// Re-evaluated after `init` and after every `update`.
    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        Vec::new()
    }
}

/// Side effects requested by `init` and `update`.
#[derive(Debug)]
pub enum Cmd<M> {
    None,
    Quit,
    /// Run every command; order is unspecified.
    Batch(Vec<Cmd<M>>),
    /// Run commands in order.
    Sequence(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
    /// Append a line to the program log.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(line: impl Into<String>) -> Self {
        Self::Log(line.into())
    }

    pub fn batch(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Batch)
    }

    pub fn sequence(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Sequence)
    }

    fn collapse(mut cmds: Vec<Self>, wrap: fn(Vec<Self>) -> Self) -> Self {
        cmds.retain(|cmd| !matches!(cmd, Self::None));
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => wrap(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// How long to wait for terminal input before draining subscriptions.
    pub poll_timeout: Duration,
    /// Capture mouse events (wheel scrolling).
    pub mouse: bool,
    /// Draw on the alternate screen.
    pub alt_screen: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(50),
            mouse: true,
            alt_screen: true,
        }
    }
}

impl ProgramConfig {
    pub fn without_mouse(mut self) -> Self {
        self.mouse = false;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }
}

/// Raw mode + alternate screen for the lifetime of the value.
struct TerminalSession {
    config: ProgramConfig,
}

impl TerminalSession {
    fn enter(config: &ProgramConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on, Drop restores whatever was switched on.
        let session = Self {
            config: config.clone(),
        };
        let mut stdout = io::stdout();
        if config.alt_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.config.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.config.alt_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();
    }
}

/// Drives a [`Model`] against the real terminal.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    subscriptions: SubscriptionManager<M::Message>,
    running: bool,
    dirty: bool,
}

impl<M: Model> Program<M> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, ProgramConfig::default())
    }

    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        Self {
            model,
            config,
            subscriptions: SubscriptionManager::new(),
            running: true,
            dirty: true,
        }
    }

    /// Take over the terminal and run until the model quits.
    pub fn run(&mut self) -> io::Result<()> {
        let session = TerminalSession::enter(&self.config)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        self.subscriptions.stop_all();
        terminal.show_cursor()?;
        drop(terminal);
        drop(session);
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        let cmd = self.model.init();
        self.execute(cmd);
        self.reconcile();

        while self.running {
            if self.dirty {
                terminal.draw(|frame| self.model.view(frame))?;
                self.dirty = false;
            }

            if event::poll(self.config.poll_timeout)? {
                let event = event::read()?;
                if matches!(event, Event::Resize(..)) {
                    terminal.autoresize()?;
                }
                self.dispatch(M::Message::from(event));
            }

            for msg in self.subscriptions.drain() {
                if !self.running {
                    break;
                }
                self.dispatch(msg);
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute(cmd);
        self.reconcile();
    }

    fn reconcile(&mut self) {
        let declared = self.model.subscriptions();
        self.subscriptions.reconcile(declared);
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(msg) => {
                let follow_up = self.model.update(msg);
                self.dirty = true;
                self.execute(follow_up);
            }
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for cmd in cmds {
                    if !self.running {
                        break;
                    }
                    self.execute(cmd);
                }
            }
            Cmd::Log(line) => tracing::info!(target: "folio::program", "{line}"),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ids of the subscriptions currently running.
    pub fn active_subscriptions(&self) -> Vec<SubId> {
        self.subscriptions.active_ids()
    }
}
