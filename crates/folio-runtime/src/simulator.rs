#![forbid(unsafe_code)]

//! Headless driver for testing [`Model`] implementations.
//!
//! [`ProgramSimulator`] runs the same init/update/view cycle as
//! [`Program`](crate::Program) without touching the terminal. Subscriptions
//! are never spawned; the simulator only records which ids the model declares
//! so tests can assert that timers start and stop with the right state.
//! Time-driven messages are injected by the test instead.

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::Event;

use crate::program::{Cmd, Model};
use crate::subscription::SubId;

/// Deterministic, terminal-free program driver.
pub struct ProgramSimulator<M: Model> {
    model: M,
    running: bool,
    initialized: bool,
    logs: Vec<String>,
    declared: Vec<SubId>,
    frames: usize,
}

impl<M: Model> ProgramSimulator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            running: true,
            initialized: false,
            logs: Vec::new(),
            declared: Vec::new(),
            frames: 0,
        }
    }

    /// Run `init` once. Later calls are no-ops.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.execute(cmd);
        self.refresh_declared();
    }

    /// Feed one message through `update`.
    pub fn send(&mut self, msg: M::Message) {
        self.init();
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute(cmd);
        self.refresh_declared();
    }

    /// Convert a terminal event and feed it through `update`.
    pub fn inject_event(&mut self, event: Event) {
        self.send(M::Message::from(event));
    }

    pub fn inject_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.inject_event(event);
        }
    }

    /// Render one frame at the given size and return the buffer.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> Buffer {
        self.init();
        self.frames += 1;
        let backend = TestBackend::new(width, height);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                tracing::error!(error = %err, "test backend refused to start");
                return Buffer::empty(ratatui::layout::Rect::new(0, 0, width, height));
            }
        };
        if let Err(err) = terminal.draw(|frame| self.model.view(frame)) {
            tracing::error!(error = %err, "test backend draw failed");
        }
        terminal.backend().buffer().clone()
    }

    /// Render a frame and flatten it into newline-separated text.
    pub fn capture_text(&mut self, width: u16, height: u16) -> String {
        buffer_to_text(&self.capture_frame(width, height))
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

    /// Lines emitted through [`Cmd::Log`].
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Subscription ids the model declared after its latest update.
    pub fn declared_subscriptions(&self) -> &[SubId] {
        &self.declared
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    fn refresh_declared(&mut self) {
        self.declared = self
            .model
            .subscriptions()
            .iter()
            .map(|sub| sub.id())
            .collect();
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(msg) => {
                let follow_up = self.model.update(msg);
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
            Cmd::Log(line) => self.logs.push(line),
        }
    }
}

/// Flatten a buffer into text, one line per row, trailing spaces trimmed.
pub fn buffer_to_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::Frame;
    use ratatui::crossterm::event::{KeyCode, KeyEvent};
    use ratatui::widgets::Paragraph;

    use super::*;
    use crate::subscription::{Every, Subscription};

    #[derive(Debug)]
    enum Msg {
        Key(KeyCode),
        Other,
    }

    impl From<Event> for Msg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(key) => Msg::Key(key.code),
                _ => Msg::Other,
            }
        }
    }

    #[derive(Default)]
    struct Counter {
        value: i32,
        ticking: bool,
    }

    impl Model for Counter {
        type Message = Msg;

        fn init(&mut self) -> Cmd<Msg> {
            Cmd::log("started")
        }

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Key(KeyCode::Char('+')) => {
                    self.value += 1;
                    Cmd::none()
                }
                Msg::Key(KeyCode::Char('t')) => {
                    self.ticking = !self.ticking;
                    Cmd::none()
                }
                Msg::Key(KeyCode::Char('q')) => Cmd::quit(),
                _ => Cmd::none(),
            }
        }

        fn view(&self, frame: &mut Frame<'_>) {
            frame.render_widget(
                Paragraph::new(format!("count {}", self.value)),
                frame.area(),
            );
        }

        fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
            if self.ticking {
                vec![Box::new(Every::with_id(
                    1,
                    Duration::from_millis(50),
                    || Msg::Other,
                ))]
            } else {
                Vec::new()
            }
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::from(KeyCode::Char(c)))
    }

    #[test]
    fn init_runs_once_and_logs() {
        let mut sim = ProgramSimulator::new(Counter::default());
        sim.init();
        sim.init();
        assert_eq!(sim.logs(), ["started".to_string()]);
    }

    #[test]
    fn events_drive_updates_and_rendering() {
        let mut sim = ProgramSimulator::new(Counter::default());
        sim.inject_events([key('+'), key('+'), key('x')]);
        assert_eq!(sim.model().value, 2);
        let text = sim.capture_text(20, 2);
        assert!(text.starts_with("count 2"));
        assert_eq!(sim.frame_count(), 1);
    }

    #[test]
    fn declared_subscriptions_follow_state() {
        let mut sim = ProgramSimulator::new(Counter::default());
        sim.init();
        assert!(sim.declared_subscriptions().is_empty());
        sim.inject_event(key('t'));
        assert_eq!(sim.declared_subscriptions(), [1]);
        sim.inject_event(key('t'));
        assert!(sim.declared_subscriptions().is_empty());
    }

    #[test]
    fn quit_stops_processing() {
        let mut sim = ProgramSimulator::new(Counter::default());
        sim.inject_events([key('q'), key('+')]);
        assert!(!sim.is_running());
        assert_eq!(sim.model().value, 0);
    }
}
