use folio_runtime::event::Event;
use folio_runtime::{Cmd, Model, ProgramSimulator};
use ratatui::Frame;

struct QuitModel {
    executed_after_quit: bool,
}

#[derive(Debug)]
enum QuitMsg {
    QuitInBatch,
    SetExecuted,
}

impl From<Event> for QuitMsg {
    fn from(_: Event) -> Self {
        QuitMsg::QuitInBatch
    }
}

impl Model for QuitModel {
    type Message = QuitMsg;

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        match msg {
            QuitMsg::QuitInBatch => {
                Cmd::Batch(vec![Cmd::Quit, Cmd::Msg(QuitMsg::SetExecuted)])
            }
            QuitMsg::SetExecuted => {
                self.executed_after_quit = true;
                Cmd::None
            }
        }
    }

    fn view(&self, _frame: &mut Frame<'_>) {}
}

#[test]
fn batch_stops_after_quit() {
    let mut sim = ProgramSimulator::new(QuitModel {
        executed_after_quit: false,
    });
    sim.init();

    sim.send(QuitMsg::QuitInBatch);

    assert!(
        !sim.model().executed_after_quit,
        "commands after Quit in a batch must not run"
    );
    assert!(!sim.is_running());
}

struct OrderModel {
    trace: Vec<&'static str>,
}

#[derive(Debug)]
enum OrderMsg {
    Start,
    First,
    Second,
}

impl From<Event> for OrderMsg {
    fn from(_: Event) -> Self {
        OrderMsg::Start
    }
}

impl Model for OrderModel {
    type Message = OrderMsg;

    fn init(&mut self) -> Cmd<OrderMsg> {
        Cmd::log("init")
    }

    fn update(&mut self, msg: OrderMsg) -> Cmd<OrderMsg> {
        match msg {
            OrderMsg::Start => {
                self.trace.push("start");
                Cmd::sequence(vec![
                    Cmd::msg(OrderMsg::First),
                    Cmd::log("between"),
                    Cmd::msg(OrderMsg::Second),
                ])
            }
            OrderMsg::First => {
                self.trace.push("first");
                Cmd::none()
            }
            OrderMsg::Second => {
                self.trace.push("second");
                Cmd::none()
            }
        }
    }

    fn view(&self, _frame: &mut Frame<'_>) {}
}

#[test]
fn sequence_runs_in_order() {
    let mut sim = ProgramSimulator::new(OrderModel { trace: Vec::new() });
    sim.send(OrderMsg::Start);

    assert_eq!(sim.model().trace, ["start", "first", "second"]);
    assert_eq!(sim.logs(), ["init".to_string(), "between".to_string()]);
    assert!(sim.is_running());
}
