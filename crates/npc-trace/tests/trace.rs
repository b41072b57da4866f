use std::cell::RefCell;
use std::rc::Rc;

use npc_trace::{TraceEvent, TraceSink, Tracer};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn disabled_tracer_drops_events() {
    let mut tracer = Tracer::new();
    assert!(!tracer.is_enabled());

    tracer.emit(TraceEvent::new(1, "state.enter").with_subject("Alive"));

    assert!(tracer.log().is_none());
    assert!(tracer.take_log().is_none());
}

#[test]
fn emit_writes_to_log_when_enabled() {
    let mut tracer = Tracer::new();
    tracer.enable_log();

    tracer.emit(TraceEvent::new(1, "state.enter").with_subject("Alive"));

    let log = tracer.log().unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].tick, 1);
    assert_eq!(log.events[0].tag, "state.enter");
    assert_eq!(log.events[0].subject, "Alive");
}

#[test]
fn emit_writes_to_both_log_and_sink() {
    let mut tracer = Tracer::new();
    tracer.enable_log();
    let handle = RcSink::default();
    let shared = handle.0.clone();
    tracer.set_sink(Box::new(handle));

    tracer.emit(TraceEvent::new(3, "goap.plan"));

    assert_eq!(tracer.log().unwrap().tags().collect::<Vec<_>>(), vec!["goap.plan"]);
    let events = shared.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].tag, "goap.plan");
}

#[test]
fn take_log_leaves_empty_log_behind() {
    let mut tracer = Tracer::new();
    tracer.enable_log();
    tracer.emit(TraceEvent::new(0, "a"));
    tracer.emit(TraceEvent::new(1, "b"));

    let taken = tracer.take_log().unwrap();
    assert_eq!(taken.events.len(), 2);
    assert_eq!(tracer.log().map(|l| l.events.len()), Some(0));
}
