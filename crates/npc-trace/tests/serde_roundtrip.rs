#![cfg(feature = "serde")]

use npc_trace::{TraceEvent, TraceLog};

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, "state.enter").with_subject("Alive"),
            TraceEvent::new(2, "goap.plan").with_subject("Eat"),
            TraceEvent::new(3, "goap.action.exit").with_subject(String::from("MoveTo_Bush")),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
