//! Diagnostic event stream for the npc decision engines.
//!
//! Engines record state transitions, plan adoption and action lifecycle here so that debug
//! overlays and tests can inspect what happened without scraping log output.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink, Tracer, VecTraceSink};
