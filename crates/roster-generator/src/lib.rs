//! Backpressure-safe NDJSON emission of synthesized employee records.
//!
//! The emitter drives a [`roster_core::Synthesizer`] in a single cooperative
//! loop and hands each serialized record to a [`RecordSink`]. The sink
//! reports saturation; the loop then produces nothing until the sink signals
//! it has drained, so at no point does the run hold more than the sink's
//! bounded queue in memory.

mod args;
mod emitter;
mod error;
mod sink;

pub use args::GenerateArgs;
pub use emitter::{EmitMetrics, Emitter, EmitterState};
pub use error::EmitError;
pub use sink::{FileSink, RecordSink, SinkStatus, DEFAULT_QUEUE_DEPTH};
