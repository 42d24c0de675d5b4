//! The streaming write loop driving the synthesizer against a sink.

use crate::error::EmitError;
use crate::sink::{RecordSink, SinkStatus};
use roster_core::Synthesizer;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Metrics from one emit run.
#[derive(Debug, Clone, Default)]
pub struct EmitMetrics {
    /// Number of records pushed to the sink.
    pub records_written: u64,
    /// Total time taken, close included.
    pub total_duration: Duration,
    /// Time spent synthesizing and serializing records.
    pub generation_duration: Duration,
    /// Time spent suspended waiting for the sink to drain.
    pub drain_wait_duration: Duration,
    /// Number of times the sink reported saturation and the loop paused.
    pub saturation_pauses: u64,
}

impl EmitMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Lifecycle of the emit loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    /// Synthesizing and pushing records synchronously.
    Producing,
    /// Suspended after a saturation signal; zero records are produced until
    /// the sink reports drained.
    WaitingOnDrain,
    /// The sink has been closed; the run is complete.
    Closed,
}

/// Drives the synthesizer in a single cooperative loop.
///
/// There is exactly one suspension point: waiting for the sink to drain
/// after it reports saturation. Cancellation is not supported; terminating
/// the process is the only way to stop a run early.
pub struct Emitter {
    synthesizer: Synthesizer,
    state: EmitterState,
}

impl Emitter {
    pub fn new(synthesizer: Synthesizer) -> Self {
        Self {
            synthesizer,
            state: EmitterState::Producing,
        }
    }

    /// Current loop state, mostly useful for tests and diagnostics.
    pub fn state(&self) -> EmitterState {
        self.state
    }

    /// Emit exactly `total_records` records (ids 1..=N) to `sink`, one
    /// compact JSON object per line.
    ///
    /// Completion is reported only after the sink's close resolves. Sink
    /// errors abort the run and leave any partial output as-is.
    pub async fn run<S: RecordSink>(
        &mut self,
        total_records: u64,
        sink: &mut S,
    ) -> Result<EmitMetrics, EmitError> {
        let start = Instant::now();
        let mut metrics = EmitMetrics::default();
        let mut generation_time = Duration::ZERO;
        let mut wait_time = Duration::ZERO;

        info!("Emitting {} records (NDJSON)", total_records);
        self.state = EmitterState::Producing;

        for id in 1..=total_records {
            let gen_start = Instant::now();
            let employee = self.synthesizer.synthesize(id as i64);
            let mut line = serde_json::to_vec(&employee)?;
            line.push(b'\n');
            generation_time += gen_start.elapsed();

            let status = sink.push(line)?;
            metrics.records_written += 1;

            if metrics.records_written % 100_000 == 0 {
                debug!("Emitted {} records", metrics.records_written);
            }

            if status == SinkStatus::Saturated && id < total_records {
                self.state = EmitterState::WaitingOnDrain;
                metrics.saturation_pauses += 1;
                let wait_start = Instant::now();
                sink.drained().await?;
                wait_time += wait_start.elapsed();
                self.state = EmitterState::Producing;
            }
        }

        sink.close().await?;
        self.state = EmitterState::Closed;

        metrics.total_duration = start.elapsed();
        metrics.generation_duration = generation_time;
        metrics.drain_wait_duration = wait_time;

        info!(
            "Emit complete: {} records in {:?} ({:.2} records/sec, {} pauses)",
            metrics.records_written,
            metrics.total_duration,
            metrics.records_per_second(),
            metrics.saturation_pauses
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn synthesizer() -> Synthesizer {
        let epoch = chrono::Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Synthesizer::with_epoch(42, epoch)
    }

    /// Sink double with a hard capacity: it panics if the producer pushes
    /// past saturation without awaiting drain.
    struct BoundedSink {
        capacity: usize,
        in_flight: Vec<Vec<u8>>,
        written: Vec<Vec<u8>>,
        max_in_flight: usize,
        drains: u64,
        closed: bool,
        fail_after: Option<u64>,
        pushed: u64,
    }

    impl BoundedSink {
        fn new(capacity: usize) -> Self {
            Self {
                capacity,
                in_flight: Vec::new(),
                written: Vec::new(),
                max_in_flight: 0,
                drains: 0,
                closed: false,
                fail_after: None,
                pushed: 0,
            }
        }

        fn failing_after(capacity: usize, pushes: u64) -> Self {
            Self {
                fail_after: Some(pushes),
                ..Self::new(capacity)
            }
        }
    }

    #[async_trait]
    impl RecordSink for BoundedSink {
        fn push(&mut self, line: Vec<u8>) -> Result<SinkStatus, EmitError> {
            assert!(!self.closed, "push after close");
            assert!(
                self.in_flight.len() < self.capacity,
                "pushed into a saturated sink"
            );
            self.pushed += 1;
            if let Some(limit) = self.fail_after {
                if self.pushed > limit {
                    return Err(EmitError::Sink(std::io::Error::other("disk full")));
                }
            }
            self.in_flight.push(line);
            self.max_in_flight = self.max_in_flight.max(self.in_flight.len());
            Ok(if self.in_flight.len() == self.capacity {
                SinkStatus::Saturated
            } else {
                SinkStatus::Ready
            })
        }

        async fn drained(&mut self) -> Result<(), EmitError> {
            self.drains += 1;
            tokio::task::yield_now().await;
            self.written.append(&mut self.in_flight);
            Ok(())
        }

        async fn close(&mut self) -> Result<(), EmitError> {
            self.written.append(&mut self.in_flight);
            self.closed = true;
            Ok(())
        }
    }

    fn parse_ids(lines: &[Vec<u8>]) -> Vec<i64> {
        lines
            .iter()
            .map(|l| {
                let v: serde_json::Value = serde_json::from_slice(l).unwrap();
                v["id"].as_i64().unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_emits_dense_ids_through_saturation() {
        let mut sink = BoundedSink::new(4);
        let mut emitter = Emitter::new(synthesizer());

        let metrics = emitter.run(10, &mut sink).await.unwrap();

        assert_eq!(metrics.records_written, 10);
        assert!(sink.closed);
        assert_eq!(emitter.state(), EmitterState::Closed);
        assert_eq!(parse_ids(&sink.written), (1..=10).collect::<Vec<_>>());
        // Capacity 4 saturates after pushes 4 and 8; record 10 is the last,
        // so no pause follows it.
        assert_eq!(metrics.saturation_pauses, 2);
        assert_eq!(sink.drains, 2);
    }

    #[tokio::test]
    async fn test_in_flight_lines_never_exceed_sink_capacity() {
        let mut sink = BoundedSink::new(8);
        let mut emitter = Emitter::new(synthesizer());

        emitter.run(1000, &mut sink).await.unwrap();

        assert_eq!(sink.max_in_flight, 8);
        assert_eq!(sink.written.len(), 1000);
    }

    #[tokio::test]
    async fn test_zero_records_still_closes_the_sink() {
        let mut sink = BoundedSink::new(4);
        let mut emitter = Emitter::new(synthesizer());

        let metrics = emitter.run(0, &mut sink).await.unwrap();

        assert_eq!(metrics.records_written, 0);
        assert_eq!(metrics.saturation_pauses, 0);
        assert!(sink.written.is_empty());
        assert!(sink.closed);
    }

    #[tokio::test]
    async fn test_every_line_is_newline_terminated_json() {
        let mut sink = BoundedSink::new(16);
        let mut emitter = Emitter::new(synthesizer());

        emitter.run(32, &mut sink).await.unwrap();

        for line in &sink.written {
            assert_eq!(line.last(), Some(&b'\n'));
            let v: serde_json::Value = serde_json::from_slice(line).unwrap();
            assert!(v.is_object());
        }
    }

    #[tokio::test]
    async fn test_sink_error_aborts_the_run() {
        let mut sink = BoundedSink::failing_after(100, 5);
        let mut emitter = Emitter::new(synthesizer());

        let err = emitter.run(10, &mut sink).await.unwrap_err();

        assert!(matches!(err, EmitError::Sink(_)));
        // The failed push is not retried and the sink is not closed.
        assert!(!sink.closed);
        assert_eq!(sink.in_flight.len(), 5);
    }

    #[test]
    fn test_metrics_throughput() {
        let metrics = EmitMetrics {
            records_written: 1000,
            total_duration: Duration::from_secs(10),
            generation_duration: Duration::from_secs(2),
            drain_wait_duration: Duration::from_secs(1),
            saturation_pauses: 3,
        };

        assert_eq!(metrics.records_per_second(), 100.0);
    }
}
