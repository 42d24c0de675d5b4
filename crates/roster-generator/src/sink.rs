//! Output sinks for serialized record lines.

use crate::error::EmitError;
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Default number of record lines buffered between producer and writer.
pub const DEFAULT_QUEUE_DEPTH: usize = 1024;

/// Result of offering one line to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    /// The sink can take more lines without pausing the producer.
    Ready,
    /// The sink's buffer is full; the producer must await [`RecordSink::drained`]
    /// before pushing again.
    Saturated,
}

/// Destination for serialized NDJSON lines.
///
/// `push` always accepts the offered line; the returned status is the flow
/// control signal. After `Saturated`, callers must await `drained` before the
/// next `push`.
#[async_trait]
pub trait RecordSink {
    /// Accept one serialized record line (newline included).
    fn push(&mut self, line: Vec<u8>) -> Result<SinkStatus, EmitError>;

    /// Resolves once the sink has flushed its pending lines. Triggered by the
    /// sink itself, not polled.
    async fn drained(&mut self) -> Result<(), EmitError>;

    /// Flush remaining data and close the destination. Completion of the run
    /// is only reported after this resolves.
    async fn close(&mut self) -> Result<(), EmitError>;
}

/// File-backed sink: a bounded queue feeding a dedicated blocking writer.
///
/// The destination is truncated on open; re-running a generation overwrites
/// it from scratch. Saturation means the queue is full. The writer notifies
/// waiters whenever it observes the queue empty, which is what `drained`
/// resumes on.
pub struct FileSink {
    tx: Option<mpsc::Sender<Vec<u8>>>,
    /// Line accepted while the queue was full, re-queued on drain/close.
    pending: Option<Vec<u8>>,
    drained: Arc<Notify>,
    failure: Arc<Mutex<Option<String>>>,
    writer: Option<JoinHandle<Result<u64, std::io::Error>>>,
    bytes_written: u64,
}

impl FileSink {
    /// Open `path` for writing (truncating any previous contents) and start
    /// the writer task.
    pub fn create<P: AsRef<Path>>(path: P, queue_depth: usize) -> Result<Self, EmitError> {
        let file = File::create(path)?;
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(queue_depth.max(1));
        let drained = Arc::new(Notify::new());
        let failure = Arc::new(Mutex::new(None));

        let writer = {
            let drained = Arc::clone(&drained);
            let failure = Arc::clone(&failure);
            tokio::task::spawn_blocking(move || {
                let mut out = BufWriter::new(file);
                let mut bytes = 0u64;
                let result = loop {
                    match rx.blocking_recv() {
                        Some(line) => {
                            if let Err(e) = out.write_all(&line) {
                                break Err(e);
                            }
                            bytes += line.len() as u64;
                            if rx.is_empty() {
                                drained.notify_waiters();
                            }
                        }
                        None => break out.flush().map(|()| bytes),
                    }
                };
                if let Err(e) = &result {
                    *failure.lock().unwrap() = Some(e.to_string());
                }
                // Wake any producer parked in drained() so it observes the outcome.
                drained.notify_waiters();
                result
            })
        };

        Ok(Self {
            tx: Some(tx),
            pending: None,
            drained,
            failure,
            writer: Some(writer),
            bytes_written: 0,
        })
    }

    /// Total bytes written, available after [`RecordSink::close`] resolves.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn take_failure(&self) -> Option<EmitError> {
        self.failure
            .lock()
            .unwrap()
            .take()
            .map(|msg| EmitError::Sink(std::io::Error::other(msg)))
    }

    fn writer_gone(&self) -> EmitError {
        self.take_failure()
            .unwrap_or_else(|| EmitError::WriterLost("writer queue closed".to_string()))
    }
}

#[async_trait]
impl RecordSink for FileSink {
    fn push(&mut self, line: Vec<u8>) -> Result<SinkStatus, EmitError> {
        if let Some(e) = self.take_failure() {
            return Err(e);
        }
        let tx = self.tx.as_ref().ok_or(EmitError::Closed)?;
        debug_assert!(self.pending.is_none(), "push before awaiting drained");

        match tx.try_send(line) {
            Ok(()) => Ok(if tx.capacity() == 0 {
                SinkStatus::Saturated
            } else {
                SinkStatus::Ready
            }),
            Err(TrySendError::Full(line)) => {
                self.pending = Some(line);
                Ok(SinkStatus::Saturated)
            }
            Err(TrySendError::Closed(_)) => Err(self.writer_gone()),
        }
    }

    async fn drained(&mut self) -> Result<(), EmitError> {
        if let Some(line) = self.pending.take() {
            let tx = self.tx.as_ref().ok_or(EmitError::Closed)?;
            if tx.send(line).await.is_err() {
                return Err(self.writer_gone());
            }
        }
        loop {
            let tx = self.tx.as_ref().ok_or(EmitError::Closed)?;
            let notified = self.drained.notified();
            tokio::pin!(notified);
            // Register before checking, so a notification between the check
            // and the await is not lost.
            notified.as_mut().enable();

            if let Some(e) = self.take_failure() {
                return Err(e);
            }
            if tx.is_closed() {
                return Err(self.writer_gone());
            }
            if tx.capacity() == tx.max_capacity() {
                return Ok(());
            }
            notified.await;
        }
    }

    async fn close(&mut self) -> Result<(), EmitError> {
        if let Some(line) = self.pending.take() {
            let tx = self.tx.as_ref().ok_or(EmitError::Closed)?;
            if tx.send(line).await.is_err() {
                return Err(self.writer_gone());
            }
        }
        // Dropping the sender lets the writer drain the queue and flush.
        drop(self.tx.take());
        let writer = self.writer.take().ok_or(EmitError::Closed)?;
        let bytes = writer
            .await
            .map_err(|e| EmitError::WriterLost(e.to_string()))??;
        self.bytes_written = bytes;
        Ok(())
    }
}
