//! Buffered writer decorator

use tracing::{debug, trace};

use super::Writer;
use crate::context::DEFAULT_BUFFER_SIZE;
use crate::error::{Result, StdlibError};

/// Coalesces small writes, flushing on overflow, [`flush`](Self::flush) or
/// [`close`](Self::close).
///
/// The pending buffer never holds more than `capacity` bytes between calls.
/// Writes at least `capacity` bytes long bypass the buffer.
#[derive(Debug)]
pub struct BufferedWriter<W> {
    inner: W,
    buffer: String,
    capacity: usize,
}

impl<W: Writer> BufferedWriter<W> {
    /// Wrap `inner` with the default flush threshold.
    pub fn new(inner: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, inner)
    }

    /// Wrap `inner` with the given flush threshold (zero means the default).
    pub fn with_capacity(capacity: usize, inner: W) -> Self {
        Self {
            inner,
            buffer: String::new(),
            capacity: if capacity == 0 { DEFAULT_BUFFER_SIZE } else { capacity },
        }
    }

    /// Current flush threshold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Data accepted but not yet written through
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Borrow the wrapped stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap without flushing.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Flush, then change the threshold. On flush failure the threshold is
    /// left unchanged.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(StdlibError::InvalidArgument(
                "SET_SIZ: buffer size must be positive, got 0".to_string(),
            ));
        }
        self.flush_pending("BUFFERED_WRITER.SET_SIZ")?;
        self.capacity = capacity;
        debug!(capacity, "buffered writer resized");
        Ok(())
    }

    /// Accept `data`; always returns its byte length on success.
    pub fn write(&mut self, data: &str) -> Result<usize> {
        if self.buffer.len() + data.len() <= self.capacity {
            self.buffer.push_str(data);
            return Ok(data.len());
        }

        self.flush_pending("BUFFERED_WRITER.WRITE")?;

        if data.len() >= self.capacity {
            trace!(len = data.len(), "buffered writer direct write");
            self.inner.write(data).map_err(|e| {
                StdlibError::stream(
                    "BUFFERED_WRITER.WRITE",
                    "error writing to underlying stream",
                    e,
                )
            })?;
        } else {
            self.buffer.push_str(data);
        }
        Ok(data.len())
    }

    /// Write any pending data through.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_pending("BUFFERED_WRITER.FLUSH")
    }

    /// Flush, then close the wrapped stream. A failed flush leaves the stream open.
    pub fn close(&mut self) -> Result<()> {
        self.flush_pending("BUFFERED_WRITER.CLOSE")?;
        self.inner.close().map_err(|e| {
            StdlibError::stream(
                "BUFFERED_WRITER.CLOSE",
                "error closing underlying stream",
                e,
            )
        })
    }

    fn flush_pending(&mut self, operation: &'static str) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        trace!(len = self.buffer.len(), "buffered writer flush");
        self.inner.write(&self.buffer).map_err(|e| {
            StdlibError::stream(operation, "error writing to underlying stream", e)
        })?;
        self.buffer.clear();
        Ok(())
    }
}

impl<W: Writer> Writer for BufferedWriter<W> {
    fn write(&mut self, data: &str) -> Result<usize> {
        BufferedWriter::write(self, data)
    }

    fn close(&mut self) -> Result<()> {
        BufferedWriter::close(self)
    }
}
