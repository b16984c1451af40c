//! Buffered reader decorator

use tracing::{debug, trace};

use super::Reader;
use crate::context::DEFAULT_BUFFER_SIZE;
use crate::error::{Result, StdlibError};
use crate::strings::ceil_char_boundary;

/// Coalesces small reads against an internal refill buffer.
///
/// Once the wrapped stream reports end of stream (an empty read), every
/// further [`read`](BufferedReader::read) returns `""` without touching it.
/// Changing the refill size re-arms reading.
#[derive(Debug)]
pub struct BufferedReader<R> {
    inner: R,
    buffer: String,
    position: usize,
    capacity: usize,
    eof: bool,
}

impl<R: Reader> BufferedReader<R> {
    /// Wrap `inner` with the default refill size.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, inner)
    }

    /// Wrap `inner` with the given refill size (zero means the default).
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buffer: String::new(),
            position: 0,
            capacity: if capacity == 0 { DEFAULT_BUFFER_SIZE } else { capacity },
            eof: false,
        }
    }

    /// Current refill size
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether end of stream has been reached
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Unread bytes held in the buffer
    pub fn buffered(&self) -> &str {
        &self.buffer[self.position..]
    }

    /// Borrow the wrapped stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap, discarding buffered data.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Change the refill size. Clears the buffer and the end-of-stream flag.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(StdlibError::InvalidArgument(
                "SET_SIZ: buffer size must be positive, got 0".to_string(),
            ));
        }
        self.capacity = capacity;
        self.buffer.clear();
        self.position = 0;
        self.eof = false;
        debug!(capacity, "buffered reader resized");
        Ok(())
    }

    /// Read up to `n` bytes.
    ///
    /// Returns fewer bytes only at end of stream. A cut that would split a
    /// UTF-8 character is moved to the end of that character, so the result
    /// can exceed `n` by up to three bytes.
    pub fn read(&mut self, n: usize) -> Result<String> {
        if n == 0 || self.eof {
            return Ok(String::new());
        }

        let mut result = String::new();
        while result.len() < n && !self.eof {
            let available = self.buffer.len() - self.position;
            if available > 0 {
                let needed = n - result.len();
                let end = ceil_char_boundary(&self.buffer, self.position + needed.min(available));
                result.push_str(&self.buffer[self.position..end]);
                self.position = end;

                if result.len() >= n {
                    break;
                }
            }

            // Large outstanding requests ask for more than one buffer's worth
            let request = self.capacity.max(n - result.len());
            trace!(request, "buffered reader refill");
            let chunk = self.inner.read(request).map_err(|e| {
                StdlibError::stream(
                    "BUFFERED_READER.READ",
                    "error reading from underlying reader",
                    e,
                )
            })?;

            if chunk.is_empty() {
                debug!("buffered reader reached end of stream");
                self.eof = true;
                break;
            }

            self.buffer = chunk;
            self.position = 0;
        }

        Ok(result)
    }

    /// Close the wrapped stream, then behave as permanently exhausted.
    pub fn close(&mut self) -> Result<()> {
        self.inner.close().map_err(|e| {
            StdlibError::stream(
                "BUFFERED_READER.CLOSE",
                "error closing underlying reader",
                e,
            )
        })?;
        self.buffer.clear();
        self.position = 0;
        self.eof = true;
        Ok(())
    }
}

impl<R: Reader> Reader for BufferedReader<R> {
    fn read(&mut self, max: usize) -> Result<String> {
        BufferedReader::read(self, max)
    }

    fn close(&mut self) -> Result<()> {
        BufferedReader::close(self)
    }
}
