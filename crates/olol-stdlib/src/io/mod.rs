//! Stream capability and buffered decorators
//!
//! [`Reader`] and [`Writer`] are the minimal stream contracts. The buffered
//! decorators accept anything implementing them: native files, shared
//! handles, or language-level objects adapted through [`ObjectStream`].

mod buffered_reader;
mod buffered_writer;
mod object_stream;

pub use buffered_reader::BufferedReader;
pub use buffered_writer::BufferedWriter;
pub use object_stream::ObjectStream;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Result, StdlibError};

/// A source of text read in byte-bounded chunks.
pub trait Reader {
    /// Read up to `max` bytes. An empty string signals end of stream.
    fn read(&mut self, max: usize) -> Result<String>;

    /// Release the underlying resource.
    fn close(&mut self) -> Result<()>;
}

/// A sink of text.
pub trait Writer {
    /// Write `data`, returning the number of bytes accepted.
    fn write(&mut self, data: &str) -> Result<usize>;

    /// Release the underlying resource.
    fn close(&mut self) -> Result<()>;
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn read(&mut self, max: usize) -> Result<String> {
        (**self).read(max)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<R: Reader + ?Sized> Reader for &mut R {
    fn read(&mut self, max: usize) -> Result<String> {
        (**self).read(max)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<R: Reader + ?Sized> Reader for Arc<Mutex<R>> {
    fn read(&mut self, max: usize) -> Result<String> {
        self.lock().read(max)
    }

    fn close(&mut self) -> Result<()> {
        self.lock().close()
    }
}

impl<W: Writer + ?Sized> Writer for Box<W> {
    fn write(&mut self, data: &str) -> Result<usize> {
        (**self).write(data)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<W: Writer + ?Sized> Writer for &mut W {
    fn write(&mut self, data: &str) -> Result<usize> {
        (**self).write(data)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<W: Writer + ?Sized> Writer for Arc<Mutex<W>> {
    fn write(&mut self, data: &str) -> Result<usize> {
        self.lock().write(data)
    }

    fn close(&mut self) -> Result<()> {
        self.lock().close()
    }
}

/// Validate a buffer size argument.
pub(crate) fn positive_size(operation: &str, size: i64) -> Result<usize> {
    if size <= 0 {
        return Err(StdlibError::InvalidArgument(format!(
            "{}: buffer size must be positive, got {}",
            operation, size
        )));
    }
    Ok(size as usize)
}
