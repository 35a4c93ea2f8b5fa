use std::io::{self, Write};

use parking_lot::Mutex;
use termcolor::{Buffer, BufferWriter, ColorChoice};

/// An emitter is a destination for diagnostic output.
///
/// Output is composed into a `Buffer` obtained from the emitter, then handed
/// back via `print`, which writes it to the underlying stream in one go. This
/// keeps a single diagnostic from being interleaved with other output.
pub trait Emitter: Send + Sync {
    /// Construct a new buffer suited to this emitter, i.e. one which will
    /// only carry color codes if the destination supports them
    fn buffer(&self) -> Buffer;
    /// Write the contents of `buffer` to the destination
    fn print(&self, buffer: Buffer) -> io::Result<()>;
}

/// Emits diagnostics to the process' standard error stream
pub struct DefaultEmitter {
    writer: BufferWriter,
}
impl DefaultEmitter {
    pub fn new(color: ColorChoice) -> Self {
        let writer = BufferWriter::stderr(color);
        Self { writer }
    }
}
impl Emitter for DefaultEmitter {
    #[inline(always)]
    fn buffer(&self) -> Buffer {
        self.writer.buffer()
    }

    #[inline(always)]
    fn print(&self, buffer: Buffer) -> io::Result<()> {
        self.writer.print(&buffer)
    }
}

/// Collects emitted output in memory rather than writing it anywhere
#[derive(Default)]
pub struct CaptureEmitter {
    buffer: Mutex<Vec<u8>>,
}
impl CaptureEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything captured so far
    pub fn captured(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Returns everything captured so far, decoded lossily as UTF-8
    pub fn captured_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Drains the captured output, leaving the emitter empty
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.buffer.lock())
    }
}
impl Emitter for CaptureEmitter {
    #[inline(always)]
    fn buffer(&self) -> Buffer {
        Buffer::no_color()
    }

    fn print(&self, buffer: Buffer) -> io::Result<()> {
        let mut captured = self.buffer.lock();
        captured.write_all(buffer.as_slice())
    }
}
