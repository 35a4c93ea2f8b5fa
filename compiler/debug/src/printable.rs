use std::ffi::c_void;
use std::fmt;

use irbridge_support::{write_to_sink, ChunkSink, PrintFn};

/// Implemented by anything which can render itself as a sequence of text chunks
///
/// Chunks are raw bytes: implementations are free to split a UTF-8 sequence
/// across two chunks, or to emit null bytes, and consumers must reassemble
/// them by length.
pub trait Printable {
    /// Write the textual form of this object to `sink`
    fn print(&self, sink: &mut dyn ChunkSink);
}
impl<P: Printable + ?Sized> Printable for &P {
    #[inline]
    fn print(&self, sink: &mut dyn ChunkSink) {
        (**self).print(sink)
    }
}
impl Printable for str {
    #[inline]
    fn print(&self, sink: &mut dyn ChunkSink) {
        sink.write_chunk(self.as_bytes());
    }
}
impl Printable for [u8] {
    #[inline]
    fn print(&self, sink: &mut dyn ChunkSink) {
        sink.write_chunk(self);
    }
}

/// Adapts a `PrintFn` and the handle it prints into a `Printable`
///
/// This is the only place the user data pointer handed to the printing
/// function is constructed; the matching cast back lives in `write_to_sink`.
#[derive(Copy, Clone)]
pub struct RawPrinter<T> {
    func: PrintFn<T>,
    obj: T,
}
impl<T: Copy> RawPrinter<T> {
    /// Pairs `func` with the object it should print
    ///
    /// # Safety
    ///
    /// Every use of the returned value calls `func(obj, ..)`. The caller must
    /// guarantee that doing so is sound: `obj` is a valid handle for `func`,
    /// and `func` returns, does not call back into this printer, and only
    /// invokes the callback with the user data it was given and with
    /// `(pointer, length)` pairs that are valid for reads for the duration of
    /// each callback.
    pub unsafe fn new(func: PrintFn<T>, obj: T) -> Self {
        Self { func, obj }
    }
}
impl<T: Copy> Printable for RawPrinter<T> {
    fn print(&self, sink: &mut dyn ChunkSink) {
        let mut sink = sink;
        let userdata = &mut sink as *mut &mut dyn ChunkSink as *mut c_void;
        unsafe {
            (self.func)(self.obj, write_to_sink, userdata);
        }
    }
}

/// Renders a `Printable` via `Display`
///
/// The printed bytes are collected before decoding, so multi-byte characters
/// split between chunks come out intact; invalid UTF-8 is replaced.
pub struct Printed<'a, P: ?Sized>(pub &'a P);
impl<'a, P: Printable + ?Sized> fmt::Display for Printed<'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut bytes: Vec<u8> = Vec::new();
        self.0.print(&mut bytes);
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}
