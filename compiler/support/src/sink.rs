use std::ffi::c_void;

use crate::StringRef;

/// A callback for returning string references.
///
/// This function is called back by the functions that need to return a reference to
/// the portion of the string.
///
/// The final parameter is a pointer to user data forwarded from the printing call.
/// Callbacks interpret that pointer, so calling one is unsafe.
pub type StringCallback = unsafe extern "C" fn(data: StringRef, userdata: *mut c_void);

/// The signature shared by the `*Print` functions of the MLIR C API, e.g.
/// `mlirOperationPrint`, `mlirTypePrint` or `mlirLocationPrint`.
///
/// The printer invokes `callback` zero or more times, each time with the next
/// chunk of output and the `userdata` it was given.
pub type PrintFn<T> = unsafe extern "C" fn(obj: T, callback: StringCallback, userdata: *mut c_void);

/// Receives the chunks of text produced by a printing function, in order.
pub trait ChunkSink {
    fn write_chunk(&mut self, chunk: &[u8]);
}
impl ChunkSink for Vec<u8> {
    #[inline]
    fn write_chunk(&mut self, chunk: &[u8]) {
        self.extend_from_slice(chunk);
    }
}
impl<F> ChunkSink for F
where
    F: FnMut(&[u8]),
{
    #[inline]
    fn write_chunk(&mut self, chunk: &[u8]) {
        self(chunk)
    }
}

/// A `StringCallback` which forwards each chunk to a `ChunkSink`.
///
/// # Safety
///
/// `userdata` must be a non-null `*mut &mut dyn ChunkSink` cast to `*mut c_void`
/// (a fat pointer can't travel through `void*` directly), and the sink it
/// refers to must not be otherwise borrowed for the duration of the call.
/// `data` must be null or valid for reads of `data.len` bytes.
pub unsafe extern "C" fn write_to_sink(data: StringRef, userdata: *mut c_void) {
    let sink = &mut *(userdata as *mut &mut dyn ChunkSink);
    sink.write_chunk(data.as_bytes());
}
