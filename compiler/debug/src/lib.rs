//! Debug printing of objects whose textual form is produced through a
//! callback, as with the `*Print` functions of the MLIR C API.
//!
//! The output of each call is a single line on the diagnostic stream: the
//! caller's message, immediately followed by everything the object printed,
//! then a newline.
//!
//! Objects participate either by implementing [`Printable`], or by pairing a
//! raw [`PrintFn`] with a handle in a [`RawPrinter`]. [`print_llvm_error`] is
//! shorthand for the latter.
mod printable;
mod printer;

pub use irbridge_support::{ChunkSink, PrintFn, StringCallback, StringRef};

pub use self::printable::{Printable, Printed, RawPrinter};
pub use self::printer::{print_error, print_llvm_error, DebugPrinter};
