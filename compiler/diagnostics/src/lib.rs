mod colors;
pub mod emitter;

pub use termcolor::{Buffer, Color, ColorChoice, ColorSpec, WriteColor};

pub use self::colors::UseColors;
pub use self::emitter::{CaptureEmitter, DefaultEmitter, Emitter};
