mod sink;
mod stringref;

pub use self::sink::{write_to_sink, ChunkSink, PrintFn, StringCallback};
pub use self::stringref::StringRef;
