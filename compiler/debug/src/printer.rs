use std::io::{self, Write};
use std::sync::Arc;

use irbridge_diagnostics::{Color, ColorSpec, DefaultEmitter, Emitter, WriteColor};
use irbridge_session::DiagnosticsConfig;
use irbridge_support::PrintFn;

use crate::printable::{Printable, RawPrinter};

/// Writes printed objects to a diagnostic stream, one line per call
pub struct DebugPrinter {
    config: DiagnosticsConfig,
    emitter: Arc<dyn Emitter>,
}
impl DebugPrinter {
    pub fn new(config: DiagnosticsConfig, emitter: Arc<dyn Emitter>) -> Self {
        Self { config, emitter }
    }

    /// Creates a printer which writes to stderr
    pub fn stderr(config: DiagnosticsConfig) -> Self {
        let emitter = Arc::new(DefaultEmitter::new(config.color));
        Self::new(config, emitter)
    }

    #[inline]
    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Writes `message`, then the printed form of `printable`, then a newline
    ///
    /// The object is printed exactly once, into a buffer owned by this call;
    /// the whole line is handed to the emitter in a single write. Nothing is
    /// printed, and `printable` is not consulted, if the printer is disabled.
    pub fn print_error<P>(&self, printable: &P, message: &str) -> io::Result<()>
    where
        P: Printable + ?Sized,
    {
        if !self.config.enabled {
            return Ok(());
        }

        let mut text = Vec::with_capacity(message.len());
        text.extend_from_slice(message.as_bytes());
        let mut chunks = 0usize;
        {
            let mut accumulate = |chunk: &[u8]| {
                chunks += 1;
                text.extend_from_slice(chunk);
            };
            printable.print(&mut accumulate);
        }
        log::trace!(
            "printed {} bytes in {} chunks after a {} byte message",
            text.len() - message.len(),
            chunks,
            message.len()
        );

        let (prefix, printed) = text.split_at(message.len());
        let mut buffer = self.emitter.buffer();
        if self.config.highlight_prefix && !prefix.is_empty() {
            let mut spec = ColorSpec::new();
            spec.set_bold(true).set_fg(Some(Color::Red));
            buffer.set_color(&spec)?;
            buffer.write_all(prefix)?;
            buffer.reset()?;
        } else {
            buffer.write_all(prefix)?;
        }
        buffer.write_all(printed)?;
        buffer.write_all(b"\n")?;
        self.emitter.print(buffer)
    }

    /// Like `print_error`, for an object printed through the callback convention
    ///
    /// # Safety
    ///
    /// See `RawPrinter::new`.
    pub unsafe fn print_raw<T: Copy>(
        &self,
        func: PrintFn<T>,
        obj: T,
        message: &str,
    ) -> io::Result<()> {
        self.print_error(&RawPrinter::new(func, obj), message)
    }
}

/// Prints `message` followed by the printed form of `printable` to stderr
///
/// Configuration is read from the environment. Failures are logged rather
/// than returned: this is for debugging output, and the caller has no better
/// place to report them.
pub fn print_error<P>(printable: &P, message: &str)
where
    P: Printable + ?Sized,
{
    let config = DiagnosticsConfig::from_env().unwrap_or_else(|err| {
        log::warn!("{}, falling back to default diagnostics configuration", err);
        DiagnosticsConfig::default()
    });
    let printer = DebugPrinter::stderr(config);
    if let Err(err) = printer.print_error(printable, message) {
        log::warn!("unable to write diagnostic to stderr: {}", err);
    }
}

/// Prints `message` followed by whatever `func` prints for `obj` to stderr
///
/// This is the entry point for the MLIR-style `*Print(obj, callback, userdata)`
/// functions, e.g.:
///
/// ```ignore
/// unsafe { print_llvm_error(mlirOperationPrint, op, "failed to import: ") }
/// ```
///
/// # Safety
///
/// See `RawPrinter::new`.
pub unsafe fn print_llvm_error<T: Copy>(func: PrintFn<T>, obj: T, message: &str) {
    print_error(&RawPrinter::new(func, obj), message)
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use irbridge_diagnostics::{Buffer, CaptureEmitter, ColorChoice};
    use irbridge_support::ChunkSink;
    use pretty_assertions::assert_eq;

    use super::*;

    struct Counted<'a> {
        calls: Cell<usize>,
        chunks: &'a [&'a str],
    }
    impl<'a> Printable for Counted<'a> {
        fn print(&self, sink: &mut dyn ChunkSink) {
            self.calls.set(self.calls.get() + 1);
            for chunk in self.chunks {
                sink.write_chunk(chunk.as_bytes());
            }
        }
    }

    /// Captures output like `CaptureEmitter`, but hands out ANSI buffers
    #[derive(Default)]
    struct AnsiCapture(CaptureEmitter);
    impl Emitter for AnsiCapture {
        fn buffer(&self) -> Buffer {
            Buffer::ansi()
        }

        fn print(&self, buffer: Buffer) -> io::Result<()> {
            self.0.print(buffer)
        }
    }

    fn capture(config: DiagnosticsConfig) -> (DebugPrinter, Arc<CaptureEmitter>) {
        let emitter = Arc::new(CaptureEmitter::new());
        (DebugPrinter::new(config, emitter.clone()), emitter)
    }

    #[test]
    fn disabled_printer_skips_printing_test() {
        let config = DiagnosticsConfig {
            enabled: false,
            ..DiagnosticsConfig::default()
        };
        let (printer, emitter) = capture(config);
        let object = Counted {
            calls: Cell::new(0),
            chunks: &["never"],
        };
        printer.print_error(&object, "message: ").unwrap();
        assert_eq!(object.calls.get(), 0);
        assert!(emitter.captured().is_empty());
    }

    #[test]
    fn highlight_does_not_alter_uncolored_output_test() {
        let object = Counted {
            calls: Cell::new(0),
            chunks: &["!torch.tensor"],
        };

        let (plain, plain_out) = capture(DiagnosticsConfig::default());
        plain.print_error(&object, "unsupported type: ").unwrap();

        let config = DiagnosticsConfig {
            color: ColorChoice::Always,
            highlight_prefix: true,
            enabled: true,
        };
        let (highlighted, highlighted_out) = capture(config);
        highlighted.print_error(&object, "unsupported type: ").unwrap();

        assert_eq!(object.calls.get(), 2);
        assert_eq!(plain_out.captured(), highlighted_out.captured());
        assert_eq!(
            plain_out.captured_string(),
            "unsupported type: !torch.tensor\n"
        );
    }

    #[test]
    fn empty_message_test() {
        let (printer, emitter) = capture(DiagnosticsConfig::default());
        printer.print_error("%0 = torch.constant.int 1", "").unwrap();
        assert_eq!(emitter.captured_string(), "%0 = torch.constant.int 1\n");
    }

    #[test]
    fn highlight_colors_only_the_message_test() {
        let object = Counted {
            calls: Cell::new(0),
            chunks: &["%1 = ", "torch.aten.mm"],
        };
        let config = DiagnosticsConfig {
            color: ColorChoice::Always,
            highlight_prefix: true,
            enabled: true,
        };
        let emitter = Arc::new(AnsiCapture::default());
        let printer = DebugPrinter::new(config, emitter.clone());
        printer.print_error(&object, "msg: ").unwrap();

        assert_eq!(
            emitter.0.captured_string(),
            "\x1B[0m\x1B[1m\x1B[31mmsg: \x1B[0m%1 = torch.aten.mm\n"
        );
    }

    #[test]
    fn ansi_output_without_highlight_is_plain_test() {
        let object = Counted {
            calls: Cell::new(0),
            chunks: &["body"],
        };
        let emitter = Arc::new(AnsiCapture::default());
        let printer = DebugPrinter::new(DiagnosticsConfig::default(), emitter.clone());
        printer.print_error(&object, "msg: ").unwrap();
        assert_eq!(emitter.0.captured_string(), "msg: body\n");
    }
}
