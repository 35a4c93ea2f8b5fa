use std::ffi::c_void;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use clap::ArgMatches;

use irbridge_debug::{DebugPrinter, StringCallback, StringRef};
use irbridge_diagnostics::UseColors;
use irbridge_session::DiagnosticsConfig;

/// The contents of a file, handed out through the printing callback a
/// fixed number of bytes at a time
struct ChunkedSource {
    bytes: Vec<u8>,
    chunk_size: usize,
}

unsafe extern "C" fn print_chunked(
    source: *const ChunkedSource,
    callback: StringCallback,
    userdata: *mut c_void,
) {
    let source = &*source;
    for chunk in source.bytes.chunks(source.chunk_size) {
        callback(StringRef::from(chunk), userdata);
    }
}

pub fn validate_chunk_size(value: String) -> Result<(), String> {
    match value.parse::<usize>() {
        Ok(0) => Err("chunk size must be greater than zero".to_string()),
        Ok(_) => Ok(()),
        Err(err) => Err(format!("invalid chunk size '{}': {}", value, err)),
    }
}

/// Builds the diagnostics configuration for a `dump` invocation
///
/// Later sources win: the defaults, then the `--config` file, then the
/// variables visible through `lookup`, then `--color`.
fn resolve_config<F>(args: &ArgMatches<'_>, lookup: F) -> anyhow::Result<DiagnosticsConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match args.value_of("config") {
        None => DiagnosticsConfig::default(),
        Some(path) => DiagnosticsConfig::from_file(Path::new(path))?,
    };
    config = config.with_env_overrides(lookup)?;
    if let Some(color) = args.value_of("color") {
        let colors = color.parse::<UseColors>().map_err(|err| anyhow!(err))?;
        config.color = colors.into();
    }
    Ok(config)
}

pub fn run(args: &ArgMatches<'_>) -> anyhow::Result<i32> {
    let config = resolve_config(args, |var| std::env::var(var).ok())?;

    let input = args
        .value_of("input")
        .ok_or_else(|| anyhow!("missing input file"))?;
    let chunk_size = args
        .value_of("chunk-size")
        .unwrap_or("4096")
        .parse::<usize>()?;
    let message = args.value_of("message").unwrap_or("");

    let source = ChunkedSource {
        bytes: fs::read(input).with_context(|| format!("unable to read {}", input))?,
        chunk_size,
    };
    log::debug!(
        "printing {} bytes from {} in chunks of {}",
        source.bytes.len(),
        input,
        chunk_size
    );

    let printer = DebugPrinter::stderr(config);
    unsafe {
        printer
            .print_raw(print_chunked, &source as *const ChunkedSource, message)
            .context("unable to write to stderr")?;
    }

    Ok(0)
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use irbridge_debug::RawPrinter;
    use irbridge_diagnostics::{CaptureEmitter, ColorChoice};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn chunked_source_prints_every_byte_test() {
        let source = ChunkedSource {
            bytes: b"module {\n  func.func @main() {\n  }\n}".to_vec(),
            chunk_size: 3,
        };
        let emitter = Arc::new(CaptureEmitter::new());
        let printer = DebugPrinter::new(DiagnosticsConfig::default(), emitter.clone());
        unsafe {
            printer
                .print_raw(print_chunked, &source as *const ChunkedSource, "ir: ")
                .unwrap();
        }
        assert_eq!(
            emitter.captured_string(),
            "ir: module {\n  func.func @main() {\n  }\n}\n"
        );
    }

    #[test]
    fn chunked_source_chunk_boundaries_test() {
        let source = ChunkedSource {
            bytes: b"abcdefg".to_vec(),
            chunk_size: 3,
        };
        let mut chunks = Vec::new();
        let mut record = |chunk: &[u8]| chunks.push(chunk.to_vec());
        let printer = unsafe { RawPrinter::new(print_chunked, &source as *const ChunkedSource) };
        irbridge_debug::Printable::print(&printer, &mut record);
        assert_eq!(chunks, vec![b"abc".to_vec(), b"def".to_vec(), b"g".to_vec()]);
    }

    #[test]
    fn chunk_size_validation_test() {
        assert!(validate_chunk_size("1".to_string()).is_ok());
        assert!(validate_chunk_size("0".to_string()).is_err());
        assert!(validate_chunk_size("lots".to_string()).is_err());
    }

    #[test]
    fn config_layering_test() {
        let path = std::env::temp_dir().join(format!(
            "irbridge-dump-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[diagnostics]\ncolor = \"never\"\n").unwrap();
        let config_path = path.to_str().unwrap();

        let resolve = |extra: &[&str], env: Option<&'static str>| {
            let mut argv = vec!["irbridge", "dump", "--config", config_path];
            argv.extend_from_slice(extra);
            argv.push("ir.mlir");
            let matches = crate::app().get_matches_from_safe(argv).unwrap();
            let args = matches.subcommand_matches("dump").unwrap();
            resolve_config(args, |var: &str| match (var, env) {
                ("IRBRIDGE_COLOR", Some(value)) => Some(value.to_string()),
                _ => None,
            })
        };

        let file_only = resolve(&[], None);
        let env_wins = resolve(&[], Some("always"));
        let flag_wins = resolve(&["--color", "never"], Some("always"));
        fs::remove_file(&path).unwrap();

        assert_eq!(file_only.unwrap().color, ColorChoice::Never);
        assert_eq!(env_wins.unwrap().color, ColorChoice::Always);
        assert_eq!(flag_wins.unwrap().color, ColorChoice::Never);
    }
}
