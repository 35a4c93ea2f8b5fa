mod dump;

use std::env;
use std::ffi::OsString;
use std::process;

use anyhow::bail;
use clap::{crate_description, crate_name, crate_version};
use clap::{App, AppSettings, Arg, SubCommand};

use irbridge_diagnostics::UseColors;

pub fn main() -> anyhow::Result<()> {
    // Handle unexpected panics by presenting a user-friendly bug report prompt;
    // except when we're requesting debug info explicitly, in which case we
    // don't want to hide the panic
    if env::var_os("IRBRIDGE_LOG").is_none() {
        human_panic::setup_panic!();
    }

    // Initialize logger
    let mut builder = env_logger::Builder::from_env("IRBRIDGE_LOG");
    builder.format_indent(Some(2));
    if let Ok(precision) = env::var("IRBRIDGE_LOG_WITH_TIME") {
        match precision.as_str() {
            "s" => builder.format_timestamp_secs(),
            "ms" => builder.format_timestamp_millis(),
            "us" => builder.format_timestamp_micros(),
            "ns" => builder.format_timestamp_nanos(),
            other => bail!(
                "invalid IRBRIDGE_LOG_WITH_TIME precision, expected one of [s, ms, us, ns], got '{}'",
                other
            ),
        };
    } else {
        builder.format_timestamp(None);
    }
    builder.init();

    match run(env::args_os()) {
        Ok(status_code) => process::exit(status_code),
        Err(err) => {
            if let Some(err) = err.downcast_ref::<clap::Error>() {
                err.exit()
            } else {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }
}

fn run<I, T>(args: I) -> anyhow::Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from_safe(args)?;
    match matches.subcommand() {
        ("dump", Some(args)) => dump::run(args),
        (subcommand, _) => bail!("unrecognized subcommand '{}'", subcommand),
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("dump")
                .about("Prints a file to stderr through the callback printing convention")
                .arg(
                    Arg::with_name("input")
                        .help("The file whose contents should be printed")
                        .index(1)
                        .takes_value(true)
                        .value_name("FILE")
                        .required(true),
                )
                .arg(
                    Arg::with_name("message")
                        .help("The message to print ahead of the file contents")
                        .short("m")
                        .long("message")
                        .takes_value(true)
                        .value_name("MSG"),
                )
                .arg(
                    Arg::with_name("chunk-size")
                        .help("The number of bytes handed to the callback at a time")
                        .long("chunk-size")
                        .takes_value(true)
                        .value_name("N")
                        .default_value("4096")
                        .validator(dump::validate_chunk_size),
                )
                .arg(
                    Arg::with_name("color")
                        .help("When to color the output")
                        .long("color")
                        .takes_value(true)
                        .value_name("WHEN")
                        .possible_values(UseColors::VARIANTS),
                )
                .arg(
                    Arg::with_name("config")
                        .help("A TOML file with a [diagnostics] table")
                        .long("config")
                        .takes_value(true)
                        .value_name("PATH"),
                ),
        )
}
