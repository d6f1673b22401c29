mod host_api;
mod render;
mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use netcfg_core::platform::{BUILD_PLATFORM, Platform};
use session::Session;

const USAGE: &str =
    "Usage: netcfg-console [--platform <stm32f4|nrf5x>] [--override <path>] [--transcript <path>]";

struct Options {
    platform: Platform,
    override_path: Option<String>,
    transcript: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let options = parse_options(env::args().skip(1)).unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("{USAGE}");
        process::exit(2);
    });

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut session = Session::new(options.platform, options.transcript.as_deref())?;
    let mut line = String::new();

    writeln!(
        writer,
        "Network test configuration console ({}). Type `help` for commands or `exit` to quit.",
        session.platform()
    )?;

    if let Some(path) = options.override_path.as_deref() {
        for response in session.load_file(path) {
            writeln!(writer, "{response}")?;
        }
    }

    loop {
        line.clear();
        write!(writer, "> ")?;
        writer.flush()?;

        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(writer)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if should_terminate(trimmed) {
            writeln!(writer, "Session closed.")?;
            break;
        }

        let responses = session.handle_command(trimmed)?;
        for response in responses {
            writeln!(writer, "{response}")?;
        }
    }

    Ok(())
}

fn should_terminate(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        platform: BUILD_PLATFORM.unwrap_or(Platform::Stm32f4),
        override_path: None,
        transcript: None,
    };

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg, None),
        };
        let mut value = || {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| format!("Expected value after {flag}"))
        };
        match flag.as_str() {
            "--platform" => {
                let tag = value()?;
                options.platform = Platform::from_name(&tag)
                    .ok_or_else(|| format!("Unknown platform `{tag}`"))?;
            }
            "--override" => options.override_path = Some(value()?),
            "--transcript" => options.transcript = Some(PathBuf::from(value()?)),
            _ => return Err(format!("Unknown argument `{flag}`")),
        }
    }

    Ok(options)
}
