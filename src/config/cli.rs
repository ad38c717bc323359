// Command line module
// Parses the getopt-style flags accepted by the benchmark binary

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use crate::error::{Error, Result};

/// Command line arguments
#[derive(Clone, Debug, Default, Parser)]
#[command(
    name = "bench_http",
    version,
    about = "Serve a synthetic payload over HTTP for benchmarking"
)]
pub struct Args {
    /// Listen port (default 8080)
    #[arg(short = 'p', value_name = "PORT")]
    pub port: Option<u16>,

    /// Content length in bytes
    #[arg(short = 'l', value_name = "LENGTH", value_parser = parse_content_length)]
    pub length: Option<u64>,

    /// Enable the accelerated engine backend with a bounded run
    #[arg(short = 'i')]
    pub accelerate: bool,

    /// Configuration file (without extension)
    #[arg(short = 'c', value_name = "PATH")]
    pub config: Option<String>,
}

/// What the process should do after parsing its arguments
#[derive(Debug)]
pub enum Invocation {
    Serve(Args),
    /// Help or version text; print it and exit successfully
    Print(String),
}

/// Parse an argument list (program name first) into an [`Invocation`].
pub fn parse_args<I, T>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Ok(Invocation::Serve(args)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(Invocation::Print(err.render().to_string()))
            }
            ErrorKind::ValueValidation | ErrorKind::InvalidValue if is_length_arg(&err) => {
                Err(Error::BadContentLength(summary(&err)))
            }
            _ => Err(Error::IllegalArgument(summary(&err))),
        },
    }
}

/// Accepts a strictly positive byte count.
fn parse_content_length(value: &str) -> std::result::Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err("Bad content length".to_string()),
        Ok(len) => Ok(len),
    }
}

fn is_length_arg(err: &clap::Error) -> bool {
    matches!(
        err.get(ContextKind::InvalidArg),
        Some(ContextValue::String(arg)) if arg.starts_with("-l")
    )
}

/// First line of a clap diagnostic without the `error: ` prefix
fn summary(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
