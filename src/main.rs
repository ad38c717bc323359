use std::process::ExitCode;

use bench_http::config::{self, Invocation, Settings};
use bench_http::{logger, server};

fn main() -> ExitCode {
    match start(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_fatal(&err);
            ExitCode::from(1)
        }
    }
}

fn start<I>(args: I) -> bench_http::Result<()>
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    let args = match config::parse_args(args)? {
        Invocation::Serve(args) => args,
        Invocation::Print(text) => {
            print!("{text}");
            return Ok(());
        }
    };

    let settings = Settings::load(&args)?;
    logger::init(&settings.logging)?;

    server::run(&settings)
}
