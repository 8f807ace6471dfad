// src/main.rs
use commenter::args::Args;
use commenter::config::AppConfig;
use commenter::presentation::Printer;
use log::LevelFilter;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse_cli();
    init_logger(args.verbose);

    let app = match AppConfig::from_args(args) {
        Ok(app) => app,
        Err(e) => {
            let _ = Printer::new(io::stderr(), io::stderr().is_terminal()).error(&format!("{e:#}"));
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let color = app.color && stdout.is_terminal();
    let mut printer = Printer::new(stdout.lock(), color);

    match commenter::execute(&app, &mut printer) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let color = app.color && io::stderr().is_terminal();
            let _ = Printer::new(io::stderr(), color).error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` decides the filter unless `--verbose` forces debug output.
fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
