//! letterboxd-ics CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use letterboxd_ics_client::cli::Cli;
use letterboxd_ics_client::config::Config;
use letterboxd_ics_client::output;
use letterboxd_ics_core::tracing::{TracingFormat, init_tracing};
use letterboxd_ics_core::Error;
use letterboxd_ics_provider::CalendarRenderer;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    if let Err(err) = init_tracing(level, TracingFormat::default()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // command line and environment override the options file
    if let Some(username) = cli.username {
        config.auth.username = username;
    }
    if let Some(password) = cli.password {
        config.auth.password = password;
    }
    if let Some(file) = cli.file {
        config.file = Some(file);
    }
    if cli.no_headers {
        config.output.headers = false;
    }

    let mut renderer = CalendarRenderer::new(config.render_options())?;
    match renderer.render() {
        Ok(rendered) => {
            if config.output.headers {
                for line in output::response_headers(&config.output, &rendered.etag) {
                    println!("{line}");
                }
                println!();
            }
            print!("{}", rendered.text);
            Ok(())
        }
        Err(err) if config.output.errors => {
            print!("{err}");
            Ok(())
        }
        Err(err) => {
            tracing::error!(%err, "render failed");
            Err(err)
        }
    }
}
