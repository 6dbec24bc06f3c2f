//! soyo CLI entrypoint.
//!
//! Parses arguments, resolves the run context from the working directory and
//! environment, and dispatches to the build or copy pipeline.

use camino::Utf8PathBuf;
use clap::Parser;
use soyo::cli::{Cli, Command};
use soyo::context::{DEBUG_ENV_VAR, RunContext};
use soyo::error::Result;
use soyo::output::write_stderr_line;
use soyo::{build, pipeline};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let ctx = context_from_env()?;
    match cli.command {
        Command::Copy => pipeline::run_copy(&ctx, stderr),
        Command::Build => build::run(&ctx, stderr),
    }
}

/// Resolve the run context from the working directory and environment.
fn context_from_env() -> Result<RunContext> {
    let cwd = std::env::current_dir()?;
    let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("current directory is not valid UTF-8: {e}"),
        )
    })?;

    let debug = std::env::var_os(DEBUG_ENV_VAR).is_some();
    Ok(RunContext::new(cwd, env!("CARGO_PKG_VERSION"), debug))
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
