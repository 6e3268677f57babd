// src/main.rs
use std::io::{self, Write};
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tracing::info;

use sysdiag::collector::{self, DockerCli, SysinfoHost};
use sysdiag::config::{self, Cli};
use sysdiag::{DiagError, Dispatcher};

fn main() -> ExitCode {
    let cli = Cli::parse();
    config::init_logging(&cli);

    let registry = match collector::default_registry(
        Rc::new(SysinfoHost::new()),
        Rc::new(DockerCli::new(cli.docker_bin.clone())),
    ) {
        Ok(registry) => registry,
        Err(e) => return report(&e),
    };

    let dispatcher = Dispatcher::new(&registry).with_policy(cli.failure_policy());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match dispatcher.run(&cli.selectors, &mut out) {
        Ok(dispatch) => out.flush().map(|()| dispatch).map_err(DiagError::from),
        Err(e) => {
            // best effort: the report goes ahead of the error line
            let _ = out.flush();
            Err(e)
        }
    };

    match result {
        Ok(dispatch) => {
            info!(?dispatch, "diagnostics finished");
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

/// Function to print the failure to stderr and pick the exit code.
fn report(error: &DiagError) -> ExitCode {
    ExitCode::from(error.report(&mut io::stderr().lock()))
}
