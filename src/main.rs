// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! snapcheck - Main Application
//!
//! Compares the netcoredbg version published in the Snap Store with the latest
//! upstream version and exits 0 only when they are identical.

use std::io;
use std::process::exit;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use snapcheck::{Settings, run};

mod cli;

use cli::Cli;

/// Install the stderr logger
///
/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG` is
/// honoured, falling back to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("snapcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snapcheck=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("starting with {cli:?}");

    let settings = Settings::default();
    let result = run(&settings, cli.channel, &mut io::stdout(), &mut io::stderr());

    match result {
        Ok(outcome) => exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("snapcheck: {e}");
            exit(1);
        }
    }
}
