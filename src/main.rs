#![forbid(unsafe_code)]

//! sbr, the settings bundle reader CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    cli_app::init_logging(&args);
    if let Err(e) = cli_app::run(&args) {
        eprintln!("sbr: {e}");
        std::process::exit(1);
    }
}
