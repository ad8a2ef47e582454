//! rcomp command-line client

use clap::Parser;
use rcomp_http::cli::{Cli, handle_cli_command};

#[tokio::main]
async fn main() {
    rcomp::telemetry::init();
    let cli = Cli::parse();
    let exit_code = handle_cli_command(cli).await;
    std::process::exit(exit_code);
}
