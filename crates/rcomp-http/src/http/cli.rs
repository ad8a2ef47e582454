//! CLI interface implementation for the rcomp client

use super::client::RcompClient;
use super::common::{index_lines, print_result, version_text};
use clap::Parser;
use rcomp::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "rcomp")]
#[command(about = "Run commands on a remote rcomp server")]
#[command(version)]
pub struct Cli {
    /// Base URI of the server (default: https://api.fmtools.org)
    #[arg(short = 's', value_name = "URI")]
    pub server: Option<String>,
    /// Remote command and its arguments; omit to list available commands
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub invocation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ListCommands,
    ServerVersion,
    Invoke { command: String, args: Vec<String> },
}

impl Cli {
    pub fn action(&self) -> Action {
        match self.invocation.split_first() {
            None => Action::ListCommands,
            Some((command, _)) if command == "version" => Action::ServerVersion,
            Some((command, args)) => Action::Invoke {
                command: command.clone(),
                args: args.to_vec(),
            },
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        match self.server {
            Some(ref uri) => ClientConfig::new().with_base_uri(uri),
            None => ClientConfig::new(),
        }
    }
}

/// Run the parsed command line and return the process exit code.
pub async fn handle_cli_command(cli: Cli) -> i32 {
    let client = match RcompClient::new(cli.client_config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    match cli.action() {
        Action::ListCommands => handle_index_command(&client).await,
        Action::ServerVersion => handle_version_command(&client).await,
        Action::Invoke { command, args } => handle_invoke_command(&client, &command, args).await,
    }
}

pub async fn handle_index_command(client: &RcompClient) -> i32 {
    match client.fetch_index().await {
        Ok(listing) => {
            for line in index_lines(&listing) {
                println!("{line}");
            }
            0
        }
        Err(e) => {
            eprintln!("Failed to list commands at {}: {e}", client.endpoint());
            1
        }
    }
}

pub async fn handle_version_command(client: &RcompClient) -> i32 {
    match client.fetch_version().await {
        Ok(info) => {
            println!("{}", version_text(&info));
            0
        }
        Err(e) => {
            eprintln!("Failed to get server version from {}: {e}", client.endpoint());
            1
        }
    }
}

/// Inline file arguments, invoke the command and wait for its result.
/// Returns the remote exit code.
pub async fn handle_invoke_command(client: &RcompClient, command: &str, args: Vec<String>) -> i32 {
    match client.run(command, args).await {
        Ok(result) => {
            print_result(&result);
            result.exit_code
        }
        Err(e) => {
            eprintln!("Failed to run '{command}': {e}");
            1
        }
    }
}
