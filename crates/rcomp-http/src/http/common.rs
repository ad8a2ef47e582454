//! Terminal rendering for rcomp responses

use rcomp::{IndexListing, InvocationResult, VersionInfo};

/// One `"<name>\t\t<summary>"` line per advertised command.
pub fn index_lines(listing: &IndexListing) -> Vec<String> {
    listing
        .commands
        .iter()
        .map(|(name, descriptor)| format!("{name}\t\t{}", descriptor.summary))
        .collect()
}

pub fn version_text(info: &VersionInfo) -> String {
    match info.version() {
        Some(version) => version.to_string(),
        None => info.0.to_string(),
    }
}

/// Print a finished invocation: trimmed output on stdout, and the job
/// status on stderr when the remote command failed.
pub fn print_result(result: &InvocationResult) {
    if let Some(output) = result.trimmed_output() {
        println!("{output}");
    }
    match result.status {
        Some(ref status) if result.exit_code != 0 => eprintln!("job_status: \"{status}\""),
        _ => {}
    }
}
