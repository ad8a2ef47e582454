//! Inlining of local files into remote command arguments.
//!
//! Some remote commands take file paths on their command line. The server
//! cannot see the caller's filesystem, so each such argument is replaced by
//! the file's contents, zlib-compressed and base64-encoded. Which arguments
//! are files depends on the command; see [`FileArgRule`].

use crate::error::RcompError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use log::debug;
use std::io::{Read, Write};

/// How a command marks file arguments in its argv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileArgRule {
    /// The single token right after each occurrence of `flag` is a file.
    FlagTagged { flag: &'static str },
    /// Tokens not starting with `-` are files; after a literal `--` every
    /// further token (other than another `--`) is a file.
    AfterSeparator,
}

/// Commands known to accept file arguments.
pub const FILE_ARG_RULES: &[(&str, FileArgRule)] = &[
    ("ltl2ba", FileArgRule::FlagTagged { flag: "-F" }),
    ("gr1c", FileArgRule::AfterSeparator),
];

pub fn rule_for(command: &str) -> Option<FileArgRule> {
    FILE_ARG_RULES
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, rule)| *rule)
}

impl FileArgRule {
    /// Positions in `argv` holding file paths, in ascending order.
    pub fn file_positions(&self, argv: &[String]) -> Vec<usize> {
        let mut positions = Vec::new();
        match self {
            FileArgRule::FlagTagged { flag } => {
                let mut index = 0;
                while index < argv.len() {
                    if argv[index] == *flag && index + 1 < argv.len() {
                        positions.push(index + 1);
                        index += 2;
                    } else {
                        index += 1;
                    }
                }
            }
            FileArgRule::AfterSeparator => {
                let mut all_files = false;
                for (index, token) in argv.iter().enumerate() {
                    if token == "--" {
                        all_files = true;
                    } else if all_files || !token.starts_with('-') {
                        positions.push(index);
                    }
                }
            }
        }
        positions
    }
}

/// zlib-compress `data` and encode it as standard base64 text.
pub fn encode_payload(data: &[u8]) -> Result<String, RcompError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map(|compressed| BASE64.encode(compressed))
        .map_err(|e| RcompError::from_decode_error(e, "payload compression"))
}

/// Inverse of [`encode_payload`].
pub fn decode_payload(text: &str) -> Result<Vec<u8>, RcompError> {
    let compressed = BASE64
        .decode(text)
        .map_err(|e| RcompError::from_decode_error(e, "payload base64"))?;
    let mut data = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut data)
        .map_err(|e| RcompError::from_decode_error(e, "payload inflate"))?;
    Ok(data)
}

/// Replace file arguments of `command` with their inlined payloads.
///
/// Files are read one at a time in argv order; the first unreadable file
/// aborts the whole preparation. Commands without a rule are returned as is.
pub async fn prepare_argv(command: &str, mut argv: Vec<String>) -> Result<Vec<String>, RcompError> {
    let Some(rule) = rule_for(command) else {
        return Ok(argv);
    };

    for position in rule.file_positions(&argv) {
        let path = &argv[position];
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| RcompError::from_io_error(e, path))?;
        debug!("Inlining '{path}' ({} bytes) for {command}", data.len());
        argv[position] = encode_payload(&data)?;
    }

    Ok(argv)
}
