//! HTTP components for rcomp
//!
//! This module contains all HTTP-specific functionality including:
//! - The request/response client for index, version, invocation and status
//! - Completion polling for jobs the server runs in the background
//! - Command-line handlers that render results to a terminal

pub mod cli;
pub mod client;
pub mod common;
pub mod error;
pub mod poller;

pub use client::RcompClient;
pub use poller::{CompletionPoller, JobStatusSource};
