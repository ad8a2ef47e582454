//! HTTP client and command-line front-end for rcomp servers.

pub mod http;

pub use http::*;
