//! HTTP client for the playlist server.
//!
//! The server owns the playlist order and the notion of "current" track;
//! everything here mirrors its JSON API one-to-one. See `types` for the
//! wire shapes and `client` for the request plumbing.

mod client;
mod types;

pub use client::*;
pub use types::*;

#[cfg(test)]
mod tests;
