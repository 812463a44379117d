//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{BenchArgs, TestPreset};
pub use types::{PositiveU64, PositiveUsize};

pub(crate) use defaults::{
    DEFAULT_CONNECTIONS, DEFAULT_REQUESTS, DEFAULT_URL, DEFAULT_USER_AGENT,
};
pub(crate) use parsers::parse_duration;
