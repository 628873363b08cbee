//! Command-line surface

pub mod args;

pub use args::Cli;
