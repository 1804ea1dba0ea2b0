//! CLI module for ewit - command-line interface and subcommands.
//!
//! The shell plays the chat host's tokenizer: a double-quoted run of words
//! arrives as a single argument.

pub mod commands;

pub use commands::Cli;
