//! Interview Coach Service Library Crate
//!
//! Command-line arguments, configuration, the question bank, terminal input and the session runner.
//! The `coach` binary is a thin wrapper around this library.

pub mod cli;
pub mod config;
pub mod prompter;
pub mod questions;
pub mod session;
