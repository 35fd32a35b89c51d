//! Library components of the statx service binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod server;
pub mod summary;
