//! commit-gate library.
//!
//! Pre-commit gate that runs PHP and JavaScript checks and decides whether a
//! commit may proceed.

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod hooks;
pub mod process;
pub mod report;
pub mod staged;

#[cfg(test)]
mod testing;

pub use error::Error;
