//! Subcommand handlers.
//!
//! Each handler writes its user-facing output to `out` and leaves errors to
//! the caller, which prints them to stderr.

pub mod airdrop;
pub mod create;
pub mod import;
pub mod info;
pub mod transfer;
