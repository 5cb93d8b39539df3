//! CLI subcommands.

pub mod check;

pub use check::CheckArgs;
