//! Command-line interface module.

pub mod anchors;
mod args;
pub mod validate;

pub use args::{AnchorsArgs, Cli, Commands, ValidateArgs};
