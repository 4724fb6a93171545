//! Command-line interface module.

mod args;
pub mod publish;

pub use args::{Cli, Commands, PublishArgs};
