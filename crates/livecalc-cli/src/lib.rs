//! livecalc CLI library
//!
//! Terminal front end for the livecalc keypad calculator: one-shot key
//! scripts, an interactive session and the keypad layout.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod repl;
mod runner;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, PolicyArg, ReplArgs};
pub use config::{CliConfig, CliFlags, ColorChoice, Verbosity, MAX_DECIMAL_PLACES};
pub use error::{CliError, CliResult};
pub use output::{snapshot_json, Renderer};
pub use repl::{run_repl, ReplOptions};
pub use runner::{BellFeedback, KeyRunner, KeyStep};
