//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use livecalc::core::evaluator::EvaluationPolicy;
use std::path::PathBuf;

/// livecalc: keypad calculator with a live expression preview
#[derive(Parser, Debug)]
#[command(name = "livecalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never) [default: config file, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorArg>,

    /// Evaluation policy (overrides the config file)
    #[arg(long, global = true)]
    pub policy: Option<PolicyArg>,

    /// Fractional digits shown, at most 15 (overrides the config file)
    #[arg(long, global = true, value_name = "N")]
    pub decimals: Option<usize>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ring the terminal bell on every key press
    #[arg(long, global = true)]
    pub bell: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and show the display
    ///
    /// Each character is one key: digits, `.`, `+ - * /` (or `× ÷ −`),
    /// `=`, `%`, `n` (toggle sign) and `c` (clear). Spaces are ignored.
    Eval(EvalArgs),

    /// Interactive session reading key lines from stdin
    Repl(ReplArgs),

    /// Show the keypad layout and key bindings
    Keys,

    /// Show the effective configuration
    Config,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Keys to press, e.g. "12+3*4="
    #[arg(value_name = "KEYS", allow_hyphen_values = true)]
    pub keys: String,

    /// Print the display state as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the display after every key
    #[arg(long)]
    pub steps: bool,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Draw the keypad after every line
    #[arg(long)]
    pub keypad: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Evaluation policy argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// × and ÷ before + and −
    Precedence,
    /// Strictly left to right
    Sequential,
}

impl From<PolicyArg> for EvaluationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Precedence => Self::Precedence,
            PolicyArg::Sequential => Self::Sequential,
        }
    }
}
