//! CLI configuration

use crate::error::{CliError, CliResult};
use livecalc::config::CalcConfig;
use livecalc::core::evaluator::EvaluationPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Most fractional digits worth showing for an `f64`
pub const MAX_DECIMAL_PLACES: usize = 15;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - every key event
    Debug,
    /// Trace - evaluator internals
    Trace,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Default log filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Overrides taken from the command line; `None`/`false`/0 means "not given"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliFlags {
    /// `-q`
    pub quiet: bool,
    /// Number of `-v`
    pub verbose: u8,
    /// `--color`
    pub color: Option<ColorChoice>,
    /// `--bell`
    pub bell: bool,
    /// `--policy`
    pub policy: Option<EvaluationPolicy>,
    /// `--decimals`
    pub decimals: Option<usize>,
}

/// CLI configuration
///
/// The JSON config file uses the same shape; missing fields keep their
/// defaults. Command-line flags are applied on top.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Ring the terminal bell on key presses
    pub bell: bool,
    /// Calculator settings
    pub calculator: CalcConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the calculator cannot work with
    pub fn validate(&self) -> CliResult<()> {
        let epsilon = self.calculator.division_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(CliError::config(format!(
                "division_epsilon must be a non-negative number, got {epsilon}"
            )));
        }
        if self.calculator.decimal_places > MAX_DECIMAL_PLACES {
            return Err(CliError::config(format!(
                "decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.calculator.decimal_places
            )));
        }
        Ok(())
    }

    /// Applies command-line flags on top of this configuration
    ///
    /// Only flags that were given override; everything else keeps the
    /// file's value.
    pub fn apply_flags(mut self, flags: &CliFlags) -> CliResult<Self> {
        if flags.quiet || flags.verbose > 0 {
            self = self.with_verbosity(Verbosity::from_flags(flags.quiet, flags.verbose));
        }
        if let Some(color) = flags.color {
            self = self.with_color(color);
        }
        if flags.bell {
            self = self.with_bell(true);
        }
        let mut calculator = self.calculator;
        if let Some(policy) = flags.policy {
            calculator = calculator.with_policy(policy);
        }
        if let Some(decimals) = flags.decimals {
            if decimals > MAX_DECIMAL_PLACES {
                return Err(CliError::invalid_argument(format!(
                    "--decimals must be at most {MAX_DECIMAL_PLACES}, got {decimals}"
                )));
            }
            calculator = calculator.with_decimal_places(decimals);
        }
        Ok(self.with_calculator(calculator))
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set bell feedback
    #[must_use]
    pub const fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    /// Set calculator settings
    #[must_use]
    pub const fn with_calculator(mut self, calculator: CalcConfig) -> Self {
        self.calculator = calculator;
        self
    }
}
