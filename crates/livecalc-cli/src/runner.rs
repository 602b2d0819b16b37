//! Key session driving a calculator from the terminal

use crate::error::CliResult;
use console::Term;
use livecalc::config::CalcConfig;
use livecalc::driver::{parse_keys, CalculatorDriver};
use livecalc::keypad::{KeyFeedback, KeypadAction};
use livecalc::session::{Calculator, DisplaySnapshot};
use tracing::info;

/// Rings the terminal bell on every key press
#[derive(Debug)]
pub struct BellFeedback {
    term: Term,
    enabled: bool,
}

impl BellFeedback {
    /// Creates a bell writing to stderr
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            term: Term::stderr(),
            enabled,
        }
    }

    /// Returns true if the bell rings
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl KeyFeedback for BellFeedback {
    fn key_pressed(&mut self, _action: KeypadAction) {
        if self.enabled {
            let _ = self.term.write_str("\x07");
        }
    }
}

/// One key press and the display it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStep {
    /// Key pressed
    pub action: KeypadAction,
    /// Display after the key
    pub snapshot: DisplaySnapshot,
}

/// Calculator session with key feedback
#[derive(Debug)]
pub struct KeyRunner<F: KeyFeedback> {
    calculator: Calculator,
    feedback: F,
    last_action: Option<KeypadAction>,
}

impl<F: KeyFeedback> KeyRunner<F> {
    /// Creates a runner
    #[must_use]
    pub fn new(config: CalcConfig, feedback: F) -> Self {
        Self {
            calculator: Calculator::with_config(config),
            feedback,
            last_action: None,
        }
    }

    /// Returns the calculator
    #[must_use]
    pub const fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the feedback hook
    #[must_use]
    pub const fn feedback(&self) -> &F {
        &self.feedback
    }

    /// Last key pressed, for keypad highlighting
    #[must_use]
    pub const fn last_action(&self) -> Option<KeypadAction> {
        self.last_action
    }

    /// Current display
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.calculator.snapshot()
    }

    /// Presses every key of a script, recording each display
    ///
    /// Nothing is pressed when the script has an unknown key.
    pub fn feed_steps(&mut self, script: &str) -> CliResult<Vec<KeyStep>> {
        let actions = parse_keys(script)?;
        info!(keys = actions.len(), "feeding key script");
        Ok(actions
            .into_iter()
            .map(|action| KeyStep {
                action,
                snapshot: self.press(action),
            })
            .collect())
    }

    /// Presses every key of a script and returns the final display
    pub fn feed(&mut self, script: &str) -> CliResult<DisplaySnapshot> {
        self.feed_steps(script)?;
        Ok(self.snapshot())
    }
}

impl<F: KeyFeedback> CalculatorDriver for KeyRunner<F> {
    fn press(&mut self, action: KeypadAction) -> DisplaySnapshot {
        let snapshot = self.calculator.press(action);
        self.feedback.key_pressed(action);
        self.last_action = Some(action);
        snapshot
    }

    fn primary(&self) -> String {
        self.calculator.primary_text()
    }

    fn preview(&self) -> String {
        self.calculator.preview_text()
    }

    fn clear(&mut self) {
        self.calculator.clear();
        self.last_action = None;
    }
}
