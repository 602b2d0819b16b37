//! Unified calculator driver
//!
//! Behaviour checks are written once against [`CalculatorDriver`] and run
//! against any implementation: a bare [`Calculator`], either evaluation
//! policy, or a front end that wraps one.

use crate::keypad::KeypadAction;
use crate::session::{Calculator, DisplaySnapshot};
use thiserror::Error;

/// Errors raised while reading a key script
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyScriptError {
    /// A character that maps to no keypad action
    #[error("unknown key '{key}' at position {position}")]
    UnknownKey {
        /// The offending character
        key: char,
        /// Character index in the script
        position: usize,
    },
}

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses a key
    fn press(&mut self, action: KeypadAction) -> DisplaySnapshot;

    /// Gets the main display text
    fn primary(&self) -> String;

    /// Gets the expression preview text
    fn preview(&self) -> String;

    /// Resets the calculator
    fn clear(&mut self);
}

impl CalculatorDriver for Calculator {
    fn press(&mut self, action: KeypadAction) -> DisplaySnapshot {
        Self::press(self, action)
    }

    fn primary(&self) -> String {
        self.primary_text()
    }

    fn preview(&self) -> String {
        self.preview_text()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

/// Parses a key script into actions
///
/// Each character is one key (see [`KeypadAction::from_key`]); whitespace
/// is skipped.
pub fn parse_keys(script: &str) -> Result<Vec<KeypadAction>, KeyScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(position, key)| {
            KeypadAction::from_key(key).ok_or(KeyScriptError::UnknownKey { key, position })
        })
        .collect()
}

/// Feeds a key script to a driver and returns the final display
///
/// Nothing is pressed when the script contains an unknown key.
pub fn run_keys<D: CalculatorDriver + ?Sized>(
    driver: &mut D,
    script: &str,
) -> Result<Option<DisplaySnapshot>, KeyScriptError> {
    let actions = parse_keys(script)?;
    let mut last = None;
    for action in actions {
        last = Some(driver.press(action));
    }
    Ok(last)
}

// ===== Unified behaviour checks =====
// These work with ANY CalculatorDriver implementation and either policy

fn enter<D: CalculatorDriver>(driver: &mut D, script: &str) {
    driver.clear();
    run_keys(driver, script).unwrap();
}

/// Verifies the four operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    enter(driver, "2+3=");
    assert_eq!(driver.primary(), "5");

    enter(driver, "10-4=");
    assert_eq!(driver.primary(), "6");

    enter(driver, "6*7=");
    assert_eq!(driver.primary(), "42");

    enter(driver, "20/4=");
    assert_eq!(driver.primary(), "5");

    enter(driver, "1/3=");
    assert_eq!(driver.primary(), "0.3333333");
}

/// Verifies `1 + 2 × 3 =` yields `expected` (7 with precedence, 9 sequential)
pub fn verify_mixed_precedence<D: CalculatorDriver>(driver: &mut D, expected: &str) {
    enter(driver, "1+2*3=");
    assert_eq!(driver.primary(), expected);
}

/// Verifies a repeated operator keeps only the last one
pub fn verify_operator_replacement<D: CalculatorDriver>(driver: &mut D) {
    enter(driver, "9+*2=");
    assert_eq!(driver.primary(), "18");
}

/// Verifies division by zero shows `Error` and the next key starts afresh
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    enter(driver, "5/0=");
    assert_eq!(driver.primary(), "Error");
    assert_eq!(driver.preview(), "");

    run_keys(driver, "7").unwrap();
    assert_eq!(driver.primary(), "7");
}

/// Verifies percent and sign toggling on the typed number
pub fn verify_modifiers<D: CalculatorDriver>(driver: &mut D) {
    enter(driver, "50%");
    assert_eq!(driver.primary(), "0.5");

    enter(driver, "12nn");
    assert_eq!(driver.primary(), "12");

    enter(driver, "12n");
    assert_eq!(driver.primary(), "-12");
}

/// Verifies clear resets both display lines
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    enter(driver, "4*5+");
    driver.clear();
    assert_eq!(driver.primary(), "0");
    assert_eq!(driver.preview(), "");
}
