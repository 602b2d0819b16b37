//! Calculator session: the event surface consumed by a view layer
//!
//! Each key event is handled to completion and returns a [`DisplaySnapshot`].
//! Reading display state never mutates the session.
//!
//! ```text
//! Empty ──digit/decimal──▶ EnteringNumber ──operator──▶ OperatorPending
//!   ▲                            ▲  │                        │
//!   │                            │  └────────equals──────────┼──▶ Result
//!   │                            └───────digit/decimal───────┘      │
//!   └──────────────── clear (from any state) ◀── Error ◀──equals÷0──┘
//! ```

use crate::config::CalcConfig;
use crate::core::accumulator::InputAccumulator;
use crate::core::evaluator::{Evaluator, Token, TokenSequence};
use crate::core::format::{format_number_with, ERROR_TEXT};
use crate::core::Operator;
use crate::keypad::KeypadAction;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcState {
    /// Nothing entered
    #[default]
    Empty,
    /// A number is being typed
    EnteringNumber,
    /// An operator was pressed and awaits its right operand
    OperatorPending,
    /// Equals produced a result
    Result,
    /// Equals failed with a division by zero
    Error,
}

/// Read-only display state after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Main display line
    pub primary: String,
    /// Expression preview line
    pub preview: String,
    /// Symbol of the operator in progress, for button highlighting
    pub active_operator: Option<String>,
    /// Session state
    pub state: CalcState,
}

/// One calculator session
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalcConfig,
    evaluator: Evaluator,
    sequence: TokenSequence,
    input: InputAccumulator,
    state: CalcState,
    /// `"expr = result"` line kept after equals
    result_line: Option<String>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a session with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalcConfig::default())
    }

    /// Creates a session with custom settings
    #[must_use]
    pub fn with_config(config: CalcConfig) -> Self {
        Self {
            config,
            evaluator: config.evaluator(),
            sequence: TokenSequence::new(),
            input: InputAccumulator::new(),
            state: CalcState::Empty,
            result_line: None,
        }
    }

    /// Returns the session configuration
    #[must_use]
    pub const fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Returns the current state
    #[must_use]
    pub const fn state(&self) -> CalcState {
        self.state
    }

    /// Returns the committed token sequence
    #[must_use]
    pub const fn sequence(&self) -> &TokenSequence {
        &self.sequence
    }

    /// Returns the input buffer
    #[must_use]
    pub const fn input(&self) -> &InputAccumulator {
        &self.input
    }

    // ===== Events =====

    /// Handles a keypad action and returns the resulting display
    pub fn press(&mut self, action: KeypadAction) -> DisplaySnapshot {
        match action {
            KeypadAction::Digit(d) => self.digit(d),
            KeypadAction::Decimal => self.decimal_point(),
            KeypadAction::Operator(op) => self.operator(op),
            KeypadAction::Equals => self.equals(),
            KeypadAction::Clear => self.clear(),
            KeypadAction::Percent => self.percent(),
            KeypadAction::ToggleSign => self.toggle_sign(),
        }
        debug!(action = %action.label(), state = ?self.state, "key handled");
        self.snapshot()
    }

    /// Types a digit (0-9)
    pub fn digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        self.recover_from_error();
        self.start_fresh_after_result();
        self.input.append_digit(digit);
        self.settle();
    }

    /// Types a decimal point
    pub fn decimal_point(&mut self) {
        self.recover_from_error();
        self.start_fresh_after_result();
        self.input.append_decimal();
        self.settle();
    }

    /// Commits the typed number and an operator
    ///
    /// A leading `−` starts a negative number instead. A repeated operator
    /// replaces the previous one.
    pub fn operator(&mut self, op: Operator) {
        self.recover_from_error();
        self.result_line = None;
        if self.input.overflowed() {
            self.fail("typed number out of range");
            return;
        }

        if self.sequence.is_empty() && self.input.parse().is_none() {
            if op == Operator::Subtract {
                if self.input.is_empty() {
                    self.input.toggle_sign();
                }
                self.settle();
                return;
            }
            // no left operand yet: it defaults to zero
            self.input.clear();
            self.sequence.push_number(0.0);
        }

        if let Some(value) = self.input.take_value() {
            self.sequence.push_number(value);
        }
        if let Some(replaced) = self.sequence.push_operator(op) {
            debug!(from = replaced.symbol(), to = op.symbol(), "operator replaced");
        }
        self.settle();
    }

    /// Evaluates the expression
    ///
    /// On success the sequence collapses to the result and the expression as
    /// displayed is kept for the preview line. A division by zero, or a
    /// result or typed number outside the `f64` range, moves to
    /// [`CalcState::Error`] and discards the expression.
    pub fn equals(&mut self) {
        if self.state == CalcState::Error {
            self.clear();
            return;
        }
        if self.state == CalcState::Result {
            return;
        }
        if self.input.overflowed() {
            self.fail("typed number out of range");
            return;
        }
        if self.sequence.is_empty() && self.input.parse().is_none() {
            return;
        }

        let expression = self.expression_text();
        let work = self.sequence.working_copy(self.input.parse());

        match self.evaluator.evaluate(&work) {
            Ok(value) if value.is_finite() => {
                self.sequence.collapse_to(value);
                self.input.clear();
                self.result_line = Some(format!("{expression} = {}", self.format(value)));
                self.state = CalcState::Result;
                debug!(%expression, value, "equals");
            }
            Ok(value) => {
                debug!(%expression, value, "result out of range");
                self.fail("result out of range");
            }
            Err(err) => {
                debug!(%expression, error = %err, "evaluation failed");
                self.fail("division by zero");
            }
        }
    }

    /// Resets everything
    pub fn clear(&mut self) {
        self.sequence.clear();
        self.input.clear();
        self.result_line = None;
        self.state = CalcState::Empty;
    }

    /// Divides the typed number by 100
    pub fn percent(&mut self) {
        self.recover_from_error();
        self.load_result_into_input();
        self.input.percent();
        self.settle();
    }

    /// Flips the sign of the typed number
    pub fn toggle_sign(&mut self) {
        self.recover_from_error();
        self.load_result_into_input();
        self.input.toggle_sign();
        self.settle();
    }

    // ===== Readable state =====

    /// Value of the current (possibly incomplete) expression
    ///
    /// `None` when evaluation fails.
    #[must_use]
    pub fn preview_value(&self) -> Option<f64> {
        self.evaluator
            .preview(&self.sequence, self.input.parse())
            .ok()
    }

    /// Main display text
    #[must_use]
    pub fn primary_text(&self) -> String {
        if self.state == CalcState::Error {
            return ERROR_TEXT.to_string();
        }
        if !self.input.is_empty() {
            return self.input.as_str().to_string();
        }
        match self.preview_value() {
            Some(value) => self.format(value),
            None => ERROR_TEXT.to_string(),
        }
    }

    /// Committed expression followed by the typed number
    #[must_use]
    pub fn expression_text(&self) -> String {
        self.sequence
            .expression_text(self.input.as_str(), self.config.decimal_places)
    }

    /// Expression preview line
    ///
    /// After equals this is `"expr = result"`. While typing, the live value
    /// is appended once the expression has an operator and ends in a number.
    #[must_use]
    pub fn preview_text(&self) -> String {
        if self.state == CalcState::Error {
            return String::new();
        }
        if let Some(line) = &self.result_line {
            return line.clone();
        }

        let expression = self.expression_text();
        if self.sequence.has_operator() && self.input.parse().is_some() {
            if let Some(value) = self.preview_value() {
                return format!("{expression} = {}", self.format(value));
            }
        }
        expression
    }

    /// Operator of the calculation in progress
    ///
    /// Stays set while its right operand is typed; equals and clear reset it.
    #[must_use]
    pub fn active_operator(&self) -> Option<Operator> {
        self.sequence.trailing_operator()
    }

    /// Symbol of [`Self::active_operator`]
    #[must_use]
    pub fn active_operator_symbol(&self) -> Option<&'static str> {
        self.active_operator().map(|op| op.symbol())
    }

    /// Captures the full display state
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            primary: self.primary_text(),
            preview: self.preview_text(),
            active_operator: self.active_operator_symbol().map(str::to_string),
            state: self.state,
        }
    }

    /// Formats a value with the configured precision
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format_number_with(value, self.config.decimal_places)
    }

    // ===== Internal transitions =====

    /// Discards everything and shows `Error`
    fn fail(&mut self, reason: &str) {
        debug!(reason, "resetting to error");
        self.sequence.clear();
        self.input.clear();
        self.result_line = None;
        self.state = CalcState::Error;
    }

    fn recover_from_error(&mut self) {
        if self.state == CalcState::Error {
            self.clear();
        }
    }

    fn start_fresh_after_result(&mut self) {
        self.result_line = None;
        if self.state == CalcState::Result {
            self.sequence.clear();
            self.input.clear();
        }
    }

    /// Moves a displayed result into the buffer so it can be edited
    fn load_result_into_input(&mut self) {
        self.result_line = None;
        if self.state != CalcState::Result {
            return;
        }
        if let Some(Token::Number(value)) = self.sequence.last().copied() {
            self.input = InputAccumulator::with_value(value);
        }
        self.sequence.clear();
    }

    /// Derives the state from the sequence and buffer
    fn settle(&mut self) {
        self.state = if !self.input.is_empty() {
            CalcState::EnteringNumber
        } else if self.sequence.trailing_operator().is_some() {
            CalcState::OperatorPending
        } else if self.sequence.is_empty() {
            CalcState::Empty
        } else {
            CalcState::Result
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluator::EvaluationPolicy;

    fn sequential() -> Calculator {
        Calculator::with_config(CalcConfig::new().with_policy(EvaluationPolicy::Sequential))
    }

    fn keys(calc: &mut Calculator, script: &str) {
        for ch in script.chars().filter(|c| !c.is_whitespace()) {
            let action = KeypadAction::from_key(ch).unwrap();
            calc.press(action);
        }
    }

    fn run(script: &str) -> Calculator {
        let mut calc = Calculator::new();
        keys(&mut calc, script);
        calc
    }

    // ===== Initial state =====

    #[test]
    fn test_new_session() {
        let calc = Calculator::new();
        assert_eq!(calc.state(), CalcState::Empty);
        assert_eq!(calc.primary_text(), "0");
        assert_eq!(calc.preview_text(), "");
        assert_eq!(calc.active_operator(), None);
    }

    // ===== Digits =====

    #[test]
    fn test_digits_display() {
        let calc = run("123");
        assert_eq!(calc.primary_text(), "123");
        assert_eq!(calc.state(), CalcState::EnteringNumber);
        assert_eq!(calc.preview_text(), "123");
    }

    #[test]
    fn test_digit_out_of_range_ignored() {
        let mut calc = Calculator::new();
        calc.digit(10);
        assert_eq!(calc.state(), CalcState::Empty);
    }

    #[test]
    fn test_decimal_display_keeps_trailing_point() {
        let calc = run("3.");
        assert_eq!(calc.primary_text(), "3.");
        let calc = run("1.05");
        assert_eq!(calc.primary_text(), "1.05");
    }

    // ===== Operators =====

    #[test]
    fn test_operator_pending() {
        let calc = run("12+");
        assert_eq!(calc.state(), CalcState::OperatorPending);
        assert_eq!(calc.active_operator_symbol(), Some("+"));
        assert_eq!(calc.primary_text(), "12");
        assert_eq!(calc.preview_text(), "12 +");
    }

    #[test]
    fn test_active_operator_kept_while_typing_operand() {
        let mut calc = run("12+3");
        assert_eq!(calc.active_operator(), Some(Operator::Add));
        assert_eq!(calc.preview_text(), "12 + 3 = 15");

        calc.equals();
        assert_eq!(calc.active_operator(), None);

        keys(&mut calc, "*4");
        assert_eq!(calc.active_operator_symbol(), Some("×"));
        calc.clear();
        assert_eq!(calc.active_operator(), None);
    }

    #[test]
    fn test_operator_replacement() {
        let calc = run("9+*2=");
        assert_eq!(calc.primary_text(), "18");
        assert_eq!(calc.preview_text(), "9 × 2 = 18");
    }

    #[test]
    fn test_leading_minus_starts_negative_number() {
        let calc = run("-5+2=");
        assert_eq!(calc.primary_text(), "-3");
    }

    #[test]
    fn test_leading_minus_shows_sign() {
        let calc = run("-");
        assert_eq!(calc.primary_text(), "-");
        assert_eq!(calc.state(), CalcState::EnteringNumber);
        assert!(calc.sequence().is_empty());
    }

    #[test]
    fn test_leading_minus_twice_stays_minus() {
        let calc = run("--");
        assert_eq!(calc.input().as_str(), "-");
        assert!(calc.sequence().is_empty());
    }

    #[test]
    fn test_leading_plus_uses_zero() {
        let calc = run("+4=");
        assert_eq!(calc.primary_text(), "4");
        assert_eq!(calc.preview_text(), "0 + 4 = 4");
    }

    #[test]
    fn test_minus_after_operator_replaces() {
        let calc = run("5*-3=");
        assert_eq!(calc.primary_text(), "2");
    }

    #[test]
    fn test_live_preview_drops_trailing_operator() {
        let calc = run("1+2*");
        assert_eq!(calc.primary_text(), "3");
        assert_eq!(calc.preview_text(), "1 + 2 ×");
    }

    // ===== Equals: precedence =====

    #[test]
    fn test_precedence_equals() {
        let calc = run("1+2*3=");
        assert_eq!(calc.primary_text(), "7");
        assert_eq!(calc.preview_text(), "1 + 2 × 3 = 7");
        assert_eq!(calc.state(), CalcState::Result);
        assert_eq!(calc.sequence().tokens(), &[Token::Number(7.0)]);
        assert!(calc.input().is_empty());
    }

    #[test]
    fn test_sequential_equals() {
        let mut calc = sequential();
        keys(&mut calc, "1+2*3=");
        assert_eq!(calc.primary_text(), "9");
        assert_eq!(calc.preview_text(), "1 + 2 × 3 = 9");
    }

    #[test]
    fn test_equals_with_trailing_operator() {
        let calc = run("9+=");
        assert_eq!(calc.primary_text(), "9");
        assert_eq!(calc.preview_text(), "9 + = 9");
    }

    #[test]
    fn test_equals_keeps_typed_expression() {
        let calc = run("12+3.=");
        assert_eq!(calc.primary_text(), "15");
        assert_eq!(calc.preview_text(), "12 + 3. = 15");

        let calc = run("2.50*2=");
        assert_eq!(calc.preview_text(), "2.5 × 2 = 5");
    }

    // ===== Out-of-range numbers =====

    fn nines(count: usize) -> String {
        "9".repeat(count)
    }

    #[test]
    fn test_overflowed_result_is_error() {
        let mut calc = run(&format!("{}*{}=", nines(300), nines(300)));
        assert_eq!(calc.state(), CalcState::Error);
        assert_eq!(calc.primary_text(), "Error");
        assert_eq!(calc.preview_text(), "");

        calc.toggle_sign();
        assert_eq!(calc.primary_text(), "-");
        assert!(calc.input().as_str().chars().all(|c| c == '-'));
    }

    #[test]
    fn test_overflowed_result_then_percent() {
        let mut calc = run(&format!("{}*{}=", nines(300), nines(300)));
        calc.percent();
        assert_eq!(calc.state(), CalcState::Empty);
        assert_eq!(calc.primary_text(), "0");
    }

    #[test]
    fn test_overflowed_literal_operator_is_error() {
        let calc = run(&format!("{}+", nines(400)));
        assert_eq!(calc.state(), CalcState::Error);
        assert_eq!(calc.primary_text(), "Error");
        assert!(calc.sequence().is_empty());
    }

    #[test]
    fn test_overflowed_literal_equals_is_error() {
        let mut calc = run(&format!("2*{}=", nines(400)));
        assert_eq!(calc.state(), CalcState::Error);
        calc.digit(4);
        assert_eq!(calc.primary_text(), "4");
    }

    #[test]
    fn test_equals_on_empty_is_noop() {
        let calc = run("=");
        assert_eq!(calc.state(), CalcState::Empty);
        assert_eq!(calc.preview_text(), "");
    }

    #[test]
    fn test_repeated_equals_is_noop() {
        let calc = run("2+3==");
        assert_eq!(calc.primary_text(), "5");
        assert_eq!(calc.preview_text(), "2 + 3 = 5");
    }

    #[test]
    fn test_fractional_result() {
        let calc = run("1/3=");
        assert_eq!(calc.primary_text(), "0.3333333");
    }

    // ===== Result continuation =====

    #[test]
    fn test_operator_continues_from_result() {
        let calc = run("2+3=*4=");
        assert_eq!(calc.primary_text(), "20");
        assert_eq!(calc.preview_text(), "5 × 4 = 20");
    }

    #[test]
    fn test_digit_after_result_starts_new() {
        let calc = run("2+3=7");
        assert_eq!(calc.primary_text(), "7");
        assert_eq!(calc.preview_text(), "7");
        assert_eq!(calc.sequence().len(), 0);
    }

    #[test]
    fn test_decimal_after_result_starts_new() {
        let calc = run("2+3=.");
        assert_eq!(calc.primary_text(), "0.");
    }

    #[test]
    fn test_toggle_sign_on_result() {
        let calc = run("2+3=n");
        assert_eq!(calc.primary_text(), "-5");
        assert_eq!(calc.state(), CalcState::EnteringNumber);
    }

    #[test]
    fn test_digit_after_toggled_result_replaces() {
        let calc = run("2+3=n4");
        assert_eq!(calc.primary_text(), "4");
    }

    #[test]
    fn test_percent_on_result() {
        let calc = run("25*2=%");
        assert_eq!(calc.primary_text(), "0.5");
    }

    // ===== Division by zero =====

    #[test]
    fn test_division_by_zero_error() {
        let calc = run("5/0=");
        assert_eq!(calc.state(), CalcState::Error);
        assert_eq!(calc.primary_text(), "Error");
        assert_eq!(calc.preview_text(), "");
        assert!(calc.sequence().is_empty());
        assert!(calc.input().is_empty());
    }

    #[test]
    fn test_digit_after_error_clears() {
        let calc = run("5/0=7");
        assert_eq!(calc.primary_text(), "7");
        assert_eq!(calc.state(), CalcState::EnteringNumber);
        assert_eq!(calc.preview_text(), "7");
    }

    #[test]
    fn test_operator_after_error_clears() {
        let calc = run("5/0=+");
        assert_eq!(calc.sequence().tokens().len(), 2);
        assert_eq!(calc.primary_text(), "0");
    }

    #[test]
    fn test_equals_after_error_clears() {
        let calc = run("5/0==");
        assert_eq!(calc.state(), CalcState::Empty);
        assert_eq!(calc.primary_text(), "0");
    }

    #[test]
    fn test_partial_division_by_zero_preview() {
        let calc = run("5/0+");
        // not committed: no error state, but the live value cannot be shown
        assert_eq!(calc.state(), CalcState::OperatorPending);
        assert_eq!(calc.primary_text(), "Error");
        assert_eq!(calc.preview_text(), "5 ÷ 0 +");
    }

    #[test]
    fn test_sequential_division_by_zero() {
        let mut calc = sequential();
        keys(&mut calc, "8/0=");
        assert_eq!(calc.state(), CalcState::Error);
    }

    // ===== Percent / sign =====

    #[test]
    fn test_percent() {
        let calc = run("50%");
        assert_eq!(calc.input().as_str(), "0.5");
        assert_eq!(calc.primary_text(), "0.5");
    }

    #[test]
    fn test_percent_in_expression() {
        let calc = run("200+50%=");
        assert_eq!(calc.primary_text(), "200.5");
    }

    #[test]
    fn test_percent_pending_operator_noop() {
        let calc = run("8+%");
        assert_eq!(calc.state(), CalcState::OperatorPending);
        assert_eq!(calc.primary_text(), "8");
    }

    #[test]
    fn test_toggle_sign_twice() {
        let calc = run("42nn");
        assert_eq!(calc.primary_text(), "42");
    }

    #[test]
    fn test_toggle_sign_after_operator() {
        let calc = run("7*n3=");
        assert_eq!(calc.primary_text(), "-21");
    }

    #[test]
    fn test_toggle_sign_on_empty() {
        let calc = run("n");
        assert_eq!(calc.primary_text(), "-");
        let calc = run("nn");
        assert_eq!(calc.primary_text(), "0");
        assert_eq!(calc.state(), CalcState::Empty);
    }

    // ===== Clear =====

    #[test]
    fn test_clear_from_every_state() {
        for script in ["", "12", "12+", "12+3=", "5/0=", "n", "1.5%"] {
            let mut calc = run(script);
            calc.clear();
            assert_eq!(calc.primary_text(), "0", "after {script:?}");
            assert_eq!(calc.preview_text(), "", "after {script:?}");
            assert_eq!(calc.state(), CalcState::Empty);
        }
    }

    // ===== Snapshot / purity =====

    #[test]
    fn test_press_returns_snapshot() {
        let mut calc = Calculator::new();
        calc.press(KeypadAction::Digit(6));
        let snap = calc.press(KeypadAction::Operator(Operator::Divide));
        assert_eq!(snap.primary, "6");
        assert_eq!(snap.preview, "6 ÷");
        assert_eq!(snap.active_operator.as_deref(), Some("÷"));
        assert_eq!(snap.state, CalcState::OperatorPending);
    }

    #[test]
    fn test_reading_is_idempotent() {
        let calc = run("3+4*");
        let first = calc.snapshot();
        let second = calc.snapshot();
        assert_eq!(first, second);
        assert_eq!(calc.sequence().len(), 4);
    }

    #[test]
    fn test_snapshot_serializes() {
        let calc = run("1+");
        let json = serde_json::to_string(&calc.snapshot()).unwrap();
        assert!(json.contains("\"state\":\"operator_pending\""));
        assert!(json.contains("\"active_operator\":\"+\""));
    }

    #[test]
    fn test_custom_decimal_places() {
        let mut calc = Calculator::with_config(CalcConfig::new().with_decimal_places(2));
        keys(&mut calc, "2/3=");
        assert_eq!(calc.primary_text(), "0.67");
    }
}
