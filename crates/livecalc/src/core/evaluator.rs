//! Token sequence and evaluator
//!
//! The committed expression is a flat list of numbers and operators. Two
//! evaluation policies are supported: precedence-aware (two-stack
//! shunting-yard without parentheses) and strictly sequential.

use crate::core::format::format_number_with;
use crate::core::{CalcResult, Operator};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default divisor magnitude below which division fails
pub const DEFAULT_DIVISION_EPSILON: f64 = 1e-12;

/// A committed unit of the expression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Token {
    /// Numeric operand
    Number(f64),
    /// Binary operator
    Operator(Operator),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Ordered list of committed tokens
///
/// Never holds two consecutive operators: pushing an operator after an
/// operator replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Creates an empty sequence
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tokens
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if nothing has been committed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the last token
    #[must_use]
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Returns the trailing operator, if the sequence ends in one
    #[must_use]
    pub fn trailing_operator(&self) -> Option<Operator> {
        match self.tokens.last() {
            Some(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    /// Returns true if the sequence holds at least one operator
    #[must_use]
    pub fn has_operator(&self) -> bool {
        self.tokens.iter().any(Token::is_operator)
    }

    /// Appends a number
    pub fn push_number(&mut self, value: f64) {
        self.tokens.push(Token::Number(value));
    }

    /// Appends an operator, replacing a trailing one
    ///
    /// Returns the replaced operator, if any.
    pub fn push_operator(&mut self, op: Operator) -> Option<Operator> {
        if let Some(Token::Operator(previous)) = self.tokens.last_mut() {
            let replaced = *previous;
            *previous = op;
            return Some(replaced);
        }
        self.tokens.push(Token::Operator(op));
        None
    }

    /// Collapses the sequence into a single result number
    pub fn collapse_to(&mut self, value: f64) {
        self.tokens.clear();
        self.tokens.push(Token::Number(value));
    }

    /// Removes all tokens
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Builds the evaluable working copy
    ///
    /// Appends `pending` as a trailing number and drops a trailing operator.
    /// The sequence itself is not modified.
    #[must_use]
    pub fn working_copy(&self, pending: Option<f64>) -> Vec<Token> {
        let mut work = self.tokens.clone();
        if let Some(value) = pending {
            work.push(Token::Number(value));
        }
        if work.last().is_some_and(Token::is_operator) {
            work.pop();
        }
        work
    }

    /// Renders the sequence followed by the raw input buffer
    ///
    /// Numbers use display formatting, operators their display symbol,
    /// separated by single spaces.
    #[must_use]
    pub fn expression_text(&self, buffer: &str, decimal_places: usize) -> String {
        render_tokens(&self.tokens, decimal_places, buffer)
    }
}

/// Renders tokens (and an optional raw tail) as display text
#[must_use]
pub fn render_tokens(tokens: &[Token], decimal_places: usize, tail: &str) -> String {
    let mut parts: Vec<String> = tokens
        .iter()
        .map(|token| match token {
            Token::Number(value) => format_number_with(*value, decimal_places),
            Token::Operator(op) => op.symbol().to_string(),
        })
        .collect();
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
    parts.join(" ")
}

/// How a token sequence is folded into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationPolicy {
    /// `×`/`÷` bind tighter than `+`/`−`: `1 + 2 × 3 = 7`
    #[default]
    Precedence,
    /// Strict left-to-right, one pending operator: `1 + 2 × 3 = 9`
    Sequential,
}

impl EvaluationPolicy {
    /// Returns the policy name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Precedence => "precedence",
            Self::Sequential => "sequential",
        }
    }
}

impl std::fmt::Display for EvaluationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folds token lists into values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    policy: EvaluationPolicy,
    epsilon: f64,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates a precedence-aware evaluator with the default epsilon
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: EvaluationPolicy::Precedence,
            epsilon: DEFAULT_DIVISION_EPSILON,
        }
    }

    /// Creates an evaluator with the given policy
    #[must_use]
    pub const fn with_policy(policy: EvaluationPolicy) -> Self {
        Self {
            policy,
            epsilon: DEFAULT_DIVISION_EPSILON,
        }
    }

    /// Sets the division epsilon
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the evaluation policy
    #[must_use]
    pub const fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// Returns the division epsilon
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Evaluates a working token list
    ///
    /// An empty list evaluates to 0. A failed division fails the whole
    /// evaluation; no partial result is returned.
    pub fn evaluate(&self, tokens: &[Token]) -> CalcResult<f64> {
        if tokens.is_empty() {
            return Ok(0.0);
        }
        match self.policy {
            EvaluationPolicy::Precedence => self.fold_precedence(tokens),
            EvaluationPolicy::Sequential => self.fold_sequential(tokens),
        }
    }

    /// Evaluates a sequence plus a pending buffer value without mutating it
    pub fn preview(&self, sequence: &TokenSequence, pending: Option<f64>) -> CalcResult<f64> {
        self.evaluate(&sequence.working_copy(pending))
    }

    fn fold_precedence(&self, tokens: &[Token]) -> CalcResult<f64> {
        let mut values: Vec<f64> = Vec::with_capacity(tokens.len() / 2 + 1);
        let mut operators: Vec<Operator> = Vec::with_capacity(tokens.len() / 2);

        for token in tokens {
            match *token {
                Token::Number(value) => values.push(value),
                Token::Operator(op) => {
                    while operators
                        .last()
                        .is_some_and(|top| top.precedence() >= op.precedence())
                    {
                        self.apply_top(&mut values, &mut operators)?;
                    }
                    operators.push(op);
                }
            }
        }
        while !operators.is_empty() {
            self.apply_top(&mut values, &mut operators)?;
        }

        Ok(values.last().copied().unwrap_or(0.0))
    }

    fn apply_top(&self, values: &mut Vec<f64>, operators: &mut Vec<Operator>) -> CalcResult<()> {
        let Some(op) = operators.pop() else {
            return Ok(());
        };
        // An operator without two operands is dropped
        if values.len() < 2 {
            return Ok(());
        }
        let (Some(b), Some(a)) = (values.pop(), values.pop()) else {
            return Ok(());
        };
        let result = op.apply(a, b, self.epsilon)?;
        trace!(a, op = op.symbol(), b, result, "applied operator");
        values.push(result);
        Ok(())
    }

    fn fold_sequential(&self, tokens: &[Token]) -> CalcResult<f64> {
        let mut accumulated: Option<f64> = None;
        let mut pending: Option<Operator> = None;

        for token in tokens {
            match *token {
                Token::Number(value) => {
                    accumulated = Some(match (accumulated, pending.take()) {
                        (Some(previous), Some(op)) => {
                            let result = op.apply(previous, value, self.epsilon)?;
                            trace!(previous, op = op.symbol(), value, result, "folded operator");
                            result
                        }
                        _ => value,
                    });
                }
                Token::Operator(op) => pending = Some(op),
            }
        }

        Ok(accumulated.unwrap_or(0.0))
    }
}
