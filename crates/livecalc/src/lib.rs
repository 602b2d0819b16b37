//! livecalc - keypad calculator core with live expression preview
//!
//! The crate holds everything below the view layer of a pocket calculator:
//!
//! - **Input accumulator**: the digit/decimal buffer being typed
//! - **Expression evaluator**: committed numbers and operators folded either
//!   with `×`/`÷` over `+`/`−` precedence or strictly left to right
//! - **Session**: the key-event surface and the read-only display state
//!
//! # Example
//!
//! ```rust
//! use livecalc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for key in "1+2*3".chars() {
//!     calc.press(KeypadAction::from_key(key).unwrap());
//! }
//! assert_eq!(calc.preview_text(), "1 + 2 × 3 = 7");
//!
//! let snapshot = calc.press(KeypadAction::Equals);
//! assert_eq!(snapshot.primary, "7");
//!
//! // Strict left-to-right folding
//! let config = CalcConfig::new().with_policy(EvaluationPolicy::Sequential);
//! let mut simple = Calculator::with_config(config);
//! run_keys(&mut simple, "1+2*3=").unwrap();
//! assert_eq!(simple.primary_text(), "9");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalcConfig;
    pub use crate::core::accumulator::InputAccumulator;
    pub use crate::core::evaluator::{EvaluationPolicy, Evaluator, Token, TokenSequence};
    pub use crate::core::format::{format_number, format_number_with};
    pub use crate::core::{CalcError, CalcResult, Operator};
    pub use crate::driver::{parse_keys, run_keys, CalculatorDriver, KeyScriptError};
    pub use crate::keypad::{KeyFeedback, Keypad, KeypadAction, KeypadButtonDef, NoFeedback};
    pub use crate::session::{CalcState, Calculator, DisplaySnapshot};
}
