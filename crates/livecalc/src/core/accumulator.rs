//! Input accumulator: the number currently being typed
//!
//! The buffer is always one of: empty, `"-"`, or a numeric literal with an
//! optional leading `-` and at most one `.`.

use crate::core::format::trim_decimal;

/// Digit/decimal buffer under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputAccumulator {
    buffer: String,
    /// Next digit replaces the buffer instead of appending to it
    new_number_began: bool,
}

impl InputAccumulator {
    /// Creates an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an accumulator holding `value` as a freshly-begun number
    ///
    /// The next digit replaces the value rather than extending it. A
    /// non-finite value leaves the buffer empty.
    #[must_use]
    pub fn with_value(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self {
            buffer: trim_decimal(value),
            new_number_began: true,
        }
    }

    /// Returns the raw buffer text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Returns true if nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns true if the next digit starts a new number
    #[must_use]
    pub const fn new_number_began(&self) -> bool {
        self.new_number_began
    }

    /// Appends a digit (0-9); other values are ignored
    pub fn append_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return;
        };

        if self.new_number_began || self.buffer == "0" {
            self.buffer.clear();
        } else if self.buffer == "-0" {
            self.buffer.truncate(1);
        }
        self.buffer.push(ch);
        self.new_number_began = false;
    }

    /// Appends a decimal point
    ///
    /// No-op when the buffer already has one. An empty or `"-"` buffer is
    /// prefixed with `0` first.
    pub fn append_decimal(&mut self) {
        if self.new_number_began {
            self.buffer = "0.".to_string();
            self.new_number_began = false;
            return;
        }
        if self.buffer.contains('.') {
            return;
        }
        if self.buffer.is_empty() || self.buffer == "-" {
            self.buffer.push('0');
        }
        self.buffer.push('.');
    }

    /// Adds or removes the leading `-`
    ///
    /// `"-0"` collapses to `"-"` so that toggling `"0"` twice clears it.
    pub fn toggle_sign(&mut self) {
        if self.buffer.starts_with('-') {
            self.buffer.remove(0);
        } else {
            self.buffer.insert(0, '-');
        }
        if self.buffer == "-0" {
            self.buffer.truncate(1);
        }
    }

    /// Divides the buffered value by 100
    ///
    /// No-op when the buffer holds no value.
    pub fn percent(&mut self) {
        if let Some(value) = self.parse() {
            self.buffer = trim_decimal(value / 100.0);
        }
    }

    /// Parses the buffer
    ///
    /// Returns `None` for an empty buffer, a lone `"-"`, or anything that is
    /// not a number.
    #[must_use]
    pub fn parse(&self) -> Option<f64> {
        if self.buffer.is_empty() || self.buffer == "-" {
            return None;
        }
        self.buffer.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Returns true if the buffer holds a literal too large for `f64`
    #[must_use]
    pub fn overflowed(&self) -> bool {
        !self.buffer.is_empty() && self.buffer != "-" && self.parse().is_none()
    }

    /// Takes the parsed value out, leaving the buffer empty
    ///
    /// The buffer is left untouched when it holds no value.
    pub fn take_value(&mut self) -> Option<f64> {
        let value = self.parse()?;
        self.clear();
        Some(value)
    }

    /// Empties the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.new_number_began = false;
    }
}
