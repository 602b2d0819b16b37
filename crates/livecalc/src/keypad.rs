//! Keypad model shared by every front end
//!
//! Layout:
//! ```text
//! [ AC ] [ ±  ] [ %  ] [ ÷  ]
//! [ 7  ] [ 8  ] [ 9  ] [ ×  ]
//! [ 4  ] [ 5  ] [ 6  ] [ −  ]
//! [ 1  ] [ 2  ] [ 3  ] [ +  ]
//! [     0     ] [ .  ] [ =  ]
//! ```

use crate::core::Operator;

/// Actions that keypad buttons perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadAction {
    /// Type a digit (0-9)
    Digit(u8),
    /// Type a decimal point
    Decimal,
    /// Commit an operator
    Operator(Operator),
    /// Evaluate the expression
    Equals,
    /// Reset everything
    Clear,
    /// Divide the typed number by 100
    Percent,
    /// Flip the sign of the typed number
    ToggleSign,
}

impl KeypadAction {
    /// Maps a typed character to an action
    ///
    /// Besides the obvious keys: `c`/`C` clear, `n`/`~`/`±` toggle the sign,
    /// `x`/`*` multiply, and a newline evaluates.
    #[must_use]
    pub fn from_key(ch: char) -> Option<Self> {
        if let Some(d) = ch.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        if let Some(op) = Operator::from_char(ch) {
            return Some(Self::Operator(op));
        }
        match ch {
            '.' | ',' => Some(Self::Decimal),
            '=' | '\n' | '\r' => Some(Self::Equals),
            'c' | 'C' | '\u{1b}' => Some(Self::Clear),
            '%' => Some(Self::Percent),
            'n' | 'N' | '~' | '±' => Some(Self::ToggleSign),
            _ => None,
        }
    }

    /// Maps a named keyboard key (`"Enter"`, `"Escape"`, or a single
    /// character) to an action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Equals),
            "Escape" | "Delete" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::from_key(ch),
                    _ => None,
                }
            }
        }
    }

    /// Returns the button label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Percent => "%".to_string(),
            Self::ToggleSign => "±".to_string(),
        }
    }

    /// Returns a stable identifier for the button
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Decimal => "btn-decimal".to_string(),
            Self::Operator(op) => format!("btn-{}", op_name(*op)),
            Self::Equals => "btn-equals".to_string(),
            Self::Clear => "btn-clear".to_string(),
            Self::Percent => "btn-percent".to_string(),
            Self::ToggleSign => "btn-sign".to_string(),
        }
    }
}

/// Returns a name for an operator (for button IDs)
const fn op_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "plus",
        Operator::Subtract => "minus",
        Operator::Multiply => "times",
        Operator::Divide => "divide",
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// Button identifier
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-column button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self::wide(action, row, col, 1)
    }

    /// Creates a button covering `span` columns
    #[must_use]
    pub fn wide(action: KeypadAction, row: usize, col: usize, span: usize) -> Self {
        Self {
            action,
            id: action.id(),
            row,
            col,
            span,
        }
    }

    /// Returns true if the button covers `(row, col)`
    #[must_use]
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }
}

/// Standard calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Width of a single cell when rendered, brackets included
    const CELL_WIDTH: usize = 6;

    /// Creates the standard 5×4 keypad
    #[must_use]
    pub fn new() -> Self {
        use crate::keypad::KeypadAction::{Clear, Decimal, Digit, Equals, Percent, ToggleSign};
        let op = KeypadAction::Operator;

        let buttons = vec![
            // Row 0: AC ± % ÷
            KeypadButtonDef::new(Clear, 0, 0),
            KeypadButtonDef::new(ToggleSign, 0, 1),
            KeypadButtonDef::new(Percent, 0, 2),
            KeypadButtonDef::new(op(Operator::Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButtonDef::new(Digit(7), 1, 0),
            KeypadButtonDef::new(Digit(8), 1, 1),
            KeypadButtonDef::new(Digit(9), 1, 2),
            KeypadButtonDef::new(op(Operator::Multiply), 1, 3),
            // Row 2: 4 5 6 −
            KeypadButtonDef::new(Digit(4), 2, 0),
            KeypadButtonDef::new(Digit(5), 2, 1),
            KeypadButtonDef::new(Digit(6), 2, 2),
            KeypadButtonDef::new(op(Operator::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButtonDef::new(Digit(1), 3, 0),
            KeypadButtonDef::new(Digit(2), 3, 1),
            KeypadButtonDef::new(Digit(3), 3, 2),
            KeypadButtonDef::new(op(Operator::Add), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButtonDef::wide(Digit(0), 4, 0, 2),
            KeypadButtonDef::new(Decimal, 4, 2),
            KeypadButtonDef::new(Equals, 4, 3),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by identifier
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by its label
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action.label() == label)
    }

    /// Finds the button a typed character would press
    #[must_use]
    pub fn find_button_by_key(&self, ch: char) -> Option<&KeypadButtonDef> {
        let action = KeypadAction::from_key(ch)?;
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Renders the keypad as text, one line per row
    ///
    /// `highlight` is drawn with `>` `<` brackets instead of `[` `]`.
    #[must_use]
    pub fn render(&self, highlight: Option<KeypadAction>) -> String {
        (0..self.rows)
            .map(|row| {
                self.buttons
                    .iter()
                    .filter(|b| b.row == row)
                    .map(|b| {
                        let inner = b.span * Self::CELL_WIDTH + (b.span - 1) - 2;
                        let (open, close) = if Some(b.action) == highlight {
                            ('>', '<')
                        } else {
                            ('[', ']')
                        };
                        format!("{open}{:^inner$}{close}", b.action.label())
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Feedback hook a front end fires on each key press
///
/// Stands in for platform haptics. The session never calls it.
pub trait KeyFeedback {
    /// Called after a key was pressed
    fn key_pressed(&mut self, action: KeypadAction);
}

/// Feedback that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl KeyFeedback for NoFeedback {
    fn key_pressed(&mut self, _action: KeypadAction) {}
}
