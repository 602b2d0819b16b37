//! Output formatting

use crate::error::CliResult;
use console::style;
use livecalc::keypad::{Keypad, KeypadAction};
use livecalc::session::{CalcState, DisplaySnapshot};

/// Characters shown in the key binding table, in display order
const BINDING_CANDIDATES: &str = "0123456789.,+-−*xX×/÷=%nN~±cC";

/// Renders calculator state for the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    /// Whether to use colors
    pub use_color: bool,
}

impl Renderer {
    /// Create a new renderer
    #[must_use]
    pub const fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Both display lines: preview on top, primary below
    ///
    /// The preview line is left out while it is empty.
    #[must_use]
    pub fn display(&self, snapshot: &DisplaySnapshot) -> String {
        let mut primary = snapshot.primary.clone();
        if let Some(op) = &snapshot.active_operator {
            primary = format!("{primary}  {op}");
        }
        let primary = if !self.use_color {
            primary
        } else if snapshot.state == CalcState::Error {
            style(primary).red().bold().to_string()
        } else {
            style(primary).bold().to_string()
        };

        if snapshot.preview.is_empty() {
            return primary;
        }
        let preview = if self.use_color {
            style(&snapshot.preview).dim().to_string()
        } else {
            snapshot.preview.clone()
        };
        format!("{preview}\n{primary}")
    }

    /// One line per key for step-by-step output
    #[must_use]
    pub fn step(&self, action: KeypadAction, snapshot: &DisplaySnapshot) -> String {
        let key = format!("{:>3}", action.label());
        let key = if self.use_color {
            style(key).cyan().to_string()
        } else {
            key
        };
        if snapshot.preview.is_empty() {
            format!("{key}  {}", snapshot.primary)
        } else {
            format!("{key}  {}  | {}", snapshot.primary, snapshot.preview)
        }
    }

    /// The keypad grid with an optional highlighted button
    #[must_use]
    pub fn keypad(&self, keypad: &Keypad, highlight: Option<KeypadAction>) -> String {
        let grid = keypad.render(highlight);
        if !self.use_color || highlight.is_none() {
            return grid;
        }
        grid.lines()
            .map(|line| {
                if line.contains('>') {
                    style(line).yellow().bold().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Table of buttons and the characters that press them
    #[must_use]
    pub fn bindings(&self, keypad: &Keypad) -> String {
        keypad
            .buttons()
            .iter()
            .map(|button| {
                let keys: Vec<String> = BINDING_CANDIDATES
                    .chars()
                    .filter(|ch| KeypadAction::from_key(*ch) == Some(button.action))
                    .map(String::from)
                    .collect();
                let label = format!("{:<3}", button.action.label());
                let label = if self.use_color {
                    style(label).bold().to_string()
                } else {
                    label
                };
                format!("{label} {:<12} {}", button.id, keys.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A failure line
    #[must_use]
    pub fn failure(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "error:".to_string()
        };
        format!("{prefix} {message}")
    }
}

/// Pretty JSON for a display snapshot
pub fn snapshot_json(snapshot: &DisplaySnapshot) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
