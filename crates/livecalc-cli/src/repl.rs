//! Interactive key session
//!
//! Each input line is a key script fed to one long-lived calculator, so a
//! calculation can span lines. Commands: `quit`/`exit` end the session,
//! `keys` shows the keypad, `help` lists the bindings.

use crate::error::{CliError, CliResult};
use crate::output::Renderer;
use crate::runner::KeyRunner;
use livecalc::keypad::{KeyFeedback, Keypad};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const PROMPT: &str = "> ";

/// REPL options
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Draw the keypad after every line
    pub show_keypad: bool,
    /// Print the prompt
    pub prompt: bool,
}

/// Runs the REPL until `quit`, `exit` or end of input
///
/// Bad key lines are reported and the session carries on.
pub fn run_repl<F, R, W>(
    runner: &mut KeyRunner<F>,
    renderer: Renderer,
    options: ReplOptions,
    input: R,
    output: &mut W,
) -> CliResult<()>
where
    F: KeyFeedback,
    R: BufRead,
    W: Write,
{
    let keypad = Keypad::new();
    let mut lines = input.lines();

    loop {
        if options.prompt {
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            debug!("end of input");
            break;
        };
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "keys" => writeln!(output, "{}", renderer.keypad(&keypad, runner.last_action()))?,
            "help" => writeln!(output, "{}", renderer.bindings(&keypad))?,
            script => match runner.feed(script) {
                Ok(snapshot) => {
                    writeln!(output, "{}", renderer.display(&snapshot))?;
                    if options.show_keypad {
                        writeln!(output, "{}", renderer.keypad(&keypad, runner.last_action()))?;
                    }
                }
                Err(CliError::KeyScript(e)) => {
                    warn!(line = script, "rejected key line");
                    writeln!(output, "{}", renderer.failure(&e.to_string()))?;
                }
                Err(e) => return Err(e),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use livecalc::config::CalcConfig;
    use livecalc::keypad::NoFeedback;

    fn run(script: &str, options: ReplOptions) -> String {
        let mut runner = KeyRunner::new(CalcConfig::default(), NoFeedback);
        let mut out = Vec::new();
        run_repl(
            &mut runner,
            Renderer::new(false),
            options,
            script.as_bytes(),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_repl_evaluates_lines() {
        let out = run("2+3=\n", ReplOptions::default());
        assert_eq!(out, "2 + 3 = 5\n5\n");
    }

    #[test]
    fn test_repl_state_spans_lines() {
        let out = run("6*\n7\n=\n", ReplOptions::default());
        let last = out.lines().last().unwrap();
        assert_eq!(last, "42");
    }

    #[test]
    fn test_repl_quit_stops_reading() {
        let out = run("1\nquit\n2\n", ReplOptions::default());
        assert_eq!(out, "1\n1\n");
    }

    #[test]
    fn test_repl_exit_and_blank_lines() {
        let out = run("\n   \nexit\n9\n", ReplOptions::default());
        assert_eq!(out, "");
    }

    #[test]
    fn test_repl_bad_line_continues() {
        let out = run("1+?\n4\n", ReplOptions::default());
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("error: unknown key '?' at position 2")
        );
        assert_eq!(lines.next(), Some("4"));
    }

    #[test]
    fn test_repl_prompt() {
        let options = ReplOptions {
            prompt: true,
            ..ReplOptions::default()
        };
        let out = run("5\n", options);
        assert_eq!(out, "> 5\n5\n> ");
    }

    #[test]
    fn test_repl_keypad_after_line() {
        let options = ReplOptions {
            show_keypad: true,
            ..ReplOptions::default()
        };
        let out = run("=\n", options);
        assert!(out.contains("> =  <"));
    }

    #[test]
    fn test_repl_keys_and_help() {
        let out = run("keys\nhelp\n", ReplOptions::default());
        assert!(out.contains("[ AC ]"));
        assert!(out.contains("btn-clear"));
    }
}
