//! livecalc: keypad calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! livecalc eval "1+2*3="                     # 1 + 2 × 3 = 7
//! livecalc --policy sequential eval "1+2*3=" # 1 + 2 × 3 = 9
//! livecalc eval --json "5/0="                # display state as JSON
//! livecalc repl                              # one key script per line
//! livecalc keys                              # keypad and bindings
//! ```

use clap::Parser;
use console::Term;
use livecalc::keypad::Keypad;
use livecalc_cli::{
    logging, run_repl, snapshot_json, BellFeedback, Cli, CliConfig, CliFlags, CliResult,
    ColorChoice, Commands, EvalArgs, KeyRunner, Renderer, ReplArgs, ReplOptions,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from the config file and CLI args
    let config = build_config(&cli)?;
    logging::init_tracing(config.verbosity);
    info!(policy = %config.calculator.policy, "starting");

    match config.color {
        ColorChoice::Always => console::set_colors_enabled(true),
        ColorChoice::Never => console::set_colors_enabled(false),
        ColorChoice::Auto => {}
    }
    let renderer = Renderer::new(config.color.should_color());

    match cli.command {
        Commands::Eval(args) => run_eval(&config, renderer, &args),
        Commands::Repl(args) => run_repl_command(&config, renderer, &args),
        Commands::Keys => run_keys_command(renderer),
        Commands::Config => run_config(&config),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let base = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    base.apply_flags(&CliFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color: cli.color.map(Into::into),
        bell: cli.bell,
        policy: cli.policy.map(Into::into),
        decimals: cli.decimals,
    })
}

fn run_eval(config: &CliConfig, renderer: Renderer, args: &EvalArgs) -> CliResult<()> {
    let term = Term::stdout();
    let mut runner = KeyRunner::new(config.calculator, BellFeedback::new(config.bell));

    let steps = runner.feed_steps(&args.keys)?;
    if args.steps && !args.json {
        for step in &steps {
            term.write_line(&renderer.step(step.action, &step.snapshot))?;
        }
    }

    let snapshot = runner.snapshot();
    if args.json {
        term.write_line(&snapshot_json(&snapshot)?)?;
    } else {
        term.write_line(&renderer.display(&snapshot))?;
    }
    Ok(())
}

fn run_repl_command(config: &CliConfig, renderer: Renderer, args: &ReplArgs) -> CliResult<()> {
    let mut runner = KeyRunner::new(config.calculator, BellFeedback::new(config.bell));
    let stdin = std::io::stdin();
    let options = ReplOptions {
        show_keypad: args.keypad,
        prompt: stdin.is_terminal(),
    };
    let mut stdout = std::io::stdout().lock();
    run_repl(&mut runner, renderer, options, stdin.lock(), &mut stdout)
}

fn run_keys_command(renderer: Renderer) -> CliResult<()> {
    let term = Term::stdout();
    let keypad = Keypad::new();
    term.write_line(&renderer.keypad(&keypad, None))?;
    term.write_line("")?;
    term.write_line(&renderer.bindings(&keypad))?;
    Ok(())
}

fn run_config(config: &CliConfig) -> CliResult<()> {
    let json = serde_json::to_string_pretty(config)?;
    Term::stdout().write_line(&json)?;
    Ok(())
}
