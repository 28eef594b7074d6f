// tapescrub: Time-Travel Brainfuck Interpreter with Tape Visualization

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tapescrub::interpreter::constants::{DEFAULT_MAX_STEPS, DEFAULT_TAPE_LEN};
use tapescrub::ui::App;
use tapescrub::{HaltReason, Machine, MachineConfig, RuntimeError};

#[derive(Parser)]
#[command(
    name = "tapescrub",
    about = "Run a Brainfuck program and scrub through every step of its execution"
)]
struct Cli {
    /// File containing the program.
    #[arg(required_unless_present = "code", conflicts_with = "code")]
    file: Option<PathBuf>,

    /// Program text given directly.
    #[arg(short, long)]
    code: Option<String>,

    /// Input text read by ','.
    #[arg(short, long, conflicts_with = "input_file")]
    input: Option<String>,

    /// File whose contents are read by ','.
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Number of tape cells.
    #[arg(long, default_value_t = DEFAULT_TAPE_LEN.to_string())]
    tape_len: String,

    /// Maximum number of instructions to execute.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS.to_string())]
    max_steps: String,

    /// Print the output and a summary instead of starting the TUI.
    #[arg(long)]
    no_tui: bool,

    /// Write logs to this file (filter with RUST_LOG, default "warn").
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = &cli.log_file {
        let log_file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(log_file)
            .with_ansi(false) // Disable ANSI colors in log file
            .init();
    } else if cli.no_tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .init();
    }
    // Otherwise the TUI owns the terminal and logs are dropped

    Ok(())
}

/// Write the final output to `out` and a run summary to `summary`.
///
/// A failed run still prints what it produced before the error is returned.
fn print_run(
    machine: &Machine,
    outcome: Result<HaltReason, RuntimeError>,
    out: &mut impl Write,
    summary: &mut impl Write,
) -> Result<()> {
    let history = machine.history();
    let config = machine.config();
    out.write_all(history.latest().output())?;
    out.flush()?;

    writeln!(summary)?;
    writeln!(
        summary,
        "Tape length: {}, step budget: {}",
        config.tape_len, config.max_steps
    )?;
    writeln!(summary, "Snapshots recorded: {}", history.count())?;
    let reason = outcome.context("execution failed")?;
    writeln!(summary, "Halted: {}", reason)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = MachineConfig::parse(&cli.tape_len, &cli.max_steps)
        .context("invalid configuration")?;

    let source = match (&cli.file, &cli.code) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("cannot read program file '{}'", path.display()))?,
        (None, Some(code)) => code.clone(),
        (None, None) => anyhow::bail!("no program given, pass a FILE or --code"),
    };

    let input = match (&cli.input, &cli.input_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("cannot read input file '{}'", path.display()))?,
        (None, None) => String::new(),
    };

    let mut machine = Machine::new(&source, &input, config);
    info!(instructions = machine.program().len(), "executing program");
    let outcome = machine.run_to_completion();

    if cli.no_tui {
        return print_run(&machine, outcome, &mut io::stdout(), &mut io::stderr());
    }

    match &outcome {
        Ok(reason) => info!(%reason, snapshots = machine.history().count(), "execution finished"),
        Err(e) => info!(error = %e, "execution failed, showing partial history"),
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(machine, outcome);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn run(source: &str) -> (Result<()>, String, String) {
        let config = MachineConfig::new(NonZeroUsize::new(16).unwrap(), 100);
        let mut machine = Machine::new(source, "", config);
        let outcome = machine.run_to_completion();
        let mut out = Vec::new();
        let mut summary = Vec::new();
        let result = print_run(&machine, outcome, &mut out, &mut summary);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(summary).unwrap(),
        )
    }

    #[test]
    fn test_print_run_finished() {
        let (result, out, summary) = run(&format!("{}.", "+".repeat(65)));
        assert!(result.is_ok());
        assert_eq!(out, "A");
        assert!(summary.contains("Tape length: 16, step budget: 100"));
        assert!(summary.contains("Snapshots recorded: 67"));
        assert!(summary.contains("Halted: program finished"));
    }

    #[test]
    fn test_print_run_budget_exhausted() {
        let (result, _, summary) = run("+[]");
        assert!(result.is_ok());
        assert!(summary.contains("Snapshots recorded: 101"));
        assert!(summary.contains("Halted: step budget exhausted"));
    }

    #[test]
    fn test_print_run_malformed_program_fails() {
        let (result, out, summary) = run("+.]");
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Malformed program"));
        assert_eq!(out, "\u{1}");
        assert!(summary.contains("Snapshots recorded: 3"));
        assert!(!summary.contains("Halted"));
    }
}
