//! fscli - query shell for hierarchical document stores
//!
//! Provides an interactive REPL with grammar-aware completion for a small
//! SQL-like query language, and a pipe mode for scripted input.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! fscli --project-id my-project --data fixtures.json
//!
//! # Pipe mode
//! echo 'QUERY users WHERE age >= 20' | fscli --project-id my-project
//! ```

use std::io::IsTerminal;
use std::sync::Arc;

use tracing::debug;

use fscli::cli::CliInterface;
use fscli::error::Result;
use fscli::executor::{ExecutionResult, Executor};
use fscli::formatter::Formatter;
use fscli::pager;
use fscli::parser::Parser;
use fscli::repl::{self, CollectionCache, ReplEngine, SharedState};
use fscli::store::{CollectionLister, JsonStore};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start a session
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let lister: Arc<dyn CollectionLister> = Arc::new(open_store(&cli)?);
    let shared_state = SharedState::with_config(cli.project_id(), &cli.config().display);
    let executor = Executor::new(shared_state.clone(), lister.clone());

    if std::io::stdin().is_terminal() {
        cli.print_banner();
        run_interactive_mode(&cli, &shared_state, &executor, lister).await
    } else {
        run_pipe_mode(&shared_state, &executor).await
    }
}

/// Open the configured data file, or an empty store without one
fn open_store(cli: &CliInterface) -> Result<JsonStore> {
    match &cli.config().store.data_file {
        Some(path) => {
            debug!(path = %path.display(), "loading data file");
            JsonStore::from_file(path)
        }
        None => Ok(JsonStore::empty()),
    }
}

/// Run application in interactive REPL mode
async fn run_interactive_mode(
    cli: &CliInterface,
    shared_state: &SharedState,
    executor: &Executor,
    lister: Arc<dyn CollectionLister>,
) -> Result<()> {
    let cache = CollectionCache::new(lister);
    // Root names are almost always the first thing completed
    cache.get("");

    debug!(project = shared_state.project_id(), "starting interactive session");
    let mut repl = ReplEngine::new(
        shared_state,
        &cli.config().history,
        cli.config().display.syntax_highlighting,
        cache,
    )?;

    loop {
        let input = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        if repl::is_exit_command(&input) {
            break;
        }

        let operation = match repl.process_input(&input) {
            Ok(op) => op,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };

        match executor.execute(operation).await {
            Ok(result) => display_result(shared_state, &result),
            Err(e) => eprintln!("error: {}", e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Parse and execute each stdin line in turn
///
/// Errors are reported per line and do not stop the run.
async fn run_pipe_mode(shared_state: &SharedState, executor: &Executor) -> Result<()> {
    let parser = Parser::new();

    for line in std::io::stdin().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parser.parse(line) {
            Ok(operation) => match executor.execute(operation).await {
                Ok(result) => display_result(shared_state, &result),
                Err(e) => eprintln!("error: {}", e),
            },
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}

/// Display execution result with the session's format and pager settings
fn display_result(shared_state: &SharedState, result: &ExecutionResult) {
    debug!(elapsed_ms = result.execution_time_ms, "operation finished");

    let formatter = Formatter::new(shared_state.get_format(), shared_state.get_color_enabled());

    let output = match formatter.format(result) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Format error: {}", e);
            return;
        }
    };

    if let Err(e) = pager::print_output(&output, shared_state.is_pager_enabled()) {
        eprintln!("error: {}", e);
    }
}

/// Initialize logging from the effective configuration
///
/// Verbosity flags were already folded into the config by the CLI layer.
/// Logs go to stderr so piped output stays clean.
///
/// # Arguments
/// * `cli` - CLI interface with the loaded configuration
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
