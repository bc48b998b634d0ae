// crates/large-code-gen-cli/src/main.rs
// ============================================================================
// Module: Fixture Generator CLI Entry Point
// Description: CLI entrypoint for large C code fixture generation.
// Purpose: Validate the function count and print the artifact to stdout.
// Dependencies: clap, large-code-gen, thiserror, tracing
// ============================================================================

//! ## Overview
//! The generator CLI reads a single positional function count, validates it,
//! and writes the rendered C artifact to stdout in one write. Validation
//! failures print localized diagnostics and the usage line to stderr and
//! leave stdout empty. `--check` compares a checked-in fixture against the
//! rendered artifact instead of printing it.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use large_code_gen::FixtureGenError;
use large_code_gen::FixtureGenerator;
use large_code_gen_cli::i18n::Locale;
use large_code_gen_cli::i18n::current_locale;
use large_code_gen_cli::i18n::set_locale;
use large_code_gen_cli::logging;
use large_code_gen_cli::logging::LOG_ENV;
use large_code_gen_cli::logging::LoggingError;
use large_code_gen_cli::t;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "LARGE_CODE_GEN_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "large-code-gen",
    about = "Generate a C source file with many trivial functions for loader stress tests.",
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Preferred output language (overrides `LARGE_CODE_GEN_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Compare an existing fixture file with the generated output.
    #[arg(long, value_name = "FILE")]
    check: Option<PathBuf>,
    /// Number of functions to generate. Only the first value is read.
    #[arg(value_name = "NUM_FUNCTIONS", allow_negative_numbers = true)]
    num_functions: Vec<String>,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);

    let env_log = std::env::var(LOG_ENV).ok();
    logging::init(env_log.as_deref()).map_err(|err| CliError::new(logging_error(&err)))?;

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let generator = FixtureGenerator::from_args(&cli.num_functions)
        .map_err(|err| CliError::new(validation_error(&err)))?;
    tracing::debug!(count = %generator.count(), locale = locale.as_str(), "arguments validated");

    match cli.check {
        Some(path) => command_check(&generator, &path),
        None => command_generate(&generator),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Renders the artifact and writes it to stdout in a single write.
fn command_generate(generator: &FixtureGenerator) -> CliResult<ExitCode> {
    let artifact = generator.render();
    write_stdout_bytes(artifact.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    tracing::info!(
        count = %generator.count(),
        bytes = artifact.len(),
        reference_exact = generator.reference_is_exact(),
        "fixture generated"
    );
    Ok(ExitCode::SUCCESS)
}

/// Verifies a checked-in fixture matches the generated output.
fn command_check(generator: &FixtureGenerator, path: &Path) -> CliResult<ExitCode> {
    generator.check_file(path).map_err(|err| CliError::new(check_error(generator, path, err)))?;
    tracing::info!(count = %generator.count(), path = %path.display(), "fixture up to date");
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Error Formatting
// ============================================================================

/// Formats a localized argument validation failure, including the usage line.
fn validation_error(err: &FixtureGenError) -> String {
    match err {
        FixtureGenError::InvalidCount {
            ..
        } => format!("{}\n{}", t!("count.invalid"), t!("main.usage")),
        _ => t!("main.usage"),
    }
}

/// Formats a localized drift check failure.
fn check_error(generator: &FixtureGenerator, path: &Path, err: FixtureGenError) -> String {
    match err {
        FixtureGenError::Io(error) => {
            t!("check.read_failed", path = path.display(), error = error)
        }
        FixtureGenError::FixtureTooLarge {
            limit, ..
        } => t!("check.too_large", path = path.display(), limit = limit),
        FixtureGenError::Drift {
            ..
        } => t!("check.drift", path = path.display(), count = generator.count()),
        other => t!("check.failed", error = other),
    }
}

/// Formats a localized logging setup failure.
fn logging_error(err: &LoggingError) -> String {
    match err {
        LoggingError::InvalidFilter {
            directive,
            message,
        } => t!("logging.filter_invalid", env = LOG_ENV, value = directive, error = message),
        LoggingError::Init(error) => t!("logging.init_failed", error = error),
    }
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from the flag, then the environment, then English.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout and flushes.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
///
/// Non-English diagnostics are preceded by the machine-translation note so
/// successful runs keep stderr empty.
fn emit_error(message: &str) -> ExitCode {
    if current_locale() != Locale::En {
        let _ = write_stderr_line(&t!("i18n.disclaimer.machine_translated"));
    }
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
