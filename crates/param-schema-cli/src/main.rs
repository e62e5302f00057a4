// crates/param-schema-cli/src/main.rs
// ============================================================================
// Module: Param Schema CLI Entry Point
// Description: Command dispatcher for schema compilation and input validation.
// Purpose: Provide a safe, localized CLI over the parameter-schema compiler.
// Dependencies: clap, param-schema-config, param-schema-core, serde_jcs, tracing.
// ============================================================================

//! ## Overview
//! The param-schema CLI compiles parameter documents into schemas, validates
//! input data against them, and checks configuration files. All user-facing
//! strings are routed through the i18n catalog. Input files are untrusted and
//! read under hard size limits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use param_schema_cli::i18n::Locale;
use param_schema_cli::i18n::set_locale;
use param_schema_cli::t;
use param_schema_config::SchemaToolConfig;
use param_schema_config::read_localization_table;
use param_schema_core::APPLICATION_SCHEMA_PREFIX;
use param_schema_core::APPLICATION_SCHEMA_SUFFIX;
use param_schema_core::CompileRequest;
use param_schema_core::CompiledSchema;
use param_schema_core::SchemaName;
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a JSON input data file.
const MAX_INPUT_BYTES: usize = 1024 * 1024;
/// Environment variable used to select the output language.
const LANG_ENV: &str = "PARAM_SCHEMA_LANG";
/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "PARAM_SCHEMA_LOG";
/// Log filter used when neither the flag nor the environment selects one.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Command-line interface for the parameter-schema compiler.
#[derive(Parser, Debug)]
#[command(
    name = "param-schema",
    about = "Compile localized parameter documents into validating schemas.",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `PARAM_SCHEMA_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a parameter document and print the schema description.
    Compile(CompileCommand),
    /// Validate JSON input data against a compiled parameter document.
    Validate(ValidateCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Supported output languages.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Simplified Chinese.
    Zh,
}

/// Output formats for compiled schemas.
#[derive(ValueEnum, Copy, Clone, Debug, Default)]
enum CompileFormat {
    /// Canonical JSON description.
    #[default]
    Json,
    /// Human-readable field listing.
    Text,
}

/// Arguments shared by every command that compiles a document.
#[derive(Args, Debug)]
struct SchemaArgs {
    /// Path to the parameter document.
    #[arg(value_name = "FILE")]
    document: PathBuf,
    /// Schema name (defaults to one derived from the file name).
    #[arg(long, value_name = "NAME")]
    name: Option<String>,
    /// Locale used by the `i18n` filter (defaults to the configured locale).
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,
    /// Localization table file (overrides `localization.table_path`).
    #[arg(long = "i18n", value_name = "PATH")]
    table: Option<PathBuf>,
    /// Template variable as NAME=VALUE; may be repeated.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable)]
    variables: Vec<(String, String)>,
    /// Optional config file path (defaults to param-schema.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for schema compilation.
#[derive(Args, Debug)]
struct CompileCommand {
    /// Document and compilation inputs.
    #[command(flatten)]
    schema: SchemaArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CompileFormat::Json)]
    format: CompileFormat,
}

/// Arguments for input validation.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Document and compilation inputs.
    #[command(flatten)]
    schema: SchemaArgs,
    /// JSON file holding the input object to validate.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to param-schema.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a localized message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Localized message shown to the user.
    message: String,
}

impl CliError {
    /// Creates a new CLI error.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

/// Failures while reading a size-limited input file.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

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
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    init_tracing(cli.verbose);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Compile(command) => command_compile(&command),
        Commands::Validate(command) => command_validate(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Resolves the output locale from the flag, then the environment.
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

/// Installs the stderr log subscriber.
///
/// `-v` flags win over `PARAM_SCHEMA_LOG`, which wins over `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => env_filter(),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds a filter from the environment, falling back to warnings only.
fn env_filter() -> EnvFilter {
    let Some((env, directive)) = [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .find_map(|env| std::env::var(env).ok().map(|value| (env, value)))
    else {
        return EnvFilter::new(DEFAULT_LOG_FILTER);
    };
    EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        let _ = write_stderr_line(&t!("log.filter.invalid", env = env, error = err));
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Compile Commands
// ============================================================================

/// Executes the compile command.
fn command_compile(command: &CompileCommand) -> CliResult<ExitCode> {
    let schema = compile_document(&command.schema)?;
    match command.format {
        CompileFormat::Json => write_canonical_json(&schema.describe())?,
        CompileFormat::Text => write_text_listing(&schema)?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the validate command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let schema = compile_document(&command.schema)?;
    let kind = t!("input.kind.input");
    let text = read_text_with_limit(&command.input, MAX_INPUT_BYTES, &kind)?;
    let input: Value = serde_json::from_str(&text).map_err(|err| {
        CliError::new(t!(
            "input.parse_failed",
            kind = kind,
            path = command.input.display(),
            error = err
        ))
    })?;

    match schema.validate(&input) {
        Ok(data) => {
            write_canonical_json(&schema.represent(&data))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            tracing::debug!(
                schema = %schema.name(),
                fields = errors.field_errors.len(),
                "input rejected"
            );
            write_canonical_json(&errors)?;
            write_stderr_line(&t!(
                "validate.failed",
                fields = errors.field_errors.len(),
                general = errors.non_field_errors.len()
            ))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Loads configuration, reads the document, and compiles it.
fn compile_document(args: &SchemaArgs) -> CliResult<CompiledSchema> {
    let config = SchemaToolConfig::discover(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let table = match &args.table {
        Some(path) => read_localization_table(path),
        None => config.load_localization_table(),
    }
    .map_err(|err| CliError::new(t!("localization.load_failed", error = err)))?;

    let kind = t!("input.kind.document");
    let document =
        read_text_with_limit(&args.document, config.compiler.max_document_bytes, &kind)?;
    let name = args
        .name
        .as_deref()
        .map_or_else(|| default_schema_name(&args.document), SchemaName::from);

    let mut request = CompileRequest::new(name, document).with_table(table);
    if let Some(locale) = &args.locale {
        request = request.with_locale(locale.as_str());
    }
    for (variable, value) in &args.variables {
        request = request.with_variable(variable.as_str(), value.as_str());
    }

    config.build_compiler().compile(&request).map_err(|err| {
        CliError::new(t!("compile.failed", path = args.document.display(), error = err))
    })
}

/// Derives `RemoteApp<Stem>Schema` from the document file name.
fn default_schema_name(path: &Path) -> SchemaName {
    let stem = path.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    SchemaName::for_label(APPLICATION_SCHEMA_PREFIX, &stem, APPLICATION_SCHEMA_SUFFIX)
}

/// Parses a `NAME=VALUE` template variable.
fn parse_variable(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(t!("compile.var.invalid", value = raw)),
    }
}

/// Writes the human-readable field listing.
fn write_text_listing(schema: &CompiledSchema) -> CliResult<()> {
    let mut lines = vec![t!("compile.text.header", name = schema.name(), count = schema.len())];
    for (name, field) in schema.field_names().zip(schema.fields()) {
        let mut flags = vec![if field.is_required() {
            t!("compile.text.required")
        } else {
            t!("compile.text.optional")
        }];
        if field.is_write_only() {
            flags.push(t!("compile.text.write_only"));
        }
        lines.push(t!(
            "compile.text.field",
            name = name,
            kind = field.parameter_type(),
            flags = flags.join(", ")
        ));
    }
    write_stdout_line(&lines.join("\n")).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = SchemaToolConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    config
        .load_localization_table()
        .map_err(|err| CliError::new(t!("localization.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads a UTF-8 file while enforcing a hard size limit.
fn read_text_with_limit(path: &Path, max_bytes: usize, kind: &str) -> CliResult<String> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    String::from_utf8(bytes)
        .map_err(|_| CliError::new(t!("input.not_utf8", kind = kind, path = path.display())))
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a value as canonical JSON followed by a newline.
fn write_canonical_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Reports an error on stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Zh => Self::Zh,
        }
    }
}
