use clap::{Args, Parser, Subcommand};
use gs1_parser::tools::{BatchStats, decode_escapes, read_codes};
use gs1_parser::{
    Barcode, ConfigError, ParseError, ParserConfig, Resolution, Validator, ValidatorConfig,
};
use std::io;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gs1tool", version, about = "GS1 barcode payload tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tokenize codes into AIs and leftover segments
    Parse {
        #[command(flatten)]
        parser: ParserArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Codes to parse; read from stdin, one per line, when omitted
        codes: Vec<String>,
    },
    /// Check codes against presence and format rules
    Validate {
        #[command(flatten)]
        parser: ParserArgs,
        /// AI that must be present (repeatable)
        #[arg(long = "require")]
        required: Vec<String>,
        /// AI that must be absent (repeatable)
        #[arg(long = "forbid")]
        forbidden: Vec<String>,
        /// Accept blank input
        #[arg(long)]
        allow_empty: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Codes to validate; read from stdin, one per line, when omitted
        codes: Vec<String>,
    },
}

#[derive(Args)]
struct ParserArgs {
    /// Variable-length AI to decode (repeatable, matched in order)
    #[arg(long = "known-ai")]
    known_ais: Vec<String>,
    /// Group separator; accepts \xHH, \t, \n and \\ escapes
    #[arg(long)]
    separator: Option<String>,
    /// Do not require an FNC1 prefix
    #[arg(long)]
    no_fnc1: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Escape(#[from] gs1_parser::tools::EscapeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read stdin: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ParserArgs {
    fn to_config(&self) -> Result<ParserConfig, CliError> {
        let mut config = ParserConfig::from_env()?;
        if !self.known_ais.is_empty() {
            config = config.with_known_ais(self.known_ais.iter().map(String::as_str));
        }
        if let Some(separator) = &self.separator {
            config = config.with_group_separator(decode_escapes(separator)?)?;
        }
        if self.no_fnc1 {
            config = config.with_fnc1_required(false);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse { parser, json, codes } => parse_cmd(&parser, json, codes),
        Command::Validate {
            parser,
            required,
            forbidden,
            allow_empty,
            json,
            codes,
        } => {
            let rules = ValidatorConfig::new()
                .with_required_ais(required)
                .with_forbidden_ais(forbidden)
                .with_allow_empty(allow_empty);
            validate_cmd(&parser, rules, json, codes)
        }
    };

    match result {
        Ok(stats) if stats.rejected == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn collect_codes(codes: Vec<String>) -> Result<Vec<String>, CliError> {
    if codes.is_empty() {
        Ok(read_codes(io::stdin().lock())?)
    } else {
        Ok(codes)
    }
}

fn parse_cmd(args: &ParserArgs, json: bool, codes: Vec<String>) -> Result<BatchStats, CliError> {
    let parser = gs1_parser::Parser::new(args.to_config()?);
    debug!(config = ?parser.config(), "parser ready");
    let codes = collect_codes(codes)?;
    let results = parser.parse_batch(&codes);

    for (code, result) in codes.iter().zip(&results) {
        if json {
            println!("{}", parse_json(code, result)?);
        } else {
            print_parsed(code, result);
        }
    }

    let stats = BatchStats::from_parsed(&results);
    if !json && stats.total > 1 {
        println!(
            "\nParsed {}/{} ({:.1}%)",
            stats.accepted,
            stats.total,
            100.0 * stats.acceptance_rate()
        );
    }
    Ok(stats)
}

fn parse_json(code: &str, result: &Result<Barcode, ParseError>) -> Result<String, CliError> {
    let value = match result {
        Ok(barcode) => serde_json::json!({ "input": code, "barcode": barcode }),
        Err(err) => serde_json::json!({ "input": code, "error": err, "message": err.to_string() }),
    };
    Ok(serde_json::to_string(&value)?)
}

fn print_parsed(code: &str, result: &Result<Barcode, ParseError>) {
    println!("Input: {}", code.escape_debug());
    match result {
        Ok(barcode) => {
            let carrier = barcode.carrier_type();
            if carrier.is_known() {
                println!("  type: {carrier} ({})", barcode.fnc1_prefix());
            } else {
                println!("  type: {carrier} (no FNC1 prefix)");
            }
            for (ai, value) in barcode.ais() {
                println!("  ({ai}) {value}");
            }
            for segment in barcode.buffer() {
                println!("  [buffer] {segment}");
            }
        }
        Err(err) => println!("  error: {err}"),
    }
}

fn validate_cmd(
    args: &ParserArgs,
    rules: ValidatorConfig,
    json: bool,
    codes: Vec<String>,
) -> Result<BatchStats, CliError> {
    let validator = Validator::new(gs1_parser::Parser::new(args.to_config()?), rules);
    debug!(
        parser = ?validator.parser().config(),
        rules = ?validator.config(),
        "validator ready"
    );
    let codes = collect_codes(codes)?;
    let resolutions = validator.validate_batch(&codes);

    for (code, resolution) in codes.iter().zip(&resolutions) {
        if json {
            let value = serde_json::json!({ "input": code, "resolution": resolution });
            println!("{}", serde_json::to_string(&value)?);
        } else {
            print_resolution(code, resolution);
        }
    }

    Ok(BatchStats::from_resolutions(&resolutions))
}

fn print_resolution(code: &str, resolution: &Resolution) {
    match resolution.error() {
        None => println!("{}: valid", code.escape_debug()),
        Some(violation) => println!(
            "{}: {} {}",
            code.escape_debug(),
            violation.code,
            violation.message
        ),
    }
}
