// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use nametrans::app_config::{self, Config};
use nametrans::app_controller::{Controller, RunRequest};
use nametrans::file_utils::InputSource;
use nametrans::language_utils::SourceLanguage;

/// CLI Wrapper for SourceLanguage to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    En,
    Es,
}

impl From<CliLanguage> for SourceLanguage {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::En => SourceLanguage::En,
            CliLanguage::Es => SourceLanguage::Es,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered tools
    Tools,

    /// Run one tool with a JSON input and print its JSON output
    Tool {
        /// Tool name (see `nametrans tools`)
        name: String,

        /// JSON input, e.g. '{"text": "John Smith visited Paris."}'
        input: String,
    },

    /// Generate shell completions for nametrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// nametrans - named-entity glossary builder
///
/// Extracts person and place names from English or Spanish text and
/// writes their Chinese translations to a TSV glossary.
#[derive(Parser, Debug)]
#[command(name = "nametrans")]
#[command(version = "0.1.0")]
#[command(about = "Person and place name glossary builder")]
#[command(long_about = "nametrans extracts person and place names with CoreNLP, looks up their Chinese translations in the Dict Reader dictionaries and writes a TSV glossary.

EXAMPLES:
    nametrans \"John Smith visited Paris.\"        # Translate inline text
    nametrans -f chapter.txt -o names.tsv        # Read a file, choose the output
    nametrans -l es -f capitulo.txt              # Spanish source text
    nametrans --use-gemini -f chapter.txt        # Translate dictionary misses with Gemini
    cat chapter.txt | nametrans                  # Read from standard input
    nametrans tools                              # List available tools
    nametrans tool name_extractor '{\"text\": \"Paris\"}'
    nametrans completions bash > nametrans.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. CORENLP_URL, CORENLP_TIMEOUT, DICT_READER_URL,
    DICT_READER_TIMEOUT, MCP_API_KEY, GEMINI_API_KEY and GEMINI_MODEL override it,
    and are also read from a .env file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to process (reads stdin when neither TEXT nor --file is given)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Input file path
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output TSV file path
    #[arg(short, long, default_value = "translations.tsv")]
    output: PathBuf,

    /// Source language
    #[arg(short, long, value_enum)]
    language: Option<CliLanguage>,

    /// Translate names not found in the dictionaries with Gemini
    #[arg(long)]
    use_gemini: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker for log level
    fn get_marker_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "✗",
            Level::Warn => "!",
            Level::Info => "•",
            Level::Debug => "?",
            Level::Trace => "…",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_marker_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize the logger once; the level is updated after loading the config
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let mut cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "nametrans", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(LevelFilter::from(&level));
    }

    let config = load_config(&cli)?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(LevelFilter::from(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command.take() {
        Some(Commands::Tools) => {
            let registry = controller.build_registry()?;
            for (name, description) in registry.describe() {
                println!("{:<16} {}", name, description);
            }
            Ok(())
        }
        Some(Commands::Tool { name, input }) => {
            let input: serde_json::Value = serde_json::from_str(&input)
                .context("Tool input must be valid JSON")?;
            let registry = controller.build_registry()?;
            let output = registry.run_tool(&name, input).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Some(Commands::Completions { .. }) => Ok(()),
        None => run_glossary(&controller, cli).await,
    }
}

async fn run_glossary(controller: &Controller, cli: CommandLineOptions) -> Result<()> {
    let source = InputSource::from_args(cli.text, cli.file);
    if source == InputSource::Stdin {
        eprintln!("Enter text (Ctrl+D to finish):");
    }
    let text = source.load()?;

    let request = RunRequest {
        text,
        output: cli.output,
        language: controller.config().language,
        use_generative: cli.use_gemini,
    };

    let result = controller.run(&request).await?;
    println!("Glossary saved to: {}", request.output.display());
    println!("  - translated: {}", result.found.len());
    println!("  - not translated: {}", result.not_found.len());

    Ok(())
}

/// Load or create the config file, then apply environment and CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let (mut config, created) = Config::load_or_create(&cli.config)?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config);
    }

    config.apply_env_overrides()
        .context("Invalid environment override")?;

    if let Some(language) = cli.language {
        config.language = language.into();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;
    info!("Using CoreNLP at {}", config.ner.endpoint);

    Ok(config)
}
