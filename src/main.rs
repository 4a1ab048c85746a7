// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;

use quizbank::app_config::{Config, LogLevel};
use quizbank::errors::{AppError, QuizError};
use quizbank::quiz::AnswerSubmission;
use quizbank::Controller;

/// Message printed when a sample request matches nothing
const NO_QUESTIONS_MESSAGE: &str = "No questions found for the specified criteria.";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print random questions (with options) as JSON
    Sample {
        /// Difficulty level, e.g. 'easy', 'medium', 'hard'
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Number of questions to return
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Score a JSON array of {"questionId", "answer"} submissions
    Validate {
        /// File holding the submissions, or '-' for stdin
        #[arg(value_name = "ANSWERS", default_value = "-")]
        answers: String,

        /// Difficulty the answers were given at (used for the IQ estimate)
        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Show question bank statistics
    Stats,

    /// Generate shell completions for quizbank
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// quizbank - random quiz questions and answer scoring
#[derive(Parser, Debug)]
#[command(name = "quizbank")]
#[command(version)]
#[command(about = "Serve random quiz questions and score submitted answers")]
#[command(long_about = "quizbank samples random questions from a SQLite question bank and scores submitted answers.

EXAMPLES:
    quizbank sample                              # 15 easy questions (defaults from config)
    quizbank sample -d hard -n 5                 # 5 hard questions
    quizbank validate answers.json -d medium     # Score answers and estimate IQ
    echo '[{\"questionId\":1,\"answer\":\"Paris\"}]' | quizbank validate
    quizbank --database ./db/questions.db stats  # Show question bank statistics
    quizbank completions bash > quizbank.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH", global = true, default_value = "conf.json")]
    config: String,

    /// Question bank database path (overrides the config file)
    #[arg(long, global = true, env = "QUIZ_DATABASE")]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
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
            let (color, emoji) = Self::style_for_level(record.level());

            // Logs go to stderr so stdout stays valid JSON
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "quizbank", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config)
        .with_context(|| format!("Failed to load config file: {}", cli.config))?;

    if let Some(database) = cli.database {
        config.database_path = database;
    }

    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level((&config.log_level).into());

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Sample { difficulty, limit } => {
            run_sample(&controller, difficulty.as_deref(), limit).await
        }
        Commands::Validate { answers, difficulty } => {
            run_validate(&controller, &answers, difficulty.as_deref()).await
        }
        Commands::Stats => {
            if let Some(stats) = controller.stats().await? {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_sample(controller: &Controller, difficulty: Option<&str>, limit: Option<usize>) -> Result<()> {
    let questions = match controller.random_questions(difficulty, limit).await {
        Ok(questions) => questions,
        Err(e) => return Err(report_quiz_error(e, "Failed to retrieve questions.")),
    };

    if questions.is_empty() {
        warn!("{}", NO_QUESTIONS_MESSAGE);
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "message": NO_QUESTIONS_MESSAGE }))?
        );
        std::process::exit(2);
    }

    println!("{}", serde_json::to_string_pretty(&questions)?);
    Ok(())
}

async fn run_validate(controller: &Controller, answers: &str, difficulty: Option<&str>) -> Result<()> {
    let input = if answers == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read answers from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(answers)
            .with_context(|| format!("Failed to read answers file: {}", answers))?
    };

    let submissions: Vec<AnswerSubmission> =
        serde_json::from_str(&input).context("Answers must be a JSON array of {questionId, answer}")?;

    match controller.validate_answers(&submissions, difficulty).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e) => Err(report_quiz_error(e, "Failed to validate answers.")),
    }
}

/// Log store failures in full but show callers only a generic message
fn report_quiz_error(err: QuizError, public_message: &str) -> anyhow::Error {
    match err {
        QuizError::InvalidInput(_) => AppError::from(err).into(),
        QuizError::Store(_) => {
            error!("{}: {}", public_message, err);
            anyhow::anyhow!("{}", public_message)
        }
    }
}
