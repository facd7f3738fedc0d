//! textsum is a CLI client for a remote summarization API.
//!
//! It uploads a PDF document or a piece of text to the service and prints the
//! returned summary together with word-count statistics:
//! 1. `pdf` - Summarize a PDF document
//! 2. `text` - Summarize text given inline, read from a file or from stdin

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use copypasta::ClipboardContext;
use env_logger::Builder;
use log::{LevelFilter, debug, warn};

use textsum::{
    Orchestrator, ReqwestTransport, SelectedFile, Session, SummarizeError, SummaryRequest, Theme,
    ValidationError,
    config::{default_preferences_path, resolve_api_base_url},
    constants::{DEFAULT_DOWNLOAD_FILE, MEDIUM_SUMMARY_LENGTH},
    request::parse_summary_length,
    storage::Preferences,
    view::{char_count_label, char_count_level, render_notification, render_result},
};

/// A CLI client for a PDF and text summarization API
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Command,

    /// Base URL of the summarization API; remembered for later runs
    #[arg(long, global = true)]
    api: Option<String>,

    /// Path to the preferences database
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Skip the API health probe
    #[arg(long, global = true)]
    no_health: bool,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a PDF document (up to 10MB)
    Pdf {
        /// Path to the PDF file
        file: PathBuf,
        #[command(flatten)]
        delivery: Delivery,
    },
    /// Summarize text of at least 50 characters
    Text {
        /// Text to summarize; read from --file or stdin when omitted
        #[arg(long, short, conflicts_with = "file")]
        text: Option<String>,
        /// Path to a text file to summarize
        #[arg(long, short)]
        file: Option<PathBuf>,
        /// Maximum summary length: short (100), medium (150), long (200) or a number of words
        #[arg(long, short = 'l', value_parser = parse_summary_length, default_value_t = MEDIUM_SUMMARY_LENGTH)]
        max_length: u32,
        #[command(flatten)]
        delivery: Delivery,
    },
    /// Check whether the API is reachable
    Health,
    /// Show or change the colour theme: "light", "dark" or "toggle"
    Theme {
        action: Option<ThemeAction>,
    },
    /// Show the resolved configuration
    Config,
    /// Show information about the service and data handling
    About,
}

/// What happens to a summary besides printing it.
#[derive(Args, Debug, Default, PartialEq, Eq)]
struct Delivery {
    /// Save the summary to the given file
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Save the summary to summary.txt
    #[arg(long, conflicts_with = "output")]
    save: bool,
    /// Copy the summary to the clipboard
    #[arg(long)]
    copy: bool,
}

impl Delivery {
    fn download_path(&self) -> Option<PathBuf> {
        match &self.output {
            Some(path) => Some(path.clone()),
            None if self.save => Some(PathBuf::from(DEFAULT_DOWNLOAD_FILE)),
            None => None,
        }
    }
}

/// Enum representing a change of the persisted theme.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ThemeAction {
    Set(Theme),
    Toggle,
}

impl std::str::FromStr for ThemeAction {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "toggle" => Ok(ThemeAction::Toggle),
            theme => theme.parse().map(ThemeAction::Set),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let prefs_path = cli.prefs.unwrap_or_else(default_preferences_path);
    let preferences = Preferences::new(&prefs_path)?;
    let base_url = resolve_api_base_url(cli.api.as_deref(), &preferences)?;
    let theme = preferences.theme()?;
    let session = Session::new(
        Orchestrator::new(ReqwestTransport::default(), base_url),
        theme,
    );
    let probe = !cli.no_health;

    match cli.command {
        Command::Pdf { file, delivery } => {
            let file = match SelectedFile::from_path(&file) {
                Ok(file) => file,
                Err(error) => {
                    let invalid = error.downcast::<ValidationError>()?;
                    session
                        .notifications()
                        .show_error(&SummarizeError::from(invalid));
                    print_notification(&session);
                    return Ok(ExitCode::FAILURE);
                }
            };
            eprintln!("Selected {}", file.label());
            handle_summary(&session, SummaryRequest::pdf(file), &delivery, probe).await
        }
        Command::Text {
            text,
            file,
            max_length,
            delivery,
        } => {
            let text = read_text(text, file.as_deref())?;
            debug!(
                "{} ({:?})",
                char_count_label(&text),
                char_count_level(text.chars().count())
            );
            handle_summary(
                &session,
                SummaryRequest::text(text, max_length),
                &delivery,
                probe,
            )
            .await
        }
        Command::Health => {
            let healthy = session.check_health().await;
            if healthy {
                println!("API at {} is reachable", session.orchestrator().base_url());
            }
            print_notification(&session);
            Ok(exit_code(healthy))
        }
        Command::Theme { action } => handle_theme(&preferences, action),
        Command::Config => {
            println!("API URL:     {}", session.orchestrator().base_url());
            println!("Theme:       {}", session.theme());
            println!("Preferences: {}", prefs_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::About => {
            session.show_about();
            print_notification(&session);
            session.show_privacy();
            print_notification(&session);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn handle_summary(
    session: &Session<ReqwestTransport>,
    request: SummaryRequest,
    delivery: &Delivery,
    probe: bool,
) -> Result<ExitCode> {
    let health = async {
        if probe && !session.check_health().await {
            print_notification(session);
        }
    };
    let summary = async {
        let result = session.summarize(&request).await;
        print_notification(session);
        result
    };
    let ((), result) = tokio::join!(health, summary);

    let Some(result) = result else {
        return Ok(ExitCode::FAILURE);
    };
    println!("{}", render_result(&result));

    if let Some(path) = delivery.download_path() {
        session.download_summary(&path)?;
        print_notification(session);
    }
    if delivery.copy {
        match copy_to_clipboard(session) {
            Ok(_) => print_notification(session),
            Err(e) => warn!("Failed to copy the summary: {e}"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn copy_to_clipboard(session: &Session<ReqwestTransport>) -> Result<bool> {
    let mut clipboard = ClipboardContext::new().map_err(|e| anyhow!("Clipboard error: {}", e))?;
    session.copy_summary(&mut clipboard)
}

fn handle_theme(preferences: &Preferences, action: Option<ThemeAction>) -> Result<ExitCode> {
    let theme = match action {
        None => preferences.theme()?,
        Some(ThemeAction::Set(theme)) => {
            preferences.set_theme(theme)?;
            theme
        }
        Some(ThemeAction::Toggle) => {
            let theme = preferences.theme()?.toggled();
            preferences.set_theme(theme)?;
            theme
        }
    };
    println!("{theme}");

    Ok(ExitCode::SUCCESS)
}

fn read_text(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(file) = file {
        return std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read text from {}", file.display()));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

fn print_notification(session: &Session<ReqwestTransport>) {
    if let Some(notification) = session.notifications().current() {
        let colored = std::io::stderr().is_terminal();
        eprintln!(
            "{}",
            render_notification(&notification, session.theme(), colored)
        );
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
