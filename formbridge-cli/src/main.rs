use std::fmt::Write as FmtWrite;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

use formbridge::{AppConfig, FormBridge};

const DEFAULT_LOG_FILE: &str = "formbridge.log";
const LOG_ENV: &str = "FORMBRIDGE_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "formbridge",
    version,
    about = "Sign in through a terminal form and land on a dashboard"
)]
struct Cli {
    /// TOML configuration with [ui] options and [[accounts]]
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Title shown above the sign-in form
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Where tracing output goes; the terminal itself belongs to the UI
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Hide the key hints in the footer
    #[arg(long = "no-help", action = ArgAction::SetTrue)]
    no_help: bool,

    /// Load and validate the configuration, print it, and exit
    #[arg(long = "check-config")]
    check_config: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut diagnostics = DiagnosticCollector::default();
    if let Some(path) = cli.config.as_deref()
        && !path.is_file()
    {
        diagnostics.push("config", format!("{} is not a readable file", path.display()));
    }
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        diagnostics.push(
            "log-file",
            format!("directory {} does not exist", parent.display()),
        );
    }
    diagnostics.into_result()?;

    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::default(),
    };

    if cli.check_config {
        let rendered = config.to_toml_string()?;
        println!("configuration ok ({} account(s))", config.accounts.len());
        print!("{rendered}");
        return Ok(());
    }

    init_logging(&log_file)?;

    let mut options = config.ui_options();
    if cli.no_help {
        options = options.with_help(false);
    }
    let mut app = FormBridge::from_config(&config).with_options(options);
    if let Some(title) = cli.title.as_ref() {
        app = app.with_title(title.clone());
    }

    match app.run().map_err(Report::msg)? {
        Some(user) => println!("signed in as {} <{}>", user.name, user.email),
        None => println!("signed out"),
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;
    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok(())
}

#[derive(Debug, Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("--{label}: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("invalid arguments:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
