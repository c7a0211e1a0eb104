// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use parksite::app_config::{self, Config};
use parksite::contact::ContactSubmission;
use parksite::errors::AppError;
use parksite::locale::Locale;
use parksite::pages::{articles, company, home, products, Page, PageOutcome};
use parksite::server::{self, AppState};

/// Number of stored submissions listed by `check`
const RECENT_SUBMISSIONS: usize = 5;

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

/// Page assembled by the `page` command
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageKind {
    Home,
    Products,
    Product,
    Articles,
    Article,
    Company,
    Legal,
}

impl PageKind {
    fn needs_slug(self) -> bool {
        matches!(self, PageKind::Product | PageKind::Article | PageKind::Legal)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve pages and the contact endpoint over HTTP
    Serve {
        /// Bind host, overriding the configuration
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overriding the configuration
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Assemble one page and print it as JSON
    Page {
        #[arg(value_enum)]
        page: PageKind,

        /// Slug for product, article and legal pages
        #[arg(short, long)]
        slug: Option<String>,

        /// Locale code (en, id, zh); the configured default when omitted
        #[arg(short, long)]
        locale: Option<Locale>,
    },

    /// Submit a contact form from a JSON file
    Contact {
        #[arg(value_name = "JSON_FILE")]
        path: PathBuf,

        /// Locale recorded with the submission
        #[arg(short, long)]
        locale: Option<Locale>,
    },

    /// Validate configuration, reach the content store and report database stats
    Check,

    /// Generate shell completions for parksite
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// parksite - content and contact backend for an industrial park website
#[derive(Parser, Debug)]
#[command(name = "parksite")]
#[command(version)]
#[command(about = "Localized CMS pages and contact form backend")]
#[command(long_about = "parksite reads localized pages from a headless CMS, renders their rich text, and stores contact form submissions.

EXAMPLES:
    parksite serve                              # Serve on the configured address
    parksite serve -p 9000                      # Serve on another port
    parksite page home -l en                    # Print the English home page
    parksite page product -s warehouse -l zh    # Print one product page
    parksite contact form.json                  # Submit a contact form
    parksite check                              # Check config, store and database
    parksite completions bash > parksite.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in parksite.json by default. You can specify a
    different file with --config. If the file doesn't exist, a default one
    will be created automatically. Set cms.fixtures_path to serve content
    from a local JSON fixture file instead of the CMS.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "parksite.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
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
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (colour, tag) = Self::style_for_level(record.level());
        let _ = writeln!(
            std::io::stderr(),
            "\x1B[{}m{} {} {}\x1B[0m",
            colour,
            now,
            tag,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is lowered once config is read
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "parksite", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate().context("Configuration validation failed")?;
            run_serve(config).await
        }
        Commands::Page { page, slug, locale } => {
            config.validate().context("Configuration validation failed")?;
            run_page(&config, page, slug.as_deref(), locale).await
        }
        Commands::Contact { path, locale } => {
            config.validate().context("Configuration validation failed")?;
            run_contact(&config, &path, locale).await
        }
        Commands::Check => run_check(&config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_serve(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;
    info!(
        "Locales: {} (default {})",
        config
            .locales
            .supported
            .iter()
            .map(|l| format!("{} ({})", l.native_name(), l.code()))
            .collect::<Vec<_>>()
            .join(", "),
        config.locales.default
    );
    server::serve(&config.server, state).await
}

fn resolve_locale(config: &Config, locale: Option<Locale>) -> Result<Locale> {
    let locale = locale.unwrap_or(config.locales.default);
    if !config.locales.is_supported(locale) {
        return Err(AppError::UnsupportedLocale(locale.to_string()).into());
    }
    Ok(locale)
}

async fn run_page(config: &Config, kind: PageKind, slug: Option<&str>, locale: Option<Locale>) -> Result<()> {
    let locale = resolve_locale(config, locale)?;
    let slug = match (kind.needs_slug(), slug) {
        (true, None) => return Err(anyhow!("--slug is required for {:?} pages", kind)),
        (_, slug) => slug.unwrap_or_default(),
    };

    let state = AppState::from_config(config)?;
    let ctx = &state.pages;

    match kind {
        PageKind::Home => print_page(home::home_page(ctx, locale).await?),
        PageKind::Products => print_page(products::product_list_page(ctx, locale).await?),
        PageKind::Product => print_page(products::product_page(ctx, slug, locale).await?),
        PageKind::Articles => print_page(articles::article_list_page(ctx, locale).await?),
        PageKind::Article => print_page(articles::article_page(ctx, slug, locale).await?),
        PageKind::Company => print_page(company::company_page(ctx, locale).await?),
        PageKind::Legal => print_page(company::legal_page(ctx, slug, locale).await?),
    }
}

fn print_page<T: Serialize>(outcome: PageOutcome<Page<T>>) -> Result<()> {
    let page = outcome.found().ok_or_else(|| anyhow!("Not found"))?;
    let json = serde_json::to_string_pretty(&page).context("Failed to serialize page")?;
    println!("{}", json);
    Ok(())
}

async fn run_contact(config: &Config, path: &std::path::Path, locale: Option<Locale>) -> Result<()> {
    let locale = resolve_locale(config, locale)?;
    let body = std::fs::read(path).with_context(|| format!("Failed to read submission: {:?}", path))?;
    // Parse up front so a malformed file fails before the database is opened
    ContactSubmission::from_json(&body)?;

    let state = AppState::from_config(config)?;
    let result = state.contact.submit_json(&body, locale).await;

    println!("{}", serde_json::to_string_pretty(&result.body)?);
    if !result.is_success() {
        return Err(anyhow!("Submission rejected with status {}", result.status));
    }
    Ok(())
}

async fn run_check(config: &Config) -> Result<()> {
    config.validate().context("Configuration validation failed")?;
    info!("Configuration is valid");

    let state = AppState::from_config(config)?;

    match state.pages.resolver().store().ping().await {
        Ok(()) => info!("Content store reachable"),
        Err(e) => warn!("Content store unreachable: {}", e),
    }

    let repository = state.contact.repository();
    let stats = repository.connection().stats()?;
    info!("Database {:?}: {}", repository.connection().path(), stats);

    for record in repository.recent_submissions(RECENT_SUBMISSIONS).await? {
        info!(
            "  {} {} <{}> [{}]",
            record.created_at, record.name, record.email, record.notification_status
        );
    }

    Ok(())
}
