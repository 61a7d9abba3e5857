use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use freight_quote::cli::{
    handle_report_command, handle_schemas_command, handle_validate_command, ReportCommands,
    ValidateArgs,
};
use freight_quote::config::{QuotePaths, Settings};
use freight_quote::storage::{initialize_storage, needs_initialization};

/// Environment variable holding the log filter (falls back to `RUST_LOG`)
const LOG_ENV: &str = "FQUOTE_LOG";

#[derive(Parser)]
#[command(
    name = "fquote",
    version,
    about = "Multi-currency freight quote validation, totals and previews",
    long_about = "fquote validates freight quote forms against schema trees and \
                  reports quote totals per currency: overall, by day or month, as \
                  a month calendar, a day listing or a single quote preview."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate form data against a schema
    Validate(ValidateArgs),

    #[command(flatten)]
    Report(ReportCommands),

    /// List available validation schemas
    Schemas,

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .try_init()
            .ok();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let paths = QuotePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Validate(args)) => {
            if !handle_validate_command(&paths, args)? {
                std::process::exit(1);
            }
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&settings, cmd)?;
        }
        Some(Commands::Schemas) => {
            handle_schemas_command(&paths)?;
        }
        Some(Commands::Init) => {
            println!("Initializing freight-quote at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings:        {}", paths.settings_file().display());
            println!("Schemas:         {}", paths.schemas_dir().display());
            println!();
            println!("Run 'fquote schemas' to see the available schemas.");
        }
        Some(Commands::Config) => {
            println!("freight-quote Configuration");
            println!("===========================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Schemas directory: {}", paths.schemas_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            if needs_initialization(&paths) {
                println!("(not initialized; run 'fquote init')");
            }
            println!();
            println!("Settings:");
            println!("  Default currency:    {}", settings.default_currency);
            println!("  Date format:         {}", settings.date_format);
            println!("  Decimal places:      {}", settings.decimal_places);
            println!("  Thousands separator: {:?}", settings.thousands_separator);
            for (code, symbol) in &settings.symbols {
                println!("  Symbol {}: {}", code, symbol);
            }
            println!("  Terms:               {}", settings.terms.len());
        }
        None => {
            println!("fquote - freight quote validation and totals");
            println!();
            println!("Run 'fquote --help' for usage information.");
        }
    }

    Ok(())
}
