//! distreg CLI - inspect and validate distribution definitions

use clap::{Parser, Subcommand};
use distreg_core::{Config, SearchPolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use commands::Settings;
use error::Result;

#[derive(Parser)]
#[command(name = "distreg")]
#[command(version)]
#[command(about = "Inspect the distribution registry used for image builds", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: ~/.config/distreg/config.yaml)
    #[arg(long, global = true, env = "DISTREG_CONFIG")]
    config: Option<PathBuf>,

    /// Distribution definitions directory
    #[arg(short = 'd', long = "dir", global = true, env = "DISTRIBUTIONS_DIR")]
    dir: Option<PathBuf>,

    /// Allow list for restricted distributions
    #[arg(long, global = true, env = "ALLOW_FILE")]
    allow_file: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate every definition
    Lint {
        /// Output a JSON report
        #[arg(long)]
        json: bool,
    },

    /// List distributions
    List {
        /// Include distributions that require entitlement
        #[arg(long)]
        entitled: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a distribution
    Show {
        /// Distribution name
        name: String,

        /// Include distributions that require entitlement
        #[arg(long)]
        entitled: bool,

        /// Only show this architecture
        #[arg(short, long)]
        arch: Option<String>,

        /// Show repositories too
        #[arg(long)]
        all: bool,
    },

    /// Search packages of a distribution architecture
    Search {
        /// Distribution name
        distro: String,

        /// Architecture name
        arch: String,

        /// Substring of the package name
        query: String,

        /// Include distributions that require entitlement
        #[arg(long)]
        entitled: bool,

        /// Match the query case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Match the query case-insensitively, overriding the config file
        #[arg(long, conflicts_with = "case_sensitive")]
        case_insensitive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check an organization may build a distribution
    Access {
        /// Distribution name
        distro: String,

        /// Organization id
        #[arg(long)]
        org: String,

        /// Include distributions that require entitlement
        #[arg(long)]
        entitled: bool,
    },
}

fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file values, overridden by flags and environment
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let search_policy = match cli.command {
        Commands::Search {
            case_sensitive: true,
            ..
        } => SearchPolicy::CaseSensitive,
        Commands::Search {
            case_insensitive: true,
            ..
        } => SearchPolicy::CaseInsensitive,
        _ => config.search_policy(),
    };

    Ok(Settings {
        distributions_dir: cli.dir.clone().unwrap_or(config.distributions_dir),
        allow_file: cli.allow_file.clone().or(config.allow_file),
        search_policy,
    })
}

fn run(cli: Cli) -> Result<()> {
    let settings = resolve_settings(&cli)?;
    tracing::debug!(?settings, "resolved settings");
    let dir = settings.distributions_dir.as_path();

    match cli.command {
        Commands::Lint { json } => commands::lint::run(dir, json),

        Commands::List { entitled, json } => commands::list::run(dir, entitled, json),

        Commands::Show {
            name,
            entitled,
            arch,
            all,
        } => commands::show::run(dir, &name, entitled, arch.as_deref(), all),

        Commands::Search {
            distro,
            arch,
            query,
            entitled,
            json,
            ..
        } => commands::search::run(
            dir,
            commands::search::SearchArgs {
                distro: &distro,
                arch: &arch,
                query: &query,
                entitled,
                policy: settings.search_policy,
                json,
            },
        ),

        Commands::Access {
            distro,
            org,
            entitled,
        } => commands::access::run(
            dir,
            settings.allow_file.as_deref(),
            &distro,
            &org,
            entitled,
        ),
    }
}
