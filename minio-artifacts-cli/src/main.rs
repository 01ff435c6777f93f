//! MinIO artifact store administration.
//!
//! # Commands
//!
//! - `minio-artifacts show` - Print the saved settings
//! - `minio-artifacts set` - Change saved settings
//! - `minio-artifacts check` - Validate values without saving or connecting
//! - `minio-artifacts probe` - Connect with candidate values and report
//! - `minio-artifacts create-bucket <name>` - Create a bucket
//! - `minio-artifacts uri <key>` - Print the browser reference for a key
//! - `minio-artifacts presign <key>` - Print a one-hour presigned URL

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use minio_artifacts_config::{FileConfigStore, FileFormat, load_dotenv};
use minio_artifacts_core::{PERSISTENCE_ID, StoreConfiguration};
use minio_artifacts_s3::{CredentialResolver, CredentialsSource};
use std::{path::PathBuf, sync::Arc};
use tracing::debug;

mod commands;
mod error;
mod logging;

use commands::{bucket, check, presign, probe, set, show, uri};
use error::{CliError, CliResult};
use logging::{LogConfig, LogFormat, LogLevel};

/// MinIO artifact store administration
#[derive(Parser)]
#[command(name = "minio-artifacts")]
#[command(version)]
#[command(about = "Manage and verify the MinIO S3 artifact store settings")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the saved settings
    #[arg(long, global = true, env = "MINIO_ARTIFACTS_CONFIG_DIR", default_value = ".")]
    config_dir: PathBuf,

    /// Format of the saved settings file
    #[arg(
        long,
        global = true,
        env = "MINIO_ARTIFACTS_CONFIG_FORMAT",
        value_enum,
        default_value = "toml"
    )]
    config_format: StoreFormat,

    /// Read environment variables from this file instead of `./.env`
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Diagnostic log format
    #[arg(long, global = true, value_enum, default_value = "compact")]
    log_format: LogFormat,

    /// Append diagnostic logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StoreFormat {
    Toml,
    Json,
}

impl From<StoreFormat> for FileFormat {
    fn from(format: StoreFormat) -> Self {
        match format {
            StoreFormat::Toml => FileFormat::Toml,
            StoreFormat::Json => FileFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the saved settings
    Show,

    /// Change saved settings; each value is validated before it is saved
    Set(SetArgs),

    /// Validate values without saving or connecting
    Check(CandidateArgs),

    /// Connect with candidate values, falling back to the saved ones
    Probe(CandidateArgs),

    /// Create a bucket on the saved endpoint
    CreateBucket {
        /// Bucket name
        name: String,
    },

    /// Print the browser reference for an object key
    Uri(ObjectArgs),

    /// Print a presigned URL valid for one hour
    Presign {
        #[command(flatten)]
        object: ObjectArgs,

        /// HTTP method to grant (GET or PUT)
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
}

#[derive(Args)]
struct SetArgs {
    #[arg(long)]
    endpoint: Option<String>,

    #[arg(long)]
    container: Option<String>,

    #[arg(long)]
    prefix: Option<String>,

    /// Delete artifacts when their build is deleted
    #[arg(long)]
    delete_artifacts: Option<bool>,

    /// Delete stashes when their build completes
    #[arg(long)]
    delete_stashes: Option<bool>,
}

#[derive(Args)]
struct CandidateArgs {
    #[arg(long)]
    endpoint: Option<String>,

    #[arg(long)]
    container: Option<String>,

    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Args)]
struct ObjectArgs {
    /// Object key, relative to the bucket
    key: String,

    /// Bucket; defaults to the saved container
    #[arg(long)]
    container: Option<String>,
}

/// Global options every command needs.
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

fn credentials() -> Arc<dyn CredentialResolver> {
    Arc::new(CredentialsSource::Environment)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let level = if cli.verbose {
        LogLevel::Debug
    } else if cli.quiet {
        LogLevel::Error
    } else {
        LogLevel::Warn
    };
    let guard = LogConfig::new()
        .level(level)
        .format(cli.log_format)
        .file(cli.log_file.clone())
        .with_targets(cli.verbose)
        .with_colors(!cli.no_color)
        .init();

    let result = match guard {
        Ok(_guard) => run(cli).await,
        Err(e) => Err(CliError::Io(e)),
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // A missing ./.env is fine; an explicit --env-file must load.
    let env_file = cli.env_file.as_ref().map(|path| path.to_string_lossy());
    load_dotenv(env_file.as_deref())?;

    let store = FileConfigStore::new(cli.config_dir.clone(), cli.config_format.into());
    debug!(path = %store.path_for(PERSISTENCE_ID).display(), "Using settings file");
    let configuration = StoreConfiguration::install(Arc::new(store));

    let output = Output {
        json: cli.json,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Show => show::run(&configuration, &output),
        Commands::Set(args) => set::run(
            &configuration,
            set::Changes {
                endpoint: args.endpoint,
                container: args.container,
                prefix: args.prefix,
                delete_artifacts: args.delete_artifacts,
                delete_stashes: args.delete_stashes,
            },
            &output,
        ),
        Commands::Check(args) => check::run(
            args.endpoint.as_deref(),
            args.container.as_deref(),
            args.prefix.as_deref(),
            &output,
        ),
        Commands::Probe(args) => {
            let saved = configuration.snapshot().address;
            probe::run(
                &args.endpoint.unwrap_or(saved.endpoint),
                &args.container.unwrap_or(saved.container),
                &args.prefix.unwrap_or(saved.prefix),
                credentials(),
                &output,
            )
            .await
        }
        Commands::CreateBucket { name } => bucket::run(&name, credentials(), &output).await,
        Commands::Uri(object) => uri::run(&object.key, object.container.as_deref(), &output),
        Commands::Presign { object, method } => {
            let method = http::Method::from_bytes(method.to_uppercase().as_bytes())
                .map_err(|_| CliError::InvalidArgument(format!("not an HTTP method: {method}")))?;
            presign::run(
                &object.key,
                object.container.as_deref(),
                method,
                credentials(),
                &output,
            )
            .await
        }
    }
}
