use base::setting::{generate_default, load, Settings, SETTINGS};
use base::{
    database::{get_database, open_database, DATABASE},
    CLI_NAME,
};
use clap::{Parser, Subcommand};
use eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

#[derive(Parser)]
#[command(name = CLI_NAME, author, version, about, long_about = None)]
#[command(next_line_help = true)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the default configuration
    DefaultConfig,
    /// Applies every pending migration
    Migrate,
    /// Lists registered migrations and whether they were applied
    Status,
}

async fn connect(config: Option<PathBuf>) -> Result<()> {
    SETTINGS.get_or_try_init(async { load(config) }).await?;
    DATABASE
        .get_or_try_init(async { open_database().await })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    color_eyre::install()?;
    let tracing_builder = tracing_subscriber::registry().with(fmt::layer());
    if std::env::var(base::LAKE_LOGLEVEL).is_ok() {
        tracing_builder.with(EnvFilter::from_env(base::LAKE_LOGLEVEL))
    } else {
        tracing_builder.with(EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
    .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Migrate) {
        Command::DefaultConfig => {
            let default = generate_default(Settings::default())?;
            let str = toml::to_string(&default)?;
            println!("{}", str);
            Ok(())
        }
        Command::Migrate => {
            connect(cli.config).await?;
            let registry = migration::registry()?;
            let applied = registry.up(get_database()?).await?;
            tracing::info! {?applied, "Migration finished"};
            Ok(())
        }
        Command::Status => {
            connect(cli.config).await?;
            let registry = migration::registry()?;
            for status in registry.status(get_database()?).await? {
                let state = if status.applied_at.is_some() {
                    "applied"
                } else {
                    "pending"
                };
                println!("{}  {:<7}  {}", status.version, state, status.name);
            }
            Ok(())
        }
    }
}
