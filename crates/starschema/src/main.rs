use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use starschema::cli::{Backend, Cli, Commands};
use starschema::config::Config;
use starschema::error::PipelineError;
use starschema::output::{render, OutputFormat, Pretty};
use starschema::pipeline;
use starschema::storage::InMemoryRepository;
use starschema_core::storage::StarSchemaRepository;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let default_filter = if cli.quiet {
        "starschema=warn"
    } else {
        "starschema=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .downcast_ref::<PipelineError>()
                .map_or("internal", PipelineError::kind);
            tracing::error!(kind, error = %err, "starschema failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().with_overrides(cli.database.clone(), cli.command.source());
    tracing::debug!(?config, backend = ?cli.backend, "Loaded configuration");

    match &cli.command {
        Commands::Build(_) => {
            let records = pipeline::load_source(config.source_path.as_deref()).await?;
            let schema = pipeline::build(&records)?;
            emit(&schema, cli.format)
        }
        Commands::Run(_) => {
            let repo = open_repository(cli.backend, &config).await?;
            let records = pipeline::load_source(config.source_path.as_deref()).await?;
            pipeline::run_etl(repo.as_ref(), &records).await?;
            let data = pipeline::read_back(repo.as_ref()).await?;
            emit(&data, cli.format)
        }
        Commands::Load(_) => {
            let repo = open_repository(cli.backend, &config).await?;
            let records = pipeline::load_source(config.source_path.as_deref()).await?;
            pipeline::run_etl(repo.as_ref(), &records).await?;
            let counts = pipeline::count_tables(repo.as_ref()).await?;
            emit(counts.as_slice(), cli.format)
        }
        Commands::Report { table } => {
            let repo = open_repository(cli.backend, &config).await?;
            let rows = pipeline::read_table(repo.as_ref(), *table).await?;
            emit(&rows, cli.format)
        }
    }
}

/// Opens the selected storage backend.
async fn open_repository(
    backend: Backend,
    config: &Config,
) -> Result<Box<dyn StarSchemaRepository>> {
    match backend {
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let repo = starschema::storage::SqliteRepository::new(&config.sqlite_path)
                .await
                .map_err(PipelineError::from)?;
            tracing::info!(path = %config.sqlite_path, "Opened SQLite database");
            Ok(Box::new(repo))
        }
        #[cfg(not(feature = "sqlite"))]
        Backend::Sqlite => {
            let _ = config;
            anyhow::bail!("starschema was built without the `sqlite` feature")
        }
        Backend::Memory => Ok(Box::new(InMemoryRepository::new())),
    }
}

/// Writes a rendered value to stdout.
fn emit<T>(value: &T, format: OutputFormat) -> Result<()>
where
    T: Pretty + serde::Serialize + ?Sized,
{
    let text = render(value, format)?;
    match format {
        OutputFormat::Pretty => print!("{text}"),
        OutputFormat::Json => println!("{text}"),
    }
    Ok(())
}
