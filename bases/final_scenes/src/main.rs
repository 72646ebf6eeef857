// bases/final_scenes/src/main.rs
use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use film_catalog::Catalog;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod middleware;
mod server;

/// Used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "final_scenes=info,film_catalog=info";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = config::CliArgs::parse();
    let config = config::Config::from_args(args);

    let catalog = Catalog::load(&config.catalog_path).wrap_err_with(|| {
        format!(
            "failed to initialise film catalog from {}",
            config.catalog_path.display()
        )
    })?;
    if catalog.is_empty() {
        tracing::warn!("Catalog {} has no films", config.catalog_path.display());
    }
    if !config.static_dir.is_dir() {
        tracing::warn!(
            "Static directory {} does not exist, /static will 404",
            config.static_dir.display()
        );
    }

    server::run(catalog, config).await?;

    Ok(())
}
