mod bootstrap;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use eda_core::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::ensure_directories(&settings.out_dir)?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("news-eda v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "News: {}, prices: {}, output: {}",
        settings.news.display(),
        settings.data_dir.display(),
        settings.out_dir.display()
    );

    pipeline::run(&settings)
}
