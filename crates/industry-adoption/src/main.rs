mod bootstrap;
mod runner;

use adoption_core::settings::Settings;
use anyhow::Result;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;
    bootstrap::ensure_output_directories(&settings)?;

    tracing::info!("Industry adoption v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Report: {}, agents: {}, top-n: {}",
        settings.report,
        settings.agents.join(","),
        settings.top_n
    );

    let outcome = runner::run(&settings);

    tracing::info!(
        "Done: {} agents processed, {} skipped, {} files written",
        outcome.loaded.len(),
        outcome.skipped.len(),
        outcome.written.len()
    );

    Ok(())
}
