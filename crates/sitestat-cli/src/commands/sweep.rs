use crate::cli::SweepArgs;
use crate::config::build_sweep_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use sitestat::engine::progress::ProgressReporter;
use sitestat::workflows::sweep;
use tracing::info;

pub fn run(args: SweepArgs) -> Result<()> {
    let config = build_sweep_config(&args)?;
    config.ensure_output_dir()?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    for system in &config.systems {
        info!(
            system = %system.name,
            num_frames = config.steps.len(),
            "Invoking the frame sweep workflow..."
        );
        let records = sweep::run(
            &config.layout,
            &system.name,
            system.num_species(),
            &config.steps,
            &system.analysis,
            &reporter,
        )?;

        let output_path = config.output_path(&format!("{}_sweep.csv", system.name));
        super::write_csv(&output_path, records)?;
        println!(
            "Sweep of {} ({} frames) written to: {}",
            system.name,
            config.steps.len(),
            output_path.display()
        );
    }

    Ok(())
}
