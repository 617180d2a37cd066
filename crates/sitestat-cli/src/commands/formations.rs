use crate::cli::AnalysisArgs;
use crate::config::build_config;
use crate::error::Result;
use sitestat::workflows::vacancy;
use tracing::info;

pub fn run(args: AnalysisArgs) -> Result<()> {
    let config = build_config(&args)?;
    config.ensure_output_dir()?;

    for system in &config.systems {
        let snapshot = super::load_final_frame(&config, system)?;

        info!(system = %system.name, "Invoking the vacancy characteristics workflow...");
        let characteristics = vacancy::run(&snapshot, &system.analysis)?;

        let output_path = config.output_path(&format!("{}_formations.csv", system.name));
        super::write_csv(&output_path, characteristics.records())?;
        println!(
            "Formation curves of {} ({} points) written to: {}",
            system.name,
            characteristics.betas.len(),
            output_path.display()
        );
    }

    Ok(())
}
