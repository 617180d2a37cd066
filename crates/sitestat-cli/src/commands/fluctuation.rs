use crate::cli::AnalysisArgs;
use crate::config::build_config;
use crate::error::Result;
use sitestat::core::io::report::FluctuationRecord;
use sitestat::core::thermo::fluctuation::occupation_fluctuations;
use sitestat::core::thermo::units::beta_to_temperature;
use sitestat::workflows::vacancy;

pub fn run(args: AnalysisArgs) -> Result<()> {
    let config = build_config(&args)?;
    config.ensure_output_dir()?;

    for system in &config.systems {
        let snapshot = super::load_final_frame(&config, system)?;
        let composition = system
            .analysis
            .concentrations
            .composition(system.num_species())?;
        let (chemical_potentials, _) = vacancy::prepare(&snapshot, &composition)?;

        let betas = system.analysis.beta_grid.betas();
        let fluctuations = occupation_fluctuations(&betas, &chemical_potentials);
        let records = betas
            .iter()
            .zip(fluctuations)
            .map(|(&beta, fluctuation)| FluctuationRecord {
                beta,
                temperature: beta_to_temperature(beta),
                fluctuation,
            });

        let output_path = config.output_path(&format!("{}_fluctuation.csv", system.name));
        super::write_csv(&output_path, records)?;
        println!(
            "Occupation fluctuation of {} written to: {}",
            system.name,
            output_path.display()
        );
    }

    Ok(())
}
