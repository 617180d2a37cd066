use crate::cli::AnalysisArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use sitestat::core::io::text;
use sitestat::core::thermo::chemical_potential::solve_chemical_potentials;

pub fn run(args: AnalysisArgs) -> Result<()> {
    let config = build_config(&args)?;
    config.ensure_output_dir()?;

    for system in &config.systems {
        let snapshot = super::load_final_frame(&config, system)?;
        let composition = system
            .analysis
            .concentrations
            .composition(system.num_species())?;

        let chemical_potentials = solve_chemical_potentials(
            composition.species(),
            snapshot.energetics.occupying(),
            composition.concentrations(),
            snapshot.enthalpy_per_atom,
        )?;

        for (element, mu) in system.elements.iter().zip(chemical_potentials.iter()) {
            println!(
                "chemical potential of {} in {} = {:.2}",
                element, system.name, mu
            );
        }

        let output_path = config.output_path(&format!("chemical_potentials_{}.txt", system.name));
        text::write_values_to_path(&output_path, chemical_potentials.as_slice())
            .map_err(|e| CliError::output(&output_path, e))?;
    }

    Ok(())
}
