use crate::core::io::report::CurveRecord;
use crate::core::models::composition::Composition;
use crate::core::models::site::SiteSnapshot;
use crate::core::thermo::averaging::FormationCalculator;
use crate::core::thermo::chemical_potential::solve_chemical_potentials;
use crate::core::thermo::error::ThermoError;
use crate::core::thermo::units::beta_to_temperature;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use nalgebra::DVector;
use tracing::{debug, info, instrument};

/// Vacancy thermodynamics of one frame on a beta grid.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyCharacteristics {
    pub betas: Vec<f64>,
    /// Indexed by species index.
    pub chemical_potentials: DVector<f64>,
    pub concentration: Vec<f64>,
    pub formation_energy: Vec<f64>,
    pub formation_volume: Vec<f64>,
    /// Holds the formation energy and volume arrays the curves were computed from.
    pub calculator: FormationCalculator,
}

impl VacancyCharacteristics {
    /// One record per beta; stops at the shortest curve if lengths differ.
    pub fn records(&self) -> Vec<CurveRecord> {
        self.betas
            .iter()
            .zip(&self.concentration)
            .zip(&self.formation_energy)
            .zip(&self.formation_volume)
            .map(
                |(((&beta, &concentration), &formation_energy), &formation_volume)| CurveRecord {
                    beta,
                    temperature: beta_to_temperature(beta),
                    concentration,
                    formation_energy,
                    formation_volume,
                },
            )
            .collect()
    }
}

/// Solves the chemical potentials of a frame and builds its formation arrays.
///
/// The energy formation array carries the chemical potential of each row's
/// species; the volume formation array carries no correction.
pub fn prepare(
    snapshot: &SiteSnapshot,
    composition: &Composition,
) -> Result<(DVector<f64>, FormationCalculator), ThermoError> {
    let chemical_potentials = solve_chemical_potentials(
        composition.species(),
        snapshot.energetics.occupying(),
        composition.concentrations(),
        snapshot.enthalpy_per_atom,
    )?;

    let row_potentials = DVector::from_iterator(
        composition.len(),
        composition
            .species()
            .iter()
            .map(|&species| chemical_potentials[species]),
    );

    let energetics = snapshot.energetics.formation_array(Some(&row_potentials))?;
    let volumetrics = snapshot.volumetrics.formation_array(None)?;
    let calculator = FormationCalculator::new(energetics, volumetrics)?;

    Ok((chemical_potentials, calculator))
}

/// Computes the vacancy concentration, formation energy and formation volume of
/// a frame at every beta in `betas`.
#[instrument(skip_all, name = "vacancy_characteristics", fields(num_betas = betas.len()))]
pub fn characterize(
    snapshot: &SiteSnapshot,
    composition: &Composition,
    betas: &[f64],
) -> Result<VacancyCharacteristics, EngineError> {
    debug!(
        num_species = snapshot.num_species(),
        num_sites = snapshot.num_sites(),
        "Characterizing frame."
    );

    let (chemical_potentials, calculator) = prepare(snapshot, composition)?;
    debug!(?chemical_potentials, "Solved chemical potentials.");

    let concentration = calculator.concentrations(betas);
    let formation_energy = calculator.formation_energies(betas);
    let formation_volume = calculator.formation_volumes(betas);

    Ok(VacancyCharacteristics {
        betas: betas.to_vec(),
        chemical_potentials,
        concentration,
        formation_energy,
        formation_volume,
        calculator,
    })
}

/// Runs [`characterize`] with the composition and beta grid of `config`.
pub fn run(
    snapshot: &SiteSnapshot,
    config: &AnalysisConfig,
) -> Result<VacancyCharacteristics, EngineError> {
    let composition = config
        .concentrations
        .composition(snapshot.num_species())?;
    let betas = config.beta_grid.betas();
    info!(
        num_species = snapshot.num_species(),
        num_sites = snapshot.num_sites(),
        num_betas = betas.len(),
        "Evaluating vacancy characteristics."
    );
    characterize(snapshot, &composition, &betas)
}
