use super::vacancy;
use crate::core::io::dataset::DatasetLayout;
use crate::core::io::report::SweepRecord;
use crate::core::thermo::units::temperature_to_beta;
use crate::engine::config::{AnalysisConfig, ConfigError};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

/// Evaluates the vacancy characteristics of every frame in `steps` at the
/// sweep temperatures of `config`.
///
/// Records are ordered by frame, then by temperature. Frames are independent:
/// each gets its own chemical potentials from its own enthalpy per atom.
///
/// # Errors
///
/// Fails on the first frame that cannot be loaded or solved. Solver failures
/// are reported as [`EngineError::Frame`] naming the system and step.
#[instrument(skip_all, name = "frame_sweep", fields(system = system, num_frames = steps.len()))]
pub fn run(
    layout: &DatasetLayout,
    system: &str,
    num_species: usize,
    steps: &[u64],
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<SweepRecord>, EngineError> {
    if config.sweep_temperatures.is_empty() {
        return Err(ConfigError::MissingParameter("sweep_temperatures").into());
    }
    let betas: Vec<f64> = config
        .sweep_temperatures
        .iter()
        .map(|&t| temperature_to_beta(t))
        .collect();
    let composition = config.concentrations.composition(num_species)?;

    info!(
        num_temperatures = betas.len(),
        "Sweeping frames of system '{}'.", system
    );
    reporter.report(Progress::SystemStart {
        system: system.to_string(),
        total_frames: steps.len() as u64,
    });

    let mut records = Vec::with_capacity(steps.len() * betas.len());
    for &step in steps {
        let snapshot = layout.load_snapshot(system, step, num_species)?;
        let (_, calculator) =
            vacancy::prepare(&snapshot, &composition).map_err(|e| EngineError::Frame {
                system: system.to_string(),
                step,
                reason: e.to_string(),
            })?;

        for (&temperature, &beta) in config.sweep_temperatures.iter().zip(&betas) {
            records.push(SweepRecord {
                step,
                temperature,
                beta,
                concentration: calculator.concentration(beta),
                formation_energy: calculator.formation_energy(beta),
                formation_volume: calculator.formation_volume(beta),
            });
        }

        debug!(step, "Frame done.");
        reporter.report(Progress::FrameFinish { step });
    }

    reporter.report(Progress::SystemFinish);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::dataset::{DatasetError, QuantityKind};
    use crate::engine::config::{AnalysisConfigBuilder, BetaGrid};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    const SYSTEM: &str = "NiCo";

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_frame(layout: &DatasetLayout, step: u64, enthalpy: f64) {
        let e = QuantityKind::Energetics;
        let v = QuantityKind::Volumetrics;
        write(layout.vacant_path(e, SYSTEM, step), "0 0 0 0");
        write(layout.occupying_path(e, SYSTEM, 1, step), "1 1 1 1");
        write(layout.occupying_path(e, SYSTEM, 2, step), "2 2 2 2");
        write(layout.enthalpy_path(SYSTEM, step), &enthalpy.to_string());
        write(layout.vacant_path(v, SYSTEM, step), "100 100 100 100");
        write(layout.occupying_path(v, SYSTEM, 1, step), "90 90 90 90");
        write(layout.occupying_path(v, SYSTEM, 2, step), "95 95 95 95");
    }

    fn layout_with_frames(frames: &[(u64, f64)]) -> (TempDir, DatasetLayout) {
        let dir = tempfile::tempdir().unwrap();
        let layout = DatasetLayout::new(
            dir.path().join("energetics_data"),
            dir.path().join("volumetrics_data"),
        );
        for &(step, enthalpy) in frames {
            write_frame(&layout, step, enthalpy);
        }
        (dir, layout)
    }

    fn config(temperatures: Vec<f64>) -> AnalysisConfig {
        AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Values(vec![1.0]))
            .sweep_temperatures(temperatures)
            .build()
            .unwrap()
    }

    #[test]
    fn records_are_ordered_by_frame_then_temperature() {
        let (_dir, layout) = layout_with_frames(&[(0, 1.5), (1000, 1.5)]);
        let records = run(
            &layout,
            SYSTEM,
            2,
            &[0, 1000],
            &config(vec![300.0, 900.0]),
            &ProgressReporter::new(),
        )
        .unwrap();

        let keys: Vec<(u64, f64)> = records.iter().map(|r| (r.step, r.temperature)).collect();
        assert_eq!(
            keys,
            vec![(0, 300.0), (0, 900.0), (1000, 300.0), (1000, 900.0)]
        );
        for record in &records {
            assert!((record.beta - temperature_to_beta(record.temperature)).abs() < 1e-12);
            // Chemical potentials 1 and 2 cancel the occupying energies.
            assert!((record.concentration - 1.0 / 3.0).abs() < 1e-9);
            assert!(record.formation_energy.abs() < 1e-9);
            assert!((record.formation_volume - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn frames_use_their_own_enthalpy() {
        let (_dir, layout) = layout_with_frames(&[(0, 1.5), (10, 1.0)]);
        let records = run(
            &layout,
            SYSTEM,
            2,
            &[0, 10],
            &config(vec![1200.0]),
            &ProgressReporter::new(),
        )
        .unwrap();
        // A lower enthalpy shifts both potentials down, stabilising the vacancy.
        assert!(records[1].concentration > records[0].concentration);
    }

    #[test]
    fn progress_events_bracket_each_system() {
        let (_dir, layout) = layout_with_frames(&[(5, 1.5), (6, 1.5)]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        run(&layout, SYSTEM, 2, &[5, 6], &config(vec![500.0]), &reporter).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                Progress::SystemStart {
                    system: SYSTEM.to_string(),
                    total_frames: 2,
                },
                Progress::FrameFinish { step: 5 },
                Progress::FrameFinish { step: 6 },
                Progress::SystemFinish,
            ]
        );
    }

    #[test]
    fn missing_frame_is_a_dataset_error() {
        let (_dir, layout) = layout_with_frames(&[(0, 1.5)]);
        let result = run(
            &layout,
            SYSTEM,
            2,
            &[0, 7],
            &config(vec![500.0]),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::Dataset {
                source: DatasetError::File { .. }
            })
        ));
    }

    #[test]
    fn sweep_requires_temperatures() {
        let (_dir, layout) = layout_with_frames(&[(0, 1.5)]);
        let result = run(
            &layout,
            SYSTEM,
            2,
            &[0],
            &config(Vec::new()),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::Config {
                source: ConfigError::MissingParameter("sweep_temperatures")
            })
        ));
    }
}
