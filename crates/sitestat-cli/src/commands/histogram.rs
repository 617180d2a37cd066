use crate::cli::HistogramArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use nalgebra::DMatrix;
use sitestat::core::io::report::HistogramRecord;
use sitestat::core::thermo::summary::{species_histograms, summarize_species};
use sitestat::workflows::vacancy;
use tracing::info;

pub fn run(args: HistogramArgs) -> Result<()> {
    if args.bins == 0 {
        return Err(CliError::Argument("--bins must be at least 1".to_string()));
    }
    let config = build_config(&args.analysis)?;
    config.ensure_output_dir()?;

    for system in &config.systems {
        let snapshot = super::load_final_frame(&config, system)?;
        let composition = system
            .analysis
            .concentrations
            .composition(system.num_species())?;
        let (_, calculator) = vacancy::prepare(&snapshot, &composition)?;

        let mut records = Vec::new();
        for (quantity, formation) in [
            ("formation_energy", calculator.energetics()),
            ("formation_volume", calculator.volumetrics()),
        ] {
            print_summaries(&system.name, &system.elements, quantity, formation);
            records.extend(histogram_records(&system.elements, quantity, formation, args.bins));
        }

        let output_path = config.output_path(&format!("{}_histograms.csv", system.name));
        super::write_csv(&output_path, records)?;
        println!(
            "Histograms of {} written to: {}",
            system.name,
            output_path.display()
        );
    }

    Ok(())
}

fn print_summaries(system: &str, elements: &[String], quantity: &str, formation: &DMatrix<f64>) {
    for (element, summary) in elements.iter().zip(summarize_species(formation)) {
        info!(system, element = %element, quantity, ?summary, "Local formation statistics.");
        println!(
            "{} {} of {}: mean {:.4}, std {:.4}, range [{:.4}, {:.4}]",
            system, quantity, element, summary.mean, summary.std_dev, summary.min, summary.max
        );
    }
}

fn histogram_records(
    elements: &[String],
    quantity: &'static str,
    formation: &DMatrix<f64>,
    bins: usize,
) -> Vec<HistogramRecord> {
    elements
        .iter()
        .zip(species_histograms(formation, bins))
        .flat_map(|(element, histogram)| {
            histogram
                .counts
                .iter()
                .enumerate()
                .map(|(bin, &count)| HistogramRecord {
                    species: element.clone(),
                    quantity,
                    bin_start: histogram.edges[bin],
                    bin_end: histogram.edges[bin + 1],
                    count,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_cover_every_bin_of_every_species() {
        let formation = DMatrix::from_row_slice(2, 4, &[0.0, 1.0, 2.0, 3.0, 5.0, 5.0, 5.0, 5.0]);
        let elements = vec!["Fe".to_string(), "Al".to_string()];
        let records = histogram_records(&elements, "formation_volume", &formation, 3);

        assert_eq!(records.len(), 6);
        assert!(records[..3].iter().all(|r| r.species == "Fe"));
        assert!(records[3..].iter().all(|r| r.species == "Al"));
        assert_eq!(records.iter().map(|r| r.count).sum::<usize>(), 8);
        assert_eq!(records[0].bin_start, 0.0);
        assert_eq!(records[2].bin_end, 3.0);
        assert_eq!(records[3].bin_start, 4.5);
        assert_eq!(records[5].bin_end, 5.5);
    }
}
