use crate::config::{AppConfig, SystemConfig};
use crate::error::{CliError, Result};
use serde::Serialize;
use sitestat::core::io::report;
use sitestat::core::models::site::SiteSnapshot;
use std::path::Path;
use tracing::{debug, info};

pub mod fluctuation;
pub mod formations;
pub mod histogram;
pub mod potentials;
pub mod sweep;
pub mod validate;

/// Loads the frame of `system` at `final-step`.
fn load_final_frame(config: &AppConfig, system: &SystemConfig) -> Result<SiteSnapshot> {
    info!(
        system = %system.name,
        step = config.final_step,
        "Loading frame."
    );
    let snapshot =
        config
            .layout
            .load_snapshot(&system.name, config.final_step, system.num_species())?;
    debug!(
        num_species = snapshot.num_species(),
        num_sites = snapshot.num_sites(),
        "Frame loaded."
    );
    Ok(snapshot)
}

fn write_csv<R, I>(path: &Path, records: I) -> Result<()>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    report::write_records_to_path(path, records).map_err(|e| CliError::output(path, e))?;
    info!("Wrote {:?}.", path);
    Ok(())
}
