use super::defaults::DefaultsConfig;
use super::file::{FileBetaGrid, FileConfig, FileTypeMap};
use super::models::{AppConfig, SystemConfig};
use crate::cli::{AnalysisArgs, BetaGridArgs, SweepArgs};
use crate::error::{CliError, Result};
use sitestat::core::io::dataset::DatasetLayout;
use sitestat::engine::config::{AnalysisConfigBuilder, BetaGrid, ConcentrationSpec};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, info};

/// Loads the configuration file named by `args` and merges it with the CLI
/// overrides.
pub fn build_config(args: &AnalysisArgs) -> Result<AppConfig> {
    let file_config = FileConfig::from_file(&args.config)?;
    merge(file_config, args)
}

/// Like [`build_config`], additionally applying the sweep overrides and
/// requiring at least one step and one temperature.
pub fn build_sweep_config(args: &SweepArgs) -> Result<AppConfig> {
    let mut file_config = FileConfig::from_file(&args.analysis.config)?;
    if !args.steps.is_empty() {
        file_config.steps = Some(args.steps.clone());
    }
    if !args.temperatures.is_empty() {
        file_config
            .sweep
            .get_or_insert_with(Default::default)
            .temperatures = Some(args.temperatures.clone());
    }

    let config = merge(file_config, &args.analysis)?;
    if config.steps.is_empty() {
        return Err(CliError::Config(
            "`steps` is required for a sweep, either in the config file or via --steps."
                .to_string(),
        ));
    }
    if let Some(system) = config
        .systems
        .iter()
        .find(|s| s.analysis.sweep_temperatures.is_empty())
    {
        return Err(CliError::Config(format!(
            "`sweep.temperatures` is required for a sweep (system '{}').",
            system.name
        )));
    }
    Ok(config)
}

/// Checks the cross-references of a configuration file: every listed system
/// has a type map labelled `1..=N` with non-empty element names, and explicit
/// concentrations exist only for listed systems and cover every species.
pub fn validate_file_config(config: &FileConfig) -> Result<()> {
    if config.systems.is_empty() {
        return Err(CliError::Config(
            "`systems` must list at least one system.".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for system in &config.systems {
        if !seen.insert(system.as_str()) {
            return Err(CliError::Config(format!(
                "System '{}' is listed more than once.",
                system
            )));
        }
    }

    for system in &config.systems {
        let type_map = config.type_maps.get(system).ok_or_else(|| {
            CliError::Config(format!("System '{}' has no entry in `type-maps`.", system))
        })?;
        element_list(system, type_map)?;
    }

    if let Some(extra) = config.type_maps.keys().find(|k| !seen.contains(k.as_str())) {
        return Err(CliError::Config(format!(
            "`type-maps` has an entry for '{}', which is not in `systems`.",
            extra
        )));
    }

    for (system, values) in &config.concentrations {
        let Some(type_map) = config
            .type_maps
            .get(system)
            .filter(|_| seen.contains(system.as_str()))
        else {
            return Err(CliError::Config(format!(
                "`concentrations` has an entry for '{}', which is not in `systems`.",
                system
            )));
        };
        if values.len() != type_map.len() {
            return Err(CliError::Config(format!(
                "`concentrations.{}` has {} values but the system has {} species.",
                system,
                values.len(),
                type_map.len()
            )));
        }
    }

    Ok(())
}

fn merge(mut file_config: FileConfig, args: &AnalysisArgs) -> Result<AppConfig> {
    apply_set_values(&mut file_config, &args.set_values)?;
    validate_file_config(&file_config)?;

    let defaults = DefaultsConfig::default();
    let data = file_config.data.take().unwrap_or_default();

    let final_step = args.step.or(file_config.final_step).ok_or_else(|| {
        CliError::Config(
            "`final-step` is required either in the config file or via --step.".to_string(),
        )
    })?;

    let beta_grid = resolve_beta_grid(file_config.beta_grid.take(), args.beta_grid, &defaults);
    let sweep_temperatures = file_config
        .sweep
        .take()
        .and_then(|s| s.temperatures)
        .unwrap_or_default();

    let mut systems = Vec::with_capacity(file_config.systems.len());
    for name in &file_config.systems {
        let type_map = file_config.type_maps.get(name).ok_or_else(|| {
            CliError::Config(format!("System '{}' has no entry in `type-maps`.", name))
        })?;
        let elements = element_list(name, type_map)?;
        let concentrations = file_config
            .concentrations
            .get(name)
            .map(|values| ConcentrationSpec::Explicit(values.clone()))
            .unwrap_or_default();

        let mut builder = AnalysisConfigBuilder::new()
            .beta_grid(beta_grid.clone())
            .concentrations(concentrations);
        if !sweep_temperatures.is_empty() {
            builder = builder.sweep_temperatures(sweep_temperatures.clone());
        }
        let analysis = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        debug!(system = %name, num_species = elements.len(), "Resolved system configuration.");
        systems.push(SystemConfig {
            name: name.clone(),
            elements,
            analysis,
        });
    }

    let layout = DatasetLayout::new(
        data.energetics_dir.unwrap_or(defaults.energetics_dir),
        data.volumetrics_dir.unwrap_or(defaults.volumetrics_dir),
    );
    let output_dir = args
        .output_dir
        .clone()
        .or(data.output_dir)
        .unwrap_or(defaults.output_dir);

    info!(
        num_systems = systems.len(),
        final_step,
        "Configuration loaded from {:?}.",
        args.config
    );

    Ok(AppConfig {
        systems,
        final_step,
        steps: file_config.steps.unwrap_or_default(),
        layout,
        output_dir,
    })
}

fn resolve_beta_grid(
    file_grid: Option<FileBetaGrid>,
    cli: BetaGridArgs,
    defaults: &DefaultsConfig,
) -> BetaGrid {
    let linear = |start: Option<f64>, stop: Option<f64>, num: Option<usize>| BetaGrid::Linear {
        start: cli.beta_start.or(start).unwrap_or(defaults.beta_start),
        stop: cli.beta_stop.or(stop).unwrap_or(defaults.beta_stop),
        num: cli.beta_num.or(num).unwrap_or(defaults.beta_num),
    };

    match file_grid.unwrap_or_default() {
        FileBetaGrid::Linear { start, stop, num } => linear(start, stop, num),
        _ if cli.is_set() => linear(None, None, None),
        FileBetaGrid::Temperatures { values } => BetaGrid::Temperatures(values),
        FileBetaGrid::Values { values } => BetaGrid::Values(values),
    }
}

/// Element names of a type map in label order.
fn element_list(system: &str, type_map: &FileTypeMap) -> Result<Vec<String>> {
    let mut labelled = Vec::with_capacity(type_map.len());
    for (label, element) in type_map {
        let index = label.parse::<usize>().map_err(|_| {
            CliError::Config(format!(
                "Type label '{}' of system '{}' is not a positive integer.",
                label, system
            ))
        })?;
        if element.trim().is_empty() {
            return Err(CliError::Config(format!(
                "Type {} of system '{}' has an empty element name.",
                label, system
            )));
        }
        labelled.push((index, element.clone()));
    }
    labelled.sort_by_key(|(index, _)| *index);

    let contiguous = labelled
        .iter()
        .enumerate()
        .all(|(i, (index, _))| *index == i + 1);
    if labelled.is_empty() || !contiguous {
        return Err(CliError::Config(format!(
            "Type labels of system '{}' must be exactly 1..={}.",
            system,
            type_map.len().max(1)
        )));
    }

    Ok(labelled.into_iter().map(|(_, element)| element).collect())
}

fn apply_set_values(config: &mut FileConfig, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "final-step" => config.final_step = Some(parse_value(key, value_str)?),
            "data.energetics-dir" => {
                config.data.get_or_insert_with(Default::default).energetics_dir =
                    Some(value_str.into())
            }
            "data.volumetrics-dir" => {
                config.data.get_or_insert_with(Default::default).volumetrics_dir =
                    Some(value_str.into())
            }
            "data.output-dir" => {
                config.data.get_or_insert_with(Default::default).output_dir =
                    Some(value_str.into())
            }
            "beta-grid.start" | "beta-grid.stop" | "beta-grid.num" => {
                let grid = config.beta_grid.get_or_insert_with(Default::default);
                if !matches!(grid, FileBetaGrid::Linear { .. }) {
                    *grid = FileBetaGrid::default();
                }
                if let FileBetaGrid::Linear { start, stop, num } = grid {
                    match key {
                        "beta-grid.start" => *start = Some(parse_value(key, value_str)?),
                        "beta-grid.stop" => *stop = Some(parse_value(key, value_str)?),
                        _ => *num = Some(parse_value(key, value_str)?),
                    }
                }
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value))
    })
}
