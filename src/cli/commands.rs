//! Command handlers: resolve settings from config and flags, assemble the
//! registry, and invoke the pipeline.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};

use super::args::{CommonArgs, GraphCommand, ListCommand};
use crate::{
    config::{CONFIG_FILE_NAME, default_config_json, load_config},
    context::BuildContext,
    definitions,
    pipeline::{self, FailureRecord},
    registry::{Registry, ScanOptions},
};

pub struct CommandResult {
    pub summary: CommandSummary,
}

pub enum CommandSummary {
    Graph(GraphSummary),
    List(ListSummary),
    Init(InitSummary),
}

pub struct GraphSummary {
    pub output: PathBuf,
    pub edge_count: usize,
    pub modules_built: usize,
    pub units_scanned: usize,
    pub failures: Vec<FailureRecord>,
}

pub struct ListSummary {
    pub units: Vec<UnitListing>,
}

pub struct UnitListing {
    pub name: String,
    pub status: UnitStatus,
}

pub enum UnitStatus {
    Skipped,
    Loaded { descriptors: Vec<String> },
    Error { reason: String },
}

pub struct InitSummary {
    pub created: bool,
}

/// Effective settings after merging the config file with command flags.
struct Settings {
    definitions_root: PathBuf,
    output: PathBuf,
    context: BuildContext,
    scan: ScanOptions,
}

impl Settings {
    fn resolve(common: &CommonArgs, output: Option<&Path>) -> Result<Self> {
        let start_dir = env::current_dir()?;
        let loaded = load_config(&start_dir)?;
        if common.verbose {
            if loaded.from_file {
                eprintln!("Using configuration from {}", CONFIG_FILE_NAME);
            } else {
                eprintln!("No {} found, using defaults", CONFIG_FILE_NAME);
            }
        }
        let config = loaded.config;

        let definitions_root = common
            .definitions_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.definitions_root));
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&config.output));

        let mut context = config.context;
        if let Some(target) = &common.target {
            context.target = target.clone();
        }
        if let Some(platform) = &common.platform {
            context.platform = platform.clone();
        }
        if let Some(configuration) = &common.configuration {
            context.configuration = configuration.clone();
        }

        let mut scan = ScanOptions {
            skip_prefixes: config.skip_units,
            exclude: common.exclude_module.clone().or(config.exclude_module),
        };
        scan.skip_prefixes.extend(common.skip_unit.iter().cloned());

        Ok(Self {
            definitions_root,
            output,
            context,
            scan,
        })
    }
}

fn build_registry(definitions_root: &Path) -> Result<Registry> {
    if !definitions_root.is_dir() {
        bail!(
            "Definitions directory '{}' not found.\n\
             Hint: create it, set 'definitionsRoot' in {}, or pass --definitions-root.",
            definitions_root.display(),
            CONFIG_FILE_NAME
        );
    }

    let mut registry = Registry::new();
    for unit in definitions::load_units(definitions_root)? {
        registry.register(Box::new(unit));
    }
    Ok(registry)
}

pub fn graph(cmd: GraphCommand) -> Result<CommandResult> {
    let settings = Settings::resolve(&cmd.common, cmd.output.as_deref())?;
    let registry = build_registry(&settings.definitions_root)?;

    if cmd.common.verbose {
        eprintln!(
            "Scanning {} unit(s) under {}",
            registry.units().count(),
            settings.definitions_root.display()
        );
    }

    let report = pipeline::run(&registry, &settings.context, &settings.scan, &settings.output)?;

    Ok(CommandResult {
        summary: CommandSummary::Graph(GraphSummary {
            output: settings.output,
            edge_count: report.edges.len(),
            modules_built: report.descriptors_built,
            units_scanned: report.units_scanned,
            failures: report.failures,
        }),
    })
}

pub fn list(cmd: ListCommand) -> Result<CommandResult> {
    let settings = Settings::resolve(&cmd.common, None)?;
    let registry = build_registry(&settings.definitions_root)?;

    let mut units = Vec::new();
    for unit in registry.units() {
        let name = unit.name().to_string();
        if settings.scan.skips(&name) {
            units.push(UnitListing {
                name,
                status: UnitStatus::Skipped,
            });
            continue;
        }
        let status = match unit.providers() {
            Ok(providers) => UnitStatus::Loaded {
                descriptors: providers.iter().map(|p| p.name().to_string()).collect(),
            },
            Err(err) => UnitStatus::Error {
                reason: format!("{err:#}"),
            },
        };
        units.push(UnitListing { name, status });
    }

    Ok(CommandResult {
        summary: CommandSummary::List(ListSummary { units }),
    })
}

pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary { created: true }),
    })
}
