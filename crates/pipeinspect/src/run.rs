use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use pipeconfig::{InspectorConfig, OutputFormat};
use pipestate::{Inspector, PipelineSnapshot, ShaderStage, VisibilityConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::InspectArgs;
use crate::paths::AppPaths;
use crate::render;

/// Effective settings after CLI flags are layered over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub visibility: VisibilityConfig,
    pub format: OutputFormat,
    pub stages: Vec<ShaderStage>,
}

impl Settings {
    pub fn merge(config: &InspectorConfig, args: &InspectArgs) -> Self {
        let visibility = VisibilityConfig::new(
            args.show_disabled || config.visibility.show_disabled,
            args.show_empty || config.visibility.show_empty,
        );
        let stages = if args.stages.is_empty() {
            config.stages()
        } else {
            args.stages.clone()
        };
        Self {
            visibility,
            format: args.format.unwrap_or(config.output.format),
            stages,
        }
    }
}

pub fn run(args: InspectArgs) -> Result<()> {
    let paths = AppPaths::discover()?;
    tracing::debug!(config = %paths.config_dir().display(), "resolved pipeinspect paths");

    let config = load_config(args.config.as_deref(), &paths)?;
    let settings = Settings::merge(&config, &args);

    let Some(snapshot_path) = args.snapshot.as_deref() else {
        bail!("no snapshot given; pass a pipeline snapshot JSON file, or `-` to read stdin");
    };
    let snapshot = load_snapshot(snapshot_path)?;
    for issue in snapshot.validate() {
        tracing::warn!(event = snapshot.event_id, %issue, "inconsistent snapshot");
    }

    let mut inspector = Inspector::new();
    inspector.select(snapshot);
    let mut report = inspector.report(settings.visibility)?;
    report.retain_stages(&settings.stages);

    let output = match settings.format {
        OutputFormat::Text => render::render_text(&report)?,
        OutputFormat::Json => render::render_json(&report)?,
    };
    print!("{output}");
    Ok(())
}

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>, paths: &AppPaths) -> Result<InspectorConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = paths.config_file();
            if !default.exists() {
                tracing::debug!(path = %default.display(), "no config file; using defaults");
                return Ok(InspectorConfig::default());
            }
            default
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = InspectorConfig::from_toml_str(&raw)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn load_snapshot(path: &Path) -> Result<PipelineSnapshot> {
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read snapshot from stdin")?;
        raw
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?
    };
    PipelineSnapshot::from_json_str(&raw)
        .with_context(|| format!("failed to decode snapshot {}", path.display()))
}
