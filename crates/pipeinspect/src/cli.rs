use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pipeconfig::OutputFormat;
use pipestate::ShaderStage;

#[derive(Parser, Debug)]
#[command(
    name = "pipeinspect",
    author,
    version,
    about = "Print the resolved pipeline state of a captured GPU event"
)]
pub struct Cli {
    #[command(flatten)]
    pub inspect: InspectArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug, Default)]
pub struct InspectArgs {
    /// Pipeline snapshot as JSON; `-` reads it from stdin.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Configuration file to use instead of `config.toml` in the config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also list bindings that are bound but not referenced by the shader.
    #[arg(long)]
    pub show_disabled: bool,

    /// Also list slots with nothing bound.
    #[arg(long)]
    pub show_empty: bool,

    /// Only print the given shader stage; repeat for several (`vs`, `fs`, ...).
    #[arg(long = "stage", value_name = "STAGE", value_parser = parse_stage)]
    pub stages: Vec<ShaderStage>,

    /// Output format: `text` or `json`.
    #[arg(long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration directory and file.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_stage(value: &str) -> Result<ShaderStage, String> {
    if value.trim().is_empty() {
        return Err("stage must not be empty".to_string());
    }
    value.parse()
}

pub fn parse_format(value: &str) -> Result<OutputFormat, String> {
    if value.trim().is_empty() {
        return Err("output format must not be empty".to_string());
    }
    value.parse()
}
