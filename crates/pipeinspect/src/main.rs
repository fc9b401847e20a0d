mod cli;
mod paths;
mod render;
mod run;

use anyhow::Result;
use cli::Command;
use paths::AppPaths;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Where) => run_where(),
        None => run::run(cli.inspect),
    }
}

fn run_where() -> Result<()> {
    let paths = AppPaths::discover()?;
    let config_file = paths.config_file();
    println!("Configuration:");
    println!("  config dir:  {}", paths.config_dir().display());
    println!(
        "  config file: {}{}",
        config_file.display(),
        if config_file.exists() { "" } else { " (not present)" }
    );
    Ok(())
}
