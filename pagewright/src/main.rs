use std::fs;

use color_eyre::eyre::{Context, Result, bail, eyre};
use log::{LevelFilter, info};
use pagewright::{
  cli::{Cli, Commands},
  config::Config,
  tasks,
};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    // Check if file already exists and that we're not forcing overwrite
    if output.exists() && !force {
      bail!(
        "Configuration file already exists: {}. Use --force to overwrite.",
        output.display()
      );
    }

    // Create parent directories if needed
    if let Some(parent) = output.parent()
      && !parent.as_os_str().is_empty()
      && !parent.exists()
    {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }

    // Config helpers report through anyhow; keep the whole chain
    Config::generate_default_config(format, output)
      .map_err(|e| eyre!("{e:#}"))
      .wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;

    info!(
      "Configuration file created successfully. Edit it to customize your \
       build."
    );
    return Ok(());
  }

  // Create configuration from CLI and/or config file
  let config = Config::load(&cli).map_err(|e| eyre!("{e:#}"))?;

  match cli.command {
    Commands::Pages(_) => {
      tasks::build_pages(&config)?;
    },
    Commands::Resources(_) => {
      tasks::build_resources(&config)?;
    },
    Commands::Build(_) => {
      tasks::build_pages(&config)?;
      tasks::build_resources(&config)?;
    },
    Commands::Init { .. } => {},
  }

  Ok(())
}
