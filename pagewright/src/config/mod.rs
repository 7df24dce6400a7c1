pub mod templates;

use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{BuildArgs, Cli, Commands};

/// Config file names looked up in the current directory, in order.
const CONFIG_FILENAMES: [&str; 3] =
  ["pagewright.toml", "pagewright.json", ".pagewright.toml"];

fn default_source_dir() -> PathBuf {
  PathBuf::from("pages")
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("dist/wordpress")
}

fn default_partials_dir() -> PathBuf {
  PathBuf::from(".")
}

const fn default_true() -> bool {
  true
}

/// Configuration options for pagewright
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Directory containing the page sources
  #[serde(default = "default_source_dir")]
  pub source_dir: PathBuf,

  /// Directory whose files are published as resources
  #[serde(default)]
  pub resources_dir: Option<PathBuf>,

  /// Root of the published output
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Base directory for `@partial(...)` paths
  #[serde(default = "default_partials_dir")]
  pub partials_dir: PathBuf,

  /// Whether to syntax highlight code blocks
  #[serde(default = "default_true")]
  pub highlight: bool,

  /// Custom template for highlighted code blocks
  #[serde(default)]
  pub code_template: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_dir:    default_source_dir(),
      resources_dir: None,
      output_dir:    default_output_dir(),
      partials_dir:  default_partials_dir(),
      highlight:     true,
      code_template: None,
    }
  }
}

impl Config {
  /// Create a new configuration from a file
  /// Only TOML and JSON are supported for the time being.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).with_context(|| {
      format!("Failed to read config file: {}", path.display())
    })?;

    path.extension().map_or_else(
      || {
        Err(anyhow::anyhow!(
          "Config file has no extension: {}",
          path.display()
        ))
      },
      |ext| {
        match ext.to_str().unwrap_or("").to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content).with_context(|| {
              format!("Failed to parse JSON config from {}", path.display())
            })
          },
          "toml" => {
            toml::from_str(&content).with_context(|| {
              format!("Failed to parse TOML config from {}", path.display())
            })
          },
          _ => {
            Err(anyhow::anyhow!(
              "Unsupported config file format: {}",
              path.display()
            ))
          },
        }
      },
    )
  }

  /// Load config from file and CLI arguments
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path).with_context(|| {
        format!("Failed to load config from {}", config_path.display())
      })?
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config).with_context(|| {
        format!(
          "Failed to load discovered config from {}",
          discovered_config.display()
        )
      })?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);

    let needs_sources =
      matches!(cli.command, Commands::Pages(_) | Commands::Build(_));
    config.validate_paths(needs_sources)?;

    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    let Some(args) = cli.command.build_args() else {
      return;
    };

    let BuildArgs {
      source_dir,
      resources_dir,
      output_dir,
      partials_dir,
      code_template,
      no_highlight,
    } = args;

    if let Some(source_dir) = source_dir {
      self.source_dir.clone_from(source_dir);
    }

    if let Some(resources_dir) = resources_dir {
      self.resources_dir = Some(resources_dir.clone());
    }

    if let Some(output_dir) = output_dir {
      self.output_dir.clone_from(output_dir);
    }

    if let Some(partials_dir) = partials_dir {
      self.partials_dir.clone_from(partials_dir);
    }

    if let Some(code_template) = code_template {
      self.code_template = Some(code_template.clone());
    }

    // The flag can only turn highlighting off
    if *no_highlight {
      self.highlight = false;
    }
  }

  /// Search for a config file in the current directory
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    CONFIG_FILENAMES
      .iter()
      .map(|filename| current_dir.join(filename))
      .find(|path| path.exists())
  }

  /// Validate all paths specified in the configuration.
  ///
  /// `needs_sources` additionally requires the source and partials
  /// directories to exist.
  pub fn validate_paths(&self, needs_sources: bool) -> Result<()> {
    let mut errors = Vec::new();

    if needs_sources {
      check_dir(&mut errors, "Source directory", &self.source_dir);
      check_dir(&mut errors, "Partials directory", &self.partials_dir);
    }

    if let Some(ref resources_dir) = self.resources_dir {
      check_dir(&mut errors, "Resources directory", resources_dir);
    }

    if let Some(ref code_template) = self.code_template {
      if !code_template.exists() {
        errors.push(format!(
          "Code block template does not exist: {}",
          code_template.display()
        ));
      } else if !code_template.is_file() {
        errors.push(format!(
          "Code block template path is not a file: {}",
          code_template.display()
        ));
      }
    }

    if !errors.is_empty() {
      let error_message = errors.join("\n");
      return Err(anyhow::anyhow!(
        "Configuration path validation errors:\n{}",
        error_message
      ));
    }

    Ok(())
  }

  /// Generate a default configuration file with commented explanations
  pub fn generate_default_config(format: &str, path: &Path) -> Result<()> {
    let config_content = templates::get_template(format)
      .map_err(|e| anyhow::anyhow!("{}", e))?;

    fs::write(path, config_content).with_context(|| {
      format!("Failed to write default config to {}", path.display())
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn check_dir(errors: &mut Vec<String>, what: &str, path: &Path) {
  if !path.exists() {
    errors.push(format!("{what} does not exist: {}", path.display()));
  } else if !path.is_dir() {
    errors.push(format!("{what} path is not a directory: {}", path.display()));
  }
}
