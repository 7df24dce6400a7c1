use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line interface for pagewright
#[derive(Parser, Debug)]
#[command(author, version, about = "Pagewright: build published pages")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). When omitted,
  /// pagewright.toml, pagewright.json and .pagewright.toml are tried in the
  /// current directory.
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,
}

/// Overrides for configuration values, shared by the build subcommands.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
  /// Directory containing the page sources.
  #[arg(short, long)]
  pub source_dir: Option<PathBuf>,

  /// Directory whose files are published as resources.
  #[arg(short, long)]
  pub resources_dir: Option<PathBuf>,

  /// Root of the published output.
  #[arg(short, long)]
  pub output_dir: Option<PathBuf>,

  /// Base directory for @partial(...) paths.
  #[arg(short, long)]
  pub partials_dir: Option<PathBuf>,

  /// Template used to render highlighted code blocks.
  #[arg(long)]
  pub code_template: Option<PathBuf>,

  /// Leave code blocks unhighlighted.
  #[arg(long)]
  pub no_highlight: bool,
}

/// All supported subcommands for the pagewright CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new pagewright configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "pagewright.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Build every page under the source directory.
  Pages(BuildArgs),

  /// Copy the resources directory into the output.
  Resources(BuildArgs),

  /// Build pages, then copy resources.
  Build(BuildArgs),
}

impl Commands {
  /// Configuration overrides carried by the subcommand, if any.
  #[must_use]
  pub const fn build_args(&self) -> Option<&BuildArgs> {
    match self {
      Self::Pages(args) | Self::Resources(args) | Self::Build(args) => {
        Some(args)
      },
      Self::Init { .. } => None,
    }
  }
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_pages() {
    let cli = Cli::parse_from(["pagewright", "-v", "pages", "-s", "docs"]);
    assert!(cli.verbose);
    let args = cli.command.build_args().expect("pages has build args");
    assert_eq!(args.source_dir, Some(PathBuf::from("docs")));
    assert!(!args.no_highlight);
  }

  #[test]
  fn test_parse_init_defaults() {
    let cli = Cli::parse_from(["pagewright", "init"]);
    assert!(matches!(
      cli.command,
      Commands::Init { ref output, ref format, force: false }
        if output.as_os_str() == "pagewright.toml" && format == "toml"
    ));
    assert!(cli.command.build_args().is_none());
  }

  #[test]
  fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["pagewright"]).is_err());
  }
}
