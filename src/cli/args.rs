//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Intra-site link checker for rendered pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sitelink.toml)
    #[arg(short = 'C', long, default_value = "sitelink.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate links between pages and anchors within pages
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },

    /// Print every anchor defined on each page
    #[command(visible_alias = "a")]
    Anchors {
        #[command(flatten)]
        args: AnchorsArgs,
    },
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Files or directories to index. If omitted, indexes all content.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Validate intra-site links
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub intrasite: Option<bool>,

    /// Treat validation failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,

    /// Print the anchor index before validating
    #[arg(long)]
    pub dump_anchors: bool,
}

/// Anchors command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct AnchorsArgs {
    /// Files or directories to index. If omitted, indexes all content.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::parse_from(["sitelink", "-v", "validate", "docs", "-w", "--intrasite", "false"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("sitelink.toml"));
        let Commands::Validate { args } = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.paths, vec![PathBuf::from("docs")]);
        assert!(args.warn_only);
        assert_eq!(args.intrasite, Some(false));
        assert!(!args.dump_anchors);
    }

    #[test]
    fn test_intrasite_flag_without_value() {
        let cli = Cli::parse_from(["sitelink", "validate", "-i"]);
        let Commands::Validate { args } = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.intrasite, Some(true));
    }

    #[test]
    fn test_parse_anchors() {
        let cli = Cli::parse_from(["sitelink", "-C", "site/sitelink.toml", "anchors", "--json"]);
        assert_eq!(cli.config, PathBuf::from("site/sitelink.toml"));
        let Commands::Anchors { args } = cli.command else {
            panic!("expected anchors");
        };
        assert!(args.json);
        assert!(args.paths.is_empty());
    }
}
