//! CLI argument definitions for soyo.
//!
//! Separated from the main entrypoint to keep the binary focused on
//! orchestration.

use clap::{Parser, Subcommand};

/// Prepare a publishable dist directory from a built package.
#[derive(Parser, Debug)]
#[command(name = "soyo")]
#[command(version, about)]
#[command(long_about = concat!(
    "Prepare a publishable dist directory from a built package.\n\n",
    "soyo reads the package.json next to it, filters its fields through a ",
    "fixed rulebook, and assembles a clean publish layout inside the dist ",
    "directory: built files move into dist/dist, and the filtered manifest ",
    "plus readme, changelog, licence, and declared files sit at the top ",
    "level, ready for `npm publish`.",
))]
#[command(after_help = concat!(
    "ENVIRONMENT:\n",
    "  SOYO_DEBUG    Enable verbose trace lines for field and file copies\n\n",
    "EXAMPLES:\n",
    "  Run the build script, then prepare the publish directory:\n",
    "    $ soyo build\n\n",
    "  Prepare the publish directory from an existing build:\n",
    "    $ soyo copy\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Copy files to dist to prepare the publish directory.
    #[command(alias = "c")]
    Copy,

    /// Run the build script, then prepare the publish directory.
    #[command(alias = "b")]
    Build,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::copy(&["soyo", "copy"], Command::Copy)]
    #[case::copy_alias(&["soyo", "c"], Command::Copy)]
    #[case::build(&["soyo", "build"], Command::Build)]
    #[case::build_alias(&["soyo", "b"], Command::Build)]
    fn subcommands_and_aliases_parse(#[case] argv: &[&str], #[case] expected: Command) {
        let cli = Cli::try_parse_from(argv).expect("expected parse to succeed");
        assert_eq!(cli.command, expected);
    }

    #[test]
    fn a_subcommand_is_required() {
        let result = Cli::try_parse_from(["soyo"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_subcommands_are_rejected() {
        let result = Cli::try_parse_from(["soyo", "publish"]);
        assert!(result.is_err());
    }
}
