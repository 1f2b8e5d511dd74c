use crate::config::{ColorMode, OutputFormat};
use clap::Parser;
use linediff_core::{Algorithm, DiffSettings};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "linediff",
    about = "Compare two texts line by line",
    version
)]
pub struct Cli {
    /// Original text file ("-" for stdin)
    pub left: Option<String>,

    /// Modified text file ("-" for stdin)
    pub right: Option<String>,

    /// Compare lines case-insensitively
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Collapse whitespace runs and trim lines before comparing
    #[arg(short = 'w', long)]
    pub ignore_whitespace: bool,

    /// Alignment algorithm: greedy or lcs
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Total output width for side-by-side
    #[arg(long)]
    pub width: Option<usize>,

    /// When to use colors
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Hide line numbers
    #[arg(long)]
    pub no_line_numbers: bool,

    /// Open the interactive editor view
    #[arg(long)]
    pub tui: bool,

    /// Store the effective comparison settings for later runs
    #[arg(long)]
    pub remember: bool,

    /// Ignore stored preferences
    #[arg(long)]
    pub no_prefs: bool,

    /// Config file (default: $CONFIG_DIR/linediff/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Overlay command-line flags on `settings`. Flags only ever enable toggles.
    pub fn apply(&self, mut settings: DiffSettings) -> DiffSettings {
        if self.ignore_case {
            settings.options.ignore_case = true;
        }
        if self.ignore_whitespace {
            settings.options.ignore_whitespace = true;
        }
        if let Some(algorithm) = self.algorithm {
            settings.algorithm = algorithm;
        }
        settings
    }
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
    fn test_flags_overlay_settings() {
        let cli = Cli::parse_from(["linediff", "-w", "--algorithm", "lcs", "a.txt", "b.txt"]);
        let settings = cli.apply(DiffSettings::default());
        assert!(settings.options.ignore_whitespace);
        assert!(!settings.options.ignore_case);
        assert_eq!(settings.algorithm, Algorithm::Lcs);
        assert_eq!(cli.left.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_flags_do_not_clear_stored_toggles() {
        let cli = Cli::parse_from(["linediff", "a", "b"]);
        let mut base = DiffSettings::default();
        base.options.ignore_case = true;
        assert!(cli.apply(base).options.ignore_case);
    }

    #[test]
    fn test_format_values() {
        let cli = Cli::parse_from(["linediff", "-f", "side-by-side", "a", "b"]);
        assert_eq!(cli.format, Some(OutputFormat::SideBySide));
        assert!(Cli::try_parse_from(["linediff", "-f", "html", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["linediff", "-a", "patience", "a", "b"]).is_err());
    }
}
