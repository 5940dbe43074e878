// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "garden-scene")]
#[command(about = "Procedural garden scene with an orbit camera", long_about = None)]
pub struct Cli {
    /// Number of leaves scattered over the tree canopy
    #[arg(long = "leaves", allow_negative_numbers = true)]
    pub leaves: Option<i32>,

    /// Seed for leaf placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Hide the debug panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "garden-scene",
            "--leaves",
            "12",
            "--seed",
            "7",
            "--width",
            "1024",
            "--height",
            "768",
            "--no-ui",
        ])
        .unwrap();
        assert_eq!(cli.leaves, Some(12));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.width, Some(1024));
        assert_eq!(cli.height, Some(768));
        assert!(cli.no_ui);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_negative_leaf_count_reaches_caller() {
        let cli = Cli::try_parse_from(["garden-scene", "--leaves", "-4"]).unwrap();
        assert_eq!(cli.leaves, Some(-4));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["garden-scene"]).unwrap();
        assert!(cli.leaves.is_none());
        assert!(!cli.no_ui);
    }
}
