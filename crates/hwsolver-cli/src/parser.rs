//! Command-line arguments.

use clap::Parser;
use hwsolver_core::DEFAULT_ORIGIN;

/// Ask the homework solver from the terminal.
///
/// Starts an interactive session, or answers a single question when one is
/// given on the command line.
#[derive(Debug, Parser)]
#[command(name = "hwsolver")]
#[command(about = "Ask the homework solver from your terminal")]
#[command(version)]
pub struct Cli {
    /// Solver service base URL; overrides the origin-derived default
    #[arg(long = "backend-url", env = "HWSOLVER_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Page origin the default backend URL is derived from (3000 -> 8000)
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Narrate every new result
    #[arg(long = "auto-speak")]
    pub auto_speak: bool,

    /// Index of the narration voice (see `voices`)
    #[arg(long)]
    pub voice: Option<usize>,

    /// Disable narration entirely
    #[arg(long = "no-speech")]
    pub no_speech: bool,

    /// Console narration speed
    #[arg(
        long = "words-per-minute",
        default_value_t = 180,
        value_parser = clap::value_parser!(u32).range(40..=600)
    )]
    pub words_per_minute: u32,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Ask this question and exit
    pub question: Option<String>,
}
