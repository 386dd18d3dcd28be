//! Command-line flags.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::render::RenderStyle;

#[derive(Parser, Debug)]
#[command(
    name = "nagstat",
    version,
    about = "Summarise several nagios-api servers in one table",
    after_help = "Examples:\n  nagstat --stats\n  nagstat --problems --config servers.yaml\n  nagstat --problems --bare | grep CRITICAL"
)]
pub struct Cli {
    #[arg(long, conflicts_with = "problems", help = "Host/service/problem counts per server")]
    pub stats: bool,
    #[arg(long, help = "Every failing check across all servers")]
    pub problems: bool,
    #[arg(long, help = "Strip table borders and padding")]
    pub bare: bool,
    #[arg(long, help = "Colourise table borders")]
    pub rainbow: bool,
    #[arg(long, help = "Disable ANSI colour (also honours NO_COLOR)")]
    pub no_color: bool,
    #[arg(long, default_value = "conf.json", help = "Server list (JSON or YAML)")]
    pub config: PathBuf,
    #[arg(long, value_name = "SECS", help = "Per-request timeout (default: none)")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Stats,
    Problems,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("You must pass in either --stats or --problems")]
pub struct UsageError;

impl Cli {
    pub fn mode(&self) -> Result<Mode, UsageError> {
        match (self.stats, self.problems) {
            (true, _) => Ok(Mode::Stats),
            (false, true) => Ok(Mode::Problems),
            (false, false) => Err(UsageError),
        }
    }

    pub fn style(&self) -> RenderStyle {
        RenderStyle::from_flags(self.bare, self.rainbow, self.no_color)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
