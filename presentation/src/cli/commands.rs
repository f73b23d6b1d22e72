//! CLI command definitions

use clap::{Parser, ValueEnum};
use gurubu_domain::PointScale;
use std::path::PathBuf;

/// Output format for reconciliation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tally bars, statistics and AI reasoning
    Full,
    /// Only the suggestion
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for gurubu_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// A `NAME=LABEL` vote given on the command line
///
/// `NAME=` (empty label) registers a participant who has not voted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteArg {
    pub participant: String,
    pub label: Option<String>,
}

impl std::str::FromStr for VoteArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (participant, label) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=LABEL, got '{}'", s))?;

        let participant = participant.trim();
        if participant.is_empty() {
            return Err(format!("missing participant name in '{}'", s));
        }

        let label = label.trim();
        Ok(Self {
            participant: participant.to_string(),
            label: (!label.is_empty()).then(|| label.to_string()),
        })
    }
}

fn parse_scale(s: &str) -> Result<PointScale, String> {
    s.parse().map_err(|e: gurubu_domain::DomainError| e.to_string())
}

fn parse_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err("confidence must be between 0 and 1".to_string())
    }
}

/// CLI arguments for gurubu
#[derive(Parser, Debug)]
#[command(name = "gurubu")]
#[command(author, version, about = "Planning poker estimation - tally votes and reconcile with an AI estimate")]
#[command(long_about = r#"
GuruBu tallies the votes of a planning poker round and reconciles the human
majority with an optional AI-suggested estimate.

Votes come from --vote arguments and/or a JSON votes file
({"alice": "3", "bob": null}). The AI estimate comes either from the
estimation service (--ai-endpoint or [ai] in the config) or from
--ai-estimate when it was obtained out of band.

Configuration files are loaded from (in priority order):
1. GURUBU_* environment variables (GURUBU_AI__ENDPOINT=...)
2. --config <path>     Explicit config file
3. ./gurubu.toml       Project-level config
4. ~/.config/gurubu/config.toml   Global config

Example:
  gurubu --vote alice=3 --vote bob=3 --vote carol=5
  gurubu --scale 1,2,3,5,8 --votes-file votes.json --ai-estimate 5 --ai-confidence 0.8
  gurubu --votes-file votes.json --item PROJ-42 --title "Export report" -o full
"#)]
pub struct Cli {
    /// Point scale as comma-separated labels, or "fibonacci" / "tshirt"
    #[arg(long, value_name = "LABELS", value_parser = parse_scale)]
    pub scale: Option<PointScale>,

    /// A vote as NAME=LABEL (can be specified multiple times)
    #[arg(long = "vote", value_name = "NAME=LABEL")]
    pub votes: Vec<VoteArg>,

    /// JSON file holding {participant: label|null}
    #[arg(long, value_name = "PATH")]
    pub votes_file: Option<PathBuf>,

    /// Room whose votes are reconciled
    #[arg(long, value_name = "ROOM")]
    pub room: Option<String>,

    /// Clear all votes in the votes file after reconciling
    #[arg(long, requires = "votes_file")]
    pub clear: bool,

    /// Issue key of the item being estimated (enables the AI request)
    #[arg(long, value_name = "KEY")]
    pub item: Option<String>,

    /// Title of the item being estimated
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Description of the item being estimated
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// AI estimation service endpoint
    #[arg(long, value_name = "URL")]
    pub ai_endpoint: Option<String>,

    /// Use this AI estimate instead of calling the service
    #[arg(long, value_name = "LABEL", conflicts_with = "ai_endpoint")]
    pub ai_estimate: Option<String>,

    /// Confidence of --ai-estimate (0.0 to 1.0)
    #[arg(long, value_name = "F", requires = "ai_estimate", value_parser = parse_confidence)]
    pub ai_confidence: Option<f64>,

    /// Reasoning to attach to --ai-estimate
    #[arg(long, value_name = "TEXT", requires = "ai_estimate")]
    pub ai_reasoning: Option<String>,

    /// Mark --ai-estimate as recommending a split
    #[arg(long, requires = "ai_estimate")]
    pub ai_split: bool,

    /// Do not consult any AI estimate
    #[arg(long, conflicts_with_all = ["ai_estimate", "ai_endpoint"])]
    pub no_ai: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
