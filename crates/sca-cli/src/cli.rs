//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SCA Capture - Send saved files to the analysis webhook and collect the verdicts.
#[derive(Debug, Parser)]
#[command(name = "sca-capture")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis webhook URL (overrides the configuration file)
    #[arg(long, global = true, env = "SCA_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Workspace root; repeat to list several, the first existing one wins
    #[arg(short, long = "workspace", global = true)]
    pub workspaces: Vec<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (record names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one file, as if it had just been saved
    Analyze(AnalyzeArgs),

    /// Watch the workspace and analyze every saved file
    Watch(WatchArgs),

    /// Inspect the collected dataset
    Records(RecordsArgs),

    /// Attach a ground-truth judgement to a record
    Annotate(AnnotateArgs),

    /// Inspect or change the configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// File to analyze
    pub file: PathBuf,

    /// Language identifier (detected from the extension by default)
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Quiet period before a burst of file events counts as one save
    #[arg(long, default_value = "500")]
    pub debounce_ms: u64,
}

/// Arguments for dataset inspection.
#[derive(Debug, Parser)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub action: RecordsAction,
}

/// Dataset inspection actions.
#[derive(Debug, Subcommand)]
pub enum RecordsAction {
    /// List all records
    List,

    /// Show one record and its ground truth
    Show {
        /// Record file name, file stem or code hash
        id: String,
    },

    /// List records that share a code hash
    Duplicates,
}

/// Arguments for the annotate command.
#[derive(Debug, Parser)]
pub struct AnnotateArgs {
    /// Record file name, file stem or code hash
    pub id: String,

    /// Ground-truth verdict
    #[arg(long, value_enum)]
    pub verdict: Option<VerdictArg>,

    /// Infringement basis
    #[arg(long, value_enum)]
    pub basis: Option<BasisArg>,

    /// License risk
    #[arg(long, value_enum)]
    pub license_risk: Option<LicenseRiskArg>,

    /// Confidence in this judgement
    #[arg(long, value_enum, default_value = "high")]
    pub confidence: ConfidenceArg,

    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Set the analysis webhook URL
    SetUrl {
        /// Webhook URL
        url: String,
    },

    /// Print the configuration file path
    Path,
}

/// Verdict argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum VerdictArg {
    /// No reuse
    Safe,
    /// Superficial similarity
    LowRisk,
    /// Worth a manual look
    MediumRisk,
    /// Probable reuse with obligations
    HighRisk,
    /// License violation
    Violation,
}

/// Infringement basis argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum BasisArg {
    /// Written independently
    Independent,
    /// Inspired by the source
    Inspired,
    /// Adapted from the source
    Derivative,
    /// Copied verbatim
    Copied,
}

/// License risk argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum LicenseRiskArg {
    /// No obligations
    None,
    /// Attribution required
    AttributionRequired,
    /// Weak copyleft obligations
    WeakCopyleftObligations,
    /// Strong copyleft violation
    StrongCopyleftViolation,
}

/// Annotation confidence argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ConfidenceArg {
    /// Certain
    High,
    /// Probably right
    Medium,
    /// Best guess
    Low,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<VerdictArg> for sca_domain::Verdict {
    fn from(verdict: VerdictArg) -> Self {
        match verdict {
            VerdictArg::Safe => sca_domain::Verdict::Safe,
            VerdictArg::LowRisk => sca_domain::Verdict::LowRisk,
            VerdictArg::MediumRisk => sca_domain::Verdict::MediumRisk,
            VerdictArg::HighRisk => sca_domain::Verdict::HighRisk,
            VerdictArg::Violation => sca_domain::Verdict::Violation,
        }
    }
}

impl From<BasisArg> for sca_domain::InfringementBasis {
    fn from(basis: BasisArg) -> Self {
        match basis {
            BasisArg::Independent => sca_domain::InfringementBasis::Independent,
            BasisArg::Inspired => sca_domain::InfringementBasis::Inspired,
            BasisArg::Derivative => sca_domain::InfringementBasis::Derivative,
            BasisArg::Copied => sca_domain::InfringementBasis::Copied,
        }
    }
}

impl From<LicenseRiskArg> for sca_domain::LicenseRisk {
    fn from(risk: LicenseRiskArg) -> Self {
        match risk {
            LicenseRiskArg::None => sca_domain::LicenseRisk::None,
            LicenseRiskArg::AttributionRequired => sca_domain::LicenseRisk::AttributionRequired,
            LicenseRiskArg::WeakCopyleftObligations => {
                sca_domain::LicenseRisk::WeakCopyleftObligations
            }
            LicenseRiskArg::StrongCopyleftViolation => {
                sca_domain::LicenseRisk::StrongCopyleftViolation
            }
        }
    }
}

impl From<ConfidenceArg> for sca_domain::AnnotationConfidence {
    fn from(confidence: ConfidenceArg) -> Self {
        match confidence {
            ConfidenceArg::High => sca_domain::AnnotationConfidence::High,
            ConfidenceArg::Medium => sca_domain::AnnotationConfidence::Medium,
            ConfidenceArg::Low => sca_domain::AnnotationConfidence::Low,
        }
    }
}
