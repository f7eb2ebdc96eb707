use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use fwaudit::fetch::Vendor;
use fwaudit_core::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "fwaudit", version)]
#[command(about = "Audit firewall rule sets and write a severity-rated report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Audit the appliance networks of a Meraki organization.
    Meraki(MerakiArgs),
    /// Audit one SonicWALL device through the SonicOS API.
    Sonicwall(SonicWallArgs),
    /// Audit a previously saved configuration snapshot without network access.
    Offline(OfflineArgs),
}

impl Command {
    pub fn report_args(&self) -> &ReportArgs {
        match self {
            Self::Meraki(args) => &args.report,
            Self::Sonicwall(args) => &args.report,
            Self::Offline(args) => &args.report,
        }
    }
}

#[derive(Args, Debug)]
pub struct MerakiArgs {
    /// Dashboard API key.
    #[arg(long, env = "MERAKI_API_KEY", hide_env_values = true)]
    pub api_key: String,
    /// Organization whose appliance networks are audited.
    #[arg(long, required_unless_present = "network", conflicts_with = "network")]
    pub org_id: Option<String>,
    /// Audit only these network ids (repeatable).
    #[arg(long)]
    pub network: Vec<String>,
    /// Dashboard API base URL.
    #[arg(long, default_value = fwaudit::fetch::meraki::DEFAULT_BASE_URL)]
    pub base_url: String,
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Debug)]
pub struct SonicWallArgs {
    /// Management address, with or without scheme (https is assumed).
    #[arg(long)]
    pub host: String,
    #[arg(long)]
    pub username: String,
    /// Prompted for on the terminal when not given.
    #[arg(long, env = "SONICWALL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Debug)]
pub struct OfflineArgs {
    /// Snapshot JSON written by `--save-snapshot`.
    pub snapshot: PathBuf,
    /// Override the vendor recorded in the snapshot.
    #[arg(long, value_enum)]
    pub vendor: Option<VendorArg>,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
    /// Accept self-signed or invalid TLS certificates.
    #[arg(long)]
    pub insecure: bool,
    /// Also write the fetched configuration to this JSON file.
    #[arg(long)]
    pub save_snapshot: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report artifact format.
    #[arg(long, value_enum, ignore_case = true, default_value_t = ReportFormatArg::Html)]
    pub format: ReportFormatArg,
    /// Directory the report is written to.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Optional audit policy TOML overriding ports and tokens.
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Exit with status 1 when any high-severity issue is found.
    #[arg(long)]
    pub strict: bool,
    /// Log debug detail, including every request.
    #[arg(short, long)]
    pub verbose: bool,
    /// Also append log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportFormatArg {
    Html,
    Csv,
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(value: ReportFormatArg) -> Self {
        match value {
            ReportFormatArg::Html => Self::Html,
            ReportFormatArg::Csv => Self::Csv,
            ReportFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum VendorArg {
    Meraki,
    Sonicwall,
}

impl From<VendorArg> for Vendor {
    fn from(value: VendorArg) -> Self {
        match value {
            VendorArg::Meraki => Self::Meraki,
            VendorArg::Sonicwall => Self::SonicWall,
        }
    }
}
