//! Clap derive structures for the `risport` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use risport_api::criteria::{
    CtiMgrClass, CtiStatus, DeviceClass, DeviceStatus, DownloadStatus, Protocol, SelectAppBy,
    SelectBy,
};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// risport -- query CUCM RisPort70 for real-time device and CTI status
#[derive(Debug, Parser)]
#[command(
    name = "risport",
    version,
    about = "Query Cisco CUCM real-time device registration and CTI status",
    long_about = "Queries the RisPort70 SOAP service of a CUCM node for device\n\
        registration state (selectCmDevice / selectCmDeviceExt) and CTI\n\
        connection state (selectCtiItem).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Node profile to use
    #[arg(long, short = 'p', env = "RISPORT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// CUCM node host or URL (overrides profile)
    #[arg(long, short = 'H', env = "RISPORT_HOST", global = true)]
    pub host: Option<String>,

    /// Application user name
    #[arg(long, short = 'u', env = "RISPORT_USERNAME", global = true)]
    pub username: Option<String>,

    /// Application user password
    #[arg(long, env = "RISPORT_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RISPORT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "RISPORT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "RISPORT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query device registration state (selectCmDevice)
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Query CTI connection state (selectCtiItem)
    Cti(CtiArgs),

    /// List the device model catalog
    Models(ModelsArgs),

    /// List the status-reason catalog
    #[command(name = "status-reasons", alias = "reasons")]
    StatusReasons,

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Items to match (device names, IPs, DNs...). Defaults to "*"
    pub items: Vec<String>,

    /// Attribute the items are matched against
    #[arg(long, short = 'b', default_value_t = SelectBy::Name)]
    pub select_by: SelectBy,

    /// Device class
    #[arg(long, default_value_t = DeviceClass::Any)]
    pub class: DeviceClass,

    /// Model name (e.g. "Cisco 8851") or numeric model code
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Registration status
    #[arg(long, short = 's', default_value_t = DeviceStatus::Any)]
    pub status: DeviceStatus,

    /// Restrict to one CUCM node
    #[arg(long, short = 'n')]
    pub node: Option<String>,

    /// Signalling protocol
    #[arg(long, default_value_t = Protocol::Any)]
    pub protocol: Protocol,

    /// Firmware download status
    #[arg(long, default_value_t = DownloadStatus::Any)]
    pub download_status: DownloadStatus,

    /// Maximum devices returned (1-2000)
    #[arg(long, default_value_t = 1000)]
    pub max: u32,

    /// Use selectCmDeviceExt
    #[arg(long, short = 'x')]
    pub extended: bool,

    /// Add StatusReason descriptions to structured output
    #[arg(long)]
    pub describe_reasons: bool,

    /// Session-affinity token from a previous query
    #[arg(long, env = "RISPORT_AFFINITY")]
    pub affinity: Option<String>,
}

// ── CTI ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CtiArgs {
    /// CTI manager class
    #[arg(long, default_value_t = CtiMgrClass::Line)]
    pub class: CtiMgrClass,

    /// Connection status
    #[arg(long, short = 's', default_value_t = CtiStatus::Any)]
    pub status: CtiStatus,

    /// Restrict to one CUCM node
    #[arg(long, short = 'n')]
    pub node: Option<String>,

    /// Attribute app items are matched against
    #[arg(long, short = 'b', default_value_t = SelectAppBy::AppId)]
    pub select_app_by: SelectAppBy,

    /// Application item (repeatable)
    #[arg(long = "app-item", short = 'a')]
    pub app_items: Vec<String>,

    /// Device name (repeatable)
    #[arg(long = "dev-name", short = 'd')]
    pub dev_names: Vec<String>,

    /// Directory number (repeatable)
    #[arg(long = "dir-number")]
    pub dir_numbers: Vec<String>,

    /// Maximum items returned
    #[arg(long, default_value_t = 1000)]
    pub max: u32,

    /// Session-affinity token from a previous query
    #[arg(long, env = "RISPORT_AFFINITY")]
    pub affinity: Option<String>,
}

// ── Catalogs ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ModelsArgs {
    /// Only list models whose name contains this text (case-insensitive)
    pub filter: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration (passwords masked)
    Show,

    /// Store a profile password in the system keyring
    SetPassword {
        /// Profile the password belongs to (defaults to --profile)
        #[arg(long = "for")]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
