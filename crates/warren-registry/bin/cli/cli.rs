use clap::{Parser, Subcommand};
use std::path::PathBuf;
use warren_registry::StatusFilter;
use warren_storage::DEFAULT_NAMESPACE;
use warren_telemetry::LogFormat;

pub const DATA_DIR_ENV: &str = "WARREN_DATA_DIR";
pub const NAMESPACE_ENV: &str = "WARREN_NAMESPACE";
pub const SHORT_BASE_ENV: &str = "WARREN_SHORT_BASE";
pub const LOG_FORMAT_ENV: &str = "WARREN_LOG_FORMAT";

pub const DEFAULT_DATA_DIR: &str = ".warren";
pub const DEFAULT_SHORT_BASE: &str = "http://short";

#[derive(Debug, Parser)]
#[command(name = "warren", about = "Create, open and manage short links")]
pub struct CLI {
    /// Directory holding the alias document
    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Storage namespace; the document is `<data-dir>/<namespace>.json`
    #[arg(long, env = NAMESPACE_ENV, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Base prepended to short codes when printing links
    #[arg(long, env = SHORT_BASE_ENV, default_value = DEFAULT_SHORT_BASE)]
    pub short_base: String,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a long URL
    Shorten {
        url: String,
        /// Mnemonic prefix; a random suffix is appended
        #[arg(long)]
        token: Option<String>,
        /// Minutes until the link expires
        #[arg(long)]
        expiry: Option<String>,
    },
    /// Resolve a short code and record a click
    Open {
        code: String,
        #[arg(long, default_value = "direct")]
        referrer: String,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// List links, newest first
    List {
        #[arg(long, default_value_t = StatusFilter::All)]
        filter: StatusFilter,
    },
    /// Print one record as JSON
    Show { code: String },
    /// Delete a link
    Delete { code: String },
}
