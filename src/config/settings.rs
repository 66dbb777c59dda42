//! Configuration settings for scput
//!
//! Defines the CLI surface and the validated upload configuration
//! derived from it.

use crate::error::{Result, ScputError};
use clap::Parser;
use std::path::PathBuf;

/// Default SSH port, used when --port is absent or unparsable
pub const DEFAULT_PORT: u16 = 22;

/// scput - Upload files using SCP
#[derive(Parser, Debug, Clone)]
#[command(name = "scput")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload a batch of local files to a remote host over SSH/SCP")]
#[command(disable_help_flag = true)]
#[command(long_about = r#"
scput authenticates to a remote host over SSH and uploads a batch of
local files to a single remote destination directory, reporting
per-file progress as it goes.

Examples:
  scput --host sftp.example.com --username deploy --password secret \
        --upload-files a.txt,b.txt --upload-destination /home/deploy

  scput --host sftp.example.com --username deploy --ppk ~/.ssh/id_rsa \
        --upload-files release.tar.gz --upload-destination /srv/releases
"#)]
pub struct CliArgs {
    /// Remote SSH server (e.g. sftp.example.com)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to use when connecting (default: 22)
    #[arg(long, value_name = "PORT")]
    pub port: Option<String>,

    /// Username to use when connecting
    #[arg(long, value_name = "USER")]
    pub username: Option<String>,

    /// Password to use when connecting
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Private key file to use when connecting
    #[arg(long, value_name = "PATH")]
    pub ppk: Option<PathBuf>,

    /// The local files to upload, comma-delimited (e.g. a.txt,b.txt)
    #[arg(long, value_name = "FILES")]
    pub upload_files: Option<String>,

    /// The remote destination directory for uploaded files (e.g. /home/user)
    #[arg(long, value_name = "DIR")]
    pub upload_destination: Option<String>,

    /// Display help and exit
    #[arg(short = 'h', long)]
    pub help: bool,
}

impl CliArgs {
    /// Whether an upload action was requested at all.
    ///
    /// Mirrors the "no action" case: with neither an upload list nor a
    /// destination given, the caller shows usage and exits non-zero.
    pub fn has_action(&self) -> bool {
        self.upload_files.is_some() || self.upload_destination.is_some()
    }
}

/// Validated upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Remote host
    pub host: String,
    /// Remote port
    pub port: u16,
    /// Username for authentication
    pub username: String,
    /// Password, if password authentication was requested
    pub password: Option<String>,
    /// Private key path, if key authentication was requested
    pub private_key: Option<PathBuf>,
    /// Raw comma-delimited upload file list
    pub upload_files: Option<String>,
    /// Remote destination directory
    pub destination: String,
}

impl UploadConfig {
    /// Build a validated configuration from CLI arguments.
    ///
    /// Host and username must be present and non-empty. The port is
    /// resolved permissively: unparsable or non-positive values are
    /// silently ignored and the default retained. The credential pair
    /// and the file list are validated later, by the credential
    /// resolver and the upload set builder.
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let host = match args.host.as_deref() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => return Err(ScputError::config("Please specify a valid host")),
        };

        let username = match args.username.as_deref() {
            Some(u) if !u.is_empty() => u.to_string(),
            _ => return Err(ScputError::config("Please specify a valid username")),
        };

        Ok(Self {
            host,
            port: resolve_port(args.port.as_deref()),
            username,
            password: args.password.clone().filter(|p| !p.is_empty()),
            private_key: args.ppk.clone().filter(|p| !p.as_os_str().is_empty()),
            upload_files: args.upload_files.clone(),
            destination: args.upload_destination.clone().unwrap_or_default(),
        })
    }
}

/// Resolve the port argument, retaining the default on invalid input.
///
/// Non-numeric and non-positive values are ignored rather than rejected.
fn resolve_port(raw: Option<&str>) -> u16 {
    match raw.and_then(|p| p.trim().parse::<i64>().ok()) {
        Some(port) if port > 0 && port <= u16::MAX as i64 => port as u16,
        _ => DEFAULT_PORT,
    }
}
