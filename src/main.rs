//! scput CLI - batch file upload over SSH/SCP

use clap::{CommandFactory, Parser};
use scput::config::{CliArgs, UploadConfig};
use scput::core::Uploader;
use scput::credential::Credential;
use scput::error::Result;
use scput::fileset::UploadSet;
use scput::transport::ScpTransport;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging; warnings stay visible when RUST_LOG is unset
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    // Help display and the no-action case both show usage and exit
    // with the non-success status
    if args.help || !args.has_action() {
        let _ = CliArgs::command().print_help();
        std::process::exit(-1);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(-1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = UploadConfig::from_cli(&args)?;

    // Resolve inputs before any network activity
    let credential = Credential::resolve(
        &config.username,
        config.password.as_deref(),
        config.private_key.as_deref(),
    )?;
    let set = UploadSet::build(config.upload_files.as_deref())?;

    let transport = ScpTransport::new(
        config.host.clone(),
        config.port,
        config.username.clone(),
        credential,
    );

    let mut uploader = Uploader::new(transport, config.host, config.port, config.destination);
    let report = uploader.execute(&set)?;

    report.print_summary();
    Ok(())
}
