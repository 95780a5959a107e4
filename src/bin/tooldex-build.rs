//! Tooldex registry builder CLI
//!
//! Compacts a directory of per-server descriptor documents into one
//! registry artifact, published atomically so concurrent readers never see
//! a partial file.

use clap::Parser;
use std::path::PathBuf;
use tooldex::config::Config;
use tooldex::error::Result;
use tooldex::registry::RegistryBuilder;

#[derive(Parser)]
#[command(name = "tooldex-build")]
#[command(about = "Compact a descriptor store into one registry artifact")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding one descriptor document per server
    #[arg(short, long, value_name = "DIR")]
    servers_dir: Option<PathBuf>,

    /// Output path for the registry artifact
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.servers_dir {
        config.servers_dir = dir.display().to_string();
    }
    if let Some(output) = &cli.output {
        config.registry_file = output.display().to_string();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    config.logging.init();

    let report = RegistryBuilder::new(&config.servers_dir)
        .with_output(&config.registry_file)
        .build_and_publish()?;

    println!(
        "Registry written to {} ({} servers, {} tools, {} skipped)",
        config.registry_file,
        report.registry.server_count(),
        report.registry.tool_count(),
        report.diagnostics.len()
    );
    Ok(())
}
