//! Tooldex discovery front-end
//!
//! Thin CLI over the query engine: dispatches one invocation to one query
//! operation and formats plain-text output. With no mode flag it lists
//! servers. Query errors print a single-line message on stderr and exit
//! non-zero; an empty find/search result is "no results", not an error.

use clap::Parser;
use std::path::PathBuf;
use tooldex::config::Config;
use tooldex::error::Result;
use tooldex::registry::{
    QueryEngine, Registry, RegistryStats, ServerSummary, ToolDetail, ToolHit, ToolSummary,
};

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = "Discovery queries over the compact tool registry")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Registry artifact path (overrides configuration)
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// List one server's tools
    #[arg(
        long,
        value_name = "NAME",
        conflicts_with_all = ["tool", "search", "detail", "stats"]
    )]
    server: Option<String>,

    /// Find a tool by its exact name across all servers
    #[arg(
        long,
        value_name = "NAME",
        conflicts_with_all = ["search", "detail", "stats"]
    )]
    tool: Option<String>,

    /// Case-insensitive substring search over tool names, summaries, and
    /// descriptions
    #[arg(
        long,
        value_name = "KEYWORD",
        conflicts_with_all = ["detail", "stats"]
    )]
    search: Option<String>,

    /// Show full detail for one tool
    #[arg(
        long,
        num_args = 2,
        value_names = ["SERVER", "TOOL"],
        conflicts_with = "stats"
    )]
    detail: Option<Vec<String>>,

    /// Print aggregate registry statistics
    #[arg(long)]
    stats: bool,
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
    if let Some(registry) = &cli.registry {
        config.registry_file = registry.display().to_string();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    config.logging.init();

    let registry = Registry::load(&config.registry_file)?;
    let engine = QueryEngine::new(&registry);

    if let Some(server) = &cli.server {
        print_tools(server, &engine.list_tools(server)?);
    } else if let Some(tool) = &cli.tool {
        let hits = engine.find_by_name(tool);
        if hits.is_empty() {
            println!("No tools named '{}'", tool);
        } else {
            print_hits(&hits);
        }
    } else if let Some(keyword) = &cli.search {
        let hits = engine.search(keyword);
        if hits.is_empty() {
            println!("No tools matching '{}'", keyword);
        } else {
            print_hits(&hits);
        }
    } else if let Some(pair) = &cli.detail {
        print_detail(&engine.detail(&pair[0], &pair[1])?);
    } else if cli.stats {
        print_stats(&engine.stats());
    } else {
        print_servers(&engine.list_servers());
    }

    Ok(())
}

fn print_servers(servers: &[ServerSummary]) {
    let width = servers.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for server in servers {
        println!(
            "{:<width$}  {:>4} tools  {:>6}",
            server.name,
            server.tool_count,
            server.size_display,
            width = width
        );
    }
}

fn print_tools(server: &str, tools: &[ToolSummary]) {
    println!("{} ({} tools)", server, tools.len());
    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for tool in tools {
        println!("  {:<width$}  {}", tool.name, tool.summary, width = width);
    }
}

fn print_hits(hits: &[ToolHit]) {
    let width = hits
        .iter()
        .map(|hit| hit.server.len() + hit.tool.len() + 1)
        .max()
        .unwrap_or(0);
    for hit in hits {
        let endpoint = format!("{}/{}", hit.server, hit.tool);
        println!("{:<width$}  {}", endpoint, hit.summary, width = width);
    }
}

fn print_detail(detail: &ToolDetail) {
    println!("Tool:        {}", detail.tool);
    println!("Endpoint:    {}", detail.endpoint);
    println!("Summary:     {}", detail.summary);
    println!("Description: {}", detail.description);
    println!("Required:    {}", join_or_none(&detail.required_params));
    println!("Optional:    {}", join_or_none(&detail.optional_params));

    if !detail.params.is_empty() {
        println!("Parameters:");
        let width = detail.params.keys().map(|name| name.len()).max().unwrap_or(0);
        for (name, info) in &detail.params {
            match &info.title {
                Some(title) => println!(
                    "  {:<width$}  {}  ({})",
                    name,
                    info.param_type,
                    title,
                    width = width
                ),
                None => println!("  {:<width$}  {}", name, info.param_type, width = width),
            }
        }
    }
}

fn print_stats(stats: &RegistryStats) {
    println!("Generated: {}", stats.generated_at.to_rfc3339());
    println!("Servers:   {}", stats.server_count);
    println!("Tools:     {}", stats.tool_count);
    let width = stats
        .per_server
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, count) in &stats.per_server {
        println!("  {:<width$}  {}", name, count, width = width);
    }
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
