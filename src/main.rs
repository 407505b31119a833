use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use conference_master::catalog::CatalogStore;
use conference_master::config::{
    env_vars, find_config_file, load_config, user_config_path, write_default_config, Config,
    LOCAL_CONFIG_FILE,
};
use conference_master::mcp::McpServer;
use conference_master::models::{
    ConferenceRecord, FieldStatistics, Lookup, PaperResult, PaperSearchRequest, DEFAULT_LIMIT,
};
use conference_master::query::QueryEngine;
use conference_master::sources;
use conference_master::utils::{
    conference_detail_table, conference_table, is_terminal, paper_table, statistics_table,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Conference Master - Look up academic conferences and search their papers
#[derive(Parser, Debug)]
#[command(name = "conference-master")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up top-tier academic conferences and search their papers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Conference catalog JSON file (overrides the configured path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Remote search timeout in seconds (overrides the configured value)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Query DBLP for real papers instead of returning placeholders
    #[arg(long, global = true)]
    remote_search: bool,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto if is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for papers from the catalogued conferences
    #[command(alias = "s")]
    Search {
        /// Search query (paper title, keywords, or author names)
        query: String,

        /// Restrict to one conference ID (e.g., 'ccs', 'neurips')
        #[arg(long, short)]
        conference: Option<String>,

        /// Filter by research field (e.g., 'CyberSecurity', 'AI')
        #[arg(long, short)]
        field: Option<String>,

        /// Filter by tier ('Top-tier' or 'Second-tier')
        #[arg(long, short)]
        tier: Option<String>,

        /// Filter by publication year
        #[arg(long, short)]
        year: Option<i32>,

        /// Maximum number of results (clamped to 1..=50)
        #[arg(long, short, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
        limit: i64,
    },

    /// Show details of a conference by ID
    #[command(alias = "i")]
    Info {
        /// Conference identifier (e.g., 'ccs', 'neurips')
        conference_id: String,
    },

    /// List conferences, optionally filtered by field or tier
    #[command(alias = "ls")]
    List {
        /// Filter by research field
        #[arg(long, short)]
        field: Option<String>,

        /// Filter by tier ('Top-tier' or 'Second-tier')
        #[arg(long, short)]
        tier: Option<String>,
    },

    /// Find a conference by acronym (case-insensitive)
    #[command(alias = "a")]
    Acronym {
        /// Conference acronym (e.g., 'CCS', 'NeurIPS')
        acronym: String,
    },

    /// Show per-field statistics
    Stats,

    /// Run the MCP server (for desktop MCP clients)
    Serve {
        /// Run in stdio mode (for desktop MCP clients)
        #[arg(long, default_value_t = true)]
        stdio: bool,

        /// Run in streamable HTTP mode (overrides --stdio)
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        /// Host to bind to for HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Destination (default: ./conference-master.toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Write to the per-user config directory instead
        #[arg(long, conflicts_with = "path")]
        user: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Conference Master - Environment Variables");
    println!();
    for (name, description) in env_vars() {
        println!("  {:<45} {}", name, description);
    }
    println!();
    println!("Other Settings:");
    println!("  {:<45} {}", "RUST_LOG", "Rust logging filter (overrides logging.level)");
    println!();
    println!("Example:");
    println!("  export CONFERENCE_MASTER_REMOTE_SEARCH__ENABLED=true");
    println!("  export CONFERENCE_MASTER_CATALOG__PATH=\"./my-conferences.json\"");
}

/// Log to stderr; stdout carries the MCP stdio protocol
fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("conference_master={}", level)));

    let (json_layer, text_layer) = if config.logging.is_json() {
        (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Load the config file given on the command line, or the first one found
fn resolve_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(path.as_deref()).with_context(|| match &path {
        Some(p) => format!("Failed to load configuration from {}", p.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    if let Some(catalog) = &cli.catalog {
        config.catalog.path = catalog.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.remote_search.timeout_seconds = timeout;
    }
    if cli.remote_search {
        config.remote_search.enabled = true;
    }

    Ok(config)
}

fn build_engine(config: &Config) -> Result<Arc<QueryEngine>> {
    let path = config.catalog.resolve_path();
    let catalog = CatalogStore::load(&path)
        .with_context(|| format!("Failed to load conference catalog {}", path.display()))?;

    let searcher = sources::from_config(&config.remote_search)
        .context("Failed to initialize remote search")?;

    Ok(Arc::new(
        QueryEngine::new(Arc::new(catalog)).with_optional_searcher(searcher),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    init_tracing(&cli, &config);

    let format = cli.output.resolve();

    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { path, user, force } => {
                let path = if user {
                    user_config_path().context("Could not determine the user config directory")?
                } else {
                    path.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
                };
                write_default_config(&path, force)?;
                println!("Wrote default configuration to {}", path.display());
            }
            ConfigCommands::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        },

        Some(Commands::Serve {
            stdio,
            http,
            port,
            host,
        }) => {
            let engine = build_engine(&config)?;
            let server = McpServer::new(engine)?;

            // Use HTTP mode if --http flag is provided, otherwise use --stdio flag
            if http || !stdio {
                let addr = format!("{}:{}", host, port);
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                server.run().await?;
            }
        }

        Some(Commands::Search {
            query,
            conference,
            field,
            tier,
            year,
            limit,
        }) => {
            let engine = build_engine(&config)?;

            let mut request = PaperSearchRequest::new(query).limit(limit);
            request.conference_id = conference;
            request.field = field;
            request.tier = tier;
            request.year = year.filter(|&y| y != 0);

            let outcome = engine.search_papers(&request).await;
            if outcome.is_fallback() && !outcome.is_empty() && !cli.quiet {
                eprintln!(
                    "Showing simulated placeholder results. Pass --remote-search to query DBLP."
                );
            }
            output_papers(outcome.papers(), format)?;
        }

        Some(Commands::Info { conference_id }) => {
            let engine = build_engine(&config)?;
            output_lookup(&engine.get_conference(&conference_id), format)?;
        }

        Some(Commands::List { field, tier }) => {
            let engine = build_engine(&config)?;
            let conferences = engine.list_conferences(field.as_deref(), tier.as_deref());
            output_conferences(&conferences, format)?;
        }

        Some(Commands::Acronym { acronym }) => {
            let engine = build_engine(&config)?;
            output_lookup(&engine.find_by_acronym(&acronym), format)?;
        }

        Some(Commands::Stats) => {
            let engine = build_engine(&config)?;
            output_statistics(&engine.field_statistics(), format)?;
        }

        None => {
            println!("No command provided. Use --help for usage information.");
            println!("Common commands:");
            println!("  search <query>   - Search for papers");
            println!("  list             - List conferences");
            println!("  info <id>        - Show a conference");
            println!("  acronym <name>   - Find a conference by acronym");
            println!("  stats            - Per-field statistics");
            println!("  serve            - Run MCP server");
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn output_papers(papers: &[PaperResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => print_json(papers)?,
        OutputFormat::Plain => {
            for paper in papers {
                let year = paper.year.map(|y| y.to_string()).unwrap_or_default();
                println!(
                    "{} - {} ({} {})",
                    paper.title,
                    paper.author_line(),
                    paper.conference_acronym,
                    year
                );
                if let Some(url) = paper.ee.as_ref().or(paper.url.as_ref()) {
                    println!("  URL: {}", url);
                }
                if let Some(ref doi) = paper.doi {
                    println!("  DOI: {}", doi);
                }
                if let Some(ref note) = paper.note {
                    println!("  Note: {}", note);
                }
                println!();
            }
        }
        OutputFormat::Table => println!("{}", paper_table(papers)),
    }
    Ok(())
}

fn output_conferences(conferences: &[&ConferenceRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => print_json(conferences)?,
        OutputFormat::Plain => {
            for c in conferences {
                println!("{}\t{}\t{} [{}, {}]", c.id, c.acronym, c.name, c.field, c.tier);
            }
        }
        OutputFormat::Table => println!("{}", conference_table(conferences.iter().copied())),
    }
    Ok(())
}

fn output_lookup(lookup: &Lookup<'_>, format: OutputFormat) -> Result<()> {
    match (lookup, format) {
        (_, OutputFormat::Json | OutputFormat::Auto) => print_json(lookup)?,
        (Lookup::Found(record), OutputFormat::Table) => {
            println!("{}", conference_detail_table(record))
        }
        (Lookup::Found(c), OutputFormat::Plain) => {
            println!("{} ({})", c.name, c.acronym);
            println!("  ID: {}", c.id);
            println!("  Field: {}", c.field);
            println!("  Tier: {}", c.tier);
            println!("  DBLP: {}", c.dblp_url);
        }
        (Lookup::NotFound(miss), _) => {
            println!("{}", miss.error);
            let available = miss
                .available_conferences
                .as_ref()
                .or(miss.available_acronyms.as_ref());
            if let Some(available) = available {
                println!("Available: {}", available.join(", "));
            }
        }
    }
    Ok(())
}

fn output_statistics(stats: &FieldStatistics, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => print_json(stats)?,
        OutputFormat::Plain => {
            for (field, summary) in stats.iter() {
                println!(
                    "{}: {} conferences ({} top-tier, {} second-tier)",
                    field, summary.total, summary.top_tier, summary.second_tier
                );
            }
        }
        OutputFormat::Table => println!("{}", statistics_table(stats)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_version() {
        let version = env!("CARGO_PKG_VERSION");
        assert!(!version.is_empty());
        let parts: Vec<&str> = version.split('.').collect();
        assert!(parts.len() >= 2);
        assert!(parts[0].parse::<u32>().is_ok());
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["conference-master"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.timeout.is_none());
        assert!(cli.catalog.is_none());
        assert!(!cli.remote_search);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verbose_and_quiet() {
        let cli = Cli::parse_from(["conference-master", "-vv"]);
        assert_eq!(cli.verbose, 2);

        let cli = Cli::parse_from(["conference-master", "--quiet"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["conference-master", "-o", "json", "stats"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.output.resolve(), OutputFormat::Json);

        let cli = Cli::parse_from(["conference-master", "stats", "--output", "plain"]);
        assert_eq!(cli.output, OutputFormat::Plain);
    }

    #[test]
    fn test_cli_global_overrides() {
        let cli = Cli::parse_from([
            "conference-master",
            "--catalog",
            "/tmp/catalog.json",
            "--timeout",
            "5",
            "--remote-search",
            "list",
        ]);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.remote_search);
    }

    #[test]
    fn test_cli_search_command() {
        let cli = Cli::parse_from(["conference-master", "search", "fuzzing"]);
        match &cli.command {
            Some(Commands::Search { query, limit, .. }) => {
                assert_eq!(query, "fuzzing");
                assert_eq!(*limit, 10);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_with_options() {
        let cli = Cli::parse_from([
            "conference-master",
            "search",
            "graph neural networks",
            "--conference",
            "neurips",
            "--field",
            "AI",
            "--tier",
            "top-tier",
            "--year",
            "2023",
            "--limit",
            "-3",
        ]);
        match &cli.command {
            Some(Commands::Search {
                query,
                conference,
                field,
                tier,
                year,
                limit,
            }) => {
                assert_eq!(query, "graph neural networks");
                assert_eq!(conference.as_deref(), Some("neurips"));
                assert_eq!(field.as_deref(), Some("AI"));
                assert_eq!(tier.as_deref(), Some("top-tier"));
                assert_eq!(*year, Some(2023));
                assert_eq!(*limit, -3);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_lookup_commands() {
        let cli = Cli::parse_from(["conference-master", "info", "ccs"]);
        assert!(matches!(cli.command, Some(Commands::Info { ref conference_id }) if conference_id == "ccs"));

        let cli = Cli::parse_from(["conference-master", "acronym", "NeurIPS"]);
        assert!(matches!(cli.command, Some(Commands::Acronym { ref acronym }) if acronym == "NeurIPS"));

        let cli = Cli::parse_from(["conference-master", "ls", "--field", "Systems"]);
        match &cli.command {
            Some(Commands::List { field, tier }) => {
                assert_eq!(field.as_deref(), Some("Systems"));
                assert!(tier.is_none());
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_serve_command() {
        let cli = Cli::parse_from(["conference-master", "serve"]);
        match &cli.command {
            Some(Commands::Serve {
                stdio,
                http,
                port,
                host,
            }) => {
                assert!(*stdio);
                assert!(!*http);
                assert_eq!(*port, 3000);
                assert_eq!(host, "127.0.0.1");
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_config_init() {
        let cli = Cli::parse_from(["conference-master", "config", "init", "--force"]);
        match &cli.command {
            Some(Commands::Config {
                command: ConfigCommands::Init { path, user, force },
            }) => {
                assert!(path.is_none());
                assert!(!*user);
                assert!(*force);
            }
            _ => panic!("Expected config init command"),
        }

        assert!(Cli::try_parse_from([
            "conference-master",
            "config",
            "init",
            "--user",
            "--path",
            "x.toml"
        ])
        .is_err());
    }

    #[test]
    fn test_resolve_config_applies_flags() {
        let cli = Cli::parse_from([
            "conference-master",
            "--config",
            "/nonexistent/conference-master.toml",
        ]);
        assert!(resolve_config(&cli).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "[remote_search]\ntimeout_seconds = 9\n").unwrap();

        let cli = Cli::parse_from([
            "conference-master",
            "--config",
            path.to_str().unwrap(),
            "--catalog",
            "/tmp/other.json",
            "--remote-search",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("/tmp/other.json"));
        assert!(config.remote_search.enabled);
        assert_eq!(config.remote_search.timeout_seconds, 9);
    }
}
