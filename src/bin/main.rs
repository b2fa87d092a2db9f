//! Mutantscan CLI
//!
//!   mutantscan serve [--host H] [--port N]   → Start HTTP server
//!   mutantscan classify <ROW>...             → {"mutant": true|false}
//!   mutantscan stats                         → {"count_mutant_dna": .., "count_human_dna": .., "ratio": ..}
//!
//! Storage:
//!   --db <url>    memory | sqlite://<path> | <path>   (env: DATABASE_URL)
//!   --app <name>  default database lives under <data dir>/<name>/
//!
//! Output format:
//!   --pretty   Pretty-print JSON (default for tty)

use anyhow::{anyhow, bail, Context, Result};
use mutantscan::logging::init_logging;
use mutantscan::node::{parse_port, DatabaseConfig};
use mutantscan::{Grid, Node, NodeConfig};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use tracing::{debug, info};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = match ParsedArgs::parse(&args[1..]) {
        Ok(opts) => opts,
        Err(e) => exit_with(&e, false),
    };

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("mutantscan {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("serve") => cmd_serve(&opts),
        Some("classify") => cmd_classify(&opts),
        Some("stats") => cmd_stats(&opts),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = opts.pretty || std::io::stdout().is_terminal();
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => exit_with(&e, pretty),
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.unwrap_or_else(|_| value.to_string())
}

fn exit_with(err: &anyhow::Error, pretty: bool) -> ! {
    eprintln!("{}", render(&json!({"error": format!("{:#}", err)}), pretty));
    std::process::exit(1);
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    rows: Vec<String>,
    app: Option<String>,
    db: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut opts = ParsedArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| iter.next().cloned().ok_or_else(|| anyhow!("{} requires a value", flag));
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--pretty" => opts.pretty = true,
                "--app" | "-a" => opts.app = Some(value(arg.as_str())?),
                "--db" | "-d" => opts.db = Some(value(arg.as_str())?),
                "--host" => opts.host = Some(value(arg.as_str())?),
                "--port" | "-p" => opts.port = Some(parse_port(&value(arg.as_str())?)?),
                flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
                _ if opts.command.is_none() => opts.command = Some(arg.clone()),
                _ => opts.rows.push(arg.clone()),
            }
        }
        Ok(opts)
    }

    /// Env (and `.env`) first, then flags on top.
    fn node_config(&self) -> Result<NodeConfig> {
        let mut config = NodeConfig::from_env().context("Invalid environment")?;
        if let Some(app) = &self.app {
            config.app = app.clone();
        }
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(db) = &self.db {
            config = config.with_database(DatabaseConfig::parse(db)?);
        }
        Ok(config)
    }
}

fn print_usage() {
    println!(
        r#"mutantscan - mutant DNA detection node

USAGE:
    mutantscan <COMMAND> [OPTIONS]

COMMANDS:
    serve                   Start HTTP server
    classify <ROW>...       Classify a grid (rows must form a square)
    stats                   Print mutant/human counts and ratio

OPTIONS:
    --db, -d <url>          memory | sqlite://<path> | <path>
    --app, -a <name>        App name (default database location)
    --host <host>           Bind host (default 0.0.0.0)
    --port, -p <port>       Bind port (default 8080)
    --pretty                Pretty-print JSON
    --help, -h              Show this help
    --version, -V           Show version

ENVIRONMENT:
    DATABASE_URL, MUTANTSCAN_HOST, MUTANTSCAN_PORT, MUTANTSCAN_APP,
    MUTANTSCAN_ROOT, MUTANTSCAN_LOG_FORMAT, RUST_LOG"#
    );
}

fn cmd_classify(opts: &ParsedArgs) -> Result<Value> {
    if opts.rows.is_empty() {
        bail!("Usage: mutantscan classify <ROW>...");
    }
    let grid = Grid::new(&opts.rows)?;
    let node = Node::from_config(opts.node_config()?)?;
    let mutant = node.classify(&grid)?;
    debug!(mutant, "classified");
    Ok(json!({"mutant": mutant}))
}

fn cmd_stats(opts: &ParsedArgs) -> Result<Value> {
    let node = Node::from_config(opts.node_config()?)?;
    Ok(serde_json::to_value(node.stats()?)?)
}

fn cmd_serve(opts: &ParsedArgs) -> Result<Value> {
    use mutantscan::install_signal_handlers;
    use mutantscan::server::{create_router, MUTANT_PATH, STATS_PATH};

    let config = opts.node_config()?;
    let addr = config.addr();
    let node = Node::from_config(config)?;

    let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;

    rt.block_on(async {
        let shutdown = install_signal_handlers();
        let router = create_router(node);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!("Mutantscan server listening on http://{}", addr);
        info!("Endpoints:");
        info!("  GET  /health              - Health check");
        info!("  POST {}        - Classify DNA", MUTANT_PATH);
        info!("  GET  {}         - Mutant/human stats", STATS_PATH);

        tokio::select! {
            result = axum::serve(listener, router) => {
                result.context("Server error")?;
            }
            _ = shutdown.wait() => {
                info!("Shutdown signal received, stopping server...");
            }
        }

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(json!({"status": "stopped"}))
}
