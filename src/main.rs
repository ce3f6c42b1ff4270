use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use req_idx::config::Config;
use req_idx::core::seed::seed_records;
use req_idx::core::{Record, StatusEvent};
use req_idx::directory::{Directory, SortKey, LOCATION_NOT_FOUND};
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "req-idx",
    about = "In-memory service request directory: sorted indexes, job heap and location graph",
    version
)]
struct Cli {
    /// Path to config.toml (defaults to <config_dir>/req-idx/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List requests through one of the sorted indexes
    List {
        #[arg(long, value_enum, default_value = "id")]
        sort: SortBy,

        /// Keep ids containing this text, or matching it as a glob (`*`, `?`)
        #[arg(long)]
        filter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one request
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Requests to act on next (earliest ETA, then highest priority)
    Next {
        /// How many to show (defaults to `jobs.next` from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Advance a request one status step (Open -> InProgress -> Closed)
    Advance { id: String },

    /// Close a request and every request depending on it
    Resolve { id: String },

    /// Breadth-first tour of the location graph
    Bfs { location: String },

    /// Depth-first tour of the location graph
    Dfs { location: String },

    /// Minimum spanning network between locations
    Mst,

    /// Index and graph statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Id,
    Created,
    Priority,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_records(records: &[&Record], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    for r in records {
        println!(
            "{:<6} {:<9} {:<11} {:<14} {}",
            r.id, r.priority, r.status, r.location, r.title
        );
    }
    Ok(())
}

/// 先打印迁移事件，再打印受影响记录的当前状态
fn print_events(dir: &Directory, events: &[StatusEvent]) -> anyhow::Result<()> {
    for e in events {
        println!("{e}");
    }
    if events.is_empty() {
        return Ok(());
    }
    println!();
    let touched: Vec<&Record> = events
        .iter()
        .filter_map(|e| dir.get_by_id(&e.id))
        .collect();
    print_records(&touched, false)
}

fn print_path(dir: &Directory, location: &str, path: String) {
    println!("{path}");
    if path == LOCATION_NOT_FOUND {
        let hints = dir.suggest_locations(location, 3);
        if !hints.is_empty() {
            println!("Did you mean: {}?", hints.join(", "));
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.log.filter);

    info!("Starting req-idx");

    let graph = config.location_graph()?;
    let mut dir = Directory::new(seed_records(SystemTime::now()), graph)
        .context("building directory from seed data")?
        .with_distance_unit(config.graph.unit.clone());

    match cli.command {
        Commands::List { sort, filter, json } => {
            let key = match sort {
                SortBy::Id => SortKey::Id,
                SortBy::Created => SortKey::Created,
                SortBy::Priority => SortKey::Priority,
            };
            let records = match filter {
                Some(pattern) => dir.filter_sorted(&pattern, key),
                None => dir.sorted(key),
            };
            print_records(&records, json)?;
        }
        Commands::Show { id, json } => {
            let record = dir
                .get_by_id(&id)
                .with_context(|| format!("no request found with id {id}"))?;
            print_records(&[record], json)?;
        }
        Commands::Next { count, json } => {
            let n = count.unwrap_or(config.jobs.next);
            print_records(&dir.get_next_jobs(n), json)?;
        }
        Commands::Advance { id } => {
            let events = dir.update_status(&id)?;
            if events.is_empty() {
                println!("{id}: already closed, nothing to do");
            }
            print_events(&dir, &events)?;
        }
        Commands::Resolve { id } => {
            let events = dir.resolve_request(&id)?;
            print_events(&dir, &events)?;
        }
        Commands::Bfs { location } => {
            let path = dir.run_bfs(&location);
            print_path(&dir, &location, path);
        }
        Commands::Dfs { location } => {
            let path = dir.run_dfs(&location);
            print_path(&dir, &location, path);
        }
        Commands::Mst => {
            let summary = dir.get_mst_summary();
            if summary.is_empty() {
                println!("No spanning network: the location graph is empty or disconnected.");
            } else {
                println!("{summary}");
            }
        }
        Commands::Stats { json } => {
            let report = dir.report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
    }

    Ok(())
}
