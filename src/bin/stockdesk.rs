use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use stockdesk::cache::CacheConfig;
use stockdesk::cli::{self, Command, OutputMode};
use stockdesk::config;
use stockdesk::errors::ConsoleError;
use stockdesk::query::DEFAULT_PAGE_SIZE;
use stockdesk::session::Session;
use stockdesk::source::{ClientSource, DataSource, FileSource, MemorySource, ServerSource, SourceMode};

#[derive(Parser, Debug)]
#[command(name = "stockdesk", version, about = "Inventory console data layer CLI", long_about = None)]
struct Cli {
    /// Path to a config file (TOML). If omitted, defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding <dataset>.json dumps. Takes precedence over config/env.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// client (bulk fetch + local evaluation) or server
    #[arg(long, global = true)]
    mode: Option<String>,
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,
    /// Emit plain, line-oriented output
    #[arg(long, global = true)]
    plain: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "List the datasets the console knows")]
    Datasets,
    #[command(about = "Evaluate a query over a dataset and print one result page")]
    Query {
        #[arg(help = "Dataset: products|stocks|movements|users")]
        dataset: String,
        #[arg(long, help = "Case-insensitive free-text search")]
        search: Option<String>,
        #[arg(long = "filter", value_name = "FIELD=VALUE", help = "Exact-match field filter; repeatable")]
        filters: Vec<String>,
        #[arg(long, help = "Lower date bound (ISO, inclusive)")]
        from: Option<String>,
        #[arg(long, help = "Upper date bound (ISO, inclusive)")]
        to: Option<String>,
        #[arg(long, help = "Sort as field,direction; defaults per dataset")]
        sort: Option<String>,
        #[arg(long, default_value_t = 0, help = "0-based page index")]
        page: usize,
        #[arg(long, help = "Page size; defaults from config, then 10")]
        size: Option<usize>,
    },
    #[command(about = "Count the records a query would match")]
    Count {
        dataset: String,
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    #[command(about = "Export the filtered view to a local file (csv|ndjson)")]
    Export {
        dataset: String,
        file: PathBuf,
        #[arg(long, help = "csv (default) or ndjson")]
        format: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        sort: Option<String>,
    },
    #[command(subcommand, about = "Manage the saved session")]
    Session(SessionCmd),
    #[command(about = "Check route access for the saved session")]
    Guard {
        #[arg(long, help = "Required role; bare or ROLE_-prefixed")]
        role: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCmd {
    #[command(about = "Store a bearer credential for later runs")]
    Set {
        #[arg(long)]
        token: String,
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "ROLE_USER", help = "Comma-joined roles")]
        roles: String,
    },
    #[command(about = "Show the saved session")]
    Show,
    #[command(about = "Forget the saved session")]
    Clear,
}

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), ConsoleError> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.clone());
    match &cfg.log_config {
        Some(path) => stockdesk::logger::init_from_file(path)?,
        None => stockdesk::logger::init()?,
    }

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.plain {
        OutputMode::Plain
    } else {
        OutputMode::Human
    };

    let session = Arc::new(Session::new());
    if let Some(path) = stockdesk::session::default_path()
        && let Err(e) = stockdesk::session::load_into(&session, &path)
    {
        log::warn!("session: ignoring saved file: {e}");
    }

    // Session and guard commands run without any dataset behind them.
    let needs_data =
        matches!(cli.command, Commands::Query { .. } | Commands::Count { .. } | Commands::Export { .. });
    let source: Box<dyn DataSource> = if needs_data {
        build_source(&cli, &cfg)?
    } else {
        Box::new(ServerSource::new(Arc::new(MemorySource::new())))
    };
    let command = to_command(cli.command, &cfg)?;
    cli::run(source.as_ref(), &session, command, mode)
}

fn build_source(cli: &Cli, cfg: &config::ConsoleConfig) -> Result<Box<dyn DataSource>, ConsoleError> {
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| cfg.data_dir.clone())
        .ok_or_else(|| ConsoleError::Config("no data directory; pass --data-dir".into()))?;
    let fetcher = Arc::new(FileSource::new(data_dir));
    let mode: SourceMode = match cli.mode.as_deref().or(cfg.mode.as_deref()) {
        Some(raw) => raw.parse()?,
        None => SourceMode::default(),
    };
    Ok(match mode {
        SourceMode::Client => {
            let cache = CacheConfig { stale_after: cfg.stale_after(), ..CacheConfig::default() };
            Box::new(ClientSource::with_cache_config(fetcher, cache))
        }
        SourceMode::Server => Box::new(ServerSource::new(fetcher)),
    })
}

fn to_command(cmd: Commands, cfg: &config::ConsoleConfig) -> Result<Command, ConsoleError> {
    Ok(match cmd {
        Commands::Datasets => Command::Datasets,
        Commands::Query { dataset, search, filters, from, to, sort, page, size } => Command::Query {
            dataset,
            search,
            filters: parse_filters(filters)?,
            from,
            to,
            sort,
            page,
            size: size.or(cfg.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
        },
        Commands::Count { dataset, search, filters, from, to } => Command::Count {
            dataset,
            search,
            filters: parse_filters(filters)?,
            from,
            to,
        },
        Commands::Export { dataset, file, format, search, filters, from, to, sort } => {
            Command::Export {
                dataset,
                file,
                format,
                search,
                filters: parse_filters(filters)?,
                from,
                to,
                sort,
            }
        }
        Commands::Session(SessionCmd::Set { token, username, roles }) => {
            Command::SessionSet { token, username, roles, file: None }
        }
        Commands::Session(SessionCmd::Show) => Command::SessionShow,
        Commands::Session(SessionCmd::Clear) => Command::SessionClear { file: None },
        Commands::Guard { role } => Command::GuardCheck { role },
    })
}

fn parse_filters(raw: Vec<String>) -> Result<Vec<(String, String)>, ConsoleError> {
    raw.iter().map(|r| cli::parse_filter_arg(r)).collect()
}
