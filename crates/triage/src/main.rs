use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use triage::cli::commands;
use triage::client::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
use triage::Field;

#[derive(Parser)]
#[command(name = "triage")]
#[command(
  about = "Triage - Incident Search and Resolution Insights\nSearch past incidents and summarise how related ones were resolved"
)]
#[command(version)]
struct Cli {
  /// Base URL of the search service
  #[arg(long, global = true, env = "TRIAGE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
  server: String,

  /// Request timeout in seconds
  #[arg(long, global = true, env = "TRIAGE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
  timeout: u64,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Search incidents by one field
  Search {
    /// Field to search (label such as "Assigned Group" or alias such as assigned_group)
    #[arg(short, long, default_value_t = Field::IncidentId)]
    field: Field,
    /// Rows to select for an insight, numbered from 1 (e.g. --select 1,3)
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<usize>,
    /// Copy the insight to the clipboard
    #[arg(long, requires = "select")]
    copy: bool,
    /// Search terms (space-separated)
    #[arg(required = true)]
    terms: Vec<String>,
  },
  /// Start an interactive results panel
  Interactive {
    /// Field to search initially
    #[arg(short, long, default_value_t = Field::IncidentId)]
    field: Field,
  },
  /// List the fields a search can be scoped to
  Fields,
  /// Ask the server to rebuild its search index
  Reindex,
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("triage=debug,warn")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triage=info,warn"))
  };

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

async fn handle(command: Command, config: ClientConfig) -> Result<()> {
  match command {
    Command::Search { field, select, copy, terms } => {
      commands::search(config, field, &terms, &select, copy).await
    }
    Command::Interactive { field } => commands::interactive(config, field).await,
    Command::Fields => commands::list_fields(),
    Command::Reindex => commands::reindex(config).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let config = ClientConfig { base_url: cli.server, timeout_secs: cli.timeout };
  handle(cli.command, config).await
}
