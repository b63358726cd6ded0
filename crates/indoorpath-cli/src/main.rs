use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use indoorpath_cli::commands::landmarks::handle_landmarks_command;
use indoorpath_cli::commands::route::{handle_route_command, RouteCommandArgs};
use indoorpath_cli::output::OutputFormat;
use indoorpath_lib::{LandmarkCategory, PathMode, DEFAULT_MAX_SUBGRAPH_DEPTH, DEFAULT_TIMEZONE};

const DATA_PATH_ENV: &str = "INDOORPATH_DATA_PATH";
const DEFAULT_DATA_PATH: &str = "/data/building.json";

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor building path planning utilities")]
struct Cli {
    /// Building dataset (JSON). Defaults to $INDOORPATH_DATA_PATH, then /data/building.json.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// IANA time zone used for opening hours.
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Evaluate opening hours at this RFC 3339 instant instead of now.
    #[arg(long, global = true)]
    at: Option<String>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a path from a landmark to a landmark or category.
    Route {
        /// Source landmark name.
        #[arg(long = "from")]
        from: String,
        /// Destination landmark name, or a category such as `printer`.
        #[arg(long = "to")]
        to: String,
        /// Search mode: `bfs` or `graph`.
        #[arg(long, default_value = "bfs")]
        mode: PathMode,
        /// Allow stairs and other inaccessible nodes.
        #[arg(long)]
        no_accessible: bool,
        /// Depth cap for graph mode.
        #[arg(long, default_value_t = DEFAULT_MAX_SUBGRAPH_DEPTH)]
        max_depth: usize,
    },
    /// List landmarks with their current availability.
    Landmarks {
        /// Only list landmarks of this category.
        #[arg(long)]
        category: Option<LandmarkCategory>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data_path = resolve_data_path(cli.data);
    let now = resolve_now(cli.timezone.as_deref(), cli.at.as_deref())?;

    match cli.command {
        Command::Route {
            from,
            to,
            mode,
            no_accessible,
            max_depth,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                mode,
                accessible: !no_accessible,
                max_depth,
            };
            handle_route_command(&data_path, &now, cli.format, &args)
        }
        Command::Landmarks { category } => {
            handle_landmarks_command(&data_path, &now, cli.format, category)
        }
    }
}

fn resolve_data_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| {
        std::env::var(DATA_PATH_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn resolve_now(timezone: Option<&str>, at: Option<&str>) -> Result<DateTime<Tz>> {
    let tz = match timezone {
        Some(name) => name
            .trim()
            .parse::<Tz>()
            .map_err(|e| anyhow!("unknown time zone '{}': {}", name, e))?,
        None => DEFAULT_TIMEZONE,
    };

    match at {
        Some(raw) => {
            let instant = DateTime::parse_from_rfc3339(raw.trim())
                .with_context(|| format!("invalid --at timestamp '{}'", raw))?;
            Ok(instant.with_timezone(&tz))
        }
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
