use crate::{
    analytics,
    config::Config,
    dashboard, fixture,
    model::{Category, Report, ReportId, Status},
    query::{self, ReportQuery, SearchOptions, Selector, SortKey},
    stats,
    triage::{self, StatusUpdate},
    util::{ensure_dir, timestamp_or_now},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "civic-triage")]
#[command(about = "Query, analytics and triage over civic-issue reports")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./civic-triage.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report fixture (JSON). Overrides data.fixture_path.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: Selector<Status>,
        #[arg(long, default_value = "all")]
        category: Selector<Category>,
        #[arg(long, default_value = "newest")]
        sort: SortKey,
    },
    Show {
        #[arg(long)]
        id: ReportId,
    },
    Stats {},
    Categories {},
    Trends {
        /// Keep only the most recent N months.
        #[arg(long)]
        months: Option<usize>,
    },
    Analytics {
        /// Reference time for overdue checks (RFC 3339). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
    Dashboard {},
    Triage {
        #[arg(long)]
        id: ReportId,
        #[arg(long)]
        status: Status,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long)]
        at: Option<String>,
        /// Save the updated collection back to the fixture file.
        #[arg(long)]
        write: bool,
    },
    Settings {},
}

pub fn dispatch(args: Args) -> Result<()> {
    let loaded = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path),
        None => Ok(Config::default()),
    };
    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(err) => {
            // No logging config yet; defaults keep the load error visible.
            let _guard = init_logging(&args, &Config::default())?;
            return Err(err);
        }
    };
    let _guard = init_logging(&args, &cfg)?;

    let mut reports = fixture::resolve(&cfg, args.data.as_deref())?;
    debug!("working set has {} reports", reports.len());

    match &args.cmd {
        Command::List {
            search,
            status,
            category,
            sort,
        } => {
            let q = ReportQuery {
                search_term: search.clone(),
                status: *status,
                category: *category,
                sort: *sort,
            };
            list(&cfg, &reports, &q)
        }
        Command::Show { id } => {
            let report = query::lookup_by_id(&reports, *id)?;
            print_json(report)
        }
        Command::Stats {} => print_json(&stats::aggregate_stats(&reports)),
        Command::Categories {} => print_json(&stats::category_distribution(&reports)),
        Command::Trends { months } => {
            let window = months.or(Some(cfg.analytics.trend_months));
            print_json(&serde_json::json!({
                "monthly": analytics::monthly_trends(&reports, window),
                "severity": analytics::severity_trends(&reports, window),
            }))
        }
        Command::Analytics { at } => {
            let now = timestamp_or_now(at.as_deref())?;
            print_json(&serde_json::json!({
                "resolution_rate": analytics::resolution_rate(&reports),
                "resolution_times": analytics::resolution_times(&reports, &cfg.analytics),
                "overdue": analytics::overdue(&reports, &cfg.thresholds, now),
                "verification": analytics::verification_summary(&reports),
            }))
        }
        Command::Dashboard {} => print_json(&dashboard::summarize(&cfg, &reports)?),
        Command::Triage {
            id,
            status,
            notes,
            at,
            write,
        } => {
            let now = timestamp_or_now(at.as_deref())?;
            let update = StatusUpdate {
                id: *id,
                status: *status,
                notes: notes.clone(),
            };
            let updated = triage::update_status(&mut reports, &update, now, &cfg.triage)?;
            if *write {
                let target = fixture_target(&args, &cfg)?;
                fixture::save(&target, &reports)?;
                info!("saved {} reports to {}", reports.len(), target.display());
            }
            print_json(&updated)
        }
        Command::Settings {} => {
            print!("{}", toml::to_string(&cfg)?);
            Ok(())
        }
    }
}

fn list(cfg: &Config, reports: &[Report], q: &ReportQuery) -> Result<()> {
    let opts = SearchOptions {
        normalize_unicode: cfg.search.normalize_unicode,
    };
    let shown = query::filter_and_sort(reports, q, opts);
    info!(
        "query search={:?} status={} category={} sort={} -> {} of {}",
        q.search_term,
        q.status,
        q.category,
        q.sort,
        shown.len(),
        reports.len()
    );
    print_json(&serde_json::json!({
        "shown": shown.len(),
        "total": reports.len(),
        "reports": shown,
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fixture_target(args: &Args, cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &args.data {
        return Ok(p.clone());
    }
    if !cfg.data.fixture_path.is_empty() {
        return Ok(PathBuf::from(&cfg.data.fixture_path));
    }
    Err(anyhow!(
        "--write needs a fixture file (pass --data or set data.fixture_path)"
    ))
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    ["civic-triage.toml", "civic-triage.example.toml"]
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the JSON results.
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = match resolve_log_path(cfg) {
        Some(path) => {
            let parent = path.parent().unwrap_or_else(|| Path::new("."));
            ensure_dir(parent)?;
            let file = std::fs::File::create(&path)
                .with_context(|| format!("create log file: {}", path.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }
    Some(PathBuf::from("civic-triage.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_config_installs_default_logging() {
        let dir = std::env::temp_dir().join(format!("civic-triage-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[dashboard\nrecent_limit = ").unwrap();

        let args = Args::parse_from([
            "civic-triage",
            "--config",
            path.to_str().unwrap(),
            "stats",
        ]);
        let err = dispatch(args).unwrap_err();
        assert!(format!("{err:#}").contains("parsing TOML"));
        assert!(tracing::dispatcher::has_been_set());

        std::fs::remove_dir_all(&dir).ok();
    }
}
