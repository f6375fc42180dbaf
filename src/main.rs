use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use eoc_dashboard::commission::{commission_summary, UnknownEmployee};
use eoc_dashboard::directory::{EmployeeDirectory, Role};
use eoc_dashboard::filter::{filter_records, filter_values};
use eoc_dashboard::leads::lead_summary;
use eoc_dashboard::models::{FilterCriteria, Record};
use eoc_dashboard::{kpi, parse_backend_date, report, rollup, series, source};

#[derive(Parser)]
#[command(name = "eoc-dashboard")]
#[command(about = "Sales call and lead metrics from a flat record export", long_about = None)]
struct Cli {
    /// Record export (.csv or .json); defaults to $EOC_RECORDS
    #[arg(long, global = true)]
    records: Option<PathBuf>,
    /// Employee directory JSON; defaults to $EOC_DIRECTORY, then the built-in roster
    #[arg(long, global = true)]
    directory: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List distinct values for each filter control
    FilterValues,
    /// Key metrics for the filtered calls
    Kpis {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Day-keyed and categorical chart series
    Charts {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Per-person cash rollup
    Rollup {
        #[arg(long, value_enum)]
        role: RollupRole,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Flat call rows, newest first
    Calls {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Commission totals per role
    Commission {
        #[command(flatten)]
        filter: FilterArgs,
        /// Fail instead of counting unknown employees as zero
        #[arg(long)]
        strict_commission: bool,
    },
    /// Lead page metrics
    Leads {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Every dashboard structure in one document
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long)]
        strict_commission: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RollupRole {
    Closer,
    Setter,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    funnel: Option<String>,
    #[arg(long)]
    coach: Option<String>,
    #[arg(long)]
    closer: Option<String>,
    #[arg(long)]
    setter: Option<String>,
    /// First day to include (M/D/YYYY or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    from: Option<NaiveDate>,
    /// Last day to include (M/D/YYYY or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    to: Option<NaiveDate>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            platform: args.platform,
            coach: args.coach,
            closer: args.closer,
            setter: args.setter,
            funnel: args.funnel,
            date_from: args.from,
            date_to: args.to,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Charts {
    cash_by_day: Vec<eoc_dashboard::DatePoint>,
    close_rate_by_day: Vec<eoc_dashboard::DatePoint>,
    show_rate_by_day: Vec<eoc_dashboard::DatePoint>,
    lead_sources: Vec<eoc_dashboard::CategoryPoint>,
    funnels: Vec<eoc_dashboard::CategoryPoint>,
    situations: Vec<eoc_dashboard::CategoryPoint>,
    outcomes: Vec<eoc_dashboard::CategoryPoint>,
    coaches: Vec<eoc_dashboard::CategoryPoint>,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_backend_date(raw).ok_or_else(|| format!("expected M/D/YYYY or YYYY-MM-DD, got {raw:?}"))
}

fn policy(strict: bool) -> UnknownEmployee {
    if strict {
        UnknownEmployee::Fail
    } else {
        UnknownEmployee::Skip
    }
}

fn resolve_path(flag: Option<PathBuf>, env_key: &str) -> Option<PathBuf> {
    flag.or_else(|| std::env::var(env_key).ok().map(PathBuf::from))
}

fn load_records(flag: Option<PathBuf>) -> anyhow::Result<Vec<Record>> {
    let path = resolve_path(flag, "EOC_RECORDS")
        .context("pass --records or set EOC_RECORDS to a .csv or .json export")?;
    source::load_records(&path)
        .with_context(|| format!("failed to load records from {}", path.display()))
}

fn load_directory(flag: Option<PathBuf>) -> anyhow::Result<EmployeeDirectory> {
    match resolve_path(flag, "EOC_DIRECTORY") {
        Some(path) => source::load_directory(&path)
            .with_context(|| format!("failed to load directory from {}", path.display())),
        None => Ok(EmployeeDirectory::builtin()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn write_report(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let records = load_records(cli.records)?;

    match cli.command {
        Commands::FilterValues => {
            print_json(&filter_values(&records))?;
        }
        Commands::Kpis { filter } => {
            print_json(&kpi::calculate_kpis(&records, &filter.into()))?;
        }
        Commands::Charts { filter } => {
            let rows = filter_records(&records, &filter.into());
            print_json(&Charts {
                cash_by_day: series::cash_by_day(&rows),
                close_rate_by_day: series::close_rate_by_day(&rows),
                show_rate_by_day: series::show_rate_by_day(&rows),
                lead_sources: series::lead_source_breakdown(&rows),
                funnels: series::funnel_breakdown(&rows),
                situations: series::situation_breakdown(&rows),
                outcomes: series::outcome_breakdown(&rows),
                coaches: series::coach_breakdown(&rows),
            })?;
        }
        Commands::Rollup { role, filter } => {
            let rows = filter_records(&records, &filter.into());
            let role = match role {
                RollupRole::Closer => Role::Closer,
                RollupRole::Setter => Role::Setter,
            };
            print_json(&rollup::rollup_by(&rows, role))?;
        }
        Commands::Calls { filter, limit } => {
            let rows = filter_records(&records, &filter.into());
            let mut calls = rollup::call_rows(&rows);
            if let Some(limit) = limit {
                calls.truncate(limit);
            }
            print_json(&calls)?;
        }
        Commands::Commission {
            filter,
            strict_commission,
        } => {
            let directory = load_directory(cli.directory)?;
            let summary = commission_summary(
                &records,
                &filter.into(),
                &directory,
                policy(strict_commission),
            )?;
            print_json(&summary)?;
        }
        Commands::Leads { filter } => {
            print_json(&lead_summary(&records, &filter.into()))?;
        }
        Commands::Dashboard { filter } => {
            print_json(&report::build_view(&records, &filter.into()))?;
        }
        Commands::Report {
            filter,
            out,
            strict_commission,
        } => {
            let directory = load_directory(cli.directory)?;
            let report = report::build_report(
                &records,
                &filter.into(),
                &directory,
                policy(strict_commission),
            )?;
            write_report(&out, &report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
