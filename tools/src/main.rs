//! staffing-runner: headless front end for the call-centre staffing model.
//!
//! Usage:
//!   staffing-runner agents --csv forecast.csv --month 2024-03 --date 2024-03-04 --html march.html
//!   staffing-runner calls-handled --agents 50 --service-level 90
//!   staffing-runner service-level --calls 1000 --agents 50

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use staffing_core::{
    calendar::build_calendar,
    config::StaffingConfig,
    distribution::daily_hourly_distribution,
    forecast::{run_forecast, ForecastTable, StaffingTable},
    formulas::{calculate_calls_by_agents, calculate_service_level},
    params::{CapacityParams, StaffingParams},
    report,
    rng::JitterRng,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "staffing-runner")]
#[command(about = "Call-centre staffing calculator: agents required, calls handled, service level", long_about = None)]
struct Cli {
    /// Directory holding staffing_defaults.json and profiles/
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CapacityArgs {
    /// Average handle time in seconds
    #[arg(long)]
    handle_time: Option<u32>,
    /// Occupancy percentage (50-100)
    #[arg(long)]
    occupancy: Option<u32>,
    /// Shrinkage percentage (0-99)
    #[arg(long)]
    shrinkage: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Agents required per day from a forecast CSV
    Agents {
        /// CSV with Date, Day and Forecasted Call Volume columns
        #[arg(long)]
        csv: PathBuf,
        #[command(flatten)]
        capacity: CapacityArgs,
        /// Target service level percentage (50-100)
        #[arg(long)]
        service_level: Option<u32>,
        /// Month to report as YYYY-MM (defaults to the first month in the file)
        #[arg(long, value_parser = parse_year_month)]
        month: Option<(i32, u32)>,
        /// Day to split into hourly call volumes (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Seed for hourly jitter; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Write the month calendar as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
        /// Write Vega-Lite chart specs into this directory
        #[arg(long)]
        charts: Option<PathBuf>,
        /// Write the full staffing table as CSV
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the month's rows as JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Calls a team can handle while holding the service-level target
    CallsHandled {
        /// Number of agents available
        #[arg(long)]
        agents: Option<u64>,
        #[command(flatten)]
        capacity: CapacityArgs,
        /// Target service level percentage (50-100)
        #[arg(long)]
        service_level: Option<u32>,
    },

    /// Service level a team achieves against a call volume
    ServiceLevel {
        /// Total forecasted calls
        #[arg(long)]
        calls: Option<u64>,
        /// Number of agents available
        #[arg(long)]
        agents: Option<u64>,
        #[command(flatten)]
        capacity: CapacityArgs,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli.data_dir)?;

    match cli.command {
        Commands::Agents {
            csv,
            capacity,
            service_level,
            month,
            date,
            seed,
            html,
            charts,
            out,
            json,
        } => {
            let params = staffing_params(&config, &capacity, service_level)?;
            let opts = AgentsOptions { month, date, seed, html, charts, out, json };
            run_agents(&config, &csv, &params, &opts)
        }
        Commands::CallsHandled { agents, capacity, service_level } => {
            let params = staffing_params(&config, &capacity, service_level)?;
            let agents = agents.unwrap_or(config.defaults.available_agents);
            anyhow::ensure!(agents >= 1, "--agents must be at least 1");
            let calls = calculate_calls_by_agents(agents, &params);
            println!("{}", report::calls_handled_summary(agents, calls));
            Ok(())
        }
        Commands::ServiceLevel { calls, agents, capacity } => {
            let capacity = capacity_params(&config, &capacity)?;
            let calls = calls.unwrap_or(config.defaults.call_volume);
            let agents = agents.unwrap_or(config.defaults.available_agents);
            anyhow::ensure!(calls >= 1, "--calls must be at least 1");
            anyhow::ensure!(agents >= 1, "--agents must be at least 1");
            let sl = calculate_service_level(calls, &capacity, agents);
            println!("{}", report::service_level_summary(sl));
            Ok(())
        }
    }
}

struct AgentsOptions {
    month:  Option<(i32, u32)>,
    date:   Option<NaiveDate>,
    seed:   Option<u64>,
    html:   Option<PathBuf>,
    charts: Option<PathBuf>,
    out:    Option<PathBuf>,
    json:   bool,
}

fn run_agents(config: &StaffingConfig, csv: &Path, params: &StaffingParams, opts: &AgentsOptions) -> Result<()> {
    let forecast = ForecastTable::from_path(csv)
        .with_context(|| format!("Cannot load forecast {}", csv.display()))?;
    let staffing = run_forecast(&forecast, params);

    if let Some(out) = &opts.out {
        let file = std::fs::File::create(out)
            .with_context(|| format!("Cannot create {}", out.display()))?;
        staffing.write_csv(file)?;
        log::info!("runner: wrote staffing table to {}", out.display());
    }

    let months = forecast.available_months();
    let selected = opts.month.or_else(|| months.first().copied());
    match selected {
        Some((year, month)) if months.contains(&(year, month)) => {
            print_month(&staffing, year, month, opts)?;
        }
        Some((year, month)) => {
            log::warn!("runner: {year}-{month:02} not in forecast, available: {months:?}");
            println!("No data available for {year}-{month:02}.");
        }
        None => println!("Forecast file has no rows."),
    }

    if let Some(date) = opts.date {
        let mut rng = match opts.seed {
            Some(seed) => JitterRng::seeded(seed),
            None => JitterRng::from_entropy(),
        };
        log::info!("runner: hourly jitter seed {}", rng.seed());

        match daily_hourly_distribution(&forecast, date, config.defaults.jitter, &config.profiles, &mut rng) {
            Ok(dist) => {
                println!();
                println!("=== HOURLY CALL DISTRIBUTION {date} ({}) ===", dist.weekday);
                print!("{}", report::hourly_table_text(&dist));
                if let Some(dir) = &opts.charts {
                    write_json(&dir.join(format!("hourly_{date}.vl.json")), &report::hourly_chart_spec(&dist))?;
                }
            }
            Err(e) if e.is_no_data() => println!("No data available for the selected date."),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn print_month(staffing: &StaffingTable, year: i32, month: u32, opts: &AgentsOptions) -> Result<()> {
    let name = report::month_name(month)?;
    let rows = staffing.for_month(year, month);

    println!("=== DAILY AGENT REQUIREMENTS FOR {} {year} ===", name.to_uppercase());
    if opts.json {
        println!("{}", serde_json::to_string_pretty(rows.rows())?);
    } else {
        print!("{}", report::staffing_table_text(&rows));
    }

    let grid = build_calendar(&rows, year, month)?;
    if let Some(path) = &opts.html {
        let title = format!("Calendar View for {name} {year}");
        std::fs::write(path, report::html_document(&title, &report::calendar_html(&grid)))
            .with_context(|| format!("Cannot write {}", path.display()))?;
        log::info!("runner: wrote calendar to {}", path.display());
    }
    if let Some(dir) = &opts.charts {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", dir.display()))?;
        let spec = report::agents_chart_spec(&rows, year, month)?;
        write_json(&dir.join(format!("agents_{year}-{month:02}.vl.json")), &spec)?;
    }

    println!();
    println!("  days in month:  {}", grid.cells().filter(|c| c.date().is_some()).count());
    println!("  days staffed:   {}", grid.staffed_days());
    println!(
        "  peak agents:    {}",
        rows.rows().iter().map(|r| r.agents_with_shrinkage).max().unwrap_or(0)
    );
    Ok(())
}

fn load_config(data_dir: &Path) -> Result<StaffingConfig> {
    if data_dir.is_dir() {
        StaffingConfig::load(&data_dir.to_string_lossy())
    } else {
        log::warn!("runner: {} not found, using built-in profiles", data_dir.display());
        Ok(StaffingConfig::default())
    }
}

fn capacity_params(config: &StaffingConfig, args: &CapacityArgs) -> Result<CapacityParams> {
    let d = &config.defaults;
    Ok(CapacityParams::from_percentages(
        args.handle_time.unwrap_or(d.handle_time_secs),
        args.occupancy.unwrap_or(d.occupancy_pct),
        args.shrinkage.unwrap_or(d.shrinkage_pct),
    )?)
}

fn staffing_params(config: &StaffingConfig, args: &CapacityArgs, service_level: Option<u32>) -> Result<StaffingParams> {
    let d = &config.defaults;
    Ok(StaffingParams::from_percentages(
        args.handle_time.unwrap_or(d.handle_time_secs),
        args.occupancy.unwrap_or(d.occupancy_pct),
        args.shrinkage.unwrap_or(d.shrinkage_pct),
        service_level.unwrap_or(d.service_level_pct),
    )?)
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("Cannot write {}", path.display()))?;
    log::info!("runner: wrote chart spec {}", path.display());
    Ok(())
}

fn parse_year_month(s: &str) -> Result<(i32, u32), String> {
    let (y, m) = s
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))?;
    let year: i32 = y.parse().map_err(|_| format!("bad year in '{s}'"))?;
    let month: u32 = m.parse().map_err(|_| format!("bad month in '{s}'"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month must be 1-12, got {month}"));
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_argument() {
        assert_eq!(parse_year_month("2024-03"), Ok((2024, 3)));
        assert_eq!(parse_year_month("2025-12"), Ok((2025, 12)));
        assert!(parse_year_month("2024-13").is_err());
        assert!(parse_year_month("2024-00").is_err());
        assert!(parse_year_month("garbage").is_err());
        assert!(parse_year_month("24-x").is_err());
    }
}
