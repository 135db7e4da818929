use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;
use summit::report::ExportDocument;
use summit::scheduler::{RunSummary, build_conflict_matrix, compute_demand_scores};
use summit::{EventInput, Schedule, ScheduleReport, Scheduler};

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("summit")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("summit.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn load_schedule(input: &Path, config: &Config) -> Result<Schedule> {
    let event = EventInput::from_path(input).context(format!("Failed to read event file {}", input.display()))?;
    let schedule = event
        .into_schedule(config.scheduler.capacity_buffer)
        .context(format!("Invalid event data in {}", input.display()))?;
    Ok(schedule)
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Run {
            input,
            top_k,
            max_passes,
            export,
        } => {
            let config = config.clone().with_overrides(*top_k, *max_passes);
            handle_run_command(input, export.as_deref(), &config, cli.is_verbose())
        }
        Commands::Check { input } => handle_check_command(input, config),
        Commands::Demand { input, top_k } => {
            let config = config.clone().with_overrides(*top_k, None);
            handle_demand_command(input, &config)
        }
    }
}

fn handle_run_command(input: &Path, export: Option<&Path>, config: &Config, verbose: bool) -> Result<()> {
    let mut schedule = load_schedule(input, config)?;
    let outcome = Scheduler::new(config.scheduler.clone())
        .run(&mut schedule)
        .context("Scheduling failed")?;
    let report = ScheduleReport::build(&schedule, &config.report, &config.scheduler);

    println!("{}", "Sessions".bold());
    for session in &report.sessions {
        let block = session.block.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string());
        let room = match (&session.room, session.effective_capacity) {
            (Some(room), Some(cap)) => format!("{} ({}/{})", room, session.headcount, cap),
            _ => format!("{} ({})", "no room".red(), session.headcount),
        };
        println!("  block {}  {:<16} {:<32} {}", block, session.occ_id, session.title, room);
    }

    let optimizer = &outcome.optimizer;
    let status = if optimizer.converged {
        "converged".green()
    } else {
        "not converged".yellow()
    };
    println!(
        "\nOptimizer: {} after {} passes, {} moves",
        status, optimizer.passes, optimizer.total_moves
    );
    if verbose {
        for stats in &optimizer.pass_stats {
            println!(
                "  pass {}: {} overfull, {} underfull, {} stale, {} roomless",
                stats.pass, stats.overfull_moves, stats.underfull_moves, stats.skipped_stale, stats.roomless
            );
        }
    }

    let satisfaction = &report.satisfaction;
    println!("\n{}", "Preference satisfaction".bold());
    for (rank, count) in &satisfaction.by_rank {
        println!("  choice #{:<3} {}", rank + 1, count);
    }
    println!("  unranked    {}", satisfaction.unranked);
    println!(
        "  {} low-satisfaction seats, {} participants missing a block",
        report.low_satisfaction.len(),
        report.unassigned.len()
    );

    if report.is_clean() {
        println!("\n{}", "No warnings".green());
    } else {
        for warning in &report.warnings {
            println!("{} {}", "warning:".yellow(), warning);
        }
    }

    if let Some(path) = export {
        let document = ExportDocument::new(&schedule, RunSummary::from(&outcome), report);
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "yml" | "yaml"));
        let content = if is_yaml { document.to_yaml()? } else { document.to_json()? };
        fs::write(path, content).context(format!("Failed to write export to {}", path.display()))?;
        println!("{} {}", "Exported to".green(), path.display());
    }

    Ok(())
}

fn handle_check_command(input: &Path, config: &Config) -> Result<()> {
    let schedule = load_schedule(input, config)?;
    let doubles = schedule.talks().iter().filter(|t| t.can_run_twice()).count();
    println!(
        "{} {} talks ({} may run twice), {} rooms, {} participants",
        "OK".green(),
        schedule.talks().len(),
        doubles,
        schedule.rooms().len(),
        schedule.participants().len()
    );
    Ok(())
}

fn handle_demand_command(input: &Path, config: &Config) -> Result<()> {
    let mut schedule = load_schedule(input, config)?;
    let top_k = config.scheduler.top_k;
    compute_demand_scores(&mut schedule, top_k)?;
    let conflict = build_conflict_matrix(&schedule, top_k)?;

    let mut talks: Vec<_> = schedule.talks().iter().collect();
    talks.sort_by(|a, b| b.demand_score.cmp(&a.demand_score));

    println!("{} (top {})", "Demand".bold(), top_k);
    for talk in talks {
        println!("  {:>6}  {:<16} {}", talk.demand_score, talk.talk_id, talk.title);
    }

    println!("\n{}", "Most competing pairs".bold());
    for (a, b, count) in conflict.top_pairs(10) {
        println!("  {:>6}  {} / {}", count, a, b);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with the configured level
    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
