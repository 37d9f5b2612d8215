// Schedule grid
// Command line driver for the grid engine

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use clap::Parser;

use schedule_grid::models::appointment::Appointment;
use schedule_grid::models::view_mode::ViewMode;
use schedule_grid::services::controller::GridController;
use schedule_grid::services::drag_drop::{MoveCommitService, MoveRequest, SlotRegistry};
use schedule_grid::services::feedback::FeedbackSink;
use schedule_grid::services::gesture::PointerEvent;
use schedule_grid::services::grid::GridLayout;
use schedule_grid::services::settings::{load_settings, SettingsService};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Date to show (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// day, week or month; defaults to the configured view
    #[arg(long)]
    view: Option<ViewMode>,

    /// JSON file holding an array of appointments
    #[arg(long)]
    appointments: Option<PathBuf>,

    /// JSON file holding an array of pointer events to replay
    #[arg(long)]
    script: Option<PathBuf>,

    /// Settings TOML; defaults to the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject every move commit
    #[arg(long, default_value_t = false)]
    fail_commits: bool,
}

/// Commit service that only logs what it would persist.
struct LoggingCommits {
    fail: bool,
}

#[async_trait]
impl MoveCommitService for LoggingCommits {
    async fn commit(&self, request: MoveRequest) -> Result<()> {
        log::info!(
            "Commit #{}: {} -> {} {}",
            request.sequence,
            request.appointment_id,
            request.new_date,
            request.new_time.format("%H:%M")
        );
        if self.fail {
            anyhow::bail!("commits disabled by --fail-commits");
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    log::info!("Starting schedule-grid");

    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => SettingsService::platform_default().load()?,
    };
    let appointments = match &cli.appointments {
        Some(path) => load_appointments(path)?,
        None => Vec::new(),
    };

    let layout = GridLayout::new(settings.slot_step_minutes);
    let mut controller = GridController::new(
        &settings,
        appointments,
        SlotRegistry::new(),
        Arc::new(LoggingCommits {
            fail: cli.fail_commits,
        }),
        FeedbackSink::logging(),
        tokio::runtime::Handle::current(),
    );
    if let Some(date) = cli.date {
        controller.set_current_date(date);
    }
    if let Some(view) = cli.view {
        controller.set_view(view);
    }
    controller.relayout(&layout);

    print_grid(&controller);

    let Some(script) = &cli.script else {
        return Ok(());
    };
    let events = load_script(script)?;
    let mut commits = Vec::new();
    for event in events {
        let mut result = controller.poll(event.timestamp_ms);
        result.merge(controller.handle_pointer(event));
        for intent in &result.intents {
            println!("{}", serde_json::to_string(intent)?);
        }
        if result.has_actions() {
            controller.relayout(&layout);
        }
        commits.extend(result.commits);
    }

    for commit in commits {
        let id = commit.request().appointment_id.clone();
        println!("commit {}: {:?}", id, commit.outcome().await);
    }

    println!();
    print_grid(&controller);
    Ok(())
}

fn load_appointments(path: &Path) -> Result<Vec<Appointment>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read appointments from {}", path.display()))?;
    let appointments: Vec<Appointment> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse appointments from {}", path.display()))?;

    Ok(appointments
        .into_iter()
        .filter(|apt| match apt.validate() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Skipping appointment: {}", err);
                false
            }
        })
        .collect())
}

fn load_script(path: &Path) -> Result<Vec<PointerEvent>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read script from {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse pointer events from {}", path.display()))
}

fn print_grid(controller: &GridController<SlotRegistry>) {
    let (first, last) = controller.visible_range();
    println!("{} view, {} to {}", controller.view(), first, last);
    if !controller.time_grid().is_empty() {
        println!("slots: {}", controller.time_grid().join(" "));
    }

    for day in controller.grid() {
        let mut flags = Vec::new();
        if day.is_today {
            flags.push("today");
        }
        if !day.is_current_period {
            flags.push("outside");
        }
        if day.is_weekend {
            flags.push("weekend");
        }

        let mut line = format!(
            "{} {}  {} appointment(s)",
            day.date.format("%a"),
            day.date,
            day.appointment_count()
        );
        if controller.view() != ViewMode::Month {
            line.push_str(&format!(", {} free slot(s)", day.free_slot_count()));
        }
        if !flags.is_empty() {
            line.push_str(&format!(" [{}]", flags.join(", ")));
        }
        println!("{}", line);

        for apt in &day.appointments {
            println!(
                "    {}-{} {} {}",
                apt.start_time.format("%H:%M"),
                apt.end_time.format("%H:%M"),
                apt.id,
                apt.service_name
            );
        }
    }
}
