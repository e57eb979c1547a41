use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use client_core::{load_settings, FetchOutcome, JobListController, JobListView};
use shared::domain::JobItem;
use tracing_subscriber::EnvFilter;

/// Pages through the job listing the way a scrolling list would.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured API base URL.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Response field holding the job list (`results` or `data`).
    #[arg(long)]
    results_field: Option<String>,
    /// Stop after this many non-empty pages.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
    /// Retry presses allowed after a failed page.
    #[arg(long, default_value_t = 1)]
    retries: u32,
    /// Print jobs as JSON lines.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = &args.api_base_url {
        settings = settings.with_api_base_url(url);
    }
    if let Some(field) = &args.results_field {
        settings = settings.with_results_field(field);
    }
    let controller =
        JobListController::from_settings(&settings).context("failed to configure job source")?;

    let mut printed = 0;
    let mut retries_left = args.retries;
    let mut outcome = controller.on_mount().await;
    loop {
        let view = controller.view().await;
        printed = print_new_rows(&view, printed, args.json, Utc::now())?;

        match outcome {
            FetchOutcome::Failed { page } => {
                if let Some(banner) = &view.error_banner {
                    eprintln!("{} (page {page})", banner.message);
                }
                if retries_left == 0 {
                    break;
                }
                retries_left -= 1;
                eprintln!("Retrying...");
                outcome = controller.on_retry().await;
            }
            FetchOutcome::Appended { page, .. } if page < args.pages => {
                outcome = controller.on_end_reached().await;
            }
            _ => break,
        }
    }

    let view = controller.view().await;
    if view.show_empty_state {
        println!("No jobs found.");
    } else if !view.has_more {
        println!("-- end of list ({} jobs) --", view.items.len());
    }
    controller.unmount();

    Ok(())
}

fn print_new_rows(
    view: &JobListView,
    already_printed: usize,
    json: bool,
    now: DateTime<Utc>,
) -> Result<usize> {
    for job in view.items.iter().skip(already_printed) {
        if json {
            println!("{}", serde_json::to_string(job)?);
        } else {
            println!("{}", format_job_row(job, now));
        }
    }
    Ok(view.items.len())
}

fn format_job_row(job: &JobItem, now: DateTime<Utc>) -> String {
    let mut row = format!("[{}] {}", job.id, job.title);
    let subtitle = job.subtitle();
    if !subtitle.is_empty() {
        row.push_str(&format!(" - {subtitle}"));
    }
    if let Some(salary) = &job.salary {
        row.push_str(&format!(" ({salary})"));
    }
    if let Some(age) = job.posted_age_label(now) {
        row.push_str(&format!(", posted {age}"));
    }
    row
}
