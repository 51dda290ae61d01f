use std::str::FromStr;

use chrono::Utc;
use chrono_tz::Tz;
use cron::Schedule;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{jobs::sync::run_sync_job, state::AppState};

/// Background cron loop driving the TMDb sync job.
///
/// Owned by whoever started it; there is no global instance. Dropping it
/// without calling [`Scheduler::shutdown`] leaves the loop running until the
/// runtime stops.
pub struct Scheduler {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Scheduler {
    /// Starts the schedule loop if cron is enabled and the configuration is
    /// usable. Returns `None` (after logging why) otherwise.
    pub fn start(state: AppState) -> Option<Self> {
        let config = &state.config;

        if !config.cron_enabled {
            tracing::info!("Cron job is disabled (CRON_ENABLED=false)");
            return None;
        }

        let usernames = config.target_users();
        if usernames.is_empty() {
            tracing::warn!("No target users configured (CRON_TARGET_USERS is empty)");
            return None;
        }

        let schedule = match parse_crontab(&config.cron_schedule) {
            Ok(schedule) => schedule,
            Err(error) => {
                tracing::error!(
                    expression = %config.cron_schedule,
                    error = %error,
                    "Invalid cron expression"
                );
                return None;
            }
        };

        let timezone = match config.cron_timezone.parse::<Tz>() {
            Ok(timezone) => timezone,
            Err(_) => {
                tracing::error!(timezone = %config.cron_timezone, "Invalid timezone");
                return None;
            }
        };

        tracing::info!(
            schedule = %config.cron_schedule,
            timezone = %timezone,
            users = ?usernames,
            "Scheduler started"
        );

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_schedule(
            state,
            schedule,
            timezone,
            usernames,
            cancel.clone(),
        ));

        Some(Self { cancel, handle })
    }

    /// Cancels the schedule loop and waits for it to finish. A job already
    /// in flight runs to completion first.
    pub async fn shutdown(self) {
        tracing::info!("Shutting down scheduler");
        self.cancel.cancel();
        if let Err(error) = self.handle.await {
            tracing::error!(error = %error, "Scheduler task failed");
        }
    }
}

async fn run_schedule(
    state: AppState,
    schedule: Schedule,
    timezone: Tz,
    usernames: Vec<String>,
    cancel: CancellationToken,
) {
    loop {
        let now = Utc::now().with_timezone(&timezone);
        let Some(next) = schedule.after(&now).next() else {
            tracing::warn!("Cron schedule has no upcoming run, stopping");
            return;
        };

        let wait = (next - now).to_std().unwrap_or_default();
        tracing::info!(next_run = %next, "Next sync scheduled");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Scheduler cancelled");
                return;
            }
            _ = tokio::time::sleep(wait) => {
                run_sync_job(state.clone(), usernames.clone()).await;
            }
        }
    }
}

/// Parses a classic 5-field crontab expression. The `cron` crate wants a
/// leading seconds field, so one is prepended.
fn parse_crontab(expression: &str) -> anyhow::Result<Schedule> {
    let fields = expression.split_whitespace().count();
    anyhow::ensure!(fields == 5, "expected 5 fields, found {fields}");
    Ok(Schedule::from_str(&format!("0 {expression}"))?)
}
