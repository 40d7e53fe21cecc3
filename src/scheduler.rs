use std::sync::Arc;

use chrono::{Days, Local, NaiveDateTime, NaiveTime, TimeDelta};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::collector::Collector;

/// Fire once a day at `at` (local wall-clock). A run that starts late still
/// fires if it is no more than `grace` behind, otherwise it is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub at: NaiveTime,
    pub grace: TimeDelta,
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self {
            at: NaiveTime::from_hms_opt(4, 0, 0).unwrap_or(NaiveTime::MIN),
            grace: TimeDelta::hours(2),
        }
    }
}

/// First occurrence of `at` strictly after `now`.
pub fn next_fire_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        return today;
    }
    now.date()
        .checked_add_days(Days::new(1))
        .map(|d| d.and_time(at))
        .unwrap_or(NaiveDateTime::MAX)
}

pub fn within_grace(scheduled: NaiveDateTime, now: NaiveDateTime, grace: TimeDelta) -> bool {
    now - scheduled <= grace
}

/// What to do on waking for the run due at `scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Fire,
    Skip,
}

impl DailySchedule {
    pub fn tick(&self, scheduled: NaiveDateTime, now: NaiveDateTime) -> Tick {
        if within_grace(scheduled, now, self.grace) {
            Tick::Fire
        } else {
            Tick::Skip
        }
    }

    /// The run after `scheduled`, given the clock reads `now` once it is handled.
    pub fn following(&self, scheduled: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
        next_fire_after(now.max(scheduled), self.at)
    }
}

/// Run the collector on `schedule` forever on its own task.
pub fn spawn(collector: Arc<Collector>, schedule: DailySchedule) -> JoinHandle<()> {
    tokio::spawn(run(collector, schedule))
}

async fn run(collector: Arc<Collector>, schedule: DailySchedule) {
    let mut next = next_fire_after(Local::now().naive_local(), schedule.at);
    info!(next = %next, "Scheduler started");

    loop {
        let wait = (next - Local::now().naive_local()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        let now = Local::now().naive_local();
        match schedule.tick(next, now) {
            Tick::Fire => {
                info!(scheduled = %next, "Scheduled scrape starting");
                if let Err(e) = collector.collect_all().await {
                    error!(scheduled = %next, error = %e, "Scheduled scrape failed");
                }
            }
            Tick::Skip => {
                warn!(scheduled = %next, woke = %now, "Missed scheduled scrape, skipping");
            }
        }

        next = schedule.following(next, Local::now().naive_local());
    }
}
