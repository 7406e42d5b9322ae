//! Idle hibernation sweep.

use appdock_common::{AppId, AppStatus};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::ViewLifecycleManager;
use crate::surface::SurfaceBackend;

impl<B: SurfaceBackend> ViewLifecycleManager<B> {
    /// Hibernate background apps that have been idle for their workspace's
    /// `idleTimeMinutes`. The current app is never touched. Each hibernate
    /// goes through the app's request queue. Returns the apps hibernated.
    pub async fn sweep_idle(&self, now: DateTime<Utc>) -> Vec<AppId> {
        let snapshot = self.registry.snapshot();
        let current = self.current();

        let candidates: Vec<AppId> = snapshot
            .apps
            .iter()
            .filter(|app| app.state.status == AppStatus::BackgroundLoaded)
            .filter(|app| current.as_ref() != Some(&app.id))
            .filter(|app| {
                let Some(ws) = snapshot.workspaces.iter().find(|ws| ws.id == app.workspace_id)
                else {
                    return false;
                };
                let idle = now.signed_duration_since(app.state.last_active_at);
                ws.hibernation.enabled
                    && idle >= chrono::Duration::minutes(i64::from(ws.hibernation.idle_time_minutes))
            })
            .map(|app| app.id.clone())
            .collect();

        let mut hibernated = Vec::new();
        for id in candidates {
            match self.hibernate(&id).await {
                Ok(true) => hibernated.push(id),
                Ok(false) => {}
                // Became active while queued
                Err(e) => debug!(app_id = %id, error = %e, "sweep skipped app"),
            }
        }

        if !hibernated.is_empty() {
            info!(count = hibernated.len(), "idle sweep hibernated apps");
        }
        hibernated
    }
}

/// When the next idle sweep is due.
#[derive(Debug, Clone, Copy)]
pub struct SweepSchedule {
    interval: Duration,
    next_due: Instant,
}

impl SweepSchedule {
    pub fn new(interval: Duration, now: Instant) -> Self {
        if interval.is_zero() {
            warn!("sweep interval is zero, using one second");
        }
        let interval = interval.max(Duration::from_secs(1));
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Record a run at `now` and schedule the next one.
    pub fn mark_run(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        *self = Self::new(interval, now);
    }
}
