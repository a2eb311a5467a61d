// src/poller.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use log::{debug, error, info};
use parking_lot::RwLock;

use crate::avatar::AvatarService;
use crate::config::Config;
use crate::render::page::PageState;
use crate::render::{render_busy, render_failure, render_idle, render_status};
use crate::status_api::{HttpStatusSource, StatusSource};

/// Owns the page state and keeps it in sync with the status API.
pub struct StatusPoller<S = HttpStatusSource> {
    config: Config,
    source: S,
    avatars: AvatarService,
    page: RwLock<PageState>,
    latest_request: AtomicU64,
}

impl<S: StatusSource> StatusPoller<S> {
    pub fn new(config: Config, source: S) -> Self {
        let page = PageState::new(config.server_address.as_str(), &config.staff);
        let avatars = AvatarService::new(config.avatar_base.clone(), config.avatar_size);
        Self {
            config,
            source,
            avatars,
            page: RwLock::new(page),
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot(&self) -> PageState {
        self.page.read().clone()
    }

    /// Fetches the current status and rewrites the page. Failures are
    /// logged and shown on the page, never returned.
    ///
    /// Overlapping calls are allowed; only the most recently issued one
    /// gets to write its result.
    pub async fn refresh_status(&self) {
        let seq = {
            let mut page = self.page.write();
            render_busy(&mut *page);
            self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = self.source.fetch_status(&self.config.server_address).await;

        // New requests mark the page busy under this lock, so the sequence
        // check and the writes below cannot interleave with one.
        let mut page = self.page.write();
        if self.latest_request.load(Ordering::SeqCst) != seq {
            debug!("Discarding stale status result for request #{}", seq);
            return;
        }
        match result {
            Ok(status) => {
                info!(
                    "Server {} is {} ({}/{} players)",
                    self.config.server_address,
                    if status.online { "online" } else { "offline" },
                    status.players.online,
                    status.players.max
                );
                render_status(&mut *page, &status, &self.config.staff, &self.avatars);
            }
            Err(e) => {
                error!("Failed to refresh status for {}: {}", self.config.server_address, e);
                render_failure(&mut *page);
            }
        }
        render_idle(&mut *page);
    }
}

/// Polls once immediately and then on every interval tick.
pub fn start_polling_task(poller: Arc<StatusPoller>) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(poller.config().poll_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            // The first tick completes immediately.
            interval.tick().await;
            poller.refresh_status().await;
        }
    });
}
