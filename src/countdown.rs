// Session-expiry countdown
//
// A timer resource owned by whoever shows the logout popup. It ticks once a
// second and logs the session out at zero. Dropping the handle aborts the
// task, so a closed popup can never log anyone out later.

use crate::session::SessionStore;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Seconds left
    Tick(u32),
    /// Session cleared by the countdown
    Expired,
}

pub struct LogoutCountdown {
    session: SessionStore,
    task: Option<JoinHandle<()>>,
}

impl LogoutCountdown {
    /// Start counting down from `secs`.
    ///
    /// `on_event` receives `Tick(n)` for every remaining whole second and
    /// exactly one `Expired` after the session was cleared.
    pub fn start<F>(secs: u32, session: SessionStore, on_event: F) -> Self
    where
        F: Fn(CountdownEvent) + Send + 'static,
    {
        let task_session = session.clone();
        let task = tokio::spawn(async move {
            let mut remaining = secs;
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            // First tick completes immediately
            ticker.tick().await;

            while remaining > 0 {
                ticker.tick().await;
                remaining -= 1;
                on_event(CountdownEvent::Tick(remaining));
            }

            // Act on the zero-crossing from a fresh scheduler turn
            tokio::task::yield_now().await;
            tracing::info!("Logout countdown elapsed");
            task_session.logout();
            on_event(CountdownEvent::Expired);
        });

        Self {
            session,
            task: Some(task),
        }
    }

    /// Skip the countdown and log out now
    pub fn logout_now(mut self) {
        self.cancel();
        self.session.logout();
    }

    /// Stop without logging out
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for LogoutCountdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
