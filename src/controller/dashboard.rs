//! Dashboard: four lists fetched concurrently, applied all-or-nothing

use super::{parse_stats, LoadTicket, Resource};
use crate::api::{ApiClient, ApiError};
use crate::models::{CategoryRecord, LocationRecord, PolicyRecord, RatingStats};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// One of the joined fetches failed; nothing was applied
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub categories: Vec<CategoryRecord>,
    pub locations: Vec<LocationRecord>,
    pub policy: Vec<PolicyRecord>,
    pub rating_stats: RatingStats,
}

#[derive(Default)]
pub struct DashboardController {
    state: DashboardState,
    data: Option<DashboardData>,
    generation: u64,
}

impl DashboardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DashboardState {
        self.state
    }

    /// Present only after a complete, successful join
    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    pub fn begin_load(&mut self, token: Option<String>) -> Option<LoadTicket> {
        let token = token?;
        self.generation += 1;
        self.state = DashboardState::Loading;
        Some(LoadTicket::new(self.generation, token))
    }

    /// All four fetches concurrently; the first failure fails the join
    pub async fn fetch(api: &ApiClient, token: &str) -> Result<DashboardData, ApiError> {
        let endpoints = api.endpoints();
        let (categories, locations, mut policy, stats_body) = tokio::try_join!(
            api.get_list::<CategoryRecord>(CategoryRecord::endpoint(endpoints), Some(token)),
            api.get_list::<LocationRecord>(LocationRecord::endpoint(endpoints), Some(token)),
            api.get_list::<PolicyRecord>(PolicyRecord::endpoint(endpoints), Some(token)),
            api.get_value(&endpoints.rating_stats, Some(token)),
        )?;

        PolicyRecord::prepare(&mut policy);

        Ok(DashboardData {
            categories,
            locations,
            policy,
            rating_stats: parse_stats(stats_body, &[]),
        })
    }

    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<DashboardData, ApiError>,
    ) -> bool {
        if ticket.generation() != self.generation {
            tracing::debug!("Discarding stale dashboard load");
            return false;
        }

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.state = DashboardState::Ready;
            }
            Err(e) => {
                tracing::error!("Dashboard load failed: {}", e);
                self.data = None;
                self.state = DashboardState::Failed;
            }
        }
        true
    }

    pub fn unmount(&mut self) {
        self.generation += 1;
        if self.state == DashboardState::Loading {
            self.state = DashboardState::Idle;
        }
    }

    pub async fn load(&mut self, api: &ApiClient, session: &SessionStore) -> DashboardState {
        let Some(ticket) = self.begin_load(session.token()) else {
            return self.state;
        };
        let result = Self::fetch(api, &ticket.token).await;
        self.finish_load(&ticket, result);
        self.state
    }
}
