//! Ratings page: the list plus aggregate statistics, fetched together

use super::{LoadState, LoadTicket, PageController, Resource};
use crate::api::{decode_items, normalize_list, ApiClient, ApiError};
use crate::models::{RatingRecord, RatingStats, RawRatingStats};
use crate::session::SessionStore;
use serde_json::Value;

/// Interpret a stats response.
///
/// An object with a numeric `positive` is used as-is; otherwise a `data`
/// object is tried. Anything else (typically the ratings list itself) is
/// derived from the individual ratings, falling back to `list`.
pub fn parse_stats(body: Value, list: &[RatingRecord]) -> RatingStats {
    let candidate = match &body {
        Value::Object(map) if map.get("positive").is_some_and(Value::is_number) => {
            Some(body.clone())
        }
        Value::Object(map) => map.get("data").filter(|d| d.is_object()).cloned(),
        _ => None,
    };

    if let Some(raw) = candidate.and_then(|v| serde_json::from_value::<RawRatingStats>(v).ok()) {
        return raw.complete(list.len());
    }

    let from_body: Vec<RatingRecord> = decode_items(normalize_list(body), "rating");
    if from_body.is_empty() {
        RatingStats::from_records(list)
    } else {
        RatingStats::from_records(&from_body)
    }
}

#[derive(Default)]
pub struct RatingsController {
    pub page: PageController<RatingRecord>,
    stats: RatingStats,
}

impl RatingsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RatingStats {
        &self.stats
    }

    pub fn state(&self) -> LoadState {
        self.page.state()
    }

    pub fn begin_load(&mut self, token: Option<String>) -> Option<LoadTicket> {
        self.page.begin_load(token)
    }

    /// List and stats in parallel; both must succeed
    pub async fn fetch(
        api: &ApiClient,
        token: &str,
    ) -> Result<(Vec<RatingRecord>, Value), ApiError> {
        let endpoints = api.endpoints();
        tokio::try_join!(
            api.get_list::<RatingRecord>(RatingRecord::endpoint(endpoints), Some(token)),
            api.get_value(&endpoints.rating_stats, Some(token)),
        )
    }

    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<(Vec<RatingRecord>, Value), ApiError>,
    ) -> bool {
        match result {
            Ok((list, stats_body)) => {
                let stats = parse_stats(stats_body, &list);
                let applied = self.page.finish_load(ticket, Ok(list));
                if applied {
                    self.stats = stats;
                }
                applied
            }
            Err(e) => {
                let applied = self.page.finish_load(ticket, Err(e));
                if applied {
                    self.stats = RatingStats::from_records(self.page.items());
                }
                applied
            }
        }
    }

    pub fn unmount(&mut self) {
        self.page.unmount();
    }

    pub async fn load(&mut self, api: &ApiClient, session: &SessionStore) -> LoadState {
        let Some(ticket) = self.begin_load(session.token()) else {
            return self.state();
        };
        let result = Self::fetch(api, &ticket.token).await;
        self.finish_load(&ticket, result);
        self.state()
    }
}
