//! Topbar identity: fetched once per token value

use crate::api::{ApiClient, ApiError};
use crate::models::{ProfileEnvelope, UserProfile};
use crate::session::SessionStore;

const PLACEHOLDER_NAME: &str = "Loading...";
const MENU_PLACEHOLDER_NAME: &str = "User";
const PLACEHOLDER_AVATAR: char = 'U';

/// One in-flight profile fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTicket {
    generation: u64,
    pub token: String,
}

#[derive(Debug, Default)]
pub struct ProfileController {
    profile: Option<UserProfile>,
    /// Token the current profile (or in-flight fetch) belongs to
    token: Option<String>,
    generation: u64,
    pub menu_open: bool,
}

impl ProfileController {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to the current session token.
    ///
    /// Returns a ticket when a fetch should start: the token changed and is
    /// present. A cleared token drops the profile.
    pub fn sync(&mut self, token: Option<String>) -> Option<ProfileTicket> {
        if self.token == token {
            return None;
        }

        self.generation += 1;
        self.profile = None;
        self.token = token.clone();
        if token.is_none() {
            self.menu_open = false;
        }

        token.map(|token| ProfileTicket {
            generation: self.generation,
            token,
        })
    }

    /// Apply a fetch result; failures keep the placeholder identity
    pub fn finish(&mut self, ticket: &ProfileTicket, result: Result<UserProfile, ApiError>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match result {
            Ok(profile) => self.profile = Some(profile),
            Err(e) => tracing::warn!("Profile fetch failed: {}", e),
        }
        true
    }

    pub async fn fetch(api: &ApiClient, token: &str) -> Result<UserProfile, ApiError> {
        let envelope: ProfileEnvelope = api
            .get_json(&api.endpoints().profile, Some(token))
            .await?;
        Ok(envelope.user)
    }

    /// Sync with the session and fetch if needed
    pub async fn refresh(&mut self, api: &ApiClient, session: &SessionStore) {
        if let Some(ticket) = self.sync(session.token()) {
            let result = Self::fetch(api, &ticket.token).await;
            self.finish(&ticket, result);
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    fn name(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }

    /// Name shown in the topbar
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(PLACEHOLDER_NAME)
    }

    /// Name shown inside the dropdown
    pub fn menu_name(&self) -> &str {
        self.name().unwrap_or(MENU_PLACEHOLDER_NAME)
    }

    pub fn avatar_letter(&self) -> char {
        self.name()
            .and_then(|n| n.trim().chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or(PLACEHOLDER_AVATAR)
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.avatar.as_deref())
            .filter(|a| !a.is_empty())
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }
}
