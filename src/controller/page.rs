//! Generic list page: load lifecycle, filtering, selection, add flow

use super::{AddForm, Creatable, Filter, LoadState, Resource};
use crate::api::{ApiClient, ApiError};
use crate::models::PolicyRecord;
use crate::session::SessionStore;
use serde_json::Value;

/// Fallback message when the transport fails during an add
pub const TRANSPORT_FAILURE: &str = "Something went wrong.";

/// Identifies one in-flight load. A completion whose ticket is no longer
/// current (page unmounted or reloaded since) is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub token: String,
}

impl LoadTicket {
    pub(crate) fn new(generation: u64, token: String) -> Self {
        Self { generation, token }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed locally; nothing was sent
    Invalid,
    /// The server or transport refused; the modal stays open
    Failed,
    /// Written; the modal closed and the list must be reloaded
    Saved,
}

pub struct PageController<R: Resource> {
    state: LoadState,
    items: Vec<R>,
    filter: Filter,
    generation: u64,
    selected: usize,
    form: Option<AddForm>,
}

impl<R: Resource> Default for PageController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> PageController<R> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            items: Vec::new(),
            filter: Filter::default(),
            generation: 0,
            selected: 0,
            form: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    // ─────────────────────────────────────────────────────────────────────
    // Load lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Enter `Loading` and hand out a ticket. Without a token nothing starts.
    pub fn begin_load(&mut self, token: Option<String>) -> Option<LoadTicket> {
        let token = token?;
        self.generation += 1;
        self.state = LoadState::Loading;
        Some(LoadTicket::new(self.generation, token))
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a fetch result. Returns false when the ticket is stale.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<Vec<R>, ApiError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!("Discarding stale {} load", R::LABEL);
            return false;
        }

        match result {
            Ok(mut items) => {
                R::prepare(&mut items);
                tracing::debug!("Loaded {} {} records", items.len(), R::SINGULAR);
                self.items = items;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!("{} fetch failed, showing sample data: {}", R::LABEL, e);
                self.items = R::fallback();
                self.state = LoadState::Degraded;
            }
        }
        self.clamp_selection();
        true
    }

    /// Leaving the page: in-flight loads become stale. A pending add keeps
    /// `saving` until its POST completes.
    pub fn unmount(&mut self) {
        self.generation += 1;
        if self.state.is_loading() {
            self.state = LoadState::Idle;
        }
        if let Some(form) = &mut self.form {
            form.hide();
        }
    }

    /// Bearer GET of this resource's list
    pub async fn fetch(api: &ApiClient, token: &str) -> Result<Vec<R>, ApiError> {
        api.get_list(R::endpoint(api.endpoints()), Some(token)).await
    }

    /// Load end-to-end: begin, fetch, finish
    pub async fn load(&mut self, api: &ApiClient, session: &SessionStore) -> LoadState {
        let Some(ticket) = self.begin_load(session.token()) else {
            return self.state;
        };
        let result = Self::fetch(api, &ticket.token).await;
        self.finish_load(&ticket, result);
        self.state
    }

    // ─────────────────────────────────────────────────────────────────────
    // Filtering and selection
    // ─────────────────────────────────────────────────────────────────────

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_selection();
    }

    pub fn push_search(&mut self, c: char) {
        self.filter.text.push(c);
        self.clamp_selection();
    }

    pub fn pop_search(&mut self) {
        self.filter.text.pop();
        self.clamp_selection();
    }

    pub fn cycle_role(&mut self) {
        if R::FILTERS_BY_ROLE {
            self.filter.role = self.filter.role.cycle();
            self.clamp_selection();
        }
    }

    /// Positions in `items()` of the rows currently shown
    pub fn visible_indices(&self) -> Vec<usize> {
        self.filter.indices(&self.items)
    }

    pub fn visible(&self) -> Vec<&R> {
        self.filter.apply(&self.items)
    }

    /// Selected row, as a position among the visible rows
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Selected row, as a position in `items()`
    pub fn selected_item(&self) -> Option<usize> {
        self.visible_indices().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_indices().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_indices().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Add flow
// ─────────────────────────────────────────────────────────────────────────────

impl<R: Creatable> PageController<R> {
    pub fn form(&self) -> Option<&AddForm> {
        self.form.as_ref().filter(|f| f.open)
    }

    pub fn form_mut(&mut self) -> &mut AddForm {
        self.form.get_or_insert_with(R::new_form)
    }

    pub fn open_form(&mut self) {
        self.form_mut().show();
    }

    pub fn close_form(&mut self) {
        if let Some(form) = &mut self.form {
            form.hide();
        }
    }

    /// Validate and enter `saving`. `None` means nothing may be sent.
    pub fn begin_submit(&mut self) -> Option<R::Draft> {
        let form = self.form_mut();
        if form.saving {
            return None;
        }
        form.error = None;

        match form.validate() {
            Ok(values) => {
                form.saving = true;
                Some(R::draft(form.role, &values))
            }
            Err(message) => {
                form.error = Some(message.to_string());
                None
            }
        }
    }

    /// Apply the write result to the modal
    pub fn finish_submit(&mut self, result: Result<Value, ApiError>) -> SubmitOutcome {
        let form = self.form_mut();
        form.saving = false;

        match result {
            Ok(_) => {
                tracing::info!("Added {}", R::SINGULAR);
                form.reset();
                SubmitOutcome::Saved
            }
            Err(e @ ApiError::Status { .. }) => {
                tracing::warn!("Add {} rejected: {}", R::SINGULAR, e);
                let fallback = format!("Failed to add {}.", R::SINGULAR);
                form.error = Some(e.message_or(&fallback).to_string());
                SubmitOutcome::Failed
            }
            Err(e) => {
                tracing::error!("Add {} failed: {}", R::SINGULAR, e);
                form.error = Some(TRANSPORT_FAILURE.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Bearer POST of a draft to this resource's endpoint
    pub async fn post(api: &ApiClient, token: &str, draft: &R::Draft) -> Result<Value, ApiError> {
        api.post_json(R::endpoint(api.endpoints()), draft, Some(token))
            .await
    }

    /// Submit end-to-end: validate, POST, and reload from the server on success
    pub async fn submit(&mut self, api: &ApiClient, session: &SessionStore) -> SubmitOutcome {
        let Some(token) = session.token() else {
            tracing::warn!("Add {} attempted without a session", R::SINGULAR);
            return SubmitOutcome::Invalid;
        };
        let Some(draft) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };

        let result = Self::post(api, &token, &draft).await;
        let outcome = self.finish_submit(result);
        if outcome == SubmitOutcome::Saved {
            self.load(api, session).await;
        }
        outcome
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Policy accordion
// ─────────────────────────────────────────────────────────────────────────────

impl PageController<PolicyRecord> {
    /// Toggle entry `index` of the full list; every other entry collapses
    pub fn toggle(&mut self, index: usize) {
        for (i, item) in self.items.iter_mut().enumerate() {
            item.open = if i == index { !item.open } else { false };
        }
    }

    /// Toggle the selected visible entry
    pub fn toggle_selected(&mut self) {
        if let Some(index) = self.selected_item() {
            self.toggle(index);
        }
    }
}
