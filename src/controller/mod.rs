// Page data controllers
//
// Every list screen follows the same lifecycle: guard, load on mount, fall
// back to a sample list on failure, filter client-side, and add records by
// POSTing then reloading from the server. `PageController` implements that
// once; each entity only describes itself through `Resource`.

pub mod auth_forms;
mod dashboard;
mod filter;
mod form;
mod page;
mod profile;
mod ratings;
mod resources;

pub use dashboard::{DashboardController, DashboardData, DashboardState};
pub use filter::{Filter, RoleFilter};
pub use form::{AddForm, Fields, FormField, REQUIRED_MESSAGE};
pub use page::{LoadTicket, PageController, SubmitOutcome};
pub use profile::{ProfileController, ProfileTicket};
pub use ratings::{parse_stats, RatingsController};
pub use resources::{CategoryDraft, LocationDraft, PolicyDraft, ReportDraft};

use crate::config::Endpoints;
use crate::models::Role;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Where a list page is in its load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    /// Showing the last successful fetch
    Ready,
    /// Fetch failed; showing the built-in sample list
    Degraded,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Whether rows are available to render
    pub fn has_rows(&self) -> bool {
        matches!(self, LoadState::Ready | LoadState::Degraded)
    }
}

/// A record type backed by one list endpoint
pub trait Resource: Clone + Send + Sync + DeserializeOwned + 'static {
    /// Page title ("Categories")
    const LABEL: &'static str;
    /// Lower-case singular used in messages ("category")
    const SINGULAR: &'static str;
    /// Table header
    const COLUMNS: &'static [&'static str];
    /// Whether the role filter applies to this page
    const FILTERS_BY_ROLE: bool = true;

    fn endpoint(endpoints: &Endpoints) -> &str;

    fn role(&self) -> Option<Role>;

    /// Fields the free-text search looks at
    fn search_fields(&self) -> Vec<&str>;

    /// One rendered table row, matching `COLUMNS`
    fn cells(&self) -> Vec<String>;

    /// Sample list shown when the fetch fails
    fn fallback() -> Vec<Self>;

    /// Normalize freshly fetched records
    fn prepare(_items: &mut [Self]) {}
}

/// A resource with an "Add" modal
pub trait Creatable: Resource {
    /// JSON body of the POST
    type Draft: Serialize + Send + Sync + 'static;

    /// Text input labels, in order
    const FIELDS: &'static [&'static str];
    /// Whether the modal shows a Buyer/Seller selector
    const HAS_ROLE: bool = true;

    /// Build the body from validated, trimmed values (one per `FIELDS` entry)
    fn draft(role: Role, values: &[String]) -> Self::Draft;

    fn new_form() -> AddForm {
        AddForm::new(Self::FIELDS, Self::HAS_ROLE)
    }
}
