//! The five record screens and their sample data

use super::{Creatable, Resource};
use crate::config::Endpoints;
use crate::models::{
    stars, CategoryRecord, LocationRecord, PolicyRecord, RatingRecord, RecordId, ReportRecord,
    Role,
};
use serde::Serialize;

fn value_at(values: &[String], index: usize) -> String {
    values.get(index).cloned().unwrap_or_default()
}

fn sample_id(n: i64) -> Option<RecordId> {
    Some(RecordId::Number(n))
}

// ─────────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub role: Role,
    pub category: String,
    pub product: String,
}

impl Resource for CategoryRecord {
    const LABEL: &'static str = "Categories";
    const SINGULAR: &'static str = "category";
    const COLUMNS: &'static [&'static str] = &["Role", "Category", "Product"];

    fn endpoint(endpoints: &Endpoints) -> &str {
        &endpoints.categories
    }

    fn role(&self) -> Option<Role> {
        Some(self.role)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.category.as_str(), self.product.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.role.to_string(),
            self.category.clone(),
            self.product.clone(),
        ]
    }

    fn fallback() -> Vec<Self> {
        [
            (1, Role::Buyer, "Clothes", "Jeans"),
            (2, Role::Buyer, "Electronics", "Speaker"),
            (3, Role::Seller, "Mobile", "iPhone"),
            (4, Role::Seller, "Laptop", "Dell"),
        ]
        .into_iter()
        .map(|(id, role, category, product)| CategoryRecord {
            id: sample_id(id),
            role,
            category: category.to_string(),
            product: product.to_string(),
        })
        .collect()
    }
}

impl Creatable for CategoryRecord {
    type Draft = CategoryDraft;
    const FIELDS: &'static [&'static str] = &["Category", "Product"];

    fn draft(role: Role, values: &[String]) -> CategoryDraft {
        CategoryDraft {
            role,
            category: value_at(values, 0),
            product: value_at(values, 1),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Locations
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDraft {
    pub role: Role,
    pub location: String,
    pub region: String,
}

impl Resource for LocationRecord {
    const LABEL: &'static str = "Location";
    const SINGULAR: &'static str = "location";
    const COLUMNS: &'static [&'static str] = &["Role", "Location", "Region"];

    fn endpoint(endpoints: &Endpoints) -> &str {
        &endpoints.locations
    }

    fn role(&self) -> Option<Role> {
        Some(self.role)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.location.as_str(), self.region.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.role.to_string(),
            self.location.clone(),
            self.region.clone(),
        ]
    }

    fn fallback() -> Vec<Self> {
        [
            (1, Role::Buyer, "London", "Europe"),
            (2, Role::Buyer, "Mumbai", "Asia"),
            (3, Role::Seller, "Berlin", "Europe"),
        ]
        .into_iter()
        .map(|(id, role, location, region)| LocationRecord {
            id: sample_id(id),
            role,
            location: location.to_string(),
            region: region.to_string(),
        })
        .collect()
    }
}

impl Creatable for LocationRecord {
    type Draft = LocationDraft;
    const FIELDS: &'static [&'static str] = &["Location", "Region"];

    fn draft(role: Role, values: &[String]) -> LocationDraft {
        LocationDraft {
            role,
            location: value_at(values, 0),
            region: value_at(values, 1),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Legal policy
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDraft {
    pub title: String,
    pub desc: String,
}

impl Resource for PolicyRecord {
    const LABEL: &'static str = "Legal Policy";
    const SINGULAR: &'static str = "policy";
    const COLUMNS: &'static [&'static str] = &["Title", "Description"];
    const FILTERS_BY_ROLE: bool = false;

    fn endpoint(endpoints: &Endpoints) -> &str {
        &endpoints.policy
    }

    fn role(&self) -> Option<Role> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.title.clone(), self.desc.clone()]
    }

    fn fallback() -> Vec<Self> {
        [
            (
                1,
                "How do I book a service?",
                "You can book any service by selecting a category...",
            ),
            (
                2,
                "How do I track my provider?",
                "Tracking is available inside the app after booking...",
            ),
            (
                3,
                "How do I rate a provider?",
                "After completing service you can submit rating...",
            ),
        ]
        .into_iter()
        .map(|(id, title, desc)| PolicyRecord {
            id: sample_id(id),
            title: title.to_string(),
            desc: desc.to_string(),
            // Sample opens with the first entry expanded
            open: id == 1,
        })
        .collect()
    }

    /// Fetched entries all start collapsed
    fn prepare(items: &mut [Self]) {
        for item in items {
            item.open = false;
        }
    }
}

impl Creatable for PolicyRecord {
    type Draft = PolicyDraft;
    const FIELDS: &'static [&'static str] = &["Title", "Description"];
    const HAS_ROLE: bool = false;

    fn draft(_role: Role, values: &[String]) -> PolicyDraft {
        PolicyDraft {
            title: value_at(values, 0),
            desc: value_at(values, 1),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reports
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDraft {
    pub role: Role,
    pub title: String,
    pub desc: String,
}

impl Resource for ReportRecord {
    const LABEL: &'static str = "Reports";
    const SINGULAR: &'static str = "report";
    const COLUMNS: &'static [&'static str] = &["Role", "Title", "Description"];

    fn endpoint(endpoints: &Endpoints) -> &str {
        &endpoints.reports
    }

    fn role(&self) -> Option<Role> {
        Some(self.role)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.desc.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.role.to_string(), self.title.clone(), self.desc.clone()]
    }

    fn fallback() -> Vec<Self> {
        [
            (
                1,
                Role::Buyer,
                "Fake product received",
                "Product quality was very poor and different from listing.",
            ),
            (
                2,
                Role::Seller,
                "Buyer refused to pay",
                "The buyer refused COD payment and caused delays.",
            ),
            (3, Role::Buyer, "Late delivery", "Delivery was delayed by 4 days."),
        ]
        .into_iter()
        .map(|(id, role, title, desc)| ReportRecord {
            id: sample_id(id),
            role,
            title: title.to_string(),
            desc: desc.to_string(),
        })
        .collect()
    }
}

impl Creatable for ReportRecord {
    type Draft = ReportDraft;
    const FIELDS: &'static [&'static str] = &["Title", "Description"];

    fn draft(role: Role, values: &[String]) -> ReportDraft {
        ReportDraft {
            role,
            title: value_at(values, 0),
            desc: value_at(values, 1),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ratings (read-only)
// ─────────────────────────────────────────────────────────────────────────────

impl Resource for RatingRecord {
    const LABEL: &'static str = "Rating";
    const SINGULAR: &'static str = "rating";
    const COLUMNS: &'static [&'static str] = &["User", "Role", "Rating", "Comment"];

    fn endpoint(endpoints: &Endpoints) -> &str {
        &endpoints.ratings
    }

    fn role(&self) -> Option<Role> {
        self.role
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.user.as_deref().unwrap_or(""),
            self.comment.as_deref().unwrap_or(""),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.display_user().to_string(),
            self.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
            format!("{} {:.1}", stars(self.rating), self.rating),
            self.comment.clone().unwrap_or_default(),
        ]
    }

    fn fallback() -> Vec<Self> {
        [
            (1, "Ravi", Role::Buyer, 4.5, "Great service"),
            (2, "Meera", Role::Buyer, 3.0, "Okay experience"),
            (3, "Aman", Role::Seller, 4.9, "Excellent"),
        ]
        .into_iter()
        .map(|(id, user, role, rating, comment)| RatingRecord {
            id: sample_id(id),
            user: Some(user.to_string()),
            role: Some(role),
            rating,
            comment: Some(comment.to_string()),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drafts_serialize_as_post_bodies() {
        let values = vec!["Books".to_string(), "Novel".to_string()];
        let body = serde_json::to_string(&CategoryRecord::draft(Role::Seller, &values)).unwrap();
        assert_eq!(body, r#"{"role":"Seller","category":"Books","product":"Novel"}"#);

        let body = serde_json::to_string(&PolicyRecord::draft(Role::Seller, &values)).unwrap();
        assert_eq!(body, r#"{"title":"Books","desc":"Novel"}"#);
    }

    #[test]
    fn test_fallback_samples() {
        assert_eq!(CategoryRecord::fallback().len(), 4);
        assert_eq!(LocationRecord::fallback()[1].location, "Mumbai");
        assert_eq!(ReportRecord::fallback()[2].title, "Late delivery");
        assert_eq!(RatingRecord::fallback()[2].rating, 4.9);

        let policy = PolicyRecord::fallback();
        assert_eq!(policy.iter().filter(|p| p.open).count(), 1);
        assert!(policy[0].open);
    }

    #[test]
    fn test_prepare_collapses_policy() {
        let mut items = PolicyRecord::fallback();
        PolicyRecord::prepare(&mut items);
        assert!(items.iter().all(|p| !p.open));
    }

    #[test]
    fn test_cells_match_columns() {
        fn check<R: Resource>() {
            for record in R::fallback() {
                assert_eq!(record.cells().len(), R::COLUMNS.len(), "{}", R::LABEL);
            }
        }
        check::<CategoryRecord>();
        check::<LocationRecord>();
        check::<PolicyRecord>();
        check::<ReportRecord>();
        check::<RatingRecord>();
    }

    #[test]
    fn test_rating_cells() {
        let cells = RatingRecord::fallback()[0].cells();
        assert_eq!(cells[0], "Ravi");
        assert_eq!(cells[2], "★★★★½ 4.5");
    }
}
