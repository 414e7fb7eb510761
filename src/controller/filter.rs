//! Client-side role + text filtering
//!
//! Both predicates must hold. Filtering never mutates the list; it is
//! recomputed from scratch on every change.

use super::Resource;
use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    /// A record without a role only passes `All`
    pub fn matches(&self, role: Option<Role>) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => role == Some(*wanted),
        }
    }

    /// All -> Buyer -> Seller -> All
    pub fn cycle(self) -> Self {
        match self {
            RoleFilter::All => RoleFilter::Only(Role::Buyer),
            RoleFilter::Only(Role::Buyer) => RoleFilter::Only(Role::Seller),
            RoleFilter::Only(Role::Seller) => RoleFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleFilter::All => "All",
            RoleFilter::Only(role) => role.as_str(),
        }
    }

    /// Parse a CLI value: "all" or a role name
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(RoleFilter::All);
        }
        Role::parse(s).map(RoleFilter::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub role: RoleFilter,
    pub text: String,
}

impl Filter {
    pub fn new(role: RoleFilter, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn matches<R: Resource>(&self, record: &R) -> bool {
        let role_ok = !R::FILTERS_BY_ROLE || self.role.matches(record.role());

        let needle = self.text.to_lowercase();
        let text_ok = needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

        role_ok && text_ok
    }

    /// Positions of the matching records in `items`
    pub fn indices<R: Resource>(&self, items: &[R]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(*r))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn apply<'a, R: Resource>(&self, items: &'a [R]) -> Vec<&'a R> {
        items.iter().filter(|r| self.matches(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRecord, PolicyRecord, RatingRecord};

    fn categories() -> Vec<CategoryRecord> {
        CategoryRecord::fallback()
    }

    #[test]
    fn test_role_and_text_are_anded() {
        let items = categories();

        let buyers = Filter::new(RoleFilter::Only(Role::Buyer), "");
        assert_eq!(buyers.apply(&items).len(), 2);

        let jeans = Filter::new(RoleFilter::All, "JEA");
        assert_eq!(jeans.apply(&items)[0].product, "Jeans");

        // "Dell" is a seller product
        let none = Filter::new(RoleFilter::Only(Role::Buyer), "dell");
        assert!(none.apply(&items).is_empty());
    }

    #[test]
    fn test_text_matches_either_search_field() {
        let items = categories();
        let by_category = Filter::new(RoleFilter::All, "mobile");
        let by_product = Filter::new(RoleFilter::All, "iphone");
        assert_eq!(by_category.indices(&items), vec![2]);
        assert_eq!(by_product.indices(&items), vec![2]);
    }

    #[test]
    fn test_filter_is_pure() {
        let items = categories();
        let before = items.clone();
        let filter = Filter::new(RoleFilter::Only(Role::Seller), "l");

        let first: Vec<CategoryRecord> = filter.apply(&items).into_iter().cloned().collect();
        let second: Vec<CategoryRecord> = filter.apply(&items).into_iter().cloned().collect();

        assert_eq!(first, second);
        assert_eq!(items, before);
    }

    #[test]
    fn test_policy_ignores_role_and_searches_title_only() {
        let items = PolicyRecord::fallback();
        let filter = Filter::new(RoleFilter::Only(Role::Seller), "track");
        assert_eq!(filter.indices(&items), vec![1]);

        // Text that only appears in a description
        let desc_only = Filter::new(RoleFilter::All, "selecting a category");
        assert!(desc_only.apply(&items).is_empty());
    }

    #[test]
    fn test_missing_role_only_passes_all() {
        let rating: RatingRecord =
            serde_json::from_value(serde_json::json!({"user": "Kim", "rating": 4})).unwrap();
        let items = vec![rating];
        assert_eq!(Filter::default().apply(&items).len(), 1);
        assert!(Filter::new(RoleFilter::Only(Role::Buyer), "")
            .apply(&items)
            .is_empty());
    }

    #[test]
    fn test_role_filter_cycle_and_parse() {
        let f = RoleFilter::All.cycle();
        assert_eq!(f, RoleFilter::Only(Role::Buyer));
        assert_eq!(f.cycle().cycle(), RoleFilter::All);
        assert_eq!(RoleFilter::parse("ALL"), Some(RoleFilter::All));
        assert_eq!(RoleFilter::parse("seller"), Some(RoleFilter::Only(Role::Seller)));
        assert_eq!(RoleFilter::parse("admin"), None);
    }
}
