//! REST endpoint table
//!
//! Every path is relative to the single configured `api_url`. The deployed
//! backends disagree on a few names (`/signup` vs `/auth/signup`, `/policy` vs
//! `/legal-policy`), so each one can be overridden under `[endpoints]`.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub login: String,
    pub signup: String,
    pub forgot_password: String,
    /// Prefix; the reset token is appended as the last segment
    pub reset_password: String,
    pub google_login: String,
    pub profile: String,
    pub categories: String,
    pub locations: String,
    pub policy: String,
    pub reports: String,
    pub ratings: String,
    /// Aggregate rating figures; the ratings resource itself by default
    pub rating_stats: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "login".to_string(),
            signup: "signup".to_string(),
            forgot_password: "auth/forgot-password".to_string(),
            reset_password: "auth/reset-password".to_string(),
            google_login: "googlelogin".to_string(),
            profile: "profile".to_string(),
            categories: "categories".to_string(),
            locations: "locations".to_string(),
            policy: "policy".to_string(),
            reports: "reports".to_string(),
            ratings: "ratings".to_string(),
            rating_stats: "ratings".to_string(),
        }
    }
}

/// `[endpoints]` as loaded from the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileEndpoints {
    pub login: Option<String>,
    pub signup: Option<String>,
    pub forgot_password: Option<String>,
    pub reset_password: Option<String>,
    pub google_login: Option<String>,
    pub profile: Option<String>,
    pub categories: Option<String>,
    pub locations: Option<String>,
    pub policy: Option<String>,
    pub reports: Option<String>,
    pub ratings: Option<String>,
    pub rating_stats: Option<String>,
}

impl Endpoints {
    pub fn from_file(file: Option<FileEndpoints>) -> Self {
        let file = file.unwrap_or_default();
        let d = Self::default();

        Self {
            login: file.login.unwrap_or(d.login),
            signup: file.signup.unwrap_or(d.signup),
            forgot_password: file.forgot_password.unwrap_or(d.forgot_password),
            reset_password: file.reset_password.unwrap_or(d.reset_password),
            google_login: file.google_login.unwrap_or(d.google_login),
            profile: file.profile.unwrap_or(d.profile),
            categories: file.categories.unwrap_or(d.categories),
            locations: file.locations.unwrap_or(d.locations),
            policy: file.policy.unwrap_or(d.policy),
            reports: file.reports.unwrap_or(d.reports),
            ratings: file.ratings.unwrap_or(d.ratings),
            rating_stats: file.rating_stats.unwrap_or(d.rating_stats),
        }
    }

    /// (key, value) pairs in file order, for serialization and `config --show`
    pub fn entries(&self) -> [(&'static str, &str); 12] {
        [
            ("login", self.login.as_str()),
            ("signup", self.signup.as_str()),
            ("forgot_password", self.forgot_password.as_str()),
            ("reset_password", self.reset_password.as_str()),
            ("google_login", self.google_login.as_str()),
            ("profile", self.profile.as_str()),
            ("categories", self.categories.as_str()),
            ("locations", self.locations.as_str()),
            ("policy", self.policy.as_str()),
            ("reports", self.reports.as_str()),
            ("ratings", self.ratings.as_str()),
            ("rating_stats", self.rating_stats.as_str()),
        ]
    }
}
