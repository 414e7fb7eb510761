//! Wire records exchanged with the marketplace API
//!
//! The client never owns authoritative state. These are plain mirrors of
//! whatever the last successful fetch (or the fallback sample) produced.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────────────────

/// Marketplace side a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "Buyer",
            Role::Seller => "Seller",
        }
    }

    /// Case-insensitive parse ("buyer", "SELLER", ...)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("buyer") {
            Some(Role::Buyer)
        } else if s.eq_ignore_ascii_case("seller") {
            Some(Role::Seller)
        } else {
            None
        }
    }

    /// The other side, used by the role selector in add forms
    pub fn toggle(self) -> Self {
        match self {
            Role::Buyer => Role::Seller,
            Role::Seller => Role::Buyer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role: {:?}", raw)))
    }
}

/// Lenient optional role: missing, null, empty or unknown strings become `None`
fn lenient_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Role::parse))
}

// ─────────────────────────────────────────────────────────────────────────────
// Record identity
// ─────────────────────────────────────────────────────────────────────────────

/// Server-side identifier; backends return both numeric and string ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entity records
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    pub role: Role,
    pub category: String,
    pub product: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    pub role: Role,
    pub location: String,
    #[serde(default)]
    pub region: String,
}

/// A legal policy entry. `open` is accordion state and never sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(skip)]
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    pub role: Role,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "name")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

impl RatingRecord {
    pub fn display_user(&self) -> &str {
        self.user.as_deref().filter(|u| !u.is_empty()).unwrap_or("Anonymous")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rating statistics
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate rating figures shown in the donut/gauge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RatingStats {
    /// Percent of positive ratings (0-100)
    pub positive: f64,
    /// Percent of negative ratings (0-100)
    pub negative: f64,
    pub average: f64,
    pub total: u64,
}

/// Partially-populated stats as the server may send them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRatingStats {
    pub positive: Option<f64>,
    pub negative: Option<f64>,
    pub average: Option<f64>,
    pub total: Option<u64>,
}

impl RawRatingStats {
    /// Fill gaps: negative defaults to `100 - positive`, total to `list_len`
    pub fn complete(self, list_len: usize) -> RatingStats {
        let positive = self.positive.unwrap_or(0.0);
        RatingStats {
            positive,
            negative: self.negative.unwrap_or_else(|| (100.0 - positive).max(0.0)),
            average: self.average.unwrap_or(0.0),
            total: self.total.unwrap_or(list_len as u64),
        }
    }
}

impl RatingStats {
    /// Derive stats from individual ratings. A rating of 4 or more is positive.
    pub fn from_records(records: &[RatingRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let total = records.len();
        let positive_count = records.iter().filter(|r| r.rating >= 4.0).count();
        let positive = (positive_count as f64 / total as f64 * 100.0).round();
        let mean = records.iter().map(|r| r.rating).sum::<f64>() / total as f64;

        Self {
            positive,
            negative: 100.0 - positive,
            average: (mean * 100.0).round() / 100.0,
            total: total as u64,
        }
    }
}

/// Unicode star strip: one star per whole point, "½" for a fraction of .5 or more.
/// Values are clamped to the 0-5 rating scale.
pub fn stars(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return String::new();
    }
    let value = value.clamp(0.0, 5.0);
    let full = value.floor();
    let mut out = "★".repeat(full as usize);
    if value - full >= 0.5 {
        out.push('½');
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// `GET /profile` body: `{ user: { name, avatar? } }`
#[derive(Debug, Deserialize)]
pub struct ProfileEnvelope {
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_any_case() {
        assert_eq!(Role::parse("buyer"), Some(Role::Buyer));
        assert_eq!(Role::parse(" SELLER "), Some(Role::Seller));
        assert_eq!(Role::parse("admin"), None);

        let rec: CategoryRecord =
            serde_json::from_str(r#"{"id":1,"role":"seller","category":"a","product":"b"}"#)
                .unwrap();
        assert_eq!(rec.role, Role::Seller);
    }

    #[test]
    fn ids_accept_numbers_strings_and_mongo_keys() {
        let a: ReportRecord =
            serde_json::from_str(r#"{"id":7,"role":"Buyer","title":"t","desc":"d"}"#).unwrap();
        let b: ReportRecord =
            serde_json::from_str(r#"{"_id":"abc","role":"Buyer","title":"t"}"#).unwrap();
        assert_eq!(a.id, Some(RecordId::Number(7)));
        assert_eq!(b.id, Some(RecordId::Text("abc".into())));
        assert_eq!(b.desc, "");
    }

    #[test]
    fn rating_record_is_lenient() {
        let r: RatingRecord = serde_json::from_str(r#"{"name":"Ravi","role":"","rating":4.5}"#)
            .unwrap();
        assert_eq!(r.display_user(), "Ravi");
        assert_eq!(r.role, None);

        let anon: RatingRecord = serde_json::from_str(r#"{"rating":2}"#).unwrap();
        assert_eq!(anon.display_user(), "Anonymous");
    }

    #[test]
    fn policy_open_flag_is_client_only() {
        let p: PolicyRecord =
            serde_json::from_str(r#"{"id":1,"title":"t","desc":"d","open":true}"#).unwrap();
        assert!(!p.open);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("open").is_none());
    }

    #[test]
    fn raw_stats_negative_defaults_to_complement() {
        let raw = RawRatingStats {
            positive: Some(70.0),
            ..Default::default()
        };
        let stats = raw.complete(12);
        assert_eq!(stats.negative, 30.0);
        assert_eq!(stats.total, 12);
    }

    #[test]
    fn stats_from_sample_ratings() {
        let records: Vec<RatingRecord> = [4.5, 3.0, 4.9]
            .iter()
            .map(|&rating| RatingRecord {
                id: None,
                user: None,
                role: None,
                rating,
                comment: None,
            })
            .collect();
        let stats = RatingStats::from_records(&records);
        assert_eq!(stats.positive, 67.0);
        assert_eq!(stats.negative, 33.0);
        assert_eq!(stats.average, 4.13);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn star_strip() {
        assert_eq!(stars(4.5), "★★★★½");
        assert_eq!(stars(3.0), "★★★");
        assert_eq!(stars(4.9), "★★★★½");
        assert_eq!(stars(0.0), "");
    }

    #[test]
    fn star_strip_caps_out_of_range_ratings() {
        let record: RatingRecord =
            serde_json::from_str(r#"{"user": "x", "rating": 1e300}"#).unwrap();
        assert_eq!(stars(record.rating), "★★★★★");
        assert_eq!(stars(7.5), "★★★★★");
        assert_eq!(stars(-3.0), "");
        assert_eq!(stars(f64::INFINITY), "");
    }
}
