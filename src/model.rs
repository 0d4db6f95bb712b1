use crate::error::ParseValueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

pub type ReportId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub category: Category,
    pub status: Status,
    pub severity: Severity,
    pub description: String,
    pub location: Location,
    pub citizen_info: CitizenInfo,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub ai_verification: AiVerification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Output of the external verification process. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiVerification {
    pub score: f64,
    pub verified: bool,
    pub confidence: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Roads,
    Water,
    Waste,
    #[serde(rename = "Public Safety")]
    PublicSafety,
    Parks,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Roads,
        Category::Water,
        Category::Waste,
        Category::PublicSafety,
        Category::Parks,
        Category::Utilities,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Roads => "Roads",
            Category::Water => "Water",
            Category::Waste => "Waste",
            Category::PublicSafety => "Public Safety",
            Category::Parks => "Parks",
            Category::Utilities => "Utilities",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Approved,
    Resolved,
    Rejected,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Approved,
        Status::Resolved,
        Status::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Approved => "Approved",
            Status::Resolved => "Resolved",
            Status::Rejected => "Rejected",
        }
    }

    /// Still waiting on staff action.
    pub fn is_open(self) -> bool {
        matches!(self, Status::Pending | Status::Approved)
    }
}

/// Declaration order is the urgency order: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn rank(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

// Accepts "Public Safety", "public-safety", "PUBLIC_SAFETY" and friends.
fn fold_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! impl_named_enum {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let folded = fold_name(s);
                $ty::ALL
                    .into_iter()
                    .find(|v| fold_name(v.label()) == folded)
                    .ok_or_else(|| ParseValueError::new($kind, s))
            }
        }
    };
}

impl_named_enum!(Category, "category");
impl_named_enum!(Status, "status");
impl_named_enum!(Severity, "severity");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_matches_rank() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn parses_loose_names() {
        assert_eq!("public-safety".parse::<Category>().unwrap(), Category::PublicSafety);
        assert_eq!("Public Safety".parse::<Category>().unwrap(), Category::PublicSafety);
        assert_eq!("RESOLVED".parse::<Status>().unwrap(), Status::Resolved);
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn public_safety_uses_spaced_json_name() {
        let json = serde_json::to_string(&Category::PublicSafety).unwrap();
        assert_eq!(json, "\"Public Safety\"");
    }
}
