use crate::model::{Category, Severity};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub search: Search,
    #[serde(default)]
    pub dashboard: Dashboard,
    #[serde(default)]
    pub analytics: Analytics,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub triage: Triage,
    #[serde(default)]
    pub fixture: Fixture,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
    /// Empty means the built-in fixture.
    pub fixture_path: String,
}
impl Default for Data {
    fn default() -> Self {
        Self {
            fixture_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Search {
    pub normalize_unicode: bool,
}
impl Default for Search {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub recent_limit: usize,
}
impl Default for Dashboard {
    fn default() -> Self {
        Self { recent_limit: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    pub trend_months: usize,
    /// Target days to resolution, keyed by category label.
    pub resolution_targets: BTreeMap<String, f64>,
}
impl Analytics {
    pub fn target_for(&self, category: Category) -> Option<f64> {
        self.resolution_targets.get(category.label()).copied()
    }
}
impl Default for Analytics {
    fn default() -> Self {
        let resolution_targets = [
            (Category::Roads, 3.0),
            (Category::Water, 2.0),
            (Category::Waste, 2.0),
            (Category::PublicSafety, 1.0),
            (Category::Parks, 5.0),
            (Category::Utilities, 1.0),
        ]
        .into_iter()
        .map(|(c, days)| (c.label().to_string(), days))
        .collect();
        Self {
            trend_months: 6,
            resolution_targets,
        }
    }
}

/// Response-time thresholds in hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub critical_hours: u32,
    pub high_hours: u32,
    pub medium_hours: u32,
    pub low_hours: u32,
}
impl Thresholds {
    pub fn hours_for(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical_hours,
            Severity::High => self.high_hours,
            Severity::Medium => self.medium_hours,
            Severity::Low => self.low_hours,
        }
    }
}
impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical_hours: 24,
            high_hours: 72,
            medium_hours: 168,
            low_hours: 336,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triage {
    pub enforce_lifecycle: bool,
}
impl Default for Triage {
    fn default() -> Self {
        Self {
            enforce_lifecycle: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub strict_contact: bool,
    pub email_pattern: String,
    pub phone_pattern: String,
}
impl Default for Fixture {
    fn default() -> Self {
        Self {
            strict_contact: false,
            email_pattern: "^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$".into(),
            phone_pattern: "^\\+?[0-9][0-9\\-\\s().]{5,}$".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
