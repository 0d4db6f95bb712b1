use crate::{
    config::Config,
    error::FixtureError,
    model::{Report, ReportId},
};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN: &str = include_str!("../fixtures/reports.json");

/// The six-report collection the dashboard ships with.
pub fn builtin() -> Result<Vec<Report>> {
    parse(BUILTIN).with_context(|| "parsing built-in fixture")
}

pub fn parse(raw: &str) -> Result<Vec<Report>, FixtureError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load(cfg: &Config, path: &Path) -> Result<Vec<Report>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixture: {}", path.display()))?;
    let reports = parse(&raw).with_context(|| format!("fixture: {}", path.display()))?;
    validate(cfg, &reports).with_context(|| format!("fixture: {}", path.display()))?;
    debug!("loaded {} reports from {}", reports.len(), path.display());
    Ok(reports)
}

/// Loads `path` when given, otherwise `data.fixture_path`, otherwise the built-in set.
pub fn resolve(cfg: &Config, path: Option<&Path>) -> Result<Vec<Report>> {
    if let Some(p) = path {
        return load(cfg, p);
    }
    if !cfg.data.fixture_path.is_empty() {
        return load(cfg, Path::new(&cfg.data.fixture_path));
    }
    let reports = builtin()?;
    validate(cfg, &reports)?;
    Ok(reports)
}

pub fn save(path: &Path, reports: &[Report]) -> Result<()> {
    let raw = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, raw).with_context(|| format!("writing fixture: {}", path.display()))
}

pub fn validate(cfg: &Config, reports: &[Report]) -> Result<(), FixtureError> {
    let contact = ContactRules::new(cfg)?;
    let mut seen: HashSet<ReportId> = HashSet::with_capacity(reports.len());

    for (index, r) in reports.iter().enumerate() {
        if r.id == 0 {
            return Err(FixtureError::ZeroId { index });
        }
        if !seen.insert(r.id) {
            return Err(FixtureError::DuplicateId(r.id));
        }
        if let Some(resolved) = r.resolved_at {
            if resolved < r.created_at {
                return Err(FixtureError::ResolvedBeforeCreated(r.id));
            }
        }
        let score = r.ai_verification.score;
        if !(0.0..=1.0).contains(&score) {
            return Err(FixtureError::ScoreOutOfRange { id: r.id, score });
        }
        contact.check(cfg, r)?;
    }

    Ok(())
}

struct ContactRules {
    email: Regex,
    phone: Regex,
}

impl ContactRules {
    fn new(cfg: &Config) -> Result<Self, FixtureError> {
        Ok(Self {
            email: Regex::new(&cfg.fixture.email_pattern)?,
            phone: Regex::new(&cfg.fixture.phone_pattern)?,
        })
    }

    fn check(&self, cfg: &Config, r: &Report) -> Result<(), FixtureError> {
        let fields = [
            ("email", &self.email, r.citizen_info.email.as_str()),
            ("phone", &self.phone, r.citizen_info.phone.as_str()),
        ];
        for (field, re, value) in fields {
            if re.is_match(value) {
                continue;
            }
            if cfg.fixture.strict_contact {
                return Err(FixtureError::Contact {
                    id: r.id,
                    field,
                    value: value.to_string(),
                });
            }
            warn!("report {}: suspicious {field} {value:?}", r.id);
        }
        Ok(())
    }
}
