use crate::{
    config::{Analytics, Thresholds},
    model::{Category, Report, ReportId, Severity, Status},
    stats::percentage,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Duration, Month, OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MonthKey {
    year: i32,
    month: u8,
}

impl MonthKey {
    fn of(ts: OffsetDateTime) -> Self {
        let utc = ts.to_offset(UtcOffset::UTC);
        Self {
            year: utc.year(),
            month: utc.month() as u8,
        }
    }

    fn next(self) -> Self {
        if self.month == Month::December as u8 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    fn label(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Chronological months from the earliest to the latest key, gaps included.
fn month_span<T: Default>(
    mut buckets: BTreeMap<MonthKey, T>,
    window: Option<usize>,
) -> Vec<(String, T)> {
    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut key = first;
    while key <= last {
        out.push((key.label(), buckets.remove(&key).unwrap_or_default()));
        key = key.next();
    }

    if let Some(n) = window {
        let skip = out.len().saturating_sub(n);
        out.drain(..skip);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub reports: usize,
    pub resolved: usize,
}

/// Reports created and reports resolved per calendar month (UTC).
pub fn monthly_trends(reports: &[Report], window: Option<usize>) -> Vec<MonthlyTrend> {
    let mut buckets: BTreeMap<MonthKey, (usize, usize)> = BTreeMap::new();
    for r in reports {
        buckets.entry(MonthKey::of(r.created_at)).or_default().0 += 1;
        if let Some(resolved) = r.resolved_at {
            buckets.entry(MonthKey::of(resolved)).or_default().1 += 1;
        }
    }

    month_span(buckets, window)
        .into_iter()
        .map(|(month, (reports, resolved))| MonthlyTrend {
            month,
            reports,
            resolved,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityTrend {
    pub month: String,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityTrend {
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

pub fn severity_trends(reports: &[Report], window: Option<usize>) -> Vec<SeverityTrend> {
    let mut buckets: BTreeMap<MonthKey, SeverityTrend> = BTreeMap::new();
    for r in reports {
        let entry = buckets.entry(MonthKey::of(r.created_at)).or_default();
        match r.severity {
            Severity::Critical => entry.critical += 1,
            Severity::High => entry.high += 1,
            Severity::Medium => entry.medium += 1,
            Severity::Low => entry.low += 1,
        }
    }

    month_span(buckets, window)
        .into_iter()
        .map(|(month, trend)| SeverityTrend { month, ..trend })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionTime {
    pub category: Category,
    pub resolved: usize,
    pub avg_days: Option<f64>,
    pub target_days: Option<f64>,
    pub on_target: Option<bool>,
}

/// Average days from creation to resolution per category, in first-seen order.
pub fn resolution_times(reports: &[Report], cfg: &Analytics) -> Vec<ResolutionTime> {
    let mut sums: Vec<(Category, usize, f64)> = Vec::new();
    for r in reports {
        let idx = match sums.iter().position(|(c, _, _)| *c == r.category) {
            Some(i) => i,
            None => {
                sums.push((r.category, 0, 0.0));
                sums.len() - 1
            }
        };
        if let Some(resolved) = r.resolved_at {
            let days = (resolved - r.created_at).as_seconds_f64() / 86_400.0;
            sums[idx].1 += 1;
            sums[idx].2 += days;
        }
    }

    sums.into_iter()
        .map(|(category, resolved, total_days)| {
            let avg_days =
                (resolved > 0).then(|| (total_days / resolved as f64 * 10.0).round() / 10.0);
            let target_days = cfg.target_for(category);
            let on_target = avg_days.zip(target_days).map(|(avg, target)| avg <= target);
            ResolutionTime {
                category,
                resolved,
                avg_days,
                target_days,
                on_target,
            }
        })
        .collect()
}

/// Resolved share of the collection as a percentage.
pub fn resolution_rate(reports: &[Report]) -> f64 {
    let resolved = reports.iter().filter(|r| r.status == Status::Resolved).count();
    percentage(resolved, reports.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueReport {
    pub id: ReportId,
    pub title: String,
    pub severity: Severity,
    pub status: Status,
    pub age_hours: i64,
    pub threshold_hours: u32,
    pub overdue_hours: i64,
}

/// Open reports older than their severity's response threshold, most overdue first.
pub fn overdue(
    reports: &[Report],
    thresholds: &Thresholds,
    now: OffsetDateTime,
) -> Vec<OverdueReport> {
    let mut late: Vec<(Duration, OverdueReport)> = reports
        .iter()
        .filter(|r| r.status.is_open())
        .filter_map(|r| {
            let age = now - r.created_at;
            let threshold_hours = thresholds.hours_for(r.severity);
            let over = age - Duration::hours(i64::from(threshold_hours));
            (over > Duration::ZERO).then(|| {
                let report = OverdueReport {
                    id: r.id,
                    title: r.title.clone(),
                    severity: r.severity,
                    status: r.status,
                    age_hours: age.whole_hours(),
                    threshold_hours,
                    overdue_hours: over.whole_hours(),
                };
                (over, report)
            })
        })
        .collect();
    late.sort_by(|a, b| b.0.cmp(&a.0));
    late.into_iter().map(|(_, report)| report).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub verified: usize,
    pub unverified: usize,
    pub mean_score: Option<f64>,
}

pub fn verification_summary(reports: &[Report]) -> VerificationSummary {
    let verified = reports.iter().filter(|r| r.ai_verification.verified).count();
    let mean_score = (!reports.is_empty()).then(|| {
        let sum: f64 = reports.iter().map(|r| r.ai_verification.score).sum();
        (sum / reports.len() as f64 * 100.0).round() / 100.0
    });
    VerificationSummary {
        verified,
        unverified: reports.len() - verified,
        mean_score,
    }
}
