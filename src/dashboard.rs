use crate::{
    analytics::{self, MonthlyTrend},
    config::Config,
    model::Report,
    stats::{self, CategoryCount, ReportStats},
    util::{now_rfc3339, sha256_hex},
};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub generated_at: String,
    /// sha256 of the serialized collection the numbers were computed from.
    pub source_digest: String,
    pub stats: ReportStats,
    pub resolution_rate: f64,
    pub categories: Vec<CategoryCount>,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub recent: Vec<Report>,
}

pub fn summarize(cfg: &Config, reports: &[Report]) -> Result<DashboardSummary> {
    let source_digest = sha256_hex(&serde_json::to_vec(reports)?);
    Ok(DashboardSummary {
        generated_at: now_rfc3339(),
        source_digest,
        stats: stats::aggregate_stats(reports),
        resolution_rate: analytics::resolution_rate(reports),
        categories: stats::category_distribution(reports),
        monthly_trends: analytics::monthly_trends(reports, Some(cfg.analytics.trend_months)),
        recent: stats::recent(reports, cfg.dashboard.recent_limit).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn summary_of_builtin_fixture() {
        let mut cfg = Config::default();
        cfg.dashboard.recent_limit = 3;
        let reports = fixture::builtin().unwrap();

        let summary = summarize(&cfg, &reports).unwrap();
        assert_eq!(summary.stats.total, 6);
        assert_eq!(summary.categories.len(), 6);
        assert_eq!(summary.recent.len(), 3);
        assert_eq!(summary.monthly_trends.len(), 1);
        assert_eq!(summary.source_digest.len(), 64);

        let again = summarize(&cfg, &reports).unwrap();
        assert_eq!(again.source_digest, summary.source_digest);
    }
}
